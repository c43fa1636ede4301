use crate::extract::ExtractionStrategy;

const NAME: &str = "WholeMessageStrategy";

/// Treats every commit message as a ticket of its own. Useful to inspect what a comparison
/// contains before settling on a pattern; not meant for production use.
#[derive(Debug, Default, Clone, Copy)]
pub struct WholeMessageStrategy;

impl ExtractionStrategy for WholeMessageStrategy {
    fn find<'m>(&self, message: &'m str) -> Vec<&'m str> {
        vec![message]
    }

    fn name(&self) -> &'static str {
        NAME
    }
}
