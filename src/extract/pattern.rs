use crate::extract::ExtractionStrategy;
use crate::Result;
use regex::Regex;

const NAME: &str = "PatternStrategy";

/// PatternStrategy reports every non-overlapping match of a regular expression as a ticket.
///
/// With the default pattern `\b[A-Z][A-Z0-9]+-\d+\b` this finds keys such as `AFE-123` or
/// `TABT-7` anywhere in a commit message, including its body.
#[derive(Debug, Clone)]
pub struct PatternStrategy {
    regex: Regex,
}

impl PatternStrategy {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl ExtractionStrategy for PatternStrategy {
    fn find<'m>(&self, message: &'m str) -> Vec<&'m str> {
        self.regex.find_iter(message).map(|m| m.as_str()).collect()
    }

    fn name(&self) -> &'static str {
        NAME
    }
}
