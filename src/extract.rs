use crate::git::Commit;
use crate::setup::config::ExtractionSettings;
use crate::{Result, TicketId};
use log::debug;
use std::collections::HashSet;
use std::time::Instant;

pub mod pattern;
pub mod whole_message;

pub use pattern::PatternStrategy;
pub use whole_message::WholeMessageStrategy;

/// Trait for the different ways of finding tickets in a commit message.
///
/// A strategy only looks at one message at a time. Collecting the results of all messages and
/// filtering repeated sightings is done by [`extract_tickets`].
///
/// # Examples
/// A strategy that reports the first word of each message.
/// ```
/// use ticket_harvest::ExtractionStrategy;
///
/// struct FirstWord();
///
/// impl ExtractionStrategy for FirstWord {
///     fn find<'m>(&self, message: &'m str) -> Vec<&'m str> {
///         message.split_whitespace().take(1).collect()
///     }
///
///     fn name(&self) -> &'static str {
///         "FirstWord"
///     }
/// }
///
/// let commits = vec![
///     ticket_harvest::Commit::new("a".to_string(), "AFE-1 add login".to_string()),
///     ticket_harvest::Commit::new("b".to_string(), "AFE-1 fix login".to_string()),
/// ];
/// let tickets = ticket_harvest::extract_tickets(&commits, &FirstWord());
/// assert_eq!(tickets.len(), 1);
/// assert_eq!(tickets[0].as_str(), "AFE-1");
/// ```
pub trait ExtractionStrategy {
    /// Returns all ticket candidates in the given message, in the order they appear.
    fn find<'m>(&self, message: &'m str) -> Vec<&'m str>;

    /// The strategy's name, used in log messages.
    fn name(&self) -> &'static str;
}

/// Builds the strategy selected by the configuration.
///
/// # Errors
/// Returns an ErrorKind::InvalidPattern if the configured regular expression does not compile.
pub fn strategy_from_settings(
    settings: &ExtractionSettings,
) -> Result<Box<dyn ExtractionStrategy + Send + Sync>> {
    let strategy: Box<dyn ExtractionStrategy + Send + Sync> = match settings {
        ExtractionSettings::Pattern { pattern } => Box::new(PatternStrategy::new(pattern)?),
        ExtractionSettings::WholeMessage => Box::new(WholeMessageStrategy),
    };
    debug!("extracting tickets with {}", strategy.name());
    Ok(strategy)
}

/// Collects the distinct tickets of all commit messages in the order of their first sighting.
pub fn extract_tickets<S>(commits: &[Commit], strategy: &S) -> Vec<TicketId>
where
    S: ExtractionStrategy + ?Sized,
{
    let start = Instant::now();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut tickets = vec![];
    for commit in commits {
        for candidate in strategy.find(commit.message()) {
            if seen.insert(candidate) {
                tickets.push(TicketId::from(candidate));
            }
        }
    }
    debug!(
        "{} found {} tickets in {} commits in {:?}",
        strategy.name(),
        tickets.len(),
        commits.len(),
        start.elapsed()
    );
    tickets
}
