use log::info;
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub mod error;
pub mod extract;
pub mod git;
pub mod present;
pub mod setup;
pub mod validate;

pub use error::{Error, ErrorKind};
pub use extract::{extract_tickets, ExtractionStrategy, PatternStrategy, WholeMessageStrategy};
pub use git::github::{BranchComparator, CompareRequest, GitHubComparator};
pub use git::{dedup_commits, Commit};
pub use present::{Presenter, ResponseType};
pub use setup::{ApiToken, Config};
pub use validate::TicketValidator;

pub type Result<T> = std::result::Result<T, Error>;

/// Identifier of a ticket found in a commit message. Tickets are ordered by the byte order of
/// their text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TicketId(String);

impl TicketId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TicketId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for TicketId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The stages that turn a list of commits into tickets: extraction with the configured strategy,
/// followed by the optional prefix validation.
pub struct TicketPipeline {
    strategy: Box<dyn ExtractionStrategy + Send + Sync>,
    validator: Option<TicketValidator>,
}

impl TicketPipeline {
    pub fn new(
        strategy: Box<dyn ExtractionStrategy + Send + Sync>,
        validator: Option<TicketValidator>,
    ) -> Self {
        Self {
            strategy,
            validator,
        }
    }

    /// Builds the pipeline described by the configuration.
    ///
    /// # Errors
    /// Returns an ErrorKind::InvalidPattern if the configured ticket pattern does not compile.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            extract::strategy_from_settings(&config.extraction)?,
            TicketValidator::from_settings(&config.validation),
        ))
    }

    /// Replaces the validator, e.g., to enable validation for a single run.
    pub fn with_validator(mut self, validator: Option<TicketValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Deduplicates the commits and returns their tickets in discovery order.
    pub fn tickets(&self, commits: Vec<Commit>) -> Vec<TicketId> {
        let total = commits.len();
        let commits = dedup_commits(commits);
        info!(
            "{} unique commit messages among {total} commits",
            commits.len()
        );
        let tickets = extract_tickets(&commits, self.strategy.as_ref());
        match &self.validator {
            Some(validator) => validator.validate(tickets),
            None => tickets,
        }
    }
}

/// Fetches the commits that `request.head` introduces over `request.base` and collects the
/// distinct tickets mentioned in their messages, in discovery order.
///
/// # Errors
/// Returns an ErrorKind::RemoteFetch if the commits could not be retrieved.
pub async fn tickets_between_branches<C>(
    comparator: &C,
    request: &CompareRequest,
    pipeline: &TicketPipeline,
) -> Result<Vec<TicketId>>
where
    C: BranchComparator + ?Sized,
{
    info!(
        "fetching commits from GitHub for branches {} and {}",
        request.base, request.head
    );
    let commits = comparator.compare(request).await?;
    let tickets = pipeline.tickets(commits);
    info!("found {} tickets", tickets.len());
    Ok(tickets)
}
