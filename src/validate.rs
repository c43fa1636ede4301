use crate::setup::config::ValidationSettings;
use crate::TicketId;
use log::debug;

/// Keeps only tickets that belong to one of the known projects, identified by the prefix of
/// their key (e.g., `AFE-`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketValidator {
    prefixes: Vec<String>,
}

impl TicketValidator {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    /// Returns a validator if validation is enabled in the given settings.
    pub fn from_settings(settings: &ValidationSettings) -> Option<Self> {
        settings
            .enabled
            .then(|| Self::new(settings.prefixes.clone()))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn accepts(&self, ticket: &TicketId) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| ticket.as_str().starts_with(prefix.as_str()))
    }

    /// Drops all tickets without an accepted prefix. The order of the remaining tickets is kept.
    pub fn validate(&self, tickets: Vec<TicketId>) -> Vec<TicketId> {
        let total = tickets.len();
        let valid: Vec<TicketId> = tickets.into_iter().filter(|t| self.accepts(t)).collect();
        debug!("{} of {total} tickets have a known prefix", valid.len());
        valid
    }
}
