use crate::setup::config::TrackerSettings;
use crate::{Result, TicketId};
use clap::ValueEnum;
use std::fmt::{Display, Formatter};

// URL-encoded ", "
const TRACKER_JOINER: &str = "%2C%20";

/// How the final ticket list is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ResponseType {
    /// A quoted issue tracker search URL for all tickets
    #[default]
    Jira,
    /// A single comma separated line
    List,
    /// One ticket per line
    Lines,
    /// A JSON array of strings
    Json,
}

impl Display for ResponseType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResponseType::Jira => "jira",
            ResponseType::List => "list",
            ResponseType::Lines => "lines",
            ResponseType::Json => "json",
        };
        write!(f, "{name}")
    }
}

/// Sorts tickets and renders them for the user.
#[derive(Debug, Clone)]
pub struct Presenter {
    tracker_base_url: String,
}

impl Presenter {
    pub fn new(tracker: &TrackerSettings) -> Self {
        Self {
            tracker_base_url: tracker.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Sorts the tickets in ascending byte order.
    pub fn sort(mut tickets: Vec<TicketId>) -> Vec<TicketId> {
        tickets.sort();
        tickets
    }

    /// Sorts the tickets and renders them in the requested form.
    ///
    /// # Errors
    /// Returns an ErrorKind::Json if the JSON rendering fails.
    pub fn present(&self, response_type: ResponseType, tickets: Vec<TicketId>) -> Result<String> {
        let tickets = Self::sort(tickets);
        let output = match response_type {
            ResponseType::Jira => format!("Jira URL: \"{}\"", self.tracker_url(&tickets)),
            ResponseType::List => format!("Tickets: {}", join(&tickets, ", ")),
            ResponseType::Lines => join(&tickets, "\n"),
            ResponseType::Json => serde_json::to_string(&tickets)?,
        };
        Ok(output)
    }

    /// Builds a search URL for the issue tracker that lists all given tickets.
    pub fn tracker_url(&self, tickets: &[TicketId]) -> String {
        format!(
            "{}/issues/?jql=issueKey%20in%20({})",
            self.tracker_base_url,
            join(tickets, TRACKER_JOINER)
        )
    }
}

fn join(tickets: &[TicketId], separator: &str) -> String {
    tickets
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<&str>>()
        .join(separator)
}
