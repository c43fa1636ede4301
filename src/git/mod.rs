pub mod github;

use log::debug;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// A commit as reported by the comparison endpoint. Only the id and the full message are kept.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Commit {
    id: String,
    message: String,
}

impl Commit {
    pub fn new(id: String, message: String) -> Self {
        Commit { id, message }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Commit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let summary = self.message.lines().next().unwrap_or_default();
        write!(f, "{} {}", self.id, summary)
    }
}

/// Drops every commit whose message was already seen earlier in the list.
///
/// Cherry-picked commits show up with a different id but the exact same message. Keeping only
/// the first occurrence prevents counting the same logical change twice. Messages are compared
/// byte for byte, without any normalization.
pub fn dedup_commits(commits: Vec<Commit>) -> Vec<Commit> {
    let total = commits.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(total);
    let unique: Vec<Commit> = commits
        .into_iter()
        .filter(|c| seen.insert(c.message.clone()))
        .collect();
    debug!(
        "removed {} commits with duplicate messages",
        total - unique.len()
    );
    unique
}
