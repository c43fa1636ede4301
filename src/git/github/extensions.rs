//! Using GitHub's compare API.

use octocrab::Octocrab;
use serde::{Deserialize, Serialize};

#[async_trait::async_trait]
pub trait CompareExt {
    async fn compare_page(&self, route: &str, query: &PageQuery) -> octocrab::Result<Comparison>;
}

#[async_trait::async_trait]
impl CompareExt for Octocrab {
    async fn compare_page(&self, route: &str, query: &PageQuery) -> octocrab::Result<Comparison> {
        self.get(route, Some(query)).await
    }
}

/// Paging parameters of the compare endpoint.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PageQuery {
    pub per_page: u8,
    pub page: u32,
}

/// The parts of a comparison response that we care about.
#[derive(Clone, Debug, Deserialize)]
pub struct Comparison {
    #[serde(default)]
    pub total_commits: Option<usize>,
    pub commits: Vec<ComparedCommit>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ComparedCommit {
    pub sha: String,
    pub commit: CommitDetails,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CommitDetails {
    pub message: String,
}
