mod extensions;

use crate::error::{root_cause, Error};
use crate::git::github::extensions::{CompareExt, Comparison, PageQuery};
use crate::git::Commit;
use crate::setup::config::GitHubSettings;
use crate::setup::ApiToken;
use crate::Result;
use log::{debug, info, warn};
use octocrab::Octocrab;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

const RETRY_DELAY: Duration = Duration::from_millis(500);

/// The two refs of a repository that are to be compared. Commits reachable from `head` but not
/// from `base` are what the comparison reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareRequest {
    pub owner: String,
    pub repo: String,
    pub base: String,
    pub head: String,
}

impl CompareRequest {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        base: impl Into<String>,
        head: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            base: base.into(),
            head: head.into(),
        }
    }

    /// The API route of the compare endpoint, relative to the API base URL. Every part is
    /// percent-encoded; slashes in branch names are kept.
    pub fn route(&self) -> String {
        format!(
            "/repos/{}/{}/compare/{}...{}",
            encode_path(&self.owner),
            encode_path(&self.repo),
            encode_path(&self.base),
            encode_path(&self.head)
        )
    }
}

impl Display for CompareRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} {}...{}",
            self.owner, self.repo, self.base, self.head
        )
    }
}

/// Source of the commits that one branch introduces relative to another.
#[async_trait::async_trait]
pub trait BranchComparator {
    /// Returns the commits of the comparison in the order reported by the remote.
    ///
    /// # Errors
    /// Returns an ErrorKind::RemoteFetch if the remote could not be reached or did not answer
    /// with a successful comparison.
    async fn compare(&self, request: &CompareRequest) -> Result<Vec<Commit>>;
}

/// Comparator backed by the GitHub REST API.
pub struct GitHubComparator {
    crab: Octocrab,
    settings: GitHubSettings,
}

impl GitHubComparator {
    /// Builds a client for the configured API base URL. Requests are sent anonymously if no
    /// token is given.
    pub fn new(settings: GitHubSettings, token: Option<ApiToken>) -> Result<Self> {
        let mut builder = Octocrab::builder().base_uri(settings.api_base_url.as_str())?;
        if let Some(token) = token {
            debug!("initializing octocrab with token");
            builder = builder.personal_token(token.secret().to_owned());
        }
        Ok(Self {
            crab: builder.build()?,
            settings,
        })
    }

    /// Retrieves a single page, retrying transient failures as often as configured.
    async fn fetch_page(&self, route: &str, query: &PageQuery) -> Result<Comparison> {
        let mut attempt = 0;
        loop {
            let request = self.crab.compare_page(route, query);
            let (error, transient) =
                match tokio::time::timeout(self.settings.request_timeout(), request).await {
                    Ok(Ok(comparison)) => return Ok(comparison),
                    Ok(Err(error)) => {
                        let transient = is_transient(&error);
                        let reason = describe(&error);
                        (Error::remote_fetch_with_reason(route, reason, error), transient)
                    }
                    Err(elapsed) => (Error::remote_fetch(route, elapsed), true),
                };
            if !transient || attempt >= self.settings.retries {
                return Err(error);
            }
            attempt += 1;
            warn!(
                "{error}; retrying ({attempt}/{})",
                self.settings.retries
            );
            tokio::time::sleep(RETRY_DELAY).await;
        }
    }
}

#[async_trait::async_trait]
impl BranchComparator for GitHubComparator {
    async fn compare(&self, request: &CompareRequest) -> Result<Vec<Commit>> {
        let start = Instant::now();
        let route = request.route();
        let per_page = self.settings.page_size();
        let mut commits: Vec<Commit> = vec![];
        let mut page = 1;
        loop {
            debug!("requesting page {page} of {route}");
            let query = PageQuery { per_page, page };
            let comparison = self.fetch_page(&route, &query).await?;
            let received = comparison.commits.len();
            commits.extend(
                comparison
                    .commits
                    .into_iter()
                    .map(|c| Commit::new(c.sha, c.commit.message)),
            );
            // GitHub may serve fewer commits per page than requested, so a short page only
            // ends the comparison when no total is reported.
            let complete = match comparison.total_commits {
                Some(total) => commits.len() >= total || received == 0,
                None => received < usize::from(per_page),
            };
            if complete {
                break;
            }
            page += 1;
        }
        info!(
            "retrieved {} commits for {request} in {:?}",
            commits.len(),
            start.elapsed()
        );
        Ok(commits)
    }
}

/// Transport failures are worth another attempt; answers from GitHub and undecodable bodies are
/// not.
fn is_transient(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Hyper { .. } | octocrab::Error::Service { .. } | octocrab::Error::Http { .. }
    )
}

/// A one-line description of a failed request. Errors from GitHub itself carry their message;
/// for everything else the root cause is used.
fn describe(error: &octocrab::Error) -> String {
    match error {
        octocrab::Error::GitHub { source, .. } => format!("GitHub answered: {}", source.message),
        other => root_cause(other),
    }
}

fn encode_path(part: &str) -> String {
    let mut encoded = String::with_capacity(part.len());
    for byte in part.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                encoded.push(char::from(byte))
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_uses_three_dot_syntax() {
        let request = CompareRequest::new("octo", "app", "develop", "release/1.2");
        assert_eq!(
            request.route(),
            "/repos/octo/app/compare/develop...release/1.2"
        );
        assert_eq!(request.to_string(), "octo/app develop...release/1.2");
    }

    #[test]
    fn branch_names_are_percent_encoded() {
        let request = CompareRequest::new("octo", "app", "develop", "fix/#12 ä?");
        assert_eq!(
            request.route(),
            "/repos/octo/app/compare/develop...fix/%2312%20%C3%A4%3F"
        );
        // the readable form is left alone
        assert_eq!(request.to_string(), "octo/app develop...fix/#12 ä?");
    }
}
