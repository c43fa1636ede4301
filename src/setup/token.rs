use derivative::Derivative;
use log::{debug, warn};
use std::fs;
use std::path::Path;

pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Bearer token for the GitHub API. The secret never shows up in debug output.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct ApiToken(#[derivative(Debug = "ignore")] String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }

    /// Looks up a token in the `GITHUB_TOKEN` environment variable first and in the given token
    /// file second. Blank values are ignored.
    pub fn discover(token_file: &Path) -> Option<Self> {
        let token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .and_then(non_blank)
            .map(|t| {
                debug!("using GitHub API token from {TOKEN_ENV_VAR}");
                t
            })
            .or_else(|| Self::read_file(token_file));
        if token.is_none() {
            warn!("no GitHub API token found; sending anonymous requests");
        }
        token.map(Self)
    }

    fn read_file(token_file: &Path) -> Option<String> {
        match fs::read_to_string(token_file) {
            Ok(content) => {
                debug!("using GitHub API token from {}", token_file.display());
                non_blank(content)
            }
            Err(error) => {
                debug!("no token file at {}: {error}", token_file.display());
                None
            }
        }
    }
}

fn non_blank(s: String) -> Option<String> {
    match s.trim() {
        "" => None,
        trimmed => Some(trimmed.to_owned()),
    }
}
