use crate::Result;
use log::debug;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_TOKEN_FILE: &str = ".github-api-token";
pub const DEFAULT_TICKET_PATTERN: &str = r"\b[A-Z][A-Z0-9]+-\d+\b";
pub const DEFAULT_TRACKER_URL: &str = "https://swipejobs.atlassian.net";
// App project tags
pub const DEFAULT_PREFIXES: [&str; 4] = ["AFE-", "RSB-", "SPB-", "TABT-"];

/// Configuration of a single run. It is loaded once at startup and never modified afterwards.
///
/// Every section falls back to its defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubSettings,
    pub extraction: ExtractionSettings,
    pub validation: ValidationSettings,
    pub tracker: TrackerSettings,
}

impl Config {
    /// Loads the configuration from the given YAML file.
    ///
    /// # Errors
    /// Returns an ErrorKind::IO if the file cannot be opened and an ErrorKind::Config if it does
    /// not hold a valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("loading configuration from {}", path.display());
        let config = serde_yaml::from_reader(File::open(path)?)?;
        Ok(config)
    }

    /// Loads the configuration file if one was given, otherwise the defaults are used.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    pub api_base_url: String,
    pub token_file: PathBuf,
    #[serde(deserialize_with = "positive_secs")]
    pub request_timeout_secs: u64,
    pub retries: u8,
    pub per_page: u8,
}

impl GitHubSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The number of commits to request per page. GitHub serves at most 100.
    pub fn page_size(&self) -> u8 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }
}

const MAX_PER_PAGE: u8 = 100;

fn positive_secs<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match u64::deserialize(deserializer)? {
        0 => Err(D::Error::custom(
            "request_timeout_secs must be greater than 0",
        )),
        secs => Ok(secs),
    }
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            request_timeout_secs: 30,
            retries: 1,
            per_page: 100,
        }
    }
}

/// Which extraction strategy to use. `whole_message` treats each commit message as a ticket and
/// is only meant for debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ExtractionSettings {
    Pattern {
        #[serde(default = "default_pattern")]
        pattern: String,
    },
    WholeMessage,
}

fn default_pattern() -> String {
    DEFAULT_TICKET_PATTERN.to_string()
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self::Pattern {
            pattern: default_pattern(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub enabled: bool,
    pub prefixes: Vec<String>,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    pub base_url: String,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TRACKER_URL.to_string(),
        }
    }
}
