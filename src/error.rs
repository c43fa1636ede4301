use octocrab::Error as GHError;
use regex::Error as RegexError;
use serde_json::Error as JsonError;
use serde_yaml::Error as SerdeError;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::io::Error as IOError;

#[derive(Debug)]
pub enum ErrorKind {
    MissingArgument(Vec<String>),
    RemoteFetch {
        route: String,
        reason: String,
        source: Box<dyn StdError + Send + Sync>,
    },
    Client(GHError),
    InvalidPattern(RegexError),
    Config(SerdeError),
    Json(JsonError),
    IO(IOError),
}

#[derive(Debug)]
pub struct Error(ErrorKind);

impl Error {
    pub fn new(error_kind: ErrorKind) -> Self {
        Self(error_kind)
    }

    /// Wraps any failure that occurred while talking to the comparison endpoint. The message
    /// shown to the user is the first line of the innermost cause.
    pub fn remote_fetch<E>(route: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let reason = root_cause(&source);
        Self::remote_fetch_with_reason(route, reason, source)
    }

    /// Like [`Error::remote_fetch`], with a message chosen by the caller.
    pub fn remote_fetch_with_reason<E>(
        route: impl Into<String>,
        reason: impl Into<String>,
        source: E,
    ) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(ErrorKind::RemoteFetch {
            route: route.into(),
            reason: reason.into(),
            source: Box::new(source),
        })
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// The process exit code that corresponds to this error. Usage errors share clap's code.
    pub fn exit_code(&self) -> u8 {
        match self.0 {
            ErrorKind::MissingArgument(_) => 2,
            _ => 1,
        }
    }
}

/// First line of the deepest error in the source chain. Some client errors append a backtrace to
/// their message, which is of no use to the user.
pub fn root_cause(error: &(dyn StdError + 'static)) -> String {
    let mut current = error;
    while let Some(next) = current.source() {
        current = next;
    }
    current
        .to_string()
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument(flags) => {
                write!(
                    f,
                    "Please provide all the params of this script. Missing {}",
                    flags.join(", ")
                )
            }
            Self::RemoteFetch { route, reason, .. } => {
                write!(f, "failed to fetch commits from {route}: {reason}")
            }
            Self::Client(error) => {
                write!(f, "could not set up the GitHub client: {error}")
            }
            Self::InvalidPattern(error) => {
                write!(f, "invalid ticket pattern: {error}")
            }
            Self::Config(error) => {
                write!(f, "invalid configuration: {error}")
            }
            Self::Json(error) => {
                write!(f, "{error}")
            }
            Self::IO(error) => {
                write!(f, "{error}")
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.0 {
            ErrorKind::MissingArgument(_) => None,
            ErrorKind::RemoteFetch { source, .. } => Some(source.as_ref()),
            ErrorKind::Client(error) => Some(error),
            ErrorKind::InvalidPattern(error) => Some(error),
            ErrorKind::Config(error) => Some(error),
            ErrorKind::Json(error) => Some(error),
            ErrorKind::IO(error) => Some(error),
        }
    }
}

impl From<SerdeError> for Error {
    fn from(error: serde_yaml::Error) -> Self {
        Self(ErrorKind::Config(error))
    }
}

impl From<JsonError> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self(ErrorKind::Json(error))
    }
}

impl From<RegexError> for Error {
    fn from(error: regex::Error) -> Self {
        Self(ErrorKind::InvalidPattern(error))
    }
}

impl From<GHError> for Error {
    fn from(error: octocrab::Error) -> Self {
        Self(ErrorKind::Client(error))
    }
}

impl From<IOError> for Error {
    fn from(error: std::io::Error) -> Self {
        Self(ErrorKind::IO(error))
    }
}
