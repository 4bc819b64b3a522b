//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub API error
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Invalid API base URL
    #[error("Invalid GitHub API URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Message to report to the user
    ///
    /// For errors returned by GitHub this is GitHub's own message, unprefixed.
    pub fn message(&self) -> String {
        match self {
            Error::Api(octocrab::Error::GitHub { source, .. }) => source.message.clone(),
            Error::Api(other) => other.to_string(),
            Error::Auth(msg) => msg.clone(),
            Error::InvalidUrl(_) => self.to_string(),
        }
    }
}

impl From<Error> for reviewbot_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidUrl(_) => reviewbot_core::Error::Context(err.to_string()),
            _ => reviewbot_core::Error::Api(err.message()),
        }
    }
}
