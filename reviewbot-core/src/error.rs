//! Error types for reviewer assignment
//!
//! The `Display` output of each variant is the exact message reported
//! through the failure channel.

use thiserror::Error;

/// Result type alias for reviewbot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for reviewbot operations
#[derive(Error, Debug)]
pub enum Error {
    /// The `branch` input is missing or empty
    #[error("Branch input is required")]
    MissingBranch,

    /// Neither `reviewers` nor `team-reviewers` yielded a name
    #[error("At least one of reviewers or team-reviewers must be provided")]
    NoReviewers,

    /// The event payload has no `pull_request` object
    #[error("Could not get pull request from context")]
    MissingPullRequest,

    /// Repository owner/name could not be determined
    #[error("context.repo requires a GITHUB_REPOSITORY environment variable like 'owner/repo'")]
    MissingRepository,

    /// Event context could not be loaded
    #[error("Invalid event context: {0}")]
    Context(String),

    /// The hosting API rejected the request; the message is passed through verbatim
    #[error("{0}")]
    Api(String),

    /// An output could not be published
    #[error("Unable to set output: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
