//! Triggering event context
//!
//! Mirrors the subset of the workflow run context the step needs: the event
//! name, the webhook payload found at `GITHUB_EVENT_PATH`, and the repository
//! from `GITHUB_REPOSITORY`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Kind of event that triggered the workflow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// `pull_request`
    PullRequest,
    /// `pull_request_target`
    PullRequestTarget,
    /// Any other event name
    Other(String),
}

impl EventKind {
    /// Whether this event carries a pull request the step can act on
    pub fn is_pull_request(&self) -> bool {
        matches!(self, EventKind::PullRequest | EventKind::PullRequestTarget)
    }
}

impl From<&str> for EventKind {
    fn from(name: &str) -> Self {
        match name {
            "pull_request" => EventKind::PullRequest,
            "pull_request_target" => EventKind::PullRequestTarget,
            other => EventKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::PullRequest => write!(f, "pull_request"),
            EventKind::PullRequestTarget => write!(f, "pull_request_target"),
            EventKind::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Branch reference of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BranchRef {
    /// Branch name, e.g. `main`
    #[serde(rename = "ref")]
    pub ref_field: String,
}

/// Pull request fields read from the event payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestRef {
    /// Pull request number
    pub number: u64,
    /// Branch the pull request targets
    pub base: BranchRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

/// Repository object of the event payload
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryRef {
    pub name: String,
    pub owner: RepositoryOwner,
}

/// Webhook payload of the triggering event
///
/// Unknown fields are ignored; a missing or `null` `pull_request` reads as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
    #[serde(default)]
    pub repository: Option<RepositoryRef>,
}

/// Repository a pull request belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    pub owner: String,
    pub repo: String,
}

impl FromStr for Repo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Repo {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(Error::Context(format!(
                "Invalid repository format: {}. Expected owner/repo",
                s
            ))),
        }
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Context of the current workflow run
#[derive(Debug, Clone)]
pub struct EventContext {
    /// Triggering event
    pub event: EventKind,
    /// Webhook payload
    pub payload: EventPayload,
    repository: Option<String>,
}

impl EventContext {
    /// Create a context from already-loaded parts
    pub fn new(event_name: &str, payload: EventPayload, repository: Option<String>) -> Self {
        Self {
            event: EventKind::from(event_name),
            payload,
            repository: repository.filter(|r| !r.is_empty()),
        }
    }

    /// Load the context from the runner's event file
    ///
    /// A missing event file yields an empty payload. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn load(
        event_name: &str,
        event_path: Option<&Path>,
        repository: Option<String>,
    ) -> Result<Self> {
        let payload = match event_path {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "Reading event payload");
                let contents = std::fs::read_to_string(path)?;
                serde_json::from_str(&contents).map_err(|e| {
                    Error::Context(format!(
                        "Failed to parse event payload {}: {}",
                        path.display(),
                        e
                    ))
                })?
            }
            Some(path) => {
                warn!(path = %path.display(), "GITHUB_EVENT_PATH does not exist");
                EventPayload::default()
            }
            None => EventPayload::default(),
        };

        Ok(Self::new(event_name, payload, repository))
    }

    /// Pull request of the event, if any
    pub fn pull_request(&self) -> Option<&PullRequestRef> {
        self.payload.pull_request.as_ref()
    }

    /// Resolve the repository
    ///
    /// `GITHUB_REPOSITORY` takes priority over the payload's `repository`.
    pub fn repo(&self) -> Result<Repo> {
        if let Some(repository) = &self.repository {
            return repository.parse();
        }

        self.payload
            .repository
            .as_ref()
            .map(|r| Repo {
                owner: r.owner.login.clone(),
                repo: r.name.clone(),
            })
            .ok_or(Error::MissingRepository)
    }
}
