//! Reviewer assignment step
//!
//! Validates inputs, checks that the triggering pull request targets the
//! configured branch and, if it does, requests the configured reviewers.
//! Early exits for other events and other branches are successful no-ops.

use secrecy::SecretString;
use tracing::{debug, info, warn};

use crate::api::{Assignment, ReviewRequest, ReviewerApi};
use crate::config::{Config, InputValues};
use crate::context::{EventContext, EventKind};
use crate::runtime::Runtime;
use crate::{Error, Result};

/// Output holding the comma-joined logins that were requested
pub const OUTPUT_REVIEWERS_ADDED: &str = "reviewers-added";

/// Output holding the comma-joined team slugs that were requested
pub const OUTPUT_TEAMS_ADDED: &str = "teams-added";

/// Why the step finished without touching the pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The event is not a pull request event
    NotPullRequest(EventKind),
    /// The pull request targets another branch
    BranchMismatch {
        /// Branch the pull request targets
        target: String,
        /// Branch from the `branch` input
        configured: String,
    },
}

/// Terminal outcome of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Reviewers were requested and outputs published
    Assigned(Assignment),
    /// Nothing to do
    Skipped(SkipReason),
    /// The run failed; the message was reported to the runtime
    Failed(String),
}

impl Outcome {
    /// Check if the run failed
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Run the step
///
/// `connect` builds the API client from the token. It is only called once
/// the event and branch checks pass. Errors never escape: they are reported
/// through `runtime` and returned as [`Outcome::Failed`].
pub async fn run<A, F>(
    inputs: InputValues,
    context: &EventContext,
    connect: F,
    runtime: &mut dyn Runtime,
) -> Outcome
where
    A: ReviewerApi,
    F: FnOnce(&SecretString) -> Result<A>,
{
    match assign(inputs, context, connect, runtime).await {
        Ok(outcome) => outcome,
        Err(err) => report_failure(runtime, &err),
    }
}

/// Report an error through the failure channel
pub fn report_failure(runtime: &mut dyn Runtime, err: &Error) -> Outcome {
    let message = err.to_string();
    debug!(error = ?err, "Reviewer assignment failed");

    if let Err(e) = runtime.set_failed(&message) {
        warn!(error = %e, "Unable to report failure to the runner");
    }

    Outcome::Failed(message)
}

async fn assign<A, F>(
    inputs: InputValues,
    context: &EventContext,
    connect: F,
    runtime: &mut dyn Runtime,
) -> Result<Outcome>
where
    A: ReviewerApi,
    F: FnOnce(&SecretString) -> Result<A>,
{
    let config = Config::from_inputs(inputs)?;

    if !context.event.is_pull_request() {
        info!(event = %context.event, "This action only runs on pull request events");
        return Ok(Outcome::Skipped(SkipReason::NotPullRequest(
            context.event.clone(),
        )));
    }

    let pull_request = context.pull_request().ok_or(Error::MissingPullRequest)?;

    let target = &pull_request.base.ref_field;
    info!("Pull request target branch: {}", target);
    info!("Configured target branch: {}", config.branch);

    if *target != config.branch {
        info!(
            "Target branch {} does not match configured branch {}. Skipping reviewer assignment.",
            target, config.branch
        );
        return Ok(Outcome::Skipped(SkipReason::BranchMismatch {
            target: target.clone(),
            configured: config.branch,
        }));
    }

    info!("Reviewers to add: {}", config.reviewers.join(", "));
    if !config.team_reviewers.is_empty() {
        info!("Team reviewers to add: {}", config.team_reviewers.join(", "));
    }

    let api = connect(config.token())?;

    let repo = context.repo()?;
    let request = ReviewRequest::new(
        repo.owner,
        repo.repo,
        pull_request.number,
        config.reviewers,
        config.team_reviewers,
    );
    debug!("Request reviewers payload: {}", serde_json::to_string(&request)?);

    let assignment = api.request_reviewers(&request).await?;

    runtime.set_outputs(&[
        (OUTPUT_REVIEWERS_ADDED, assignment.reviewers.join(",").as_str()),
        (OUTPUT_TEAMS_ADDED, assignment.teams.join(",").as_str()),
    ])?;

    info!(
        "Successfully added reviewers: {}",
        assignment.reviewers.join(", ")
    );
    if !assignment.teams.is_empty() {
        info!(
            "Successfully added team reviewers: {}",
            assignment.teams.join(", ")
        );
    }

    Ok(Outcome::Assigned(assignment))
}
