//! Pull request reviewer requests

use crate::{Error, GitHubClient};
use async_trait::async_trait;
use reviewbot_core::{Assignment, ReviewRequest, ReviewRequestResponse, ReviewerApi};
use serde::Serialize;
use tracing::{debug, info};

/// Body of `POST /repos/{owner}/{repo}/pulls/{pull_number}/requested_reviewers`
#[derive(Debug, Serialize)]
struct RequestReviewersBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reviewers: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    team_reviewers: Option<&'a [String]>,
}

impl<'a> From<&'a ReviewRequest> for RequestReviewersBody<'a> {
    fn from(request: &'a ReviewRequest) -> Self {
        Self {
            reviewers: request.reviewers.as_deref(),
            team_reviewers: request.team_reviewers.as_deref(),
        }
    }
}

fn requested_reviewers_route(request: &ReviewRequest) -> String {
    format!(
        "/repos/{}/{}/pulls/{}/requested_reviewers",
        request.owner, request.repo, request.pull_number
    )
}

#[async_trait]
impl ReviewerApi for GitHubClient {
    async fn request_reviewers(&self, request: &ReviewRequest) -> reviewbot_core::Result<Assignment> {
        let route = requested_reviewers_route(request);
        debug!(
            owner = %request.owner,
            repo = %request.repo,
            pull_number = request.pull_number,
            "Requesting reviewers"
        );

        let response: ReviewRequestResponse = self
            .client()
            .post(route, Some(&RequestReviewersBody::from(request)))
            .await
            .map_err(Error::Api)?;

        let assignment = Assignment::from(response);
        info!(
            pull_number = request.pull_number,
            reviewers = assignment.reviewers.len(),
            teams = assignment.teams.len(),
            "Reviewers requested"
        );

        Ok(assignment)
    }
}
