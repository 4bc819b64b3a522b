//! Reviewer request types and the API seam
//!
//! The hosting API is reached through [`ReviewerApi`] so the step can be
//! exercised without network access.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Payload of a "request reviewers" call
///
/// `reviewers` and `team_reviewers` are `None` when there is nothing to add
/// and are then omitted from the serialized form entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRequest {
    pub owner: String,
    pub repo: String,
    pub pull_number: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_reviewers: Option<Vec<String>>,
}

impl ReviewRequest {
    /// Build a request, dropping empty lists
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        pull_number: u64,
        reviewers: Vec<String>,
        team_reviewers: Vec<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            pull_number,
            reviewers: Some(reviewers).filter(|r| !r.is_empty()),
            team_reviewers: Some(team_reviewers).filter(|t| !t.is_empty()),
        }
    }
}

/// A user entry of `requested_reviewers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedUser {
    pub login: String,
}

/// A team entry of `requested_teams`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedTeam {
    pub slug: String,
}

/// Pull request as returned by the reviewer request endpoint
///
/// Only the reviewer fields are read; absent lists deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequestResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub requested_reviewers: Vec<RequestedUser>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub requested_teams: Vec<RequestedTeam>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reviewers actually requested on the pull request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    /// User logins
    pub reviewers: Vec<String>,
    /// Team slugs
    pub teams: Vec<String>,
}

impl From<ReviewRequestResponse> for Assignment {
    fn from(response: ReviewRequestResponse) -> Self {
        Self {
            reviewers: response
                .requested_reviewers
                .into_iter()
                .map(|u| u.login)
                .collect(),
            teams: response
                .requested_teams
                .into_iter()
                .map(|t| t.slug)
                .collect(),
        }
    }
}

/// Hosting API operations used by the step
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewerApi: Send + Sync {
    /// Request reviewers on a pull request
    ///
    /// Errors carry the API's own message.
    async fn request_reviewers(&self, request: &ReviewRequest) -> Result<Assignment>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_omits_empty_lists() {
        let request = ReviewRequest::new("o", "r", 7, vec!["user1".to_string()], vec![]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "owner": "o", "repo": "r", "pull_number": 7, "reviewers": ["user1"] })
        );

        let request = ReviewRequest::new("o", "r", 7, vec![], vec!["team1".to_string()]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "owner": "o", "repo": "r", "pull_number": 7, "team_reviewers": ["team1"] })
        );
    }

    #[test]
    fn test_assignment_from_response() {
        let response: ReviewRequestResponse = serde_json::from_value(json!({
            "number": 123,
            "requested_reviewers": [{ "login": "user1", "id": 1 }, { "login": "user2", "id": 2 }],
            "requested_teams": [{ "slug": "team1", "name": "Team One" }]
        }))
        .unwrap();

        let assignment = Assignment::from(response);
        assert_eq!(assignment.reviewers, vec!["user1", "user2"]);
        assert_eq!(assignment.teams, vec!["team1"]);
    }

    #[test]
    fn test_missing_response_lists_default_to_empty() {
        let response: ReviewRequestResponse =
            serde_json::from_value(json!({ "number": 1, "requested_teams": null })).unwrap();
        assert_eq!(Assignment::from(response), Assignment::default());
    }
}
