//! Action input handling
//!
//! Inputs are read once as raw strings ([`InputValues`]) and validated
//! eagerly into a [`Config`] before any event inspection happens.
//!
//! Every value is trimmed on read, matching how the Actions runner hands
//! inputs to JavaScript actions.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result};

/// Raw input values as provided by the runner or the command line
#[derive(Default)]
pub struct InputValues {
    /// Target branch name (`branch`)
    pub branch: Option<String>,
    /// Comma-separated user logins (`reviewers`)
    pub reviewers: Option<String>,
    /// Comma-separated team slugs (`team-reviewers`)
    pub team_reviewers: Option<String>,
    /// API token (`token`)
    pub token: Option<SecretString>,
}

impl fmt::Debug for InputValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputValues")
            .field("branch", &self.branch)
            .field("reviewers", &self.reviewers)
            .field("team_reviewers", &self.team_reviewers)
            .finish_non_exhaustive()
    }
}

/// Validated reviewer assignment configuration
pub struct Config {
    /// Branch a pull request must target to receive reviewers
    pub branch: String,
    /// Individual reviewers, in input order
    pub reviewers: Vec<String>,
    /// Team reviewers, in input order
    pub team_reviewers: Vec<String>,
    token: SecretString,
}

impl Config {
    /// Validate raw inputs
    ///
    /// The token is not checked here; an empty token surfaces as an API
    /// failure once the request is made.
    pub fn from_inputs(inputs: InputValues) -> Result<Self> {
        let branch = inputs
            .branch
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        if branch.is_empty() {
            return Err(Error::MissingBranch);
        }

        let reviewers = parse_list(inputs.reviewers.as_deref().unwrap_or_default());
        let team_reviewers = parse_list(inputs.team_reviewers.as_deref().unwrap_or_default());
        if reviewers.is_empty() && team_reviewers.is_empty() {
            return Err(Error::NoReviewers);
        }

        Ok(Self {
            branch: branch.to_string(),
            reviewers,
            team_reviewers,
            token: SecretString::from(
                inputs
                    .token
                    .as_ref()
                    .map(|t| t.expose_secret().trim())
                    .unwrap_or_default()
                    .to_string(),
            ),
        })
    }

    /// Token used to authenticate against the API
    pub fn token(&self) -> &SecretString {
        &self.token
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("branch", &self.branch)
            .field("reviewers", &self.reviewers)
            .field("team_reviewers", &self.team_reviewers)
            .finish_non_exhaustive()
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones
///
/// Order is preserved and duplicates are kept.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(branch: &str, reviewers: &str, teams: &str) -> InputValues {
        InputValues {
            branch: Some(branch.to_string()),
            reviewers: Some(reviewers.to_string()),
            team_reviewers: Some(teams.to_string()),
            token: Some(SecretString::from("mock-token".to_string())),
        }
    }

    #[test]
    fn test_parse_list_skips_blank_segments() {
        assert_eq!(parse_list("user1, ,user2,"), vec!["user1", "user2"]);
    }

    #[test]
    fn test_parse_list_keeps_order_and_duplicates() {
        assert_eq!(
            parse_list(" b ,a,\tb\n"),
            vec!["b".to_string(), "a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_parse_list_empty() {
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ,").is_empty());
    }

    #[test]
    fn test_config_from_inputs() {
        let config = Config::from_inputs(inputs(" main ", "user1,user2", "team1")).unwrap();
        assert_eq!(config.branch, "main");
        assert_eq!(config.reviewers, vec!["user1", "user2"]);
        assert_eq!(config.team_reviewers, vec!["team1"]);
        assert_eq!(config.token().expose_secret(), "mock-token");
    }

    #[test]
    fn test_missing_branch() {
        let err = Config::from_inputs(inputs("", "user1", "")).unwrap_err();
        assert!(matches!(err, Error::MissingBranch));

        let err = Config::from_inputs(InputValues {
            reviewers: Some("user1".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::MissingBranch));
    }

    #[test]
    fn test_branch_checked_before_reviewers() {
        let err = Config::from_inputs(inputs("  ", "", "")).unwrap_err();
        assert!(matches!(err, Error::MissingBranch));
    }

    #[test]
    fn test_no_reviewers() {
        let err = Config::from_inputs(inputs("main", "", "")).unwrap_err();
        assert!(matches!(err, Error::NoReviewers));

        let err = Config::from_inputs(inputs("main", " , ", ",")).unwrap_err();
        assert!(matches!(err, Error::NoReviewers));
    }

    #[test]
    fn test_missing_token_is_not_a_validation_error() {
        let config = Config::from_inputs(InputValues {
            branch: Some("main".to_string()),
            team_reviewers: Some("team1".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.token().expose_secret(), "");
        assert!(config.reviewers.is_empty());
    }

    #[test]
    fn test_token_is_trimmed() {
        let config = Config::from_inputs(InputValues {
            token: Some(SecretString::from(" mock-token\n".to_string())),
            ..inputs("main", "user1", "")
        })
        .unwrap();
        assert_eq!(config.token().expose_secret(), "mock-token");

        let config = Config::from_inputs(InputValues {
            token: Some(SecretString::from(" \t\n".to_string())),
            ..inputs("main", "user1", "")
        })
        .unwrap();
        assert_eq!(config.token().expose_secret(), "");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::from_inputs(inputs("main", "user1", "")).unwrap();
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("main"));
        assert!(!rendered.contains("mock-token"));
    }
}
