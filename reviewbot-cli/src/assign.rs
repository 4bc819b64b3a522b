//! Reviewer assignment entry point
//!
//! Every argument falls back to the variable the Actions runner sets, so the
//! binary runs unchanged as a container action and from a shell.

use std::fmt;
use std::path::PathBuf;

use clap::Args;
use reviewbot_core::{step, ActionsRuntime, EventContext, InputValues, Outcome};
use reviewbot_github::{GitHubClient, DEFAULT_API_URL};
use secrecy::SecretString;

/// Arguments for reviewer assignment
#[derive(Args)]
pub struct AssignArgs {
    /// Branch a pull request must target to receive reviewers
    #[arg(long, env = "INPUT_BRANCH")]
    pub branch: Option<String>,

    /// Comma-separated user logins to request
    #[arg(long, env = "INPUT_REVIEWERS")]
    pub reviewers: Option<String>,

    /// Comma-separated team slugs to request
    #[arg(long, env = "INPUT_TEAM-REVIEWERS")]
    pub team_reviewers: Option<String>,

    /// GitHub token used for the request
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Name of the triggering event
    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "")]
    pub event_name: String,

    /// Path to the webhook payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// GitHub API endpoint
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// File the step outputs are appended to
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,
}

impl fmt::Debug for AssignArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssignArgs")
            .field("branch", &self.branch)
            .field("reviewers", &self.reviewers)
            .field("team_reviewers", &self.team_reviewers)
            .field("event_name", &self.event_name)
            .field("event_path", &self.event_path)
            .field("repository", &self.repository)
            .field("api_url", &self.api_url)
            .field("output_file", &self.output_file)
            .finish_non_exhaustive()
    }
}

impl AssignArgs {
    /// Execute reviewer assignment against the live runner
    pub async fn execute(self) -> Outcome {
        let mut runtime = ActionsRuntime::new(self.output_file.clone());
        self.execute_with(&mut runtime).await
    }

    async fn execute_with(self, runtime: &mut ActionsRuntime) -> Outcome {
        tracing::debug!(args = ?self, "Starting reviewer assignment");

        let context = match EventContext::load(
            &self.event_name,
            self.event_path.as_deref(),
            self.repository.clone(),
        ) {
            Ok(context) => context,
            Err(err) => return step::report_failure(runtime, &err),
        };

        let api_url = self.api_url.clone();
        step::run(
            self.into_inputs(),
            &context,
            |token| Ok(GitHubClient::new(token, &api_url)?),
            runtime,
        )
        .await
    }

    fn into_inputs(self) -> InputValues {
        InputValues {
            branch: self.branch,
            reviewers: self.reviewers,
            team_reviewers: self.team_reviewers,
            token: self.token.map(SecretString::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use reviewbot_core::SkipReason;
    use std::io::Write;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        assign: AssignArgs,
    }

    fn parse(args: &[&str]) -> AssignArgs {
        TestCli::try_parse_from(std::iter::once("reviewbot").chain(args.iter().copied()))
            .unwrap()
            .assign
    }

    #[test]
    fn test_flags_override_environment() {
        let args = parse(&[
            "--branch",
            "main",
            "--reviewers",
            "user1,user2",
            "--team-reviewers",
            "team1",
            "--token",
            "secret-token",
            "--event-name",
            "pull_request",
            "--repository",
            "test-owner/test-repo",
        ]);

        assert_eq!(args.branch.as_deref(), Some("main"));
        assert_eq!(args.team_reviewers.as_deref(), Some("team1"));
        assert_eq!(args.event_name, "pull_request");

        let rendered = format!("{:?}", args);
        assert!(!rendered.contains("secret-token"));

        let inputs = args.into_inputs();
        assert_eq!(inputs.reviewers.as_deref(), Some("user1,user2"));
        assert!(inputs.token.is_some());
    }

    #[tokio::test]
    async fn test_push_event_is_skipped() {
        let args = parse(&[
            "--branch",
            "main",
            "--reviewers",
            "user1",
            "--token",
            "secret-token",
            "--event-name",
            "push",
        ]);
        let mut runtime = ActionsRuntime::with_writer(None, Box::new(std::io::sink()));

        let outcome = args.execute_with(&mut runtime).await;

        assert!(matches!(
            outcome,
            Outcome::Skipped(SkipReason::NotPullRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_event_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = parse(&[
            "--branch",
            "main",
            "--reviewers",
            "user1",
            "--event-name",
            "pull_request",
            "--event-path",
            &path,
        ]);
        let mut runtime = ActionsRuntime::with_writer(None, Box::new(std::io::sink()));

        let outcome = args.execute_with(&mut runtime).await;

        assert!(outcome.is_failure());
    }

    #[tokio::test]
    async fn test_empty_token_fails_on_matching_branch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"pull_request": {"number": 5, "base": {"ref": "main"}}}"#)
            .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = parse(&[
            "--branch",
            "main",
            "--reviewers",
            "user1",
            "--token",
            "",
            "--event-name",
            "pull_request",
            "--event-path",
            &path,
            "--repository",
            "test-owner/test-repo",
        ]);
        let mut runtime = ActionsRuntime::with_writer(None, Box::new(std::io::sink()));

        let outcome = args.execute_with(&mut runtime).await;

        assert_eq!(
            outcome,
            Outcome::Failed("Parameter token or opts.auth is required".to_string())
        );
    }
}
