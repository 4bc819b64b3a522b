//! GitHub API client using octocrab

use crate::{Error, Result};
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Authenticated GitHub API client
pub struct GitHubClient {
    client: Octocrab,
    api_url: String,
}

impl GitHubClient {
    /// Create a client authenticated with `token`
    ///
    /// `api_url` selects the API endpoint, e.g. a GitHub Enterprise Server
    /// `https://ghe.example.com/api/v3`.
    pub fn new(token: &SecretString, api_url: &str) -> Result<Self> {
        let token = token.expose_secret();
        if token.is_empty() {
            return Err(Error::Auth(
                "Parameter token or opts.auth is required".to_string(),
            ));
        }

        let api_url = parse_api_url(api_url)?;

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_url.as_str())
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", api_url, e)))?
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!(api_url = %api_url, "Created GitHub client");

        Ok(Self { client, api_url })
    }

    /// Get the API endpoint this client talks to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

/// Validate an API base URL and strip any trailing slash
fn parse_api_url(api_url: &str) -> Result<String> {
    let api_url = api_url.trim();
    if api_url.is_empty() {
        return Ok(DEFAULT_API_URL.to_string());
    }

    let url = url::Url::parse(api_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", api_url, e)))?;
    match url.scheme() {
        "https" | "http" => Ok(url.as_str().trim_end_matches('/').to_string()),
        scheme => Err(Error::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            api_url, scheme
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_url() {
        assert_eq!(parse_api_url("").unwrap(), DEFAULT_API_URL);
        assert_eq!(parse_api_url("https://api.github.com/").unwrap(), DEFAULT_API_URL);
    }

    #[test]
    fn test_parse_enterprise_url() {
        assert_eq!(
            parse_api_url("https://ghe.example.com/api/v3/").unwrap(),
            "https://ghe.example.com/api/v3"
        );
    }

    #[test]
    fn test_parse_invalid_url() {
        assert!(matches!(parse_api_url("not a url"), Err(Error::InvalidUrl(_))));
        assert!(matches!(
            parse_api_url("ftp://example.com"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let token = SecretString::from(String::new());
        let err = GitHubClient::new(&token, DEFAULT_API_URL).unwrap_err();
        assert_eq!(err.message(), "Parameter token or opts.auth is required");
    }

    #[tokio::test]
    async fn test_create_client() {
        let token = SecretString::from("mock-token".to_string());
        let client = GitHubClient::new(&token, "https://ghe.example.com/api/v3").unwrap();
        assert_eq!(client.api_url(), "https://ghe.example.com/api/v3");

        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("mock-token"));
    }
}
