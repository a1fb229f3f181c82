// ABOUTME: Configuration options for the FilmAffinity client including Options and ClientBuilder.
// ABOUTME: ClientBuilder provides a fluent API for constructing Client instances with custom settings.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::Client;
use crate::error::ClientError;

/// Public host of the film database.
pub const DEFAULT_BASE_URL: &str = "https://www.filmaffinity.com";

/// Mobile host used for links shown to users.
pub const MOBILE_BASE_URL: &str = "https://m.filmaffinity.com";

/// Configuration options for the client.
#[derive(Debug, Clone)]
pub struct Options {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub http_client: Option<reqwest::Client>,
    pub headers: HashMap<String, String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: "filmbot/0.1".to_string(),
            http_client: None,
            headers: HashMap::new(),
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Point the client at another host (tests, mirrors).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.opts.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Build the Client with the configured options.
    ///
    /// Fails when the base URL is not an absolute http(s) URL or the HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<Client, ClientError> {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = Options::default();
        assert_eq!(opts.base_url, "https://www.filmaffinity.com");
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert!(opts.headers.is_empty());
    }

    #[test]
    fn test_builder_rejects_relative_base_url() {
        let err = ClientBuilder::new().base_url("not a url").build().unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_builder_rejects_non_http_scheme() {
        let err = ClientBuilder::new()
            .base_url("ftp://www.filmaffinity.com")
            .build()
            .unwrap_err();
        assert!(err.is_invalid_input());
    }
}
