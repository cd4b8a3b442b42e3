// ABOUTME: Configuration options for the Folio host including Options and ClientBuilder.
// ABOUTME: ClientBuilder provides a fluent API for constructing Client instances with custom settings.

use std::collections::HashMap;
use std::time::Duration;

use folio_translators::TranslatorRegistry;

use crate::client::Client;
use crate::error::HostError;

/// Configuration options for the Folio client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub allow_private_networks: bool,
    pub http_client: Option<reqwest::Client>,
    pub headers: HashMap<String, String>,
    pub registry: Option<TranslatorRegistry>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "Folio/1.0".to_string(),
            allow_private_networks: false,
            http_client: None,
            headers: HashMap::new(),
            registry: None,
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

    /// Allow or disallow requests to private networks.
    pub fn allow_private_networks(mut self, allow: bool) -> Self {
        self.opts.allow_private_networks = allow;
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

    /// Use a custom translator registry instead of the built-in one.
    pub fn registry(mut self, registry: TranslatorRegistry) -> Self {
        self.opts.registry = Some(registry);
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Result<Client, HostError> {
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
    fn defaults() {
        let opts = Options::default();
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert_eq!(opts.user_agent, "Folio/1.0");
        assert!(!opts.allow_private_networks);
        assert!(opts.registry.is_none());
    }

    #[test]
    fn builder_overrides() {
        let builder = ClientBuilder::new()
            .timeout(Duration::from_secs(5))
            .user_agent("Archivist/2.0")
            .allow_private_networks(true)
            .header("Accept-Language", "en-AU")
            .registry(TranslatorRegistry::new());

        assert_eq!(builder.opts.timeout, Duration::from_secs(5));
        assert_eq!(builder.opts.user_agent, "Archivist/2.0");
        assert!(builder.opts.allow_private_networks);
        assert_eq!(
            builder.opts.headers.get("Accept-Language").map(String::as_str),
            Some("en-AU")
        );
        assert!(builder.opts.registry.as_ref().is_some_and(|r| r.is_empty()));
    }
}
