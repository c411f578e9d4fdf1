//! Dashboard configuration.
//!
//! Configuration can be built in code through the `with_*` builders or loaded
//! from a TOML file. Every field has a default, so a file only needs to name
//! the values it overrides:
//!
//! ```toml
//! console_url = "https://console.example.com/hcmuiapi/graphql"
//! search_url = "https://search.example.com/searchapi/graphql"
//! request_timeout_secs = 10
//! enable_redirect = true
//! ```

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::searches::default_suggested_templates;
use crate::types::SuggestedQueryTemplate;

/// Default console GraphQL endpoint.
pub const DEFAULT_CONSOLE_URL: &str = "https://localhost:4000/hcmuiapi/graphql";

/// Default search GraphQL endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://localhost:4010/searchapi/graphql";

/// Configuration for the dashboard client and server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Address to bind the HTTP server to.
    pub bind_addr: SocketAddr,
    /// GraphQL endpoint serving the cluster/application overview.
    pub console_url: String,
    /// GraphQL endpoint serving search counts and saved searches.
    pub search_url: String,
    /// Bearer token sent to both endpoints.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// CORS allowed origins (empty means all).
    pub cors_origins: Vec<String>,
    /// Redirect legacy `/multicloud/*` paths to their current pages.
    pub enable_redirect: bool,
    /// Suggested search templates offered next to saved searches.
    pub suggested_templates: Vec<SuggestedQueryTemplate>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            console_url: DEFAULT_CONSOLE_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            token: None,
            request_timeout_secs: 30,
            cors_origins: Vec::new(),
            enable_redirect: false,
            suggested_templates: default_suggested_templates(),
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration with the specified endpoints.
    #[must_use]
    pub fn new(console_url: impl Into<String>, search_url: impl Into<String>) -> Self {
        Self {
            console_url: console_url.into(),
            search_url: search_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_file(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DashboardError::Config(format!(
                "failed to read config file '{}': {e}",
                path.as_ref().display()
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or fails validation.
    pub fn from_toml(content: &str) -> DashboardResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| DashboardError::Config(format!("invalid TOML: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> DashboardResult<()> {
        for (name, value) in [("console_url", &self.console_url), ("search_url", &self.search_url)] {
            let parsed = url::Url::parse(value)
                .map_err(|e| DashboardError::Config(format!("{name} is not a valid URL '{value}': {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(DashboardError::Config(format!(
                    "{name} must start with http:// or https://, got '{value}'"
                )));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(DashboardError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        for template in &self.suggested_templates {
            if template.id.is_empty() {
                return Err(DashboardError::Config(format!(
                    "suggested template '{}' has an empty id",
                    template.name
                )));
            }
        }

        Ok(())
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Set the bind address.
    #[must_use]
    pub const fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs();
        self
    }

    /// Add a CORS allowed origin.
    #[must_use]
    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origins.push(origin.into());
        self
    }

    /// Enable legacy path redirects.
    #[must_use]
    pub const fn with_redirects(mut self, enabled: bool) -> Self {
        self.enable_redirect = enabled;
        self
    }

    /// Replace the suggested search templates.
    #[must_use]
    pub fn with_suggested_templates(mut self, templates: Vec<SuggestedQueryTemplate>) -> Self {
        self.suggested_templates = templates;
        self
    }
}
