//! Client configuration
//!
//! Credentials and endpoints are supplied explicitly at construction via
//! [`ClientConfig`]; nothing is read from the process environment unless the
//! caller opts in through [`ClientConfig::from_env`].

use crate::error::{Error, Result};
use std::time::Duration;

/// Production base URL for the marketplace search API
pub const MARKETPLACE_URL: &str = "https://marketplace.api.1worldsync.com";

/// Preprod base URL for the marketplace search API
pub const MARKETPLACE_PREPROD_URL: &str = "https://marketplace.preprod.api.1worldsync.com";

/// Production base URL for the Content1 API
pub const CONTENT1_URL: &str = "https://content1-api.1worldsync.com";

/// Configuration for both API surfaces
///
/// Immutable once built. The secret key is write-only: it is used for
/// signing and never exposed or logged.
#[derive(Clone)]
pub struct ClientConfig {
    app_id: String,
    secret_key: String,
    gln: Option<String>,
    marketplace_url: String,
    content1_url: String,
    timeout: Duration,
    user_agent: String,
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Create a config with just an app id and secret key, using the
    /// production endpoints
    pub fn new(app_id: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Self::builder()
            .app_id(app_id)
            .secret_key(secret_key)
            .build()
    }

    /// Load configuration from `ONEWORLDSYNC_*` environment variables
    ///
    /// Reads `ONEWORLDSYNC_APP_ID`, `ONEWORLDSYNC_SECRET_KEY`, and the
    /// optional `ONEWORLDSYNC_USER_GLN`, `ONEWORLDSYNC_API_URL`,
    /// `ONEWORLDSYNC_CONTENT1_API_URL`.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder()
            .app_id(std::env::var("ONEWORLDSYNC_APP_ID").unwrap_or_default())
            .secret_key(std::env::var("ONEWORLDSYNC_SECRET_KEY").unwrap_or_default());

        if let Ok(gln) = std::env::var("ONEWORLDSYNC_USER_GLN") {
            builder = builder.gln(gln);
        }
        if let Ok(url) = std::env::var("ONEWORLDSYNC_API_URL") {
            builder = builder.marketplace_url(url);
        }
        if let Ok(url) = std::env::var("ONEWORLDSYNC_CONTENT1_API_URL") {
            builder = builder.content1_url(url);
        }

        builder.build()
    }

    /// The application id presented to both surfaces
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub(crate) fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Optional Global Location Number sent with Content1 requests
    pub fn gln(&self) -> Option<&str> {
        self.gln.as_deref()
    }

    /// Base URL of the marketplace search surface
    pub fn marketplace_url(&self) -> &str {
        &self.marketplace_url
    }

    /// Base URL of the Content1 surface
    pub fn content1_url(&self) -> &str {
        &self.content1_url
    }

    /// Request timeout applied to every call
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// User agent string sent with every request
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("app_id", &self.app_id)
            .field("secret_key", &"<redacted>")
            .field("gln", &self.gln)
            .field("marketplace_url", &self.marketplace_url)
            .field("content1_url", &self.content1_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    app_id: String,
    secret_key: String,
    gln: Option<String>,
    marketplace_url: Option<String>,
    content1_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    /// Set the application id
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    /// Set the secret key
    pub fn secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = secret_key.into();
        self
    }

    /// Set the Global Location Number
    pub fn gln(mut self, gln: impl Into<String>) -> Self {
        self.gln = Some(gln.into());
        self
    }

    /// Override the marketplace base URL (e.g. the preprod endpoint)
    pub fn marketplace_url(mut self, url: impl Into<String>) -> Self {
        self.marketplace_url = Some(url.into());
        self
    }

    /// Override the Content1 base URL
    pub fn content1_url(mut self, url: impl Into<String>) -> Self {
        self.content1_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Validate and build the config
    ///
    /// Fails fast with a [`Error::MissingCredential`] when the app id or
    /// secret key is absent, before any request could be attempted.
    pub fn build(self) -> Result<ClientConfig> {
        if self.app_id.trim().is_empty() {
            return Err(Error::missing_credential("app_id"));
        }
        if self.secret_key.trim().is_empty() {
            return Err(Error::missing_credential("secret_key"));
        }

        let marketplace_url = self
            .marketplace_url
            .unwrap_or_else(|| MARKETPLACE_URL.to_string());
        let content1_url = self.content1_url.unwrap_or_else(|| CONTENT1_URL.to_string());

        // Reject malformed base URLs here rather than on the first call.
        url::Url::parse(&marketplace_url)?;
        url::Url::parse(&content1_url)?;

        Ok(ClientConfig {
            app_id: self.app_id,
            secret_key: self.secret_key,
            gln: self.gln,
            marketplace_url,
            content1_url,
            timeout: self.timeout.unwrap_or(Duration::from_secs(30)),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("oneworldsync-rs/{}", env!("CARGO_PKG_VERSION"))),
        })
    }
}
