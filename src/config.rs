//
//  reportal-client
//  config.rs
//

//! Client configuration.
//!
//! [`ClientConfig`] carries everything the client needs to talk to a
//! Reportal server: the base URL, the bearer credential, and optional
//! default workspace identification used when a call does not name a
//! workspace itself.
//!
//! The configuration is immutable once constructed. The base URL is
//! normalized at construction time (trailing slashes are stripped and are
//! never stored) so URL composition downstream can assume a clean origin.
//!
//! # Example
//!
//! ```rust
//! use reportal_client::ClientConfig;
//!
//! let config = ClientConfig::new("https://reports.example.com/", "secret-token")
//!     .with_default_workspace_code("acme");
//!
//! assert_eq!(config.base_url(), "https://reports.example.com");
//! ```

use serde::{Deserialize, Serialize};

/// Immutable configuration for a [`ReportalClient`](crate::ReportalClient).
#[derive(Debug, Clone, Serialize)]
pub struct ClientConfig {
    base_url: String,
    auth_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_workspace_code: Option<String>,
}

impl ClientConfig {
    /// Creates a configuration from a base URL and a bearer token.
    ///
    /// Trailing slashes on `base_url` are stripped here and the stored
    /// value never carries one.
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            auth_token: auth_token.into(),
            default_workspace_id: None,
            default_workspace_code: None,
        }
    }

    /// Sets the workspace id used when a call supplies no workspace.
    pub fn with_default_workspace_id(mut self, id: impl Into<String>) -> Self {
        self.default_workspace_id = Some(id.into());
        self
    }

    /// Sets the workspace code used when a call supplies no workspace and
    /// no default workspace id is configured.
    pub fn with_default_workspace_code(mut self, code: impl Into<String>) -> Self {
        self.default_workspace_code = Some(code.into());
        self
    }

    /// The normalized base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The opaque bearer credential attached to every request.
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// The configured default workspace id, if any.
    pub fn default_workspace_id(&self) -> Option<&str> {
        self.default_workspace_id.as_deref()
    }

    /// The configured default workspace code, if any.
    pub fn default_workspace_code(&self) -> Option<&str> {
        self.default_workspace_code.as_deref()
    }
}

// Deserialization funnels through `new` so configs loaded from files uphold
// the trailing-slash invariant.
impl<'de> Deserialize<'de> for ClientConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            base_url: String,
            auth_token: String,
            #[serde(default)]
            default_workspace_id: Option<String>,
            #[serde(default)]
            default_workspace_code: Option<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let mut config = ClientConfig::new(raw.base_url, raw.auth_token);
        config.default_workspace_id = raw.default_workspace_id;
        config.default_workspace_code = raw.default_workspace_code;
        Ok(config)
    }
}
