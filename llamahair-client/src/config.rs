//! Client configuration
//!
//! Credentials and the service base URL are resolved once, when a client is
//! built. Process-wide environment variables take precedence over values
//! passed in by the caller, so an operator can rotate keys centrally without
//! touching code:
//!
//! 1. `LLAMAHAIR_API_KEY_ID` / `LLAMAHAIR_API_SECRET` / `LLAMAHAIR_BASE_URL`
//! 2. [`ClientOptions`] supplied to the constructor
//! 3. [`DEFAULT_BASE_URL`] (base URL only)
//!
//! Empty environment values count as unset.

use std::fmt;

use crate::error::{ClientError, Result};

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://api.llamahair.ai";

pub const ENV_API_KEY_ID: &str = "LLAMAHAIR_API_KEY_ID";
pub const ENV_API_SECRET: &str = "LLAMAHAIR_API_SECRET";
pub const ENV_BASE_URL: &str = "LLAMAHAIR_BASE_URL";

/// API key pair used to sign requests
///
/// Immutable once built. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key_id: String,
    secret: String,
}

impl Credentials {
    pub fn new(key_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            secret: secret.into(),
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Caller-supplied constructor values
#[derive(Clone, Default)]
pub struct ClientOptions {
    pub api_key_id: String,
    pub api_key_secret: String,
    /// Overrides [`DEFAULT_BASE_URL`] unless `LLAMAHAIR_BASE_URL` is set
    pub base_url: Option<String>,
}

impl ClientOptions {
    pub fn new(api_key_id: impl Into<String>, api_key_secret: impl Into<String>) -> Self {
        Self {
            api_key_id: api_key_id.into(),
            api_key_secret: api_key_secret.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_key_id", &self.api_key_id)
            .field("api_key_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Fully resolved client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    /// Base URL without a trailing slash
    pub base_url: String,
}

impl ClientConfig {
    /// Resolve configuration against the process environment
    pub fn resolve(options: ClientOptions) -> Result<Self> {
        Self::resolve_with(|key| std::env::var(key).ok(), options)
    }

    /// Resolve configuration using `lookup` in place of the process environment
    pub fn resolve_with<F>(lookup: F, options: ClientOptions) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let key_id = env(ENV_API_KEY_ID).unwrap_or(options.api_key_id);
        let secret = env(ENV_API_SECRET).unwrap_or(options.api_key_secret);
        let base_url = env(ENV_BASE_URL)
            .or(options.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let config = Self {
            credentials: Credentials::new(key_id, secret),
            base_url: base_url.trim_end_matches('/').to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.credentials.key_id.is_empty() {
            return Err(ClientError::Config(format!(
                "API key id is empty (set {} or pass it to the client)",
                ENV_API_KEY_ID
            )));
        }

        if self.credentials.secret.is_empty() {
            return Err(ClientError::Config(format!(
                "API secret is empty (set {} or pass it to the client)",
                ENV_API_SECRET
            )));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::Config(
                "base_url must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}
