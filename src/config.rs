//! API configuration
//!
//! The API token and forum host are resolved once at startup from layered
//! sources (command-line flags, environment, config file) into an immutable
//! [`ApiConfig`] that is handed to the client at construction time.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use url::Url;

/// API version segment of the base URL
pub const DEFAULT_API_VERSION: &str = "2";

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "FORUMBEE_API_TOKEN";

/// Environment variable holding the forum domain
pub const DOMAIN_ENV: &str = "FORUMBEE_DOMAIN";

static PROTOCOL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://").expect("valid protocol regex"));

static DOMAIN_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9][a-zA-Z0-9-]{0,61}[a-zA-Z0-9](?:\.[a-zA-Z0-9][a-zA-Z0-9-]{0,61}[a-zA-Z0-9])*\.[a-zA-Z]{2,}$",
    )
    .expect("valid domain regex")
});

/// Strip any protocol prefix and trailing slashes and check that what is
/// left looks like a DNS name (`forum.example.com`).
pub fn validate_host(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let without_scheme = PROTOCOL_PREFIX.replace(trimmed, "");
    let host = without_scheme.trim_end_matches('/');

    if !DOMAIN_SHAPE.is_match(host) {
        return Err(Error::invalid_host(raw));
    }

    Ok(host.to_string())
}

/// One source of configuration values; unset fields fall through to the
/// next layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigLayer {
    /// API token
    #[serde(default, alias = "api_token")]
    pub token: Option<String>,
    /// Forum domain
    #[serde(default, alias = "host")]
    pub domain: Option<String>,
}

impl ConfigLayer {
    /// Create a layer from explicit values
    pub fn new(token: Option<String>, domain: Option<String>) -> Self {
        Self { token, domain }
    }

    /// Load a layer from a YAML (or JSON) file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_str(&content)
    }

    /// Parse a layer from YAML (JSON is valid YAML)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Immutable connection settings for the forum API
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    token: String,
    host: String,
    api_version: String,
}

impl ApiConfig {
    /// Build a config, validating the host and rejecting a blank token
    pub fn new(token: impl Into<String>, host: &str) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::missing_field("token"));
        }

        Ok(Self {
            token,
            host: validate_host(host)?,
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Resolve from layers in priority order (first set value wins)
    pub fn resolve(layers: &[ConfigLayer]) -> Result<Self> {
        let pick = |get: fn(&ConfigLayer) -> Option<&String>| {
            layers
                .iter()
                .filter_map(get)
                .find(|v| !v.trim().is_empty())
                .cloned()
        };

        let token = pick(|l| l.token.as_ref()).ok_or_else(|| Error::missing_field("token"))?;
        let domain = pick(|l| l.domain.as_ref()).ok_or_else(|| Error::missing_field("domain"))?;

        Self::new(token, &domain)
    }

    /// The bearer token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The validated host, without protocol or trailing slash
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The API version segment
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// `https://<host>/api/<version>`
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&format!(
            "https://{}/api/{}",
            self.host, self.api_version
        ))?)
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("token", &"<redacted>")
            .field("host", &self.host)
            .field("api_version", &self.api_version)
            .finish()
    }
}
