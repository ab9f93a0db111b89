//! Transport configuration.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderName, HeaderValue},
    redirect::Policy,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("httpwrap/", env!("CARGO_PKG_VERSION"));

/// Redirect limit matching reqwest's own default.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

const ENV_USER_AGENT: &str = "HTTPWRAP_USER_AGENT";
const ENV_TIMEOUT_SECS: &str = "HTTPWRAP_TIMEOUT_SECS";
const ENV_CONNECT_TIMEOUT_SECS: &str = "HTTPWRAP_CONNECT_TIMEOUT_SECS";
const ENV_MAX_REDIRECTS: &str = "HTTPWRAP_MAX_REDIRECTS";

/// Settings for the reqwest-backed transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub user_agent: String,
    /// Whole-request deadline. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    /// `0` disables redirect following.
    pub max_redirects: usize,
    /// Headers sent with every request; per-call headers override them.
    pub default_headers: HashMap<String, String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
            connect_timeout_secs: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            default_headers: HashMap::new(),
        }
    }
}

impl TransportConfig {
    /// Loads overrides from `HTTPWRAP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads overrides through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(user_agent) = lookup(ENV_USER_AGENT) {
            config.user_agent = user_agent;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = Some(parse_number(ENV_TIMEOUT_SECS, &value)?);
        }
        if let Some(value) = lookup(ENV_CONNECT_TIMEOUT_SECS) {
            config.connect_timeout_secs = Some(parse_number(ENV_CONNECT_TIMEOUT_SECS, &value)?);
        }
        if let Some(value) = lookup(ENV_MAX_REDIRECTS) {
            config.max_redirects = parse_number(ENV_MAX_REDIRECTS, &value)?;
        }

        Ok(config)
    }

    /// Builds a reqwest client honoring every setting.
    pub fn build_client(&self) -> Result<Client> {
        let mut headers = HeaderMap::new();
        for (key, value) in &self.default_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .with_context(|| format!("Invalid default header name '{}'", key))?;
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("Invalid value for default header '{}'", key))?;
            headers.insert(name, value);
        }

        let redirect = if self.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(self.max_redirects)
        };

        let mut builder = Client::builder()
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .redirect(redirect);
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        debug!(
            "Building HTTP client (user agent {}, timeout {:?}s, max redirects {})",
            self.user_agent, self.timeout_secs, self.max_redirects
        );

        builder.build().context("Failed to build HTTP client")
    }
}

fn parse_number<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("{} must be a non-negative integer, got '{}'", key, value))
}
