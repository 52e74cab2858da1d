use crate::services::aggregator::{FetchPolicy, DEFAULT_MAX_UPSTREAM_CALLS};
use crate::services::upstream::DEFAULT_BOOKS_API_URL;
use crate::services::validate::Completeness;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8081;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REDIRECT_URL: &str = "http://localhost:8081/redirect";
const DEFAULT_OAUTH_SCOPE: &str = "https://www.googleapis.com/auth/books";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// OAuth client registration for the books API.
///
/// Loaded alongside the rest of the configuration but not used by any
/// read-only endpoint.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct OAuthConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_url: String,
    pub scopes: Vec<String>,
}

impl OAuthConfig {
    pub fn is_configured(&self) -> bool {
        self.client_id.as_ref().is_some_and(|id| !id.is_empty())
            && self.client_secret.as_ref().is_some_and(|s| !s.is_empty())
    }
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("redirect_url", &self.redirect_url)
            .field("scopes", &self.scopes)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub books_api_url: String,
    pub upstream_timeout: Duration,
    pub fetch_policy: FetchPolicy,
    pub oauth: OAuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, unset or empty
    /// keys fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;
        let timeout_secs = parse_or(
            get("UPSTREAM_TIMEOUT_SECS"),
            "UPSTREAM_TIMEOUT_SECS",
            DEFAULT_UPSTREAM_TIMEOUT_SECS,
        )?;
        let max_upstream_calls = parse_or(
            get("UPSTREAM_MAX_CALLS"),
            "UPSTREAM_MAX_CALLS",
            DEFAULT_MAX_UPSTREAM_CALLS,
        )?;
        if max_upstream_calls == 0 {
            return Err(ConfigError::Invalid {
                key: "UPSTREAM_MAX_CALLS",
                value: "0".to_string(),
            });
        }

        let require_categories = parse_or(get("REQUIRE_CATEGORIES"), "REQUIRE_CATEGORIES", false)?;
        let completeness = if require_categories {
            Completeness::WithCategories
        } else {
            Completeness::Basic
        };

        let scopes = get("OAUTH_SCOPES")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec![DEFAULT_OAUTH_SCOPE.to_string()]);

        Ok(Self {
            port,
            books_api_url: get("BOOKS_API_URL").unwrap_or_else(|| DEFAULT_BOOKS_API_URL.to_string()),
            upstream_timeout: Duration::from_secs(timeout_secs),
            fetch_policy: FetchPolicy {
                max_upstream_calls,
                completeness,
            },
            oauth: OAuthConfig {
                client_id: get("OAUTH_CLIENT_ID"),
                client_secret: get("OAUTH_CLIENT_SECRET"),
                redirect_url: get("OAUTH_REDIRECT_URL")
                    .unwrap_or_else(|| DEFAULT_REDIRECT_URL.to_string()),
                scopes,
            },
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
