//! Process configuration
//!
//! Everything is resolved once at startup. The access token is mandatory: a
//! missing token is a fatal configuration error reported before any request
//! is attempted.

use crate::error::DevopsError;
use crate::Result;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Environment variable holding the GitHub access token
pub const TOKEN_ENV: &str = "GITHUB_PERSONAL_ACCESS_TOKEN";

/// Optional override for the GitHub API base URL
pub const API_URL_ENV: &str = "MCPDEVOPS_API_URL";

/// Optional override for the directory logs are downloaded into
pub const DOWNLOADS_DIR_ENV: &str = "MCPDEVOPS_DOWNLOADS_DIR";

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// User agent sent with every request
pub const USER_AGENT: &str = "MCP-DevOps/1.0.0";

/// Value of the `X-GitHub-Api-Version` header
pub const API_VERSION: &str = "2022-11-28";

#[derive(Clone)]
pub struct Config {
    /// Bearer token sent with every request
    pub token: String,

    /// Base URL all API paths are appended to
    pub api_url: Url,

    /// Directory holding `log_<id>` extraction targets
    pub downloads_root: PathBuf,
}

impl Config {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let token = non_empty(TOKEN_ENV).ok_or_else(|| {
            DevopsError::Config(format!(
                "{} environment variable is not configured. Please set it in your MCP client configuration.",
                TOKEN_ENV
            ))
        })?;

        let api_url = match non_empty(API_URL_ENV) {
            Some(raw) => parse_api_url(&raw)?,
            None => parse_api_url(DEFAULT_API_URL)?,
        };

        let downloads_root = match non_empty(DOWNLOADS_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => default_downloads_root()?,
        };

        Ok(Self {
            token,
            api_url,
            downloads_root,
        })
    }

    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }

    pub fn with_downloads_root(mut self, downloads_root: impl Into<PathBuf>) -> Self {
        self.downloads_root = downloads_root.into();
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("downloads_root", &self.downloads_root)
            .finish()
    }
}

/// Parses an API base URL, rejecting URLs that cannot carry path segments.
pub fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| DevopsError::Config(format!("Invalid API URL '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(DevopsError::Config(format!(
            "Invalid API URL '{}': URL cannot be a base",
            raw
        )));
    }
    Ok(url)
}

/// The user's downloads directory (`~/Downloads` when the platform has no answer).
pub fn default_downloads_root() -> Result<PathBuf> {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .ok_or_else(|| {
            DevopsError::Config(
                "Could not determine the user downloads directory; set MCPDEVOPS_DOWNLOADS_DIR"
                    .to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, DevopsError::Config(_)));
        assert!(err.to_string().contains(TOKEN_ENV));
    }

    #[test]
    fn test_blank_token_is_config_error() {
        let err = Config::from_lookup(lookup(&[(TOKEN_ENV, "   ")])).unwrap_err();
        assert_eq!(err.code(), crate::error::CONFIG_INVALID);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            (TOKEN_ENV, "test-token"),
            (API_URL_ENV, "http://127.0.0.1:9999"),
            (DOWNLOADS_DIR_ENV, "/tmp/mcpdevops-downloads"),
        ]))
        .unwrap();
        assert_eq!(config.token, "test-token");
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:9999/");
        assert_eq!(
            config.downloads_root,
            PathBuf::from("/tmp/mcpdevops-downloads")
        );
    }

    #[test]
    fn test_default_api_url() {
        let config = Config::from_lookup(lookup(&[
            (TOKEN_ENV, "t"),
            (DOWNLOADS_DIR_ENV, "/tmp/x"),
        ]))
        .unwrap();
        assert_eq!(config.api_url.as_str(), "https://api.github.com/");
    }

    #[test]
    fn test_invalid_api_url_rejected() {
        let err = Config::from_lookup(lookup(&[
            (TOKEN_ENV, "t"),
            (API_URL_ENV, "not a url"),
            (DOWNLOADS_DIR_ENV, "/tmp/x"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("Invalid API URL"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::from_lookup(lookup(&[
            (TOKEN_ENV, "super-secret"),
            (DOWNLOADS_DIR_ENV, "/tmp/x"),
        ]))
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
