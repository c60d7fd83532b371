pub mod logs;
pub mod serve;

use anyhow::{Context, Result};
use mcpdevops_core::Config;
use mcpdevops_core::config::{default_downloads_root, parse_api_url};
use std::path::PathBuf;

/// Command-line overrides layered on top of the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub downloads_dir: Option<PathBuf>,
}

impl Overrides {
    /// Full configuration; fails when no token is configured.
    pub fn load_config(&self) -> mcpdevops_core::Result<Config> {
        let mut config = Config::from_env()?;
        if let Some(api_url) = &self.api_url {
            config = config.with_api_url(parse_api_url(api_url)?);
        }
        if let Some(dir) = &self.downloads_dir {
            config = config.with_downloads_root(dir);
        }
        Ok(config)
    }

    /// Downloads root alone, which needs no token.
    pub fn downloads_root(&self) -> mcpdevops_core::Result<PathBuf> {
        match &self.downloads_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_downloads_root(),
        }
    }
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")
}
