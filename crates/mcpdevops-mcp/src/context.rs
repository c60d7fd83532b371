use mcpdevops_core::{Config, Result};
use mcpdevops_github::{GithubClient, LogStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;

type ConfigLoader = dyn Fn() -> Result<Config> + Send + Sync;

/// Shared state behind every tool call
///
/// The GitHub client is built on the first call that needs it, so a missing
/// token is reported to the caller instead of stopping the server. A failed
/// build is retried on the next call. The client and the offline log tools
/// share one [`LogStore`], so reads never observe a half-replaced directory.
#[derive(Clone)]
pub struct McpContext {
    logs: LogStore,
    loader: Arc<ConfigLoader>,
    client: Arc<OnceCell<GithubClient>>,
}

impl McpContext {
    pub fn new(config: Config) -> Self {
        let downloads_root = config.downloads_root.clone();
        Self::with_loader(downloads_root, move || Ok(config.clone()))
    }

    pub fn with_loader<F>(downloads_root: impl Into<PathBuf>, loader: F) -> Self
    where
        F: Fn() -> Result<Config> + Send + Sync + 'static,
    {
        Self {
            logs: LogStore::new(downloads_root),
            loader: Arc::new(loader),
            client: Arc::new(OnceCell::new()),
        }
    }

    pub fn logs(&self) -> &LogStore {
        &self.logs
    }

    pub async fn client(&self) -> Result<&GithubClient> {
        self.client
            .get_or_try_init(|| async {
                let config = (self.loader)()?;
                tracing::debug!(?config, "building GitHub client");
                GithubClient::with_store(&config, self.logs.clone())
            })
            .await
    }
}
