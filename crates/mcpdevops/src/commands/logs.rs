use super::{Overrides, runtime};
use crate::output::print_json;
use anyhow::{Result, bail};
use mcpdevops_github::{GithubClient, LogStore, WorkflowRunRequest};

/// Download and extract a run's logs, printing the outcome as JSON
pub fn download(overrides: &Overrides, repository: String, id: u64) -> Result<()> {
    let config = overrides.load_config()?;
    let run = WorkflowRunRequest::new(repository, id)?;
    tracing::debug!(?config, run_id = id, "downloading workflow logs");

    let rt = runtime()?;
    let result = rt.block_on(async {
        let client = GithubClient::new(&config)?;
        client.get_file_logs(&run).await
    })?;

    print_json(&serde_json::to_value(&result)?)?;
    if !result.success {
        bail!(
            "Error downloading logs: {}",
            result.error.as_deref().unwrap_or("Unknown error")
        );
    }
    Ok(())
}

/// Print a downloaded log directory as a path to content JSON object
pub fn read(overrides: &Overrides, dir: String) -> Result<()> {
    let store = LogStore::new(overrides.downloads_root()?);
    let rt = runtime()?;
    let logs = rt.block_on(store.read(&dir))?;
    print_json(&serde_json::to_value(&logs)?)?;
    Ok(())
}
