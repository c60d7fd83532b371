use super::{Overrides, runtime};
use anyhow::Result;
use mcpdevops_mcp::{McpContext, run_stdio_server};

/// Run MCP server in stdio mode
///
/// The token is not required to start; tools report it when missing.
pub fn run(overrides: Overrides) -> Result<()> {
    let downloads_root = overrides.downloads_root()?;
    let context = McpContext::with_loader(downloads_root, move || overrides.load_config());

    let rt = runtime()?;
    rt.block_on(run_stdio_server(context))
}
