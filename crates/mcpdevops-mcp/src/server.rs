use crate::context::McpContext;
use crate::handlers::github::GithubTool;
use crate::handlers::logs::LogsTool;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{ServerHandler, ServiceExt, tool_handler};

/// MCP server exposing GitHub repository, workflow and log tools
#[derive(Clone)]
pub struct DevopsServer {
    pub context: McpContext,
    pub tool_router: ToolRouter<Self>,
}

impl DevopsServer {
    pub fn new(context: McpContext) -> Self {
        Self {
            context,
            tool_router: Self::router(),
        }
    }

    pub fn router() -> ToolRouter<Self> {
        let router = GithubTool.register(ToolRouter::new());
        LogsTool.register(router)
    }
}

#[tool_handler]
impl ServerHandler for DevopsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Inspect GitHub repositories and Actions workflow runs of the authenticated \
                 account: list runs, download and read their logs, browse and update files, \
                 create branches and re-run workflows."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

/// Serves MCP over stdin/stdout until the client disconnects.
pub async fn run_stdio_server(context: McpContext) -> anyhow::Result<()> {
    let server = DevopsServer::new(context);
    tracing::info!(
        tools = server.tool_router.list_all().len(),
        "starting MCP server on stdio"
    );

    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    Ok(())
}
