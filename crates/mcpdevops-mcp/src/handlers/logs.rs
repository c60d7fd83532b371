use crate::errors;
use crate::handlers::types::{ReadLogsArgs, WorkflowRunArgs};
use crate::handlers::{Safety, ToolExt, render};
use crate::server::DevopsServer;
use futures_util::FutureExt;
use mcpdevops_core::ResultExt;
use mcpdevops_github::WorkflowRunRequest;
use rmcp::{
    ErrorData as McpError,
    handler::server::common::FromContextPart,
    handler::server::router::tool::{ToolRoute, ToolRouter},
    handler::server::wrapper::Parameters,
    model::*,
};
use std::borrow::Cow;

/// Workflow-log download and reading
pub struct LogsTool;

impl LogsTool {
    pub fn register(self, router: ToolRouter<DevopsServer>) -> ToolRouter<DevopsServer> {
        router
            .with_route(ToolRoute::new_dyn(Self::download_logs_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<WorkflowRunArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    Self::download_logs(server, args).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::read_logs_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<ReadLogsArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    Self::read_logs(server, args).await
                }
                .boxed()
            }))
    }

    fn download_logs_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("download_logs"),
            "Download and extract the logs of a workflow run",
            rmcp::handler::server::common::schema_for_type::<WorkflowRunArgs>(),
        )
        .with_safety(Safety {
            network: true,
            reads: true,
            writes: true,
            writes_sot: false,
        })
    }

    fn read_logs_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("read_logs"),
            "Read every file of a downloaded log directory",
            rmcp::handler::server::common::schema_for_type::<ReadLogsArgs>(),
        )
        .with_safety(Safety {
            network: false,
            reads: true,
            writes: false,
            writes_sot: false,
        })
    }

    pub async fn download_logs(
        server: &DevopsServer,
        args: WorkflowRunArgs,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let client = server.context.client().await?;
            let run = WorkflowRunRequest::new(args.repository_name, args.id)?;
            client.get_file_logs(&run).await
        }
        .await;

        let result = match outcome {
            Ok(result) => result,
            Err(e) => return Ok(errors::tool_error(&e)),
        };

        let text = match (&result.filename, &result.error) {
            (Some(filename), _) if result.success => {
                format!("Logs downloaded successfully to: {}", filename.display())
            }
            (_, error) => format!(
                "Error downloading logs: {}",
                error.as_deref().unwrap_or("Unknown error")
            ),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Reads a log directory. Works without a configured token.
    pub async fn read_logs(
        server: &DevopsServer,
        args: ReadLogsArgs,
    ) -> Result<CallToolResult, McpError> {
        let outcome = server
            .context
            .logs()
            .read(&args.dir_name)
            .await
            .context("Error reading logs");

        match outcome {
            Ok(logs) if logs.is_empty() => Ok(CallToolResult::success(vec![Content::text(
                "No log files found",
            )])),
            outcome => render(outcome, "Log files read"),
        }
    }
}
