use crate::handlers::types::{
    ContentFilesArgs, ContentTreeArgs, CreateBranchArgs, RepositoryArgs, ShowRepositoriesArgs,
    UpdateFileArgs, WorkflowRunArgs,
};
use crate::handlers::{REMOTE_READ, REMOTE_WRITE, ToolExt, render};
use crate::server::DevopsServer;
use futures_util::FutureExt;
use mcpdevops_github::{
    CreateBranchRequest, FileRequest, RepoName, TreeRequest, UpdateFileRequest,
    WorkflowRunRequest,
};
use rmcp::{
    ErrorData as McpError,
    handler::server::common::FromContextPart,
    handler::server::router::tool::{ToolRoute, ToolRouter},
    handler::server::wrapper::Parameters,
    model::*,
};
use std::borrow::Cow;

/// Repository, workflow and content tools
pub struct GithubTool;

impl GithubTool {
    pub fn register(self, router: ToolRouter<DevopsServer>) -> ToolRouter<DevopsServer> {
        router
            .with_route(ToolRoute::new_dyn(Self::show_repositories_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<ShowRepositoriesArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(_args) = args_res?;
                    Self::show_repositories(server).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::show_workflows_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<RepositoryArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    Self::show_workflows(server, args).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::show_content_files_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<ContentFilesArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    Self::show_content_files(server, args).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::show_content_repo_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<ContentTreeArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    Self::show_content_repo(server, args).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::update_file_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<UpdateFileArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    Self::update_file(server, args).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::create_branch_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<CreateBranchArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    Self::create_branch(server, args).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::rerun_workflow_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<WorkflowRunArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    Self::rerun_workflow(server, args).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::status_workflow_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<WorkflowRunArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    Self::status_workflow(server, args).await
                }
                .boxed()
            }))
    }

    fn show_repositories_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("show_repositories"),
            "List the repositories of the authenticated account",
            rmcp::handler::server::common::schema_for_type::<ShowRepositoriesArgs>(),
        )
        .with_safety(REMOTE_READ)
    }

    fn show_workflows_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("show_workflows"),
            "List the workflow runs of a repository",
            rmcp::handler::server::common::schema_for_type::<RepositoryArgs>(),
        )
        .with_safety(REMOTE_READ)
    }

    fn show_content_files_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("show_content_files"),
            "Show a file (decoded) or a directory listing of a repository",
            rmcp::handler::server::common::schema_for_type::<ContentFilesArgs>(),
        )
        .with_safety(REMOTE_READ)
    }

    fn show_content_repo_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("show_content_repo"),
            "Show the full file tree of a repository branch",
            rmcp::handler::server::common::schema_for_type::<ContentTreeArgs>(),
        )
        .with_safety(REMOTE_READ)
    }

    fn update_file_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("update_file"),
            "Commit new content for an existing file",
            rmcp::handler::server::common::schema_for_type::<UpdateFileArgs>(),
        )
        .with_safety(REMOTE_WRITE)
    }

    fn create_branch_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("create_branch"),
            "Create a branch pointing at a commit",
            rmcp::handler::server::common::schema_for_type::<CreateBranchArgs>(),
        )
        .with_safety(REMOTE_WRITE)
    }

    fn rerun_workflow_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("rerun_workflow"),
            "Re-run a workflow run",
            rmcp::handler::server::common::schema_for_type::<WorkflowRunArgs>(),
        )
        .with_safety(REMOTE_WRITE)
    }

    fn status_workflow_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("status_workflow"),
            "Get the conclusion of a workflow run",
            rmcp::handler::server::common::schema_for_type::<WorkflowRunArgs>(),
        )
        .with_safety(REMOTE_READ)
    }

    pub async fn show_repositories(server: &DevopsServer) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let client = server.context.client().await?;
            client.get_all_repos().await
        }
        .await;
        render(outcome, "Repositories found")
    }

    pub async fn show_workflows(
        server: &DevopsServer,
        args: RepositoryArgs,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(repository = %args.repository_name, "show_workflows");
        let outcome = async {
            let client = server.context.client().await?;
            let repo = RepoName::new(args.repository_name)?;
            client.get_data_workflows(&repo).await
        }
        .await;
        render(outcome, "Workflows found")
    }

    pub async fn show_content_files(
        server: &DevopsServer,
        args: ContentFilesArgs,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let client = server.context.client().await?;
            let req = FileRequest::new(args.repository_name, args.path)?;
            client.get_content_files(&req).await
        }
        .await;
        render(outcome, "View content files")
    }

    pub async fn show_content_repo(
        server: &DevopsServer,
        args: ContentTreeArgs,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let client = server.context.client().await?;
            let req = TreeRequest::new(args.repository_name, args.name_branch)?;
            client.get_content_tree(&req).await
        }
        .await;
        render(outcome, "Repository content")
    }

    pub async fn update_file(
        server: &DevopsServer,
        args: UpdateFileArgs,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let client = server.context.client().await?;
            let req = UpdateFileRequest::new(
                args.repository_name,
                args.path,
                args.content,
                args.sha,
                args.message,
            )?;
            client.update_file(&req).await
        }
        .await;
        render(outcome, "Update file")
    }

    pub async fn create_branch(
        server: &DevopsServer,
        args: CreateBranchArgs,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let client = server.context.client().await?;
            let req = CreateBranchRequest::new(args.repository_name, args.new_branch_name, args.sha)?;
            client.create_branch(&req).await
        }
        .await;
        render(outcome, "Create branch")
    }

    pub async fn rerun_workflow(
        server: &DevopsServer,
        args: WorkflowRunArgs,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let client = server.context.client().await?;
            let run = WorkflowRunRequest::new(args.repository_name, args.id)?;
            client.rerun_workflow(&run).await
        }
        .await;
        render(outcome, "Rerun workflow")
    }

    pub async fn status_workflow(
        server: &DevopsServer,
        args: WorkflowRunArgs,
    ) -> Result<CallToolResult, McpError> {
        let outcome = async {
            let client = server.context.client().await?;
            let run = WorkflowRunRequest::new(args.repository_name, args.id)?;
            client.get_status_workflow(&run).await
        }
        .await;
        render(outcome, "Status workflow")
    }
}
