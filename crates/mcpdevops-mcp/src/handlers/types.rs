//! Tool argument shapes
//!
//! Field names follow the camelCase names tool callers send.

use rmcp::schemars;

#[derive(serde::Deserialize, schemars::JsonSchema)]
pub struct ShowRepositoriesArgs {}

#[derive(serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryArgs {
    /// Repository name, owned by the authenticated account
    pub repository_name: String,
}

#[derive(serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRunArgs {
    pub repository_name: String,
    /// Workflow run id
    pub id: u64,
}

#[derive(serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadLogsArgs {
    /// Directory under the downloads root, e.g. `log_123`
    pub dir_name: String,
}

#[derive(serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentFilesArgs {
    pub repository_name: String,
    /// File or directory path; the repository root when omitted
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentTreeArgs {
    pub repository_name: String,
    pub name_branch: String,
}

#[derive(serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileArgs {
    pub repository_name: String,
    pub path: String,
    /// New file content as plain text
    pub content: String,
    /// Blob sha of the version being replaced
    pub sha: String,
    /// Commit message
    pub message: String,
}

#[derive(serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchArgs {
    pub repository_name: String,
    pub new_branch_name: String,
    /// Commit sha the branch starts from
    pub sha: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_args_use_camel_case() {
        let args: CreateBranchArgs = serde_json::from_value(json!({
            "repositoryName": "test-repo",
            "newBranchName": "feature",
            "sha": "abc"
        }))
        .unwrap();
        assert_eq!(args.new_branch_name, "feature");
    }

    #[test]
    fn test_run_id_must_be_numeric() {
        let err = serde_json::from_value::<WorkflowRunArgs>(json!({
            "repositoryName": "test-repo",
            "id": "123"
        }));
        assert!(err.is_err());
    }

    #[test]
    fn test_content_path_is_optional() {
        let args: ContentFilesArgs =
            serde_json::from_value(json!({"repositoryName": "test-repo"})).unwrap();
        assert!(args.path.is_none());
    }
}
