//! Validated operation requests
//!
//! Every facade operation takes one of these. Construction is the only
//! validation point, so a request that exists is well formed and nothing
//! downstream re-checks its fields.

use mcpdevops_core::{DevopsError, Result};

fn required(value: impl Into<String>, message: &str) -> Result<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(DevopsError::Validation(message.to_string()));
    }
    Ok(value)
}

/// Name of a repository owned by the authenticated account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoName(String);

impl RepoName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = required(name, "Repository name is required and must be a text string")?;
        Ok(Self(name.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A workflow run within a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRunRequest {
    repository: RepoName,
    run_id: u64,
}

impl WorkflowRunRequest {
    pub fn new(repository: impl Into<String>, run_id: u64) -> Result<Self> {
        let repository = RepoName::new(repository)?;
        if run_id == 0 {
            return Err(DevopsError::Validation(
                "Run id is required and must be a positive number".to_string(),
            ));
        }
        Ok(Self {
            repository,
            run_id,
        })
    }

    pub fn repository(&self) -> &RepoName {
        &self.repository
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRequest {
    repository: RepoName,
    branch: String,
}

impl TreeRequest {
    pub fn new(repository: impl Into<String>, branch: impl Into<String>) -> Result<Self> {
        Ok(Self {
            repository: RepoName::new(repository)?,
            branch: required(branch, "Name branch is required and must be a text string")?,
        })
    }

    pub fn repository(&self) -> &RepoName {
        &self.repository
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }
}

/// A path in the default branch; `None` addresses the repository root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRequest {
    repository: RepoName,
    path: Option<String>,
}

impl FileRequest {
    pub fn new(repository: impl Into<String>, path: Option<String>) -> Result<Self> {
        let path = path
            .map(|p| p.trim().trim_matches('/').to_string())
            .filter(|p| !p.is_empty());
        Ok(Self {
            repository: RepoName::new(repository)?,
            path,
        })
    }

    pub fn repository(&self) -> &RepoName {
        &self.repository
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFileRequest {
    repository: RepoName,
    path: String,
    content: String,
    sha: String,
    message: String,
}

impl UpdateFileRequest {
    pub fn new(
        repository: impl Into<String>,
        path: impl Into<String>,
        content: impl Into<String>,
        sha: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            repository: RepoName::new(repository)?,
            path: required(path, "Path is required and must be a text string")?,
            content: required(content, "Content is required and must be a text string")?,
            sha: required(sha, "SHA is required and must be a text string")?,
            message: required(message, "Message is required and must be a text string")?,
        })
    }

    pub fn repository(&self) -> &RepoName {
        &self.repository
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sha(&self) -> &str {
        &self.sha
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBranchRequest {
    repository: RepoName,
    branch: String,
    sha: String,
}

impl CreateBranchRequest {
    pub fn new(
        repository: impl Into<String>,
        branch: impl Into<String>,
        sha: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            repository: RepoName::new(repository)?,
            branch: required(branch, "Branch name is required and must be a text string")?,
            sha: required(sha, "SHA is required and must be a text string")?,
        })
    }

    pub fn repository(&self) -> &RepoName {
        &self.repository
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn sha(&self) -> &str {
        &self.sha
    }

    /// Fully qualified ref name (`refs/heads/<branch>`)
    pub fn reference(&self) -> String {
        format!("refs/heads/{}", self.branch)
    }
}
