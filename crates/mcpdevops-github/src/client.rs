//! GitHub API facade
//!
//! One method per supported operation. Each issues a single authenticated
//! call against the authenticated account's repositories, checks the status,
//! and reshapes the payload to the records in [`crate::models`]. Failures are
//! prefixed with the operation that was running (`Error getting workflows:
//! ...`); credential failures are reported as they are.

use crate::artifact::{DownloadResult, LogFileMap, LogStore};
use crate::credentials::{CredentialResolver, Credentials};
use crate::http::{self, ACCEPT_GITHUB_JSON, ACCEPT_JSON, GithubHttp};
use crate::models::{
    ContentView, CreatedBranch, DirectoryEntry, FileContent, FilePayload, RefPayload, Repository,
    RerunResult, RunPayload, TreeEntry, TreePayload, UpdateFilePayload, UpdatedFile,
    WorkflowRun, WorkflowStatus,
};
use crate::request::{
    CreateBranchRequest, FileRequest, RepoName, TreeRequest, UpdateFileRequest,
    WorkflowRunRequest,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use mcpdevops_core::{Config, DevopsError, Result, ResultExt};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

#[derive(Debug)]
pub struct GithubClient {
    http: GithubHttp,
    credentials: CredentialResolver,
    logs: LogStore,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_store(config, LogStore::new(config.downloads_root.clone()))
    }

    /// Builds a client that extracts into, and reads from, an existing store.
    pub fn with_store(config: &Config, logs: LogStore) -> Result<Self> {
        let http = GithubHttp::new(config.api_url.clone())?;
        let credentials = CredentialResolver::new(http.clone(), config.token.clone());
        Ok(Self {
            http,
            credentials,
            logs,
        })
    }

    /// Resolves the authenticated account. Idempotent.
    pub async fn initialize(&self) -> Result<&Credentials> {
        self.credentials.ensure_ready().await
    }

    /// Lists the authenticated account's repositories.
    pub async fn get_all_repos(&self) -> Result<Vec<Repository>> {
        let creds = self.initialize().await?;
        async {
            let url = self.http.endpoint(&["user", "repos"])?;
            self.get_json(creds, url).await
        }
        .await
        .context("Error getting repositories")
    }

    /// Lists the workflow runs of a repository.
    pub async fn get_data_workflows(&self, repository: &RepoName) -> Result<Vec<WorkflowRun>> {
        let creds = self.initialize().await?;
        async {
            let url = self.repo_endpoint(creds, repository, &["actions", "runs"])?;
            let payload: serde_json::Value = self.get_json(creds, url).await?;
            let runs = payload
                .get("workflow_runs")
                .filter(|runs| runs.is_array())
                .ok_or_else(|| {
                    DevopsError::InvalidResponse(
                        "GitHub response does not contain valid workflow_runs".to_string(),
                    )
                })?;
            Ok::<_, DevopsError>(serde_json::from_value(runs.clone())?)
        }
        .await
        .context("Error getting workflows")
    }

    /// Downloads and extracts the logs of a workflow run.
    ///
    /// Only credential failures are returned as errors; everything that goes
    /// wrong during the download itself is reported in the result.
    pub async fn get_file_logs(&self, run: &WorkflowRunRequest) -> Result<DownloadResult> {
        let creds = self.initialize().await?;
        let run_id = run.run_id();

        let response = async {
            let url = self.repo_endpoint(
                creds,
                run.repository(),
                &["actions", "runs", &run_id.to_string(), "logs"],
            )?;
            let response = http::send(self.http.request(
                Method::GET,
                url,
                &creds.token,
                ACCEPT_GITHUB_JSON,
            ))
            .await?;
            http::ensure_ok(response).await
        }
        .await;

        match response {
            Ok(response) if response.status() == StatusCode::NO_CONTENT => Ok(
                DownloadResult::failed("No logs available for this workflow run"),
            ),
            Ok(response) => Ok(self.logs.download(run_id, response).await),
            Err(e) => {
                tracing::warn!(run_id, error = %e, "log download request failed");
                Ok(DownloadResult::failed(e.to_string()))
            }
        }
    }

    /// Lists every entry of a branch's tree, recursively.
    pub async fn get_content_tree(&self, req: &TreeRequest) -> Result<Vec<TreeEntry>> {
        let creds = self.initialize().await?;
        async {
            let mut url =
                self.repo_endpoint(creds, req.repository(), &["git", "trees", req.branch()])?;
            url.query_pairs_mut().append_pair("recursive", "1");
            let payload: TreePayload = self.get_json(creds, url).await?;
            payload.tree.ok_or_else(|| {
                DevopsError::InvalidResponse(
                    "GitHub response does not contain a valid tree".to_string(),
                )
            })
        }
        .await
        .context("Error getting content tree")
    }

    /// Fetches a file (decoded) or a directory listing.
    pub async fn get_content_files(&self, req: &FileRequest) -> Result<ContentView> {
        let creds = self.initialize().await?;
        async {
            let mut segments = vec!["contents"];
            if let Some(path) = req.path() {
                segments.push(path);
            }
            let url = self.repo_endpoint(creds, req.repository(), &segments)?;
            let payload: serde_json::Value = self.get_json(creds, url).await?;

            if payload.is_array() {
                let entries: Vec<DirectoryEntry> = serde_json::from_value(payload)?;
                return Ok::<_, DevopsError>(ContentView::Directory(entries));
            }

            let file: FilePayload = serde_json::from_value(payload)?;
            let content = decode_content(file.content.as_deref().unwrap_or_default())?;
            Ok::<_, DevopsError>(ContentView::File(FileContent {
                name: file.name,
                path: file.path,
                sha: file.sha,
                kind: file.kind,
                content,
            }))
        }
        .await
        .context("Error getting content files")
    }

    /// Commits new content for an existing file.
    pub async fn update_file(&self, req: &UpdateFileRequest) -> Result<UpdatedFile> {
        #[derive(Serialize)]
        struct Body<'a> {
            message: &'a str,
            content: String,
            sha: &'a str,
        }

        let creds = self.initialize().await?;
        async {
            let url = self.repo_endpoint(creds, req.repository(), &["contents", req.path()])?;
            let body = Body {
                message: req.message(),
                content: STANDARD.encode(req.content()),
                sha: req.sha(),
            };
            let payload: UpdateFilePayload =
                self.send_json(creds, Method::PUT, url, &body).await?;

            Ok::<_, DevopsError>(UpdatedFile {
                message: payload
                    .commit
                    .message
                    .unwrap_or_else(|| req.message().to_string()),
                sha: payload
                    .content
                    .map(|content| content.sha)
                    .unwrap_or(payload.commit.sha),
                content: req.content().to_string(),
            })
        }
        .await
        .context("Error updating file")
    }

    /// Creates `refs/heads/<branch>` pointing at the given commit.
    pub async fn create_branch(&self, req: &CreateBranchRequest) -> Result<CreatedBranch> {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(rename = "ref")]
            reference: String,
            sha: &'a str,
        }

        let creds = self.initialize().await?;
        async {
            let url = self.repo_endpoint(creds, req.repository(), &["git", "refs"])?;
            let body = Body {
                reference: req.reference(),
                sha: req.sha(),
            };
            let payload: RefPayload = self.send_json(creds, Method::POST, url, &body).await?;

            Ok::<_, DevopsError>(CreatedBranch {
                message: format!("Branch '{}' created successfully", req.branch()),
                reference: payload.reference,
                sha: payload.object.sha,
            })
        }
        .await
        .context("Error creating branch")
    }

    /// Queues a new attempt of a workflow run.
    pub async fn rerun_workflow(&self, run: &WorkflowRunRequest) -> Result<RerunResult> {
        let creds = self.initialize().await?;
        async {
            let url = self.repo_endpoint(
                creds,
                run.repository(),
                &["actions", "runs", &run.run_id().to_string(), "rerun"],
            )?;
            let response = http::send(self.http.request(
                Method::POST,
                url,
                &creds.token,
                ACCEPT_JSON,
            ))
            .await?;
            http::ensure_ok(response).await?;

            Ok::<_, DevopsError>(RerunResult {
                message: "Rerun workflow initiated successfully".to_string(),
                status: "queued".to_string(),
            })
        }
        .await
        .context("Error rerunning workflow")
    }

    /// Reports the conclusion of a workflow run.
    pub async fn get_status_workflow(&self, run: &WorkflowRunRequest) -> Result<WorkflowStatus> {
        let creds = self.initialize().await?;
        async {
            let url = self.repo_endpoint(
                creds,
                run.repository(),
                &["actions", "runs", &run.run_id().to_string()],
            )?;
            let payload: RunPayload = self.get_json(creds, url).await?;
            Ok::<_, DevopsError>(WorkflowStatus {
                status: payload.conclusion,
            })
        }
        .await
        .context("Error getting workflow status")
    }

    /// Reads an extracted log directory under the downloads root.
    pub async fn read_logs(&self, dir_name: &str) -> Result<LogFileMap> {
        self.logs.read(dir_name).await.context("Error reading logs")
    }

    fn repo_endpoint(
        &self,
        creds: &Credentials,
        repository: &RepoName,
        rest: &[&str],
    ) -> Result<Url> {
        let mut segments = vec!["repos", creds.login(), repository.as_str()];
        segments.extend_from_slice(rest);
        self.http.endpoint(&segments)
    }

    async fn get_json<T: DeserializeOwned>(&self, creds: &Credentials, url: Url) -> Result<T> {
        tracing::debug!(url = %url, "GET");
        let response =
            http::send(self.http.request(Method::GET, url, &creds.token, ACCEPT_JSON)).await?;
        parse_json(http::ensure_ok(response).await?).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        creds: &Credentials,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<T> {
        tracing::debug!(url = %url, method = %method, "sending");
        let request = self
            .http
            .request(method, url, &creds.token, ACCEPT_JSON)
            .json(body);
        let response = http::send(request).await?;
        parse_json(http::ensure_ok(response).await?).await
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response
        .bytes()
        .await
        .map_err(|e| DevopsError::Network(http::error_chain(&e)))?;
    Ok(serde_json::from_slice(&body)?)
}

/// Decodes contents-API base64, which GitHub wraps at 60 columns.
fn decode_content(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| DevopsError::InvalidResponse(format!("Invalid base64 content: {}", e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_content_ignores_line_wraps() {
        let decoded = decode_content("aGVs\nbG8g\nd29y\nbGQ=\n").unwrap();
        assert_eq!(decoded, "hello world");
    }

    #[test]
    fn test_decode_content_rejects_garbage() {
        let err = decode_content("!!!").unwrap_err();
        assert!(err.to_string().starts_with("Invalid base64 content"));
    }

    #[test]
    fn test_decode_empty_content() {
        assert_eq!(decode_content("").unwrap(), "");
    }
}
