//! GitHub access for mcpdevops.
//!
//! # Architecture
//!
//! - [`http`]: client construction, authenticated headers, status normalization
//! - [`credentials`]: one-time token to account resolution
//! - [`client`]: the API facade, one method per supported operation
//! - [`artifact`]: workflow-log archive download, extraction and reading
//!
//! # Log Retrieval Flow
//!
//! ```text
//! GithubClient::get_file_logs()
//!     ↓
//! 1. GET /repos/{owner}/{repo}/actions/runs/{id}/logs (redirects followed)
//!     → 204: soft failure, extractor not invoked
//!     → non-2xx / network: soft failure with the error message
//!     ↓
//! 2. LogStore::download()
//!     → empty body / empty buffer: soft failure
//!     → zip entries written concurrently into a staging dir
//!     → staging dir renamed to {downloads_root}/log_{id}
//!     ↓
//! 3. LogStore::read("log_{id}")
//!     → every file read concurrently, unreadable files map to ""
//! ```

pub mod artifact;
pub mod client;
pub mod credentials;
pub mod http;
pub mod models;
pub mod request;

pub use artifact::{ArchiveBody, ArtifactError, DownloadResult, LogFileMap, LogStore};
pub use client::GithubClient;
pub use credentials::{CredentialResolver, Credentials};
pub use request::{
    CreateBranchRequest, FileRequest, RepoName, TreeRequest, UpdateFileRequest,
    WorkflowRunRequest,
};
