//! Workflow-log artifacts on disk
//!
//! A run's log bundle is a zip archive. [`LogStore::download`] extracts it to
//! `<downloads_root>/log_<id>/` and [`LogStore::read`] turns an extracted
//! directory back into a path to content map.
//!
//! Downloads never fail with an error value: every problem is reported
//! through [`DownloadResult`]. Reading reports a missing directory as an
//! error but downgrades individual unreadable files to empty content.

mod download;
mod error;
mod lock;
mod read;

pub use download::ArchiveBody;
pub use error::ArtifactError;

use lock::KeyedLocks;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Absolute file path to file content, ordered by path
pub type LogFileMap = BTreeMap<String, String>;

/// Outcome of one download attempt
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DownloadResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DownloadResult {
    pub fn ok(filename: impl Into<PathBuf>) -> Self {
        Self {
            success: true,
            filename: Some(filename.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            filename: None,
            error: Some(error.into()),
        }
    }
}

/// Directory name a run's logs are extracted into
pub fn log_dir_name(run_id: u64) -> String {
    format!("log_{}", run_id)
}

/// Extracted log directories under one downloads root
///
/// Clones share their locks: a read of `log_<id>` through any clone waits
/// while a download of the same run is swapping the directory.
#[derive(Debug, Clone)]
pub struct LogStore {
    root: PathBuf,
    locks: Arc<KeyedLocks<String>>,
}

impl LogStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: Arc::new(KeyedLocks::new()),
        }
    }

    /// Destination directory for `run_id`
    pub fn log_dir(&self, run_id: u64) -> PathBuf {
        self.root.join(log_dir_name(run_id))
    }
}
