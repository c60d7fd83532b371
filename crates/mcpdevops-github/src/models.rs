//! API records
//!
//! Each type keeps only the fields tool callers see. GitHub payloads carry
//! many more; serde ignores them.

use serde::{Deserialize, Serialize};

/// The account the token belongs to
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Account {
    pub login: String,
    pub id: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub private: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct WorkflowRun {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    /// `None` while the run is still in progress
    #[serde(default)]
    pub conclusion: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TreeEntryKind {
    Blob,
    Tree,
    /// Submodule pointer
    Commit,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: TreeEntryKind,
    pub sha: String,
}

/// A single file from the contents API, content already base64-decoded
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileContent {
    pub name: String,
    pub path: String,
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The contents API answers with a file object or a directory listing
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ContentView {
    File(FileContent),
    Directory(Vec<DirectoryEntry>),
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpdatedFile {
    /// Commit message of the commit that changed the file
    pub message: String,
    /// Blob sha of the new file version, needed for the next update
    pub sha: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatedBranch {
    pub message: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub sha: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RerunResult {
    pub message: String,
    pub status: String,
}

/// Conclusion of a workflow run (`None` while it is still running)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WorkflowStatus {
    pub status: Option<String>,
}

// Wire-only payload shapes

#[derive(Debug, Deserialize)]
pub(crate) struct TreePayload {
    pub tree: Option<Vec<TreeEntry>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FilePayload {
    pub name: String,
    pub path: String,
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShaRef {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitRef {
    pub sha: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateFilePayload {
    pub content: Option<ShaRef>,
    pub commit: CommitRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefPayload {
    #[serde(rename = "ref")]
    pub reference: String,
    pub object: ShaRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RunPayload {
    #[serde(default)]
    pub conclusion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_run_ignores_extra_fields() {
        let json = r#"{
            "id": 123,
            "name": "CI",
            "conclusion": "failure",
            "status": "completed",
            "updated_at": "2023-12-01T10:00:00Z",
            "head_branch": "main"
        }"#;
        let run: WorkflowRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.id, 123);
        assert_eq!(run.conclusion.as_deref(), Some("failure"));
    }

    #[test]
    fn test_workflow_run_null_conclusion() {
        let json = r#"{"id": 1, "name": "CI", "conclusion": null, "updated_at": "x"}"#;
        let run: WorkflowRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.conclusion, None);
    }

    #[test]
    fn test_tree_entry_kind_round_trips_lowercase() {
        let json = r#"{"path": "src", "type": "tree", "sha": "def456", "mode": "040000"}"#;
        let entry: TreeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind, TreeEntryKind::Tree);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "tree");
    }

    #[test]
    fn test_content_view_serializes_untagged() {
        let view = ContentView::Directory(vec![DirectoryEntry {
            name: "src".to_string(),
            path: "src".to_string(),
            sha: "abc".to_string(),
            kind: "dir".to_string(),
        }]);
        let value = serde_json::to_value(&view).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["type"], "dir");
    }
}
