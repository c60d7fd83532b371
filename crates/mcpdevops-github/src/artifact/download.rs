//! Log archive download and extraction

use super::{ArtifactError, DownloadResult, LogStore};
use crate::http::error_chain;
use bytes::Bytes;
use reqwest::StatusCode;
use std::future::Future;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;

/// Source of a log archive body
///
/// `Ok(None)` means there is no body to read at all; `Ok(Some(empty))` means
/// a body was sent but carried no bytes.
pub trait ArchiveBody: Send {
    fn read_all(self) -> impl Future<Output = Result<Option<Bytes>, ArtifactError>> + Send;
}

impl ArchiveBody for reqwest::Response {
    async fn read_all(self) -> Result<Option<Bytes>, ArtifactError> {
        match self.status() {
            StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT | StatusCode::NOT_MODIFIED => {
                Ok(None)
            }
            _ => self
                .bytes()
                .await
                .map(Some)
                .map_err(|e| ArtifactError::Body(error_chain(&e))),
        }
    }
}

impl ArchiveBody for Bytes {
    async fn read_all(self) -> Result<Option<Bytes>, ArtifactError> {
        Ok(Some(self))
    }
}

impl ArchiveBody for Vec<u8> {
    async fn read_all(self) -> Result<Option<Bytes>, ArtifactError> {
        Ok(Some(Bytes::from(self)))
    }
}

impl ArchiveBody for Option<Vec<u8>> {
    async fn read_all(self) -> Result<Option<Bytes>, ArtifactError> {
        Ok(self.map(Bytes::from))
    }
}

/// One decoded archive member
#[derive(Debug)]
struct ArchiveEntry {
    relative_path: PathBuf,
    is_directory: bool,
    content: Bytes,
}

impl LogStore {
    /// Downloads and extracts the logs of `run_id`, replacing any earlier extraction.
    pub async fn download<B: ArchiveBody>(&self, run_id: u64, body: B) -> DownloadResult {
        match self.try_download(run_id, body).await {
            Ok(path) => {
                tracing::info!(run_id, path = %path.display(), "workflow logs extracted");
                DownloadResult::ok(path)
            }
            Err(e) => {
                tracing::warn!(run_id, error = %e, "workflow log download failed");
                DownloadResult::failed(e.to_string())
            }
        }
    }

    async fn try_download<B: ArchiveBody>(
        &self,
        run_id: u64,
        body: B,
    ) -> Result<PathBuf, ArtifactError> {
        let buffer = body.read_all().await?.ok_or(ArtifactError::EmptyBody)?;
        if buffer.is_empty() {
            return Err(ArtifactError::EmptyBuffer);
        }

        let name = super::log_dir_name(run_id);
        let _guard = self.locks.write(name.clone()).await;

        let destination = self.log_dir(run_id);
        ensure_dir(&self.root).await?;

        let staging = self.scratch_dir(&format!(".{}-", name))?;

        let entries = tokio::task::spawn_blocking(move || decode_archive(buffer))
            .await
            .map_err(|e| ArtifactError::Archive {
                reason: e.to_string(),
            })??;

        tracing::debug!(run_id, entries = entries.len(), "decoded log archive");
        write_entries(staging.path(), entries).await?;

        let retired = self.scratch_dir(&format!(".{}-old-", name))?;
        let previous = retired.path().join(&name);
        if let Err(e) = replace_dir(staging.path(), &destination, &previous).await {
            // Never discard a previous extraction that could not be put back.
            if !matches!(tokio::fs::try_exists(&previous).await, Ok(false)) {
                let kept = retired.keep();
                tracing::error!(run_id, path = %kept.display(), "previous log extraction left aside");
            }
            return Err(e);
        }
        // The staging path no longer exists; disarm its cleanup.
        let _ = staging.keep();

        if let Err(e) = retired.close() {
            tracing::warn!(run_id, error = %e, "failed to remove previous log extraction");
        }

        Ok(destination)
    }

    /// Fresh hidden directory under the root, removed when dropped
    fn scratch_dir(&self, prefix: &str) -> Result<tempfile::TempDir, ArtifactError> {
        tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(&self.root)
            .map_err(|e| {
                ArtifactError::filesystem(
                    format!("create staging directory in {}", self.root.display()),
                    e,
                )
            })
    }
}

/// Moves `staged` to `destination`, setting any existing `destination` aside
/// at `retired` first. If the final move fails the previous directory is put
/// back.
async fn replace_dir(
    staged: &Path,
    destination: &Path,
    retired: &Path,
) -> Result<(), ArtifactError> {
    let had_previous = match tokio::fs::symlink_metadata(destination).await {
        Ok(_) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            return Err(ArtifactError::filesystem(
                format!("inspect {}", destination.display()),
                e,
            ));
        }
    };

    if had_previous {
        tokio::fs::rename(destination, retired).await.map_err(|e| {
            ArtifactError::filesystem(format!("set aside {}", destination.display()), e)
        })?;
    }

    if let Err(e) = tokio::fs::rename(staged, destination).await {
        if had_previous {
            if let Err(restore) = tokio::fs::rename(retired, destination).await {
                tracing::error!(
                    path = %destination.display(),
                    error = %restore,
                    "failed to restore previous log extraction"
                );
            }
        }
        return Err(ArtifactError::filesystem(
            format!("move logs into {}", destination.display()),
            e,
        ));
    }

    Ok(())
}

async fn ensure_dir(dir: &Path) -> Result<(), ArtifactError> {
    match tokio::fs::create_dir_all(dir).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(ArtifactError::filesystem(
            format!("create directory {}", dir.display()),
            e,
        )),
    }
}

/// Reads every member of a zip archive into memory
///
/// Members whose names escape the archive root are skipped.
fn decode_archive(buffer: Bytes) -> Result<Vec<ArchiveEntry>, ArtifactError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(buffer)).map_err(|e| ArtifactError::Archive {
            reason: e.to_string(),
        })?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(|e| ArtifactError::Archive {
            reason: e.to_string(),
        })?;

        let relative_path = match file.enclosed_name() {
            Some(path) => path,
            None => {
                tracing::warn!(name = file.name(), "skipping unsafe archive entry");
                continue;
            }
        };

        let is_directory = file.is_dir();
        let mut content = Vec::new();
        if !is_directory {
            file.read_to_end(&mut content)
                .map_err(|e| ArtifactError::Archive {
                    reason: format!("{}: {}", relative_path.display(), e),
                })?;
        }

        entries.push(ArchiveEntry {
            relative_path,
            is_directory,
            content: Bytes::from(content),
        });
    }

    Ok(entries)
}

/// Writes all entries concurrently and waits for every write to finish
async fn write_entries(dest_dir: &Path, entries: Vec<ArchiveEntry>) -> Result<(), ArtifactError> {
    let mut writes = JoinSet::new();
    for entry in entries {
        let outpath = dest_dir.join(&entry.relative_path);
        writes.spawn(write_entry(outpath, entry));
    }

    let mut first_error = None;
    while let Some(joined) = writes.join_next().await {
        let result = joined.unwrap_or_else(|e| {
            Err(ArtifactError::filesystem(
                "write log entry",
                io::Error::other(e.to_string()),
            ))
        });
        if let Err(e) = result {
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

async fn write_entry(outpath: PathBuf, entry: ArchiveEntry) -> Result<(), ArtifactError> {
    if entry.is_directory {
        return ensure_dir(&outpath).await;
    }

    if let Some(parent) = outpath.parent() {
        ensure_dir(parent).await?;
    }

    tokio::fs::write(&outpath, &entry.content)
        .await
        .map_err(|e| ArtifactError::filesystem(format!("write {}", outpath.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcpdevops_testkit::{temp_dir_in_workspace, zip_archive};

    #[tokio::test]
    async fn test_absent_body_reports_empty_body_without_io() {
        let temp = temp_dir_in_workspace();
        let root = temp.path().join("downloads");
        let store = LogStore::new(&root);

        let result = store.download(1, None::<Vec<u8>>).await;

        assert_eq!(result, DownloadResult::failed("Response body is empty"));
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_zero_length_buffer_reports_no_log_data() {
        let temp = temp_dir_in_workspace();
        let root = temp.path().join("downloads");
        let store = LogStore::new(&root);

        let result = store.download(1, Vec::new()).await;

        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("No log data received from GitHub API")
        );
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_extracts_nested_entries() {
        let temp = temp_dir_in_workspace();
        let store = LogStore::new(temp.path());
        let archive = zip_archive(&[("a.txt", b"hello"), ("sub/", b""), ("sub/b.txt", b"world")]);

        let result = store.download(12345, archive).await;

        assert!(result.success, "{:?}", result.error);
        let dir = temp.path().join("log_12345");
        assert_eq!(result.filename.as_deref(), Some(dir.as_path()));
        assert_eq!(std::fs::read_to_string(dir.join("a.txt")).unwrap(), "hello");
        assert_eq!(std::fs::read_to_string(dir.join("sub/b.txt")).unwrap(), "world");
    }

    #[tokio::test]
    async fn test_creates_missing_downloads_root() {
        let temp = temp_dir_in_workspace();
        let root = temp.path().join("nested").join("downloads");
        let store = LogStore::new(&root);

        let result = store.download(5, zip_archive(&[("job.txt", b"ok")])).await;

        assert!(result.success);
        assert!(root.join("log_5").join("job.txt").is_file());
    }

    #[tokio::test]
    async fn test_unsafe_entry_names_are_skipped() {
        let temp = temp_dir_in_workspace();
        let root = temp.path().join("downloads");
        let store = LogStore::new(&root);
        let archive = zip_archive(&[("../escape.txt", b"bad"), ("ok.txt", b"good")]);

        let result = store.download(3, archive).await;

        assert!(result.success);
        assert!(!temp.path().join("escape.txt").exists());
        assert!(root.join("log_3").join("ok.txt").is_file());
    }

    #[tokio::test]
    async fn test_replace_dir_restores_previous_when_move_fails() {
        let temp = temp_dir_in_workspace();
        let destination = temp.path().join("log_1");
        std::fs::create_dir_all(&destination).unwrap();
        std::fs::write(destination.join("old.txt"), "previous").unwrap();
        let retired = temp.path().join("retired");

        let missing_stage = temp.path().join("never-staged");
        let err = replace_dir(&missing_stage, &destination, &retired)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("move logs into"), "{err}");
        assert_eq!(
            std::fs::read_to_string(destination.join("old.txt")).unwrap(),
            "previous"
        );
        assert!(!retired.exists());
    }

    #[tokio::test]
    async fn test_replace_dir_sets_previous_aside() {
        let temp = temp_dir_in_workspace();
        let destination = temp.path().join("log_1");
        std::fs::create_dir_all(&destination).unwrap();
        std::fs::write(destination.join("old.txt"), "previous").unwrap();
        let staged = temp.path().join("staged");
        std::fs::create_dir_all(&staged).unwrap();
        std::fs::write(staged.join("new.txt"), "current").unwrap();
        let retired = temp.path().join("retired");

        replace_dir(&staged, &destination, &retired).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(destination.join("new.txt")).unwrap(),
            "current"
        );
        assert!(!destination.join("old.txt").exists());
        assert!(retired.join("old.txt").is_file());
        assert!(!staged.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_replace_dir_reports_uninspectable_destination() {
        let temp = temp_dir_in_workspace();
        let not_a_dir = temp.path().join("plain.txt");
        std::fs::write(&not_a_dir, "x").unwrap();
        let staged = temp.path().join("staged");
        std::fs::create_dir_all(&staged).unwrap();

        let err = replace_dir(&staged, &not_a_dir.join("log_1"), &temp.path().join("retired"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to inspect"), "{err}");
        assert!(staged.is_dir());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_redownload_keeps_previous_extraction() {
        use std::os::unix::fs::PermissionsExt;

        let temp = temp_dir_in_workspace();
        let root = temp.path().join("downloads");
        let store = LogStore::new(&root);
        let first = store.download(1, zip_archive(&[("job.txt", b"first")])).await;
        assert!(first.success, "{:?}", first.error);

        std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o555)).unwrap();
        let privileged = std::fs::write(root.join("write-check"), "x").is_ok();
        let second = if privileged {
            None
        } else {
            Some(store.download(1, zip_archive(&[("job.txt", b"second")])).await)
        };
        std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o755)).unwrap();

        // Permission bits do not restrict a privileged user.
        let Some(second) = second else { return };
        assert!(!second.success);
        assert_eq!(
            std::fs::read_to_string(root.join("log_1").join("job.txt")).unwrap(),
            "first"
        );
    }

    #[test]
    fn test_decode_rejects_non_zip_data() {
        let err = decode_archive(Bytes::from_static(b"definitely not a zip")).unwrap_err();
        assert!(matches!(err, ArtifactError::Archive { .. }));
    }
}
