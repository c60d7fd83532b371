use super::{LogFileMap, LogStore};
use mcpdevops_core::path::is_safe_relative_path;
use mcpdevops_core::{DevopsError, Result};
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::task::JoinSet;
use walkdir::WalkDir;

impl LogStore {
    /// Reads every file below `<root>/<dir_name>` as text.
    ///
    /// Keys are absolute paths. A file that cannot be read as UTF-8 maps to
    /// an empty string. A missing directory is an error.
    pub async fn read(&self, dir_name: &str) -> Result<LogFileMap> {
        is_safe_relative_path(Path::new(dir_name)).map_err(|e| {
            DevopsError::Validation(format!("Invalid log directory name '{}': {}", dir_name, e))
        })?;

        // A download of the same run swaps the directory under the write lock.
        let _guard = self.locks.read(lock_key(dir_name)).await;

        let dir = std::path::absolute(self.root.join(dir_name))?;
        let metadata = tokio::fs::metadata(&dir).await.map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("cannot open log directory {}: {}", dir.display(), e),
            )
        })?;
        if !metadata.is_dir() {
            return Err(DevopsError::Validation(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        let files = tokio::task::spawn_blocking(move || list_files(&dir))
            .await
            .map_err(|e| DevopsError::Generic(format!("log directory walk failed: {}", e)))??;

        let mut reads = JoinSet::new();
        for path in files {
            reads.spawn(read_text(path));
        }

        let mut logs = LogFileMap::new();
        while let Some(joined) = reads.join_next().await {
            let (path, content) = joined
                .map_err(|e| DevopsError::Generic(format!("log file read failed: {}", e)))?;
            logs.insert(path, content);
        }

        tracing::debug!(dir = dir_name, files = logs.len(), "read log directory");
        Ok(logs)
    }
}

/// Top-level directory a read touches, which is what downloads lock
fn lock_key(dir_name: &str) -> String {
    match Path::new(dir_name).components().next() {
        Some(Component::Normal(first)) => first.to_string_lossy().into_owned(),
        _ => dir_name.to_string(),
    }
}

fn list_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

async fn read_text(path: PathBuf) -> (String, String) {
    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable log file");
            String::new()
        }
    };
    (path.to_string_lossy().into_owned(), content)
}
