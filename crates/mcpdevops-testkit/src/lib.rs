//! Test utilities for mcpdevops
//!
//! This crate provides shared testing utilities used across the mcpdevops workspace.

use mcpdevops_core::Config;
use std::io::{Cursor, Write};
use tempfile::TempDir;

pub mod mock;

pub use mock::{TEST_LOGIN, TEST_TOKEN, mock_user};

/// Creates a temporary directory within `.tmp/` at the project root
///
/// All test temporary files end up in a single gitignored location that is
/// easy to clean up manually if needed.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot be created.
///
/// # Examples
///
/// ```rust
/// use mcpdevops_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("test.txt");
/// std::fs::write(&file_path, "test data").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    let workspace_root = std::env::current_dir().expect("Failed to get current directory");

    let tmp_base = workspace_root.join(".tmp");

    std::fs::create_dir_all(&tmp_base).expect("Failed to create .tmp directory");

    TempDir::new_in(&tmp_base).expect("Failed to create temporary directory in .tmp/")
}

/// Builds a zip archive in memory
///
/// Names ending in `/` become directory entries; everything else is a file
/// with the given content.
///
/// ```rust
/// use mcpdevops_testkit::zip_archive;
///
/// let bytes = zip_archive(&[("a.txt", b"hello"), ("sub/", b""), ("sub/b.txt", b"world")]);
/// assert!(!bytes.is_empty());
/// ```
pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options: zip::write::FileOptions<'_, ()> =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options)
                .expect("Failed to add zip directory");
        } else {
            zip.start_file(*name, options)
                .expect("Failed to start zip entry");
            zip.write_all(content).expect("Failed to write zip entry");
        }
    }

    zip.finish().expect("Failed to finish zip").into_inner()
}

/// The archive layout GitHub produces for a two-job workflow run
pub fn sample_run_archive() -> Vec<u8> {
    zip_archive(&[
        ("0_build.txt", b"2024-01-01T00:00:00Z build started\n"),
        ("build/", b""),
        ("build/1_Set up job.txt", b"Set up job\n"),
        ("build/2_Run tests.txt", b"error: test failed\n"),
    ])
}

/// Configuration pointing at a mock server and a private downloads root
pub fn test_config(api_url: &str, downloads_root: &std::path::Path) -> Config {
    Config {
        token: TEST_TOKEN.to_string(),
        api_url: url::Url::parse(api_url).expect("Invalid mock server URL"),
        downloads_root: downloads_root.to_path_buf(),
    }
}
