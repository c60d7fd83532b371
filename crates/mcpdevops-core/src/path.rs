//! Path validation for user-supplied names
//!
//! Tool callers name directories under the downloads root. These names must
//! never resolve outside of it, on any platform.
//!
//! `Path::is_absolute()` is platform dependent (`/tmp` is rooted but not
//! absolute on Windows), so checks here are component based.

use anyhow::{Result, bail};
use std::path::{Component, Path};

/// Check if path is absolute OR rooted (cross-platform)
///
/// ```rust
/// use std::path::Path;
/// use mcpdevops_core::path::has_absolute_or_rooted_component;
///
/// assert!(has_absolute_or_rooted_component(Path::new("/tmp")));
/// assert!(!has_absolute_or_rooted_component(Path::new("log_1/step")));
/// ```
pub fn has_absolute_or_rooted_component(path: &Path) -> bool {
    if path.is_absolute() {
        return true;
    }

    path.components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
}

/// Check if path is a safe relative path below some root
///
/// Validates that the path:
/// 1. Is not absolute or rooted
/// 2. Contains no parent directory traversal (..)
/// 3. Contains no current directory components (.)
/// 4. Contains at least one Normal component
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
/// use mcpdevops_core::path::is_safe_relative_path;
///
/// assert!(is_safe_relative_path(Path::new("log_42")).is_ok());
/// assert!(is_safe_relative_path(Path::new("log_42/build")).is_ok());
/// assert!(is_safe_relative_path(Path::new("../etc")).is_err());
/// assert!(is_safe_relative_path(Path::new("/etc")).is_err());
/// ```
pub fn is_safe_relative_path(path: &Path) -> Result<()> {
    if has_absolute_or_rooted_component(path) {
        bail!("Path cannot be absolute or rooted: '{}'", path.display());
    }

    let mut normal_count = 0;

    for component in path.components() {
        match component {
            Component::Normal(_) => normal_count += 1,
            Component::Prefix(_) => {
                bail!("Path cannot contain drive prefix: '{}'", path.display())
            }
            Component::RootDir => {
                bail!("Path cannot be absolute or rooted: '{}'", path.display())
            }
            Component::CurDir => {
                bail!(
                    "Path cannot contain current directory (.): '{}'",
                    path.display()
                )
            }
            Component::ParentDir => {
                bail!(
                    "Path cannot contain parent directory (..): '{}'",
                    path.display()
                )
            }
        }
    }

    if normal_count == 0 {
        bail!("Path cannot be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_single_and_nested_names() {
        assert!(is_safe_relative_path(Path::new("log_123")).is_ok());
        assert!(is_safe_relative_path(Path::new("log_123/1_build")).is_ok());
    }

    #[test]
    fn test_rejects_parent_traversal() {
        let err = is_safe_relative_path(Path::new("log_1/../../secrets")).unwrap_err();
        assert!(err.to_string().contains(".."));
    }

    #[test]
    fn test_rejects_rooted_paths() {
        assert!(is_safe_relative_path(Path::new("/path/to/logs")).is_err());
        assert!(has_absolute_or_rooted_component(Path::new("/etc/passwd")));
    }

    #[test]
    fn test_rejects_current_dir_and_empty() {
        assert!(is_safe_relative_path(Path::new("./log_1")).is_err());
        assert!(is_safe_relative_path(Path::new("")).is_err());
    }
}
