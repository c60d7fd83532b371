use thiserror::Error;

/// Reasons a log download can fail
///
/// Each variant ends up as the `error` text of a failed
/// [`DownloadResult`](super::DownloadResult).
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The response carried no body at all
    #[error("Response body is empty")]
    EmptyBody,

    /// The body was present but zero bytes long
    #[error("No log data received from GitHub API")]
    EmptyBuffer,

    /// Transport failure while reading the body
    #[error("Failed to read log archive: {0}")]
    Body(String),

    /// Corrupt or unsupported archive
    #[error("Failed to extract log archive: {reason}")]
    Archive { reason: String },

    #[error("Failed to {operation}: {source}")]
    Filesystem {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    pub(crate) fn filesystem(operation: impl Into<String>, source: std::io::Error) -> Self {
        ArtifactError::Filesystem {
            operation: operation.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ArtifactError::EmptyBody.to_string(), "Response body is empty");
        assert_eq!(
            ArtifactError::EmptyBuffer.to_string(),
            "No log data received from GitHub API"
        );

        let err = ArtifactError::filesystem(
            "create directory /x",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to create directory /x: denied");
    }
}
