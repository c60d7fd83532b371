use thiserror::Error;

// Stable error codes exposed to tool callers
pub const CONFIG_INVALID: &str = "CONFIG_INVALID";
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const API_ERROR: &str = "API_ERROR";
pub const NETWORK_FETCH_FAILED: &str = "NETWORK_FETCH_FAILED";
pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";
pub const IO_ERROR: &str = "IO_ERROR";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

#[derive(Error, Debug)]
pub enum DevopsError {
    // Configuration errors
    #[error("{0}")]
    Config(String),

    // Validation errors (raised before any network call)
    #[error("{0}")]
    Validation(String),

    // API errors
    #[error("Github API Error: {status} - {status_text}. {body}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    InvalidResponse(String),

    /// An error annotated with the operation that was running.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<DevopsError>,
    },

    // IO errors
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl DevopsError {
    /// Wraps this error with the name of the failing operation.
    pub fn context(self, context: impl Into<String>) -> Self {
        DevopsError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the stable code for this error, looking through context layers.
    pub fn code(&self) -> &'static str {
        match self {
            DevopsError::Config(_) => CONFIG_INVALID,
            DevopsError::Validation(_) => INVALID_INPUT,
            DevopsError::Api { status: 404, .. } => NOT_FOUND,
            DevopsError::Api { .. } => API_ERROR,
            DevopsError::Network(_) => NETWORK_FETCH_FAILED,
            DevopsError::InvalidResponse(_) => INVALID_RESPONSE,
            DevopsError::Context { source, .. } => source.code(),
            DevopsError::Io(_) => IO_ERROR,
            DevopsError::Generic(_) => INTERNAL_ERROR,
        }
    }

    /// HTTP status of the underlying API error, if there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            DevopsError::Api { status, .. } => Some(*status),
            DevopsError::Context { source, .. } => source.status(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DevopsError {
    fn from(err: serde_json::Error) -> Self {
        DevopsError::InvalidResponse(format!("JSON error: {}", err))
    }
}

/// Adds operation context to fallible results.
pub trait ResultExt<T> {
    fn context(self, context: &str) -> Result<T, DevopsError>;
}

impl<T> ResultExt<T> for Result<T, DevopsError> {
    fn context(self, context: &str) -> Result<T, DevopsError> {
        self.map_err(|err| err.context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_includes_status_and_body() {
        let err = DevopsError::Api {
            status: 404,
            status_text: "Not Found".to_string(),
            body: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "Github API Error: 404 - Not Found. Not Found");
        assert_eq!(err.code(), NOT_FOUND);
    }

    #[test]
    fn test_context_prefixes_message_and_keeps_code() {
        let err = DevopsError::Network("Network error".to_string()).context("Error getting workflows");
        assert_eq!(err.to_string(), "Error getting workflows: Network error");
        assert_eq!(err.code(), NETWORK_FETCH_FAILED);
    }

    #[test]
    fn test_status_looks_through_context() {
        let err = DevopsError::Api {
            status: 409,
            status_text: "Conflict".to_string(),
            body: "SHA mismatch".to_string(),
        }
        .context("Error updating file");
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.code(), API_ERROR);
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<(), DevopsError> =
            Err(DevopsError::Validation("bad".to_string()));
        let err = result.context("Error creating branch").unwrap_err();
        assert_eq!(err.to_string(), "Error creating branch: bad");
        assert_eq!(err.code(), INVALID_INPUT);
    }

    #[test]
    fn test_json_error_maps_to_invalid_response() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DevopsError = json_err.into();
        assert_eq!(err.code(), INVALID_RESPONSE);
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
