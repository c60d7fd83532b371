use mcpdevops_core::DevopsError;
use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content};
use serde_json::json;
use std::fmt::Display;

pub use mcpdevops_core::error::INTERNAL_ERROR;

/// Renders an operation failure as a tool result the caller can read.
pub fn tool_error(error: &DevopsError) -> CallToolResult {
    tracing::warn!(code = error.code(), error = %error, "tool call failed");
    CallToolResult::error(vec![Content::text(format!("Error: {}", error))])
}

pub fn internal_error(message: impl Into<String>) -> ErrorData {
    error_with_code(INTERNAL_ERROR, message)
}

pub fn error_with_code(code: &str, message: impl Into<String>) -> ErrorData {
    ErrorData::internal_error(
        message.into(),
        Some(json!({
            "code": code
        })),
    )
}

pub fn from_display(error: impl Display) -> ErrorData {
    internal_error(format!("{}", error))
}
