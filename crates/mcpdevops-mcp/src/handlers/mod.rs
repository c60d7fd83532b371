use mcpdevops_core::DevopsError;
use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content, Tool};
use serde::Serialize;
use serde_json::json;

use crate::errors;

pub mod github;
pub mod logs;
pub mod types;

#[derive(Debug, Clone, Copy, Default)]
pub struct Safety {
    pub network: bool,
    pub reads: bool,
    pub writes: bool,
    pub writes_sot: bool,
}

pub trait ToolExt {
    fn with_safety(self, safety: Safety) -> Tool;
}

impl ToolExt for Tool {
    fn with_safety(mut self, safety: Safety) -> Tool {
        // Map to RMCP annotations
        let mut annotations = self.annotations.unwrap_or_default();
        annotations.read_only_hint = Some(!safety.writes);
        annotations.open_world_hint = Some(safety.network);
        self.annotations = Some(annotations);

        // Add custom safety meta
        let mut meta = self.meta.unwrap_or_default();
        meta.insert(
            "safety".to_string(),
            json!({
                "network": safety.network,
                "reads": safety.reads,
                "writes": safety.writes,
                "writes_sot": safety.writes_sot,
            }),
        );
        self.meta = Some(meta);
        self
    }
}

/// Remote read against the GitHub API
pub(crate) const REMOTE_READ: Safety = Safety {
    network: true,
    reads: true,
    writes: false,
    writes_sot: false,
};

/// Remote mutation of repository state
pub(crate) const REMOTE_WRITE: Safety = Safety {
    network: true,
    reads: true,
    writes: true,
    writes_sot: true,
};

/// `<label>: <pretty json>` on success, `Error: <message>` otherwise
pub(crate) fn render<T: Serialize>(
    outcome: Result<T, DevopsError>,
    label: &str,
) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(value) => {
            let json = serde_json::to_string_pretty(&value).map_err(errors::from_display)?;
            Ok(CallToolResult::success(vec![Content::text(format!(
                "{}: {}",
                label, json
            ))]))
        }
        Err(e) => Ok(errors::tool_error(&e)),
    }
}
