//! Error handling utilities for MCP server

use dossier_core::TrackerError;
use rmcp::ErrorData;

/// Convert a tracker error into an MCP error, prefixed with `message`.
///
/// Caller mistakes (bad input, locked steps, unknown IDs) become invalid
/// params errors so the client can correct the request; everything else is
/// an internal error.
pub fn to_mcp_error(message: &str, error: TrackerError) -> ErrorData {
    let text = format!("{}: {}", message, error);
    match error {
        TrackerError::InvalidInput { .. }
        | TrackerError::StepLocked { .. }
        | TrackerError::RecordNotFound { .. }
        | TrackerError::FolderNotFound { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}
