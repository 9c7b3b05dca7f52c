//! MCP tool handlers implementation

use std::sync::Arc;

use dossier_core::{
    display::{CreateResult, DeleteResult, MonitoringSheet, OperationStatus, UpdateResult},
    params as core, Tracker,
};
use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::to_mcp_error;

// ============================================================================
// Generic Parameter Wrapper Implementation
// ============================================================================
//
// The wrapper adds the MCP-side derives to a core parameter type while
// `#[serde(transparent)]` keeps the JSON shape identical to the core type.

/// Generic MCP wrapper for core parameter types with serde integration
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Id = McpParams<core::Id>;
pub type CreateFolder = McpParams<core::CreateFolder>;
pub type ListFolders = McpParams<core::ListFolders>;
pub type DeleteFolder = McpParams<core::DeleteFolder>;
pub type CreateRecord = McpParams<core::CreateRecord>;
pub type ListRecords = McpParams<core::ListRecords>;
pub type SetMilestone = McpParams<core::SetMilestone>;
pub type ClearMilestone = McpParams<core::ClearMilestone>;
pub type RelocateRecord = McpParams<core::RelocateRecord>;
pub type MoveRecord = McpParams<core::MoveRecord>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text_result(text: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text.to_string())]))
}

/// Handler implementations for the MCP server
///
/// Every call holds the tracker lock, so writes from concurrent tool calls
/// reach SQLite one at a time.
pub struct McpHandlers {
    tracker: Arc<Mutex<Tracker>>,
}

impl McpHandlers {
    pub fn new(tracker: Arc<Mutex<Tracker>>) -> Self {
        Self { tracker }
    }

    pub async fn create_folder(&self, Parameters(params): Parameters<CreateFolder>) -> McpResult {
        debug!("create_folder: {:?}", params);

        let folder = self
            .tracker
            .lock()
            .await
            .create_folder(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create folder", e))?;

        text_result(CreateResult::new(folder))
    }

    pub async fn list_folders(&self, Parameters(params): Parameters<ListFolders>) -> McpResult {
        debug!("list_folders: {:?}", params);

        let folders = self
            .tracker
            .lock()
            .await
            .list_folders_summary(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list folders", e))?;

        let title = if folders.is_empty() {
            "No folders found"
        } else {
            "Folders"
        };
        text_result(format!("# {}\n\n{}", title, folders))
    }

    pub async fn show_folder(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_folder: {:?}", params);

        let stack = self
            .tracker
            .lock()
            .await
            .folder_stack(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to show folder", e))?;

        text_result(stack)
    }

    pub async fn delete_folder(&self, Parameters(params): Parameters<DeleteFolder>) -> McpResult {
        debug!("delete_folder: {:?}", params);

        let folder = self
            .tracker
            .lock()
            .await
            .delete_folder(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete folder", e))?;

        text_result(DeleteResult::new(folder))
    }

    pub async fn create_record(&self, Parameters(params): Parameters<CreateRecord>) -> McpResult {
        debug!("create_record: {:?}", params);

        let record = self
            .tracker
            .lock()
            .await
            .create_record(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create record", e))?;

        text_result(CreateResult::new(record))
    }

    pub async fn list_records(&self, Parameters(params): Parameters<ListRecords>) -> McpResult {
        debug!("list_records: {:?}", params);

        let records = self
            .tracker
            .lock()
            .await
            .list_records_summary(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list records", e))?;

        let title = if records.is_empty() {
            "No matching records"
        } else {
            "Records"
        };
        text_result(format!("# {}\n\n{}", title, records))
    }

    pub async fn show_record(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_record: {:?}", params);

        let record = self
            .tracker
            .lock()
            .await
            .show_record(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get record", e))?;

        text_result(format!("{}\n{}", record, MonitoringSheet(&record)))
    }

    pub async fn delete_record(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_record: {:?}", params);

        let record = self
            .tracker
            .lock()
            .await
            .delete_record(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete record", e))?;

        text_result(DeleteResult::new(record))
    }

    pub async fn borrow_record(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("borrow_record: {:?}", params);

        let record = self
            .tracker
            .lock()
            .await
            .borrow_record(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to borrow record", e))?;

        text_result(UpdateResult::with_changes(
            record,
            vec!["Borrowed out of its folder; the remaining files were renumbered".to_string()],
        ))
    }

    pub async fn return_record(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("return_record: {:?}", params);

        let record = self
            .tracker
            .lock()
            .await
            .return_record(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to return record", e))?;

        text_result(UpdateResult::with_changes(
            record,
            vec!["Returned to its folder".to_string()],
        ))
    }

    pub async fn relocate_record(
        &self,
        Parameters(params): Parameters<RelocateRecord>,
    ) -> McpResult {
        debug!("relocate_record: {:?}", params);

        let inner_params = params.as_ref();
        let relocated = self
            .tracker
            .lock()
            .await
            .relocate_record(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to relocate record", e))?;

        match relocated {
            Some(record) => text_result(UpdateResult::with_changes(
                record,
                vec!["Moved within the folder stack".to_string()],
            )),
            None => text_result(OperationStatus::failure(format!(
                "No target_stack given; record {} was not moved",
                inner_params.id
            ))),
        }
    }

    pub async fn move_record(&self, Parameters(params): Parameters<MoveRecord>) -> McpResult {
        debug!("move_record: {:?}", params);

        let inner_params = params.as_ref();
        let record = self
            .tracker
            .lock()
            .await
            .move_record(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to move record", e))?;

        text_result(UpdateResult::with_changes(
            record,
            vec![format!("Filed into folder {}", inner_params.folder_id)],
        ))
    }

    pub async fn set_step(&self, Parameters(params): Parameters<SetMilestone>) -> McpResult {
        debug!("set_step: {:?}", params);

        let record = self
            .tracker
            .lock()
            .await
            .set_milestone(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to set step date", e))?;

        text_result(MonitoringSheet(&record))
    }

    pub async fn clear_step(&self, Parameters(params): Parameters<ClearMilestone>) -> McpResult {
        debug!("clear_step: {:?}", params);

        let inner_params = params.as_ref();
        let (record, cleared) = self
            .tracker
            .lock()
            .await
            .clear_milestone(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to clear step date", e))?;

        let status = if cleared.is_empty() {
            OperationStatus::success(format!(
                "Step '{}' had no date on record {}",
                inner_params.step_key, record.id
            ))
        } else {
            OperationStatus::success(format!(
                "Cleared {} step date(s) on record {}",
                cleared.len(),
                record.id
            ))
            .with_details(cleared)
        };
        text_result(format!("{}\n{}", status, MonitoringSheet(&record)))
    }

    pub async fn next_step(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("next_step: {:?}", params);

        let (record, next) = self
            .tracker
            .lock()
            .await
            .next_step(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to find next step", e))?;

        let status = match next {
            Some(step) => {
                OperationStatus::success(format!("Next step for '{}': {}", record.title, step))
            }
            None if record.completion_percentage() == 100 => OperationStatus::success(format!(
                "All monitoring steps of '{}' are complete",
                record.title
            )),
            None => OperationStatus::failure(format!(
                "No step of '{}' can be set; a later date was entered out of order",
                record.title
            )),
        };
        text_result(status)
    }

    pub async fn dashboard(&self) -> McpResult {
        debug!("dashboard");

        let summary = self
            .tracker
            .lock()
            .await
            .dashboard()
            .await
            .map_err(|e| to_mcp_error("Failed to load dashboard", e))?;

        text_result(summary)
    }
}
