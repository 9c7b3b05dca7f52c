//! MCP server implementation for Dossier
//!
//! Exposes folder, record and monitoring-step operations as Model Context
//! Protocol tools so AI assistants can work with the same database as the
//! CLI.

use std::sync::Arc;

use anyhow::Result;
use dossier_core::Tracker;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

pub use errors::to_mcp_error;
pub use handlers::{
    ClearMilestone, CreateFolder, CreateRecord, DeleteFolder, Id, ListFolders, ListRecords,
    McpResult, MoveRecord, RelocateRecord, SetMilestone,
};

/// MCP server for Dossier
#[derive(Clone)]
pub struct DossierMcpServer {
    tracker: Arc<Mutex<Tracker>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl DossierMcpServer {
    /// Create a new Dossier MCP server
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.tracker.clone())
    }

    #[tool(
        name = "create_folder",
        description = "Create a folder that procurement files are filed in. Provide the name on its tab (required) and optionally its drawer, cabinet and box. Returns the new folder ID for adding records."
    )]
    async fn create_folder(&self, params: Parameters<CreateFolder>) -> McpResult {
        self.handlers().create_folder(params).await
    }

    #[tool(
        name = "list_folders",
        description = "List folders with their location and number of records. Optionally filter by drawer, cabinet or box."
    )]
    async fn list_folders(&self, params: Parameters<ListFolders>) -> McpResult {
        self.handlers().list_folders(params).await
    }

    #[tool(
        name = "show_folder",
        description = "Show a folder and its stack: archived files in stack order numbered 1..N, followed by files that are currently borrowed."
    )]
    async fn show_folder(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_folder(params).await
    }

    #[tool(
        name = "delete_folder",
        description = "Permanently delete an empty folder. Requires confirmed=true. Folders that still hold records cannot be deleted; move or delete the records first."
    )]
    async fn delete_folder(&self, params: Parameters<DeleteFolder>) -> McpResult {
        self.handlers().delete_folder(params).await
    }

    #[tool(
        name = "create_record",
        description = "Add a procurement file to a folder. Requires folder_id and title. procurement_type is 'svp' (Small Value Procurement, 7 steps, default) or 'regular_bidding' (13 steps). The file is placed on top of the folder's stack."
    )]
    async fn create_record(&self, params: Parameters<CreateRecord>) -> McpResult {
        self.handlers().create_record(params).await
    }

    #[tool(
        name = "list_records",
        description = "List procurement records with status, stack position and completion. Filter by folder_id, status ('archived' or 'borrowed'), procurement_type, or search text matched against title and reference number."
    )]
    async fn list_records(&self, params: Parameters<ListRecords>) -> McpResult {
        self.handlers().list_records(params).await
    }

    #[tool(
        name = "show_record",
        description = "Show a record's details together with its monitoring sheet: every step of its workflow marked completed (✓), available (➤) or locked (○), with recorded dates."
    )]
    async fn show_record(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_record(params).await
    }

    #[tool(
        name = "delete_record",
        description = "Permanently delete a record and its monitoring dates. The remaining files of its folder are renumbered. This cannot be undone."
    )]
    async fn delete_record(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_record(params).await
    }

    #[tool(
        name = "borrow_record",
        description = "Mark an archived file as borrowed out of its folder. It loses its stack number and the files remaining in the folder are renumbered without gaps."
    )]
    async fn borrow_record(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().borrow_record(params).await
    }

    #[tool(
        name = "return_record",
        description = "Put a borrowed file back into its folder. It is slotted back into the stack by the date it was added."
    )]
    async fn return_record(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().return_record(params).await
    }

    #[tool(
        name = "relocate_record",
        description = "Move an archived file to another position of its folder's stack. target_stack is 1-based and clamped to the stack size. Omitting target_stack leaves the stack unchanged."
    )]
    async fn relocate_record(&self, params: Parameters<RelocateRecord>) -> McpResult {
        self.handlers().relocate_record(params).await
    }

    #[tool(
        name = "move_record",
        description = "File a record into another folder. It goes on top of the destination stack and both folders are renumbered."
    )]
    async fn move_record(&self, params: Parameters<MoveRecord>) -> McpResult {
        self.handlers().move_record(params).await
    }

    #[tool(
        name = "set_step",
        description = "Record the completion date of a monitoring step, e.g. step_key='receivedPrDate', date='2024-05-01' (defaults to today). A step can only be set once every step before it has a date; otherwise the call fails and names the missing steps."
    )]
    async fn set_step(&self, params: Parameters<SetMilestone>) -> McpResult {
        self.handlers().set_step(params).await
    }

    #[tool(
        name = "clear_step",
        description = "Clear the date of a monitoring step. Every later step that depends on it is cleared as well; the cleared step keys are listed in the result."
    )]
    async fn clear_step(&self, params: Parameters<ClearMilestone>) -> McpResult {
        self.handlers().clear_step(params).await
    }

    #[tool(
        name = "next_step",
        description = "Name the next monitoring step of a record that can be recorded, or report that the workflow is complete."
    )]
    async fn next_step(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().next_step(params).await
    }

    #[tool(
        name = "dashboard",
        description = "Totals across all records: archived and borrowed counts, records per workflow, completed workflows and average completion."
    )]
    async fn dashboard(&self) -> McpResult {
        self.handlers().dashboard().await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for DossierMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "dossier".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"Dossier tracks physical procurement files: which folder each file is in, its position in the folder's stack, whether it has been borrowed, and the dates of its monitoring steps.

## Core Concepts
- **Folders**: Physical folders, optionally located by drawer, cabinet and box
- **Records**: Procurement files inside a folder. Archived files are numbered 1..N in the stack; borrowed files have no number
- **Monitoring steps**: Dated checkpoints of the record's workflow. SVP has 7 steps and Regular Bidding has 13; each step needs the one before it

## Workflow Examples

### Filing a New Procurement
1. Create a folder with `create_folder` (or find one with `list_folders`)
2. Add the file with `create_record`
3. Record progress with `set_step`; use `next_step` to see which step is due

### Tracking Files
1. `borrow_record` when a file leaves its folder and `return_record` when it comes back
2. `relocate_record` to reorder a folder's stack and `move_record` to refile
3. `show_folder` to see the stack as it should be in the cabinet

## Tool Categories
- **Folders**: create_folder, list_folders, show_folder, delete_folder
- **Records**: create_record, list_records, show_record, delete_record, borrow_record, return_record, relocate_record, move_record
- **Monitoring**: set_step, clear_step, next_step
- **Overview**: dashboard"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: DossierMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Dossier MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
