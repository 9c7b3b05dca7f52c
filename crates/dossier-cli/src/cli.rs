//! Command-line interface definitions and handlers
//!
//! Argument structures are clap wrappers around the core parameter types:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```
//!
//! Each wrapper converts into its core counterpart with a `From` impl, so
//! the core types stay free of clap attributes and the MCP server can reuse
//! them unchanged.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use dossier_core::{
    display::{CreateResult, DeleteResult, MonitoringSheet, OperationStatus, UpdateResult},
    params::*,
    Tracker,
};

use crate::renderer::TerminalRenderer;

/// Runs one CLI command against a tracker and renders the outcome.
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    fn render(&self, output: impl ToString) -> Result<()> {
        self.renderer.render(&output.to_string())
    }

    pub async fn handle_folder_command(&self, command: FolderCommands) -> Result<()> {
        match command {
            FolderCommands::Create(args) => {
                let folder = self
                    .tracker
                    .create_folder(&args.into())
                    .await
                    .context("Failed to create folder")?;
                self.render(CreateResult::new(folder))
            }
            FolderCommands::List(args) => {
                let folders = self
                    .tracker
                    .list_folders_summary(&args.into())
                    .await
                    .context("Failed to list folders")?;
                self.render(folders)
            }
            FolderCommands::Show(args) => {
                let stack = self
                    .tracker
                    .folder_stack(&args.into())
                    .await
                    .context("Failed to show folder")?;
                self.render(stack)
            }
            FolderCommands::Delete(args) => {
                let folder = self
                    .tracker
                    .delete_folder(&args.into())
                    .await
                    .context("Failed to delete folder")?;
                self.render(DeleteResult::new(folder))
            }
        }
    }

    pub async fn handle_record_command(&self, command: RecordCommands) -> Result<()> {
        match command {
            RecordCommands::Create(args) => {
                let record = self
                    .tracker
                    .create_record(&args.into())
                    .await
                    .context("Failed to create record")?;
                self.render(CreateResult::new(record))
            }
            RecordCommands::List(args) => {
                let records = self
                    .tracker
                    .list_records_summary(&args.into())
                    .await
                    .context("Failed to list records")?;
                self.render(records)
            }
            RecordCommands::Show(args) => {
                let record = self
                    .tracker
                    .show_record(&args.into())
                    .await
                    .context("Failed to show record")?;
                self.render(format!("{record}\n{}", MonitoringSheet(&record)))
            }
            RecordCommands::Delete(args) => {
                let record = self
                    .tracker
                    .delete_record(&args.into())
                    .await
                    .context("Failed to delete record")?;
                self.render(DeleteResult::new(record))
            }
            RecordCommands::Borrow(args) => {
                let record = self
                    .tracker
                    .borrow_record(&args.into())
                    .await
                    .context("Failed to borrow record")?;
                self.render(UpdateResult::with_changes(
                    record,
                    vec!["Borrowed out of its folder".to_string()],
                ))
            }
            RecordCommands::Return(args) => {
                let record = self
                    .tracker
                    .return_record(&args.into())
                    .await
                    .context("Failed to return record")?;
                self.render(UpdateResult::with_changes(
                    record,
                    vec!["Returned to its folder".to_string()],
                ))
            }
            RecordCommands::Relocate(args) => {
                let params: RelocateRecord = args.into();
                let relocated = self
                    .tracker
                    .relocate_record(&params)
                    .await
                    .context("Failed to relocate record")?;
                match relocated {
                    Some(record) => self.render(UpdateResult::with_changes(
                        record,
                        vec!["Moved within the folder stack".to_string()],
                    )),
                    None => self.render(OperationStatus::failure(format!(
                        "No target position given; record {} was not moved",
                        params.id
                    ))),
                }
            }
            RecordCommands::Move(args) => {
                let params: MoveRecord = args.into();
                let record = self
                    .tracker
                    .move_record(&params)
                    .await
                    .context("Failed to move record")?;
                self.render(UpdateResult::with_changes(
                    record,
                    vec![format!("Filed into folder {}", params.folder_id)],
                ))
            }
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::List(args) => {
                let record = self
                    .tracker
                    .show_record(&args.into())
                    .await
                    .context("Failed to load record")?;
                self.render(MonitoringSheet(&record))
            }
            StepCommands::Set(args) => {
                let record = self
                    .tracker
                    .set_milestone(&args.into())
                    .await
                    .context("Failed to set step date")?;
                self.render(MonitoringSheet(&record))
            }
            StepCommands::Clear(args) => {
                let params: ClearMilestone = args.into();
                let (record, cleared) = self
                    .tracker
                    .clear_milestone(&params)
                    .await
                    .context("Failed to clear step date")?;

                let status = if cleared.is_empty() {
                    OperationStatus::success(format!(
                        "Step '{}' had no date on record {}",
                        params.step_key, record.id
                    ))
                } else {
                    OperationStatus::success(format!(
                        "Cleared {} step date(s) on record {}",
                        cleared.len(),
                        record.id
                    ))
                    .with_details(cleared)
                };
                self.render(format!("{status}\n{}", MonitoringSheet(&record)))
            }
            StepCommands::Next(args) => {
                let (record, next) = self
                    .tracker
                    .next_step(&args.into())
                    .await
                    .context("Failed to find next step")?;
                let status = match next {
                    Some(step) => OperationStatus::success(format!(
                        "Next step for '{}': {step}",
                        record.title
                    )),
                    None if record.completion_percentage() == 100 => OperationStatus::success(
                        format!("All monitoring steps of '{}' are complete", record.title),
                    ),
                    None => OperationStatus::failure(format!(
                        "No step of '{}' can be set; a later date was entered out of order",
                        record.title
                    )),
                };
                self.render(status)
            }
        }
    }

    pub async fn dashboard(&self) -> Result<()> {
        let summary = self
            .tracker
            .dashboard()
            .await
            .context("Failed to load dashboard")?;
        self.render(summary)
    }
}

// ============================================================================
// Folder arguments
// ============================================================================

/// Create a new folder
#[derive(Args)]
pub struct CreateFolderArgs {
    /// Name written on the folder tab
    pub name: String,
    #[arg(long, help = "Drawer or shelf holding the folder")]
    pub drawer: Option<String>,
    #[arg(long, help = "Cabinet holding the folder")]
    pub cabinet: Option<String>,
    #[arg(long = "box", help = "Box holding the folder")]
    pub box_label: Option<String>,
}

impl From<CreateFolderArgs> for CreateFolder {
    fn from(val: CreateFolderArgs) -> Self {
        CreateFolder {
            name: val.name,
            drawer: val.drawer,
            cabinet: val.cabinet,
            box_label: val.box_label,
        }
    }
}

/// List folders, optionally narrowed to one location
#[derive(Args)]
pub struct ListFoldersArgs {
    #[arg(long, help = "Only folders in this drawer")]
    pub drawer: Option<String>,
    #[arg(long, help = "Only folders in this cabinet")]
    pub cabinet: Option<String>,
    #[arg(long = "box", help = "Only folders in this box")]
    pub box_label: Option<String>,
}

impl From<ListFoldersArgs> for ListFolders {
    fn from(val: ListFoldersArgs) -> Self {
        ListFolders {
            drawer: val.drawer,
            cabinet: val.cabinet,
            box_label: val.box_label,
        }
    }
}

/// Show a folder's stack
#[derive(Args)]
pub struct ShowFolderArgs {
    #[arg(help = "Unique identifier of the folder")]
    pub id: u64,
}

impl From<ShowFolderArgs> for Id {
    fn from(val: ShowFolderArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete an empty folder permanently
#[derive(Args)]
pub struct DeleteFolderArgs {
    #[arg(help = "Unique identifier of the folder to delete")]
    pub id: u64,
    #[arg(long, help = "Confirm permanent deletion")]
    pub confirm: bool,
}

impl From<DeleteFolderArgs> for DeleteFolder {
    fn from(val: DeleteFolderArgs) -> Self {
        DeleteFolder {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum FolderCommands {
    /// Create a new folder
    #[command(alias = "c")]
    Create(CreateFolderArgs),
    /// List folders
    #[command(alias = "ls")]
    List(ListFoldersArgs),
    /// Show a folder and the records stacked in it
    #[command(alias = "s")]
    Show(ShowFolderArgs),
    /// Delete an empty folder permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteFolderArgs),
}

// ============================================================================
// Record arguments
// ============================================================================

/// Add a procurement record to a folder
#[derive(Args)]
pub struct CreateRecordArgs {
    #[arg(help = "Unique identifier of the folder the file is filed in")]
    pub folder_id: u64,
    /// Project or PR title
    pub title: String,
    #[arg(short, long, help = "PR / reference number printed on the file")]
    pub reference: Option<String>,
    #[arg(
        short = 't',
        long = "type",
        value_enum,
        default_value_t = ProcurementTypeArg::Svp,
        help = "Procurement workflow the record follows"
    )]
    pub procurement_type: ProcurementTypeArg,
    #[arg(long, help = "When the file was received (RFC 3339); defaults to now")]
    pub date_added: Option<String>,
}

impl From<CreateRecordArgs> for CreateRecord {
    fn from(val: CreateRecordArgs) -> Self {
        CreateRecord {
            folder_id: val.folder_id,
            title: val.title,
            reference_number: val.reference,
            procurement_type: Some(val.procurement_type.to_string()),
            date_added: val.date_added,
        }
    }
}

/// List records
#[derive(Args)]
pub struct ListRecordsArgs {
    #[arg(short, long, help = "Only records filed in this folder")]
    pub folder: Option<u64>,
    #[arg(short, long, value_enum, help = "Only records with this status")]
    pub status: Option<RecordStatusArg>,
    #[arg(short = 't', long = "type", value_enum, help = "Only records following this workflow")]
    pub procurement_type: Option<ProcurementTypeArg>,
    #[arg(short = 'q', long, help = "Text matched against title and reference number")]
    pub search: Option<String>,
}

impl From<ListRecordsArgs> for ListRecords {
    fn from(val: ListRecordsArgs) -> Self {
        ListRecords {
            folder_id: val.folder,
            status: val.status.map(|s| s.to_string()),
            procurement_type: val.procurement_type.map(|t| t.to_string()),
            search: val.search,
        }
    }
}

/// Identify a single record
#[derive(Args)]
pub struct RecordIdArgs {
    #[arg(help = "Unique identifier of the record")]
    pub id: u64,
}

impl From<RecordIdArgs> for Id {
    fn from(val: RecordIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Move an archived record to another position in its folder's stack
///
/// Positions are 1-based and clamped into the stack. Without a position the
/// stack is left unchanged.
#[derive(Args)]
pub struct RelocateRecordArgs {
    #[arg(help = "Unique identifier of the archived record")]
    pub id: u64,
    #[arg(help = "1-based target position in the stack")]
    pub position: Option<u32>,
}

impl From<RelocateRecordArgs> for RelocateRecord {
    fn from(val: RelocateRecordArgs) -> Self {
        RelocateRecord {
            id: val.id,
            target_stack: val.position,
        }
    }
}

/// File a record into another folder
#[derive(Args)]
pub struct MoveRecordArgs {
    #[arg(help = "Unique identifier of the record")]
    pub id: u64,
    #[arg(help = "Unique identifier of the destination folder")]
    pub folder_id: u64,
}

impl From<MoveRecordArgs> for MoveRecord {
    fn from(val: MoveRecordArgs) -> Self {
        MoveRecord {
            id: val.id,
            folder_id: val.folder_id,
        }
    }
}

#[derive(Subcommand)]
pub enum RecordCommands {
    /// Add a record to a folder
    #[command(alias = "c")]
    Create(CreateRecordArgs),
    /// List records
    #[command(alias = "ls")]
    List(ListRecordsArgs),
    /// Show a record and its monitoring sheet
    #[command(alias = "s")]
    Show(RecordIdArgs),
    /// Delete a record permanently
    #[command(aliases = ["d", "rm"])]
    Delete(RecordIdArgs),
    /// Take a record's file out of its folder
    #[command(alias = "b")]
    Borrow(RecordIdArgs),
    /// Put a borrowed file back into its folder
    Return(RecordIdArgs),
    /// Move an archived record within its folder's stack
    #[command(alias = "mv")]
    Relocate(RelocateRecordArgs),
    /// File a record into another folder
    Move(MoveRecordArgs),
}

// ============================================================================
// Step arguments
// ============================================================================

/// Record the completion date of a monitoring step
#[derive(Args)]
pub struct SetStepArgs {
    #[arg(help = "Unique identifier of the record")]
    pub record_id: u64,
    #[arg(help = "Step key, e.g. receivedPrDate")]
    pub step_key: String,
    #[arg(short, long, help = "Completion date as YYYY-MM-DD; defaults to today")]
    pub date: Option<String>,
}

impl From<SetStepArgs> for SetMilestone {
    fn from(val: SetStepArgs) -> Self {
        SetMilestone {
            record_id: val.record_id,
            step_key: val.step_key,
            date: val.date,
        }
    }
}

/// Clear a monitoring step date and every date after it
#[derive(Args)]
pub struct ClearStepArgs {
    #[arg(help = "Unique identifier of the record")]
    pub record_id: u64,
    #[arg(help = "Step key to clear")]
    pub step_key: String,
}

impl From<ClearStepArgs> for ClearMilestone {
    fn from(val: ClearStepArgs) -> Self {
        ClearMilestone {
            record_id: val.record_id,
            step_key: val.step_key,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Show a record's monitoring steps
    #[command(alias = "ls")]
    List(RecordIdArgs),
    /// Record a step's completion date
    #[command(alias = "s")]
    Set(SetStepArgs),
    /// Clear a step's date and every date depending on it
    #[command(alias = "c")]
    Clear(ClearStepArgs),
    /// Show the next step that can be recorded
    #[command(alias = "n")]
    Next(RecordIdArgs),
}

/// Command-line representation of procurement workflows
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum ProcurementTypeArg {
    /// Small Value Procurement (7 steps)
    Svp,
    /// Regular Bidding (13 steps)
    RegularBidding,
}

impl std::fmt::Display for ProcurementTypeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcurementTypeArg::Svp => write!(f, "svp"),
            ProcurementTypeArg::RegularBidding => write!(f, "regular_bidding"),
        }
    }
}

/// Command-line representation of record status filters
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum RecordStatusArg {
    /// Shelved in its folder
    Archived,
    /// Taken out of its folder
    Borrowed,
}

impl std::fmt::Display for RecordStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordStatusArg::Archived => write!(f, "archived"),
            RecordStatusArg::Borrowed => write!(f, "borrowed"),
        }
    }
}
