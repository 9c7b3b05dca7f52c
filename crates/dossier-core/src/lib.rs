//! Core library for the Dossier procurement file tracker.
//!
//! Dossier tracks physical procurement files through two things:
//!
//! - their **monitoring workflow**: a fixed sequence of dated checkpoints per
//!   procurement type, where each step unlocks only after the steps it
//!   depends on ([`workflow`]);
//! - their **place on the shelf**: a dense stack position inside the folder
//!   that holds them, kept consistent as files are borrowed, returned,
//!   relocated and moved ([`stacking`]).
//!
//! Both are pure functions over [`models`]. The SQLite store in [`db`]
//! applies them transactionally, and [`Tracker`] exposes the store as an
//! async API for the CLI and the MCP server. Output formatting lives in
//! [`display`].
//!
//! # Quick Start
//!
//! ```rust
//! use dossier_core::{
//!     models::{Milestones, ProcurementType},
//!     workflow,
//! };
//! use jiff::civil::date;
//!
//! let milestones = Milestones::new()
//!     .with("receivedPrDate", date(2024, 3, 1))
//!     .with("prDeliberatedDate", date(2024, 3, 4));
//!
//! let next = workflow::next_required_step(&milestones, ProcurementType::Svp);
//! assert_eq!(next.map(|s| s.key), Some("publishedDate"));
//! assert!(workflow::is_step_disabled(&milestones, "rfqOpeningDate", ProcurementType::Svp));
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod stacking;
pub mod tracker;
pub mod workflow;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, FolderStack, Folders, LocalDateTime, MonitoringSheet,
    OperationStatus, Records, UpdateResult,
};
pub use error::{Result, TrackerError};
pub use models::{
    DashboardSummary, Folder, FolderFilter, Milestones, ProcurementRecord, ProcurementType,
    RecordFilter, RecordStatus,
};
pub use params::{
    ClearMilestone, CreateFolder, CreateRecord, DeleteFolder, Id, ListFolders, ListRecords,
    MoveRecord, RelocateRecord, SetMilestone,
};
pub use tracker::{Tracker, TrackerBuilder};
pub use workflow::{ProcessStep, StepState};
