//! Data models for folders and procurement records.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping presentation apart from the data
//! structures.
//!
//! # Examples
//!
//! ```rust
//! use dossier_core::models::{Milestones, ProcurementRecord, ProcurementType, RecordStatus};
//! use jiff::{civil::date, Timestamp};
//!
//! let record = ProcurementRecord {
//!     id: 1,
//!     folder_id: 1,
//!     title: "Office supplies".to_string(),
//!     reference_number: Some("PR-2024-0113".to_string()),
//!     procurement_type: ProcurementType::Svp,
//!     status: RecordStatus::Archived,
//!     stack_number: Some(1),
//!     stack_order_date: None,
//!     date_added: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//!     milestones: Milestones::new()
//!         .with("receivedPrDate", date(2024, 3, 1))
//!         .with("prDeliberatedDate", date(2024, 3, 4)),
//! };
//!
//! assert_eq!(record.completion_percentage(), 29);
//! assert_eq!(record.next_required_step().map(|s| s.key), Some("publishedDate"));
//! ```

pub mod filters;
pub mod folder;
pub mod record;
pub mod status;
pub mod summary;


pub use filters::{FolderFilter, RecordFilter};
pub use folder::Folder;
pub use record::{Milestones, ProcurementRecord};
pub use status::{ProcurementType, RecordStatus};
pub use summary::DashboardSummary;
