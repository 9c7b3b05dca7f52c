//! Async API over the record store.
//!
//! [`Tracker`] is what the CLI and the MCP server talk to. It keeps only the
//! database path; every call opens its own connection on a blocking thread,
//! so a `Tracker` can be shared freely between tasks.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │  (wrappers and  │───▶│ (folder_ops,    │───▶│   (via db/)     │
//! │  confirmations) │    │  record_ops)    │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use dossier_core::{
//!     params::{CreateFolder, CreateRecord, SetMilestone},
//!     TrackerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("/tmp/dossier.db"))
//!     .build()
//!     .await?;
//!
//! let folder = tracker
//!     .create_folder(&CreateFolder {
//!         name: "PR 2024 Q1".to_string(),
//!         drawer: Some("Drawer 1".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let record = tracker
//!     .create_record(&CreateRecord {
//!         folder_id: folder.id,
//!         title: "Office supplies".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! tracker
//!     .set_milestone(&SetMilestone {
//!         record_id: record.id,
//!         step_key: "receivedPrDate".to_string(),
//!         date: Some("2024-03-01".to_string()),
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    error::{Result, TrackerError},
};

pub mod builder;
pub mod folder_ops;
pub mod handlers;
pub mod record_ops;

#[cfg(test)]
mod tests;

pub use builder::TrackerBuilder;

/// Main interface for managing folders and procurement records.
#[derive(Debug, Clone)]
pub struct Tracker {
    pub(crate) db_path: PathBuf,
}

impl Tracker {
    /// Creates a new tracker with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Runs `operation` against a fresh connection on the blocking pool.
    async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(TrackerError::join)?
    }
}
