//! Database operations and SQLite management for folders and records.
//!
//! This module owns the SQLite connection and schema. Queries are split per
//! entity; stack maintenance lives in [`stack_queries`] and is called from
//! inside the transactions that change a folder's membership.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod folder_queries;
pub mod migrations;
pub mod milestone_queries;
pub mod record_queries;
pub mod stack_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
