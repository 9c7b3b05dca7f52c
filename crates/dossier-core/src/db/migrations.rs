//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Databases created before relocation existed have no fractional key.
        let has_order_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('records') WHERE name = 'stack_order_date'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect records table")?;

        if !has_order_column {
            self.connection
                .execute("ALTER TABLE records ADD COLUMN stack_order_date REAL", [])
                .db_context("Failed to add stack_order_date column to records table")?;
        }

        Ok(())
    }
}
