//! Record CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use super::{folder_queries::folder_exists, milestone_queries::load_milestones, stack_queries};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{ProcurementRecord, ProcurementType, RecordFilter, RecordStatus},
};

const RECORD_COLUMNS: &str = "id, folder_id, title, reference_number, procurement_type, status, stack_number, stack_order_date, date_added, updated_at";
const NEXT_STACK_NUMBER_SQL: &str = "SELECT COALESCE(MAX(stack_number), 0) + 1 FROM records WHERE folder_id = ?1 AND status = 'archived'";
const INSERT_RECORD_SQL: &str = "INSERT INTO records (folder_id, title, reference_number, procurement_type, status, stack_number, date_added, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const DELETE_RECORD_SQL: &str = "DELETE FROM records WHERE id = ?1";

impl super::Database {
    /// Helper function to construct a record from a database row. Milestones
    /// are loaded separately.
    fn build_record_from_row(row: &rusqlite::Row) -> rusqlite::Result<ProcurementRecord> {
        let status_str: String = row.get(5)?;
        let status = status_str.parse::<RecordStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                Type::Text,
                format!("Invalid record status: {status_str}").into(),
            )
        })?;

        let procurement_type: String = row.get(4)?;

        Ok(ProcurementRecord {
            id: row.get::<_, i64>(0)? as u64,
            folder_id: row.get::<_, i64>(1)? as u64,
            title: row.get(2)?,
            reference_number: row.get(3)?,
            procurement_type: ProcurementType::from(procurement_type.as_str()),
            status,
            stack_number: row.get::<_, Option<i64>>(6)?.map(|n| n as u32),
            stack_order_date: row.get(7)?,
            date_added: row.get::<_, String>(8)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(9)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e))
            })?,
            milestones: Default::default(),
        })
    }

    /// Loads one record with its milestones.
    pub(super) fn fetch_record(conn: &Connection, id: u64) -> Result<Option<ProcurementRecord>> {
        let query = format!("SELECT {RECORD_COLUMNS} FROM records WHERE id = ?1");
        let record = conn
            .query_row(&query, params![id as i64], Self::build_record_from_row)
            .optional()
            .db_context("Failed to query record")?;

        match record {
            Some(mut record) => {
                record.milestones = load_milestones(conn, record.id)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Loads one record or fails with [`TrackerError::RecordNotFound`].
    pub(super) fn require_record(conn: &Connection, id: u64) -> Result<ProcurementRecord> {
        Self::fetch_record(conn, id)?.ok_or(TrackerError::RecordNotFound { id })
    }

    /// Loads every record of a folder, archived and borrowed, without
    /// milestones.
    pub(super) fn fetch_folder_records(
        conn: &Connection,
        folder_id: u64,
    ) -> Result<Vec<ProcurementRecord>> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM records WHERE folder_id = ?1 \
             ORDER BY stack_number IS NULL, stack_number, date_added, id"
        );
        let mut stmt = conn
            .prepare(&query)
            .db_context("Failed to prepare folder records query")?;

        let records = stmt
            .query_map(params![folder_id as i64], Self::build_record_from_row)
            .db_context("Failed to query folder records")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to collect folder records")?;

        Ok(records)
    }

    /// Adds a record to a folder. New records are archived and go on top of
    /// the folder's stack.
    pub fn create_record(
        &mut self,
        folder_id: u64,
        title: &str,
        reference_number: Option<&str>,
        procurement_type: ProcurementType,
        date_added: Option<Timestamp>,
    ) -> Result<ProcurementRecord> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !folder_exists(&tx, folder_id)? {
            return Err(TrackerError::FolderNotFound { id: folder_id });
        }

        let next_stack: i64 = tx
            .query_row(NEXT_STACK_NUMBER_SQL, params![folder_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to get next stack number")?;

        let now = Timestamp::now();
        let date_added = date_added.unwrap_or(now);

        tx.execute(
            INSERT_RECORD_SQL,
            params![
                folder_id as i64,
                title,
                reference_number,
                procurement_type.as_str(),
                RecordStatus::Archived.as_str(),
                next_stack,
                date_added.to_string(),
                now.to_string()
            ],
        )
        .db_context("Failed to insert record")?;

        let id = tx.last_insert_rowid() as u64;

        stack_queries::update_stack_numbers_for_folder(&tx, folder_id)?;
        let record = Self::require_record(&tx, id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        log::debug!("Created record {id} in folder {folder_id}");
        Ok(record)
    }

    /// Retrieves a record by its ID.
    pub fn get_record(&self, id: u64) -> Result<Option<ProcurementRecord>> {
        Self::fetch_record(&self.connection, id)
    }

    /// Lists records with optional filtering, ordered by folder and stack.
    pub fn list_records(&self, filter: Option<&RecordFilter>) -> Result<Vec<ProcurementRecord>> {
        let mut query = format!("SELECT {RECORD_COLUMNS} FROM records");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(folder_id) = f.folder_id {
                conditions.push("folder_id = ?");
                params_vec.push(Box::new(folder_id as i64));
            }

            if let Some(status) = f.status {
                conditions.push("status = ?");
                params_vec.push(Box::new(status.as_str()));
            }

            if let Some(procurement_type) = f.procurement_type {
                conditions.push("procurement_type = ?");
                params_vec.push(Box::new(procurement_type.as_str()));
            }

            if let Some(ref text) = f.text_contains {
                conditions.push("(title LIKE ? OR reference_number LIKE ?)");
                params_vec.push(Box::new(format!("%{text}%")));
                params_vec.push(Box::new(format!("%{text}%")));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY folder_id, stack_number IS NULL, stack_number, date_added, id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare record query")?;

        let param_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();

        let mut records = stmt
            .query_map(&param_refs[..], Self::build_record_from_row)
            .db_context("Failed to query records")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to collect records")?;

        for record in &mut records {
            record.milestones = load_milestones(&self.connection, record.id)?;
        }

        Ok(records)
    }

    /// Deletes a record and its milestones, closing the gap it leaves in its
    /// folder's stack. Returns the deleted record.
    pub fn delete_record(&mut self, id: u64) -> Result<ProcurementRecord> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let record = Self::require_record(&tx, id)?;

        tx.execute(DELETE_RECORD_SQL, params![id as i64])
            .db_context("Failed to delete record")?;

        stack_queries::update_stack_numbers_for_folder(&tx, record.folder_id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        log::debug!("Deleted record {id} from folder {}", record.folder_id);
        Ok(record)
    }
}
