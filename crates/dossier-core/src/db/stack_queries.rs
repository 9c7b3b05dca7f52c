//! Stack maintenance: borrowing, returning, relocating and moving files.
//!
//! Every operation that changes which archived records a folder holds runs
//! the dense recompute for that folder inside its own transaction, so stack
//! numbers are never observed with gaps.

use jiff::Timestamp;
use rusqlite::{params, Connection};

use super::{folder_queries::folder_exists, milestone_queries::load_milestones};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{DashboardSummary, Folder, ProcurementRecord, RecordStatus},
    stacking::{self, StackAssignment},
};

const UPDATE_STACK_NUMBER_SQL: &str = "UPDATE records SET stack_number = ?1 WHERE id = ?2";
const UPDATE_STATUS_SQL: &str =
    "UPDATE records SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4";
const UPDATE_ORDER_KEY_SQL: &str =
    "UPDATE records SET stack_order_date = ?1, updated_at = ?2 WHERE id = ?3";
const NEXT_STACK_NUMBER_SQL: &str = "SELECT COALESCE(MAX(stack_number), 0) + 1 FROM records WHERE folder_id = ?1 AND status = 'archived'";
const MOVE_RECORD_SQL: &str = "UPDATE records SET folder_id = ?1, stack_number = ?2, stack_order_date = NULL, updated_at = ?3 WHERE id = ?4";

/// Writes stack numbers that differ from the current ones.
fn apply_assignments(
    conn: &Connection,
    siblings: &[ProcurementRecord],
    assignments: &[StackAssignment],
) -> Result<usize> {
    let mut written = 0;
    for assignment in assignments {
        let current = siblings
            .iter()
            .find(|r| r.id == assignment.record_id)
            .and_then(|r| r.stack_number);
        if current == assignment.stack_number {
            continue;
        }
        conn.execute(
            UPDATE_STACK_NUMBER_SQL,
            params![
                assignment.stack_number.map(i64::from),
                assignment.record_id as i64
            ],
        )
        .db_context("Failed to update stack number")?;
        written += 1;
    }
    Ok(written)
}

/// Re-ranks the archived records of a folder densely from 1 and clears the
/// stack number of its borrowed records.
pub(super) fn update_stack_numbers_for_folder(conn: &Connection, folder_id: u64) -> Result<()> {
    let siblings = super::Database::fetch_folder_records(conn, folder_id)?;
    let assignments = stacking::calculate_stack_numbers(&siblings);
    let written = apply_assignments(conn, &siblings, &assignments)?;
    log::debug!(
        "Recomputed stack of folder {folder_id}: {} record(s), {written} changed",
        siblings.len()
    );
    Ok(())
}

impl super::Database {
    fn change_status(
        &mut self,
        id: u64,
        from: RecordStatus,
        to: RecordStatus,
    ) -> Result<ProcurementRecord> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let record = Self::require_record(&tx, id)?;
        if record.status != from {
            let reason = match to {
                RecordStatus::Active => format!("Record {id} is already borrowed"),
                RecordStatus::Archived => format!("Record {id} is not borrowed"),
            };
            return Err(TrackerError::invalid_input("id").with_reason(reason));
        }

        tx.execute(
            UPDATE_STATUS_SQL,
            params![to.as_str(), Timestamp::now().to_string(), id as i64, from.as_str()],
        )
        .db_context("Failed to update record status")?;

        update_stack_numbers_for_folder(&tx, record.folder_id)?;

        let record = Self::require_record(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(record)
    }

    /// Takes a file out of its folder. The remaining archived files close
    /// ranks and the borrowed file loses its stack number.
    pub fn borrow_record(&mut self, id: u64) -> Result<ProcurementRecord> {
        self.change_status(id, RecordStatus::Archived, RecordStatus::Active)
    }

    /// Puts a borrowed file back into its folder and re-ranks the folder.
    pub fn return_record(&mut self, id: u64) -> Result<ProcurementRecord> {
        self.change_status(id, RecordStatus::Active, RecordStatus::Archived)
    }

    /// Moves one archived file to 1-based position `target_stack` of its
    /// folder.
    ///
    /// Only the moved record receives a new order key; the folder is then
    /// re-ranked with the record at its requested position. Returns
    /// `Ok(None)` without writing anything when `target_stack` is `None`.
    pub fn relocate_record(
        &mut self,
        id: u64,
        target_stack: Option<u32>,
    ) -> Result<Option<ProcurementRecord>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let record = Self::require_record(&tx, id)?;
        if !record.is_archived() {
            return Err(TrackerError::invalid_input("id")
                .with_reason(format!("Record {id} is borrowed and has no stack position")));
        }

        let siblings = Self::fetch_folder_records(&tx, record.folder_id)?;
        let Some(relocation) = stacking::relocation_key(&siblings, id, target_stack) else {
            return Ok(None);
        };

        tx.execute(
            UPDATE_ORDER_KEY_SQL,
            params![
                relocation.stack_order_date,
                Timestamp::now().to_string(),
                id as i64
            ],
        )
        .db_context("Failed to update stack order key")?;

        let assignments = stacking::apply_relocation(&siblings, &relocation);
        apply_assignments(&tx, &siblings, &assignments)?;

        let record = Self::require_record(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;

        log::debug!(
            "Relocated record {id} to position {} (key {})",
            relocation.rank,
            relocation.stack_order_date
        );
        Ok(Some(record))
    }

    /// Files a record into another folder, on top of its stack when the
    /// record is archived. Both folders are re-ranked.
    pub fn move_record(&mut self, id: u64, folder_id: u64) -> Result<ProcurementRecord> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let record = Self::require_record(&tx, id)?;
        if !folder_exists(&tx, folder_id)? {
            return Err(TrackerError::FolderNotFound { id: folder_id });
        }
        if record.folder_id == folder_id {
            return Ok(record);
        }

        let stack_number: Option<i64> = if record.is_archived() {
            Some(
                tx.query_row(NEXT_STACK_NUMBER_SQL, params![folder_id as i64], |row| {
                    row.get(0)
                })
                .db_context("Failed to get next stack number")?,
            )
        } else {
            None
        };

        tx.execute(
            MOVE_RECORD_SQL,
            params![
                folder_id as i64,
                stack_number,
                Timestamp::now().to_string(),
                id as i64
            ],
        )
        .db_context("Failed to move record")?;

        update_stack_numbers_for_folder(&tx, record.folder_id)?;
        update_stack_numbers_for_folder(&tx, folder_id)?;

        let moved = Self::require_record(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;

        log::debug!("Moved record {id} from folder {} to {folder_id}", record.folder_id);
        Ok(moved)
    }

    /// A folder with its records in shelf order: archived files by stack
    /// number, then borrowed files.
    pub fn folder_stack(&self, folder_id: u64) -> Result<(Folder, Vec<ProcurementRecord>)> {
        let folder = Self::fetch_folder(&self.connection, folder_id)?
            .ok_or(TrackerError::FolderNotFound { id: folder_id })?;

        let siblings = Self::fetch_folder_records(&self.connection, folder_id)?;
        let mut records = Vec::with_capacity(siblings.len());
        for record in stacking::display_order(&siblings) {
            let mut record = record.clone();
            record.milestones = load_milestones(&self.connection, record.id)?;
            records.push(record);
        }

        Ok((folder, records))
    }

    /// Totals over every record.
    pub fn dashboard_summary(&self) -> Result<DashboardSummary> {
        let records = self.list_records(None)?;
        Ok(DashboardSummary::from_records(&records))
    }
}
