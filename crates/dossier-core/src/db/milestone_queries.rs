//! Monitoring date writes, gated by the workflow validator.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, types::Type, Connection};

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Milestones, ProcurementRecord},
    workflow,
};

const SELECT_MILESTONES_SQL: &str =
    "SELECT step_key, completed_on FROM milestones WHERE record_id = ?1";
const UPSERT_MILESTONE_SQL: &str = "INSERT INTO milestones (record_id, step_key, completed_on) VALUES (?1, ?2, ?3) \
     ON CONFLICT(record_id, step_key) DO UPDATE SET completed_on = excluded.completed_on";
const DELETE_MILESTONE_SQL: &str = "DELETE FROM milestones WHERE record_id = ?1 AND step_key = ?2";
const TOUCH_RECORD_SQL: &str = "UPDATE records SET updated_at = ?1 WHERE id = ?2";

/// Loads the completed steps of one record.
pub(super) fn load_milestones(conn: &Connection, record_id: u64) -> Result<Milestones> {
    let mut stmt = conn
        .prepare(SELECT_MILESTONES_SQL)
        .db_context("Failed to prepare milestone query")?;

    let milestones = stmt
        .query_map(params![record_id as i64], |row| {
            let key: String = row.get(0)?;
            let date = row.get::<_, String>(1)?.parse::<Date>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
            })?;
            Ok((key, date))
        })
        .db_context("Failed to query milestones")?
        .collect::<std::result::Result<Milestones, _>>()
        .db_context("Failed to collect milestones")?;

    Ok(milestones)
}

impl super::Database {
    /// Records the completion date of a monitoring step.
    ///
    /// The step must belong to a known workflow and its prerequisites must
    /// already be completed for the record's procurement type. Setting an
    /// already completed step replaces its date.
    pub fn set_milestone(
        &mut self,
        record_id: u64,
        step_key: &str,
        date: Date,
    ) -> Result<ProcurementRecord> {
        if !workflow::is_known_step(step_key) {
            return Err(TrackerError::invalid_input("step_key")
                .with_reason(format!("Unknown monitoring step '{step_key}'")));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let record = Self::require_record(&tx, record_id)?;

        if workflow::is_step_disabled(&record.milestones, step_key, record.procurement_type) {
            let missing = workflow::missing_dependencies(
                &record.milestones,
                step_key,
                record.procurement_type,
            );
            return Err(TrackerError::StepLocked {
                step: step_key.to_string(),
                missing: missing.into_iter().map(String::from).collect(),
            });
        }

        tx.execute(
            UPSERT_MILESTONE_SQL,
            params![record_id as i64, step_key, date.to_string()],
        )
        .db_context("Failed to write milestone")?;

        tx.execute(
            TOUCH_RECORD_SQL,
            params![Timestamp::now().to_string(), record_id as i64],
        )
        .db_context("Failed to update record timestamp")?;

        let record = Self::require_record(&tx, record_id)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(record)
    }

    /// Clears a monitoring step together with every step that depends on it.
    ///
    /// Returns the updated record and the keys that were actually cleared,
    /// `step_key` first. Clearing a step that is not set still cascades.
    pub fn clear_milestone(
        &mut self,
        record_id: u64,
        step_key: &str,
    ) -> Result<(ProcurementRecord, Vec<String>)> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let record = Self::require_record(&tx, record_id)?;

        let mut remaining =
            workflow::clear_downstream_of(&record.milestones, step_key, record.process_steps());
        remaining.clear(step_key);

        let cleared: Vec<String> = std::iter::once(step_key)
            .chain(workflow::downstream_of(step_key, record.process_steps()))
            .filter(|key| record.milestones.is_set(key) && !remaining.is_set(key))
            .map(String::from)
            .collect();

        for key in &cleared {
            tx.execute(DELETE_MILESTONE_SQL, params![record_id as i64, key])
                .db_context("Failed to clear milestone")?;
        }

        if !cleared.is_empty() {
            tx.execute(
                TOUCH_RECORD_SQL,
                params![Timestamp::now().to_string(), record_id as i64],
            )
            .db_context("Failed to update record timestamp")?;
        }

        let record = Self::require_record(&tx, record_id)?;
        tx.commit().db_context("Failed to commit transaction")?;

        log::debug!("Cleared {} step(s) on record {record_id}", cleared.len());
        Ok((record, cleared))
    }
}
