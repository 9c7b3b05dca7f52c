//! Record operations for the Tracker.

use super::Tracker;
use crate::{
    error::Result,
    models::{DashboardSummary, ProcurementRecord, RecordFilter},
    params::{ClearMilestone, CreateRecord, Id, MoveRecord, RelocateRecord, SetMilestone},
};

impl Tracker {
    /// Adds a record to a folder after validating its parameters.
    pub async fn create_record(&self, params: &CreateRecord) -> Result<ProcurementRecord> {
        let (procurement_type, date_added) = params.validate()?;
        let params = params.clone();

        self.with_database(move |db| {
            db.create_record(
                params.folder_id,
                &params.title,
                params.reference_number.as_deref(),
                procurement_type,
                date_added,
            )
        })
        .await
    }

    /// Retrieves a record by its ID.
    pub async fn get_record(&self, params: &Id) -> Result<Option<ProcurementRecord>> {
        let id = params.id;
        self.with_database(move |db| db.get_record(id)).await
    }

    /// Lists records with optional filtering.
    pub async fn list_records(
        &self,
        filter: Option<RecordFilter>,
    ) -> Result<Vec<ProcurementRecord>> {
        self.with_database(move |db| db.list_records(filter.as_ref()))
            .await
    }

    /// Deletes a record and re-ranks its folder.
    pub async fn delete_record(&self, params: &Id) -> Result<ProcurementRecord> {
        let id = params.id;
        self.with_database(move |db| db.delete_record(id)).await
    }

    /// Records a monitoring date; fails with `StepLocked` when a prerequisite
    /// step is missing.
    pub async fn set_milestone(&self, params: &SetMilestone) -> Result<ProcurementRecord> {
        let date = params.validate()?;
        let record_id = params.record_id;
        let step_key = params.step_key.clone();

        self.with_database(move |db| db.set_milestone(record_id, &step_key, date))
            .await
    }

    /// Clears a monitoring date and every date depending on it. Returns the
    /// cleared step keys alongside the record.
    pub async fn clear_milestone(
        &self,
        params: &ClearMilestone,
    ) -> Result<(ProcurementRecord, Vec<String>)> {
        let record_id = params.record_id;
        let step_key = params.step_key.clone();

        self.with_database(move |db| db.clear_milestone(record_id, &step_key))
            .await
    }

    /// Marks a record as borrowed.
    pub async fn borrow_record(&self, params: &Id) -> Result<ProcurementRecord> {
        let id = params.id;
        self.with_database(move |db| db.borrow_record(id)).await
    }

    /// Puts a borrowed record back into its folder.
    pub async fn return_record(&self, params: &Id) -> Result<ProcurementRecord> {
        let id = params.id;
        self.with_database(move |db| db.return_record(id)).await
    }

    /// Moves an archived record within its folder's stack. `Ok(None)` means
    /// no target position was given and nothing changed.
    pub async fn relocate_record(
        &self,
        params: &RelocateRecord,
    ) -> Result<Option<ProcurementRecord>> {
        let id = params.id;
        let target_stack = params.target_stack;
        self.with_database(move |db| db.relocate_record(id, target_stack))
            .await
    }

    /// Files a record into another folder.
    pub async fn move_record(&self, params: &MoveRecord) -> Result<ProcurementRecord> {
        let id = params.id;
        let folder_id = params.folder_id;
        self.with_database(move |db| db.move_record(id, folder_id))
            .await
    }

    /// Totals over every record.
    pub async fn dashboard(&self) -> Result<DashboardSummary> {
        self.with_database(|db| db.dashboard_summary()).await
    }
}
