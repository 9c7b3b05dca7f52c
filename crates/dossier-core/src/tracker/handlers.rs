//! Handler operations that return formatted wrapper types for the Tracker.

use super::Tracker;
use crate::{
    display::{Folders, Records},
    error::{Result, TrackerError},
    models::{Folder, FolderFilter, ProcurementRecord, RecordFilter},
    params::{DeleteFolder, Id, ListFolders, ListRecords},
    workflow::ProcessStep,
};

impl Tracker {
    /// Handle listing records filtered by folder, status, type or text.
    ///
    /// ```rust,no_run
    /// # use dossier_core::{params::ListRecords, TrackerBuilder};
    /// # async {
    /// let tracker = TrackerBuilder::new().build().await?;
    /// let params = ListRecords {
    ///     status: Some("borrowed".to_string()),
    ///     ..Default::default()
    /// };
    /// let records = tracker.list_records_summary(&params).await?;
    /// # Result::<(), dossier_core::TrackerError>::Ok(())
    /// # };
    /// ```
    pub async fn list_records_summary(&self, params: &ListRecords) -> Result<Records> {
        let records = self.list_records(Some(RecordFilter::from(params))).await?;
        Ok(Records(records))
    }

    /// Handle listing folders, optionally narrowed to one location.
    pub async fn list_folders_summary(&self, params: &ListFolders) -> Result<Folders> {
        let folders = self.list_folders(Some(FolderFilter::from(params))).await?;
        Ok(Folders(folders))
    }

    /// Handle showing a record, failing when it does not exist.
    pub async fn show_record(&self, params: &Id) -> Result<ProcurementRecord> {
        self.get_record(params)
            .await?
            .ok_or(TrackerError::RecordNotFound { id: params.id })
    }

    /// Handle permanently deleting a folder with confirmation.
    ///
    /// Requires explicit confirmation via the `confirmed` field to prevent
    /// accidental deletion. Returns the deleted folder.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidInput` if `confirmed` is false or the
    /// folder still holds records, and `TrackerError::FolderNotFound` if it
    /// does not exist.
    pub async fn delete_folder(&self, params: &DeleteFolder) -> Result<Folder> {
        if !params.confirmed {
            return Err(TrackerError::invalid_input("confirmed").with_reason(
                "Folder deletion requires explicit confirmation. Set 'confirmed' to true to proceed.",
            ));
        }

        self.delete_folder_by_id(&Id { id: params.id }).await
    }

    /// Handle asking what a record's next monitoring step is.
    ///
    /// Returns the record with the step, which is `None` when the workflow is
    /// complete or blocked by a date entered out of order.
    pub async fn next_step(
        &self,
        params: &Id,
    ) -> Result<(ProcurementRecord, Option<&'static ProcessStep>)> {
        let record = self.show_record(params).await?;
        let next = record.next_required_step();
        Ok((record, next))
    }
}
