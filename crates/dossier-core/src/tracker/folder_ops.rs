//! Folder operations for the Tracker.

use super::Tracker;
use crate::{
    error::{Result, TrackerError},
    models::{Folder, FolderFilter},
    params::{CreateFolder, Id},
};

impl Tracker {
    /// Creates a folder at the given location.
    pub async fn create_folder(&self, params: &CreateFolder) -> Result<Folder> {
        if params.name.trim().is_empty() {
            return Err(TrackerError::invalid_input("name").with_reason("Folder name must not be empty"));
        }

        let params = params.clone();
        self.with_database(move |db| {
            db.create_folder(
                &params.name,
                params.drawer.as_deref(),
                params.cabinet.as_deref(),
                params.box_label.as_deref(),
            )
        })
        .await
    }

    /// Retrieves a folder by its ID.
    pub async fn get_folder(&self, params: &Id) -> Result<Option<Folder>> {
        let id = params.id;
        self.with_database(move |db| db.get_folder(id)).await
    }

    /// Lists folders with optional location filtering.
    pub async fn list_folders(&self, filter: Option<FolderFilter>) -> Result<Vec<Folder>> {
        self.with_database(move |db| db.list_folders(filter.as_ref()))
            .await
    }

    /// Deletes an empty folder without asking for confirmation.
    pub async fn delete_folder_by_id(&self, params: &Id) -> Result<Folder> {
        let id = params.id;
        self.with_database(move |db| db.delete_folder(id)).await
    }

    /// A folder with its records in shelf order.
    pub async fn folder_stack(&self, params: &Id) -> Result<crate::display::FolderStack> {
        let id = params.id;
        let (folder, records) = self.with_database(move |db| db.folder_stack(id)).await?;
        Ok(crate::display::FolderStack { folder, records })
    }
}
