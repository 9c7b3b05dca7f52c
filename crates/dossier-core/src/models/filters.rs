//! Filter types for querying records and folders.

use super::{ProcurementType, RecordStatus};

/// Filter options for querying records.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Only records in this folder
    pub folder_id: Option<u64>,

    /// Only records with this status
    pub status: Option<RecordStatus>,

    /// Only records following this workflow
    pub procurement_type: Option<ProcurementType>,

    /// Filter by title or reference number (case-insensitive partial match)
    pub text_contains: Option<String>,
}

impl From<&crate::params::ListRecords> for RecordFilter {
    /// Convert ListRecords parameters to a RecordFilter.
    ///
    /// Status text that does not parse is dropped; workflow text always maps
    /// to a [`ProcurementType`], unknown names included.
    ///
    /// ```rust
    /// use dossier_core::{
    ///     models::{ProcurementType, RecordFilter, RecordStatus},
    ///     params::ListRecords,
    /// };
    ///
    /// let params = ListRecords {
    ///     folder_id: Some(3),
    ///     status: Some("borrowed".to_string()),
    ///     procurement_type: Some("Regular Bidding".to_string()),
    ///     search: None,
    /// };
    /// let filter: RecordFilter = (&params).into();
    /// assert_eq!(filter.folder_id, Some(3));
    /// assert_eq!(filter.status, Some(RecordStatus::Active));
    /// assert_eq!(filter.procurement_type, Some(ProcurementType::RegularBidding));
    /// ```
    fn from(params: &crate::params::ListRecords) -> Self {
        Self {
            folder_id: params.folder_id,
            status: params.status.as_deref().and_then(|s| s.parse().ok()),
            procurement_type: params.procurement_type.as_deref().map(ProcurementType::from),
            text_contains: params.search.clone(),
        }
    }
}

/// Filter options for querying folders by location.
#[derive(Debug, Clone, Default)]
pub struct FolderFilter {
    pub drawer: Option<String>,
    pub cabinet: Option<String>,
    pub box_label: Option<String>,
}

impl From<&crate::params::ListFolders> for FolderFilter {
    fn from(params: &crate::params::ListFolders) -> Self {
        Self {
            drawer: params.drawer.clone(),
            cabinet: params.cabinet.clone(),
            box_label: params.box_label.clone(),
        }
    }
}
