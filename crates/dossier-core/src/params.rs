//! Parameter structures shared by every interface.
//!
//! The CLI wraps these in clap `Args` structs and the MCP server deserializes
//! them straight from tool arguments, so they carry only serde derives (plus
//! `JsonSchema` behind the `schema` feature). Text fields that need parsing
//! are validated here, once, instead of in each interface.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use jiff::{civil::Date, Timestamp, Zoned};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TrackerError},
    models::ProcurementType,
};

/// Generic parameters for operations requiring just an ID.
///
/// Used for show, delete, borrow and return operations on records and
/// folders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateFolder {
    /// Folder name as written on its tab (required)
    pub name: String,
    /// Drawer or shelf holding the folder
    pub drawer: Option<String>,
    /// Cabinet holding the folder
    pub cabinet: Option<String>,
    /// Box holding the folder
    pub box_label: Option<String>,
}

/// Parameters for listing folders, optionally narrowed to one location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListFolders {
    /// Only folders in this drawer
    pub drawer: Option<String>,
    /// Only folders in this cabinet
    pub cabinet: Option<String>,
    /// Only folders in this box
    pub box_label: Option<String>,
}

/// Parameters for deleting a folder.
///
/// Deletion is refused unless `confirmed` is true.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteFolder {
    /// ID of the folder to delete
    pub id: u64,
    /// Explicit confirmation that the folder should be deleted
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for adding a procurement record to a folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateRecord {
    /// ID of the folder the file is filed in
    pub folder_id: u64,
    /// Project or PR title (required)
    pub title: String,
    /// PR / reference number printed on the file
    pub reference_number: Option<String>,
    /// Workflow: 'svp' (default) or 'regular_bidding'
    pub procurement_type: Option<String>,
    /// When the file was received, as an RFC 3339 timestamp; defaults to now
    pub date_added: Option<String>,
}

impl CreateRecord {
    /// Validate the record parameters and return the parsed workflow and
    /// optional date added.
    ///
    /// Stored records with an unrecognized workflow still load and follow
    /// the SVP steps, but new records must name a known workflow.
    ///
    /// ```rust
    /// use dossier_core::{models::ProcurementType, params::CreateRecord};
    ///
    /// let params = CreateRecord {
    ///     folder_id: 1,
    ///     title: "Road repair".to_string(),
    ///     procurement_type: Some("Regular Bidding".to_string()),
    ///     ..Default::default()
    /// };
    /// let (procurement_type, date_added) = params.validate()?;
    /// assert_eq!(procurement_type, ProcurementType::RegularBidding);
    /// assert!(date_added.is_none());
    /// # Ok::<(), dossier_core::TrackerError>(())
    /// ```
    pub fn validate(&self) -> Result<(ProcurementType, Option<Timestamp>)> {
        if self.title.trim().is_empty() {
            return Err(TrackerError::invalid_input("title").with_reason("Title must not be empty"));
        }

        let procurement_type = match self.procurement_type.as_deref() {
            None => ProcurementType::default(),
            Some(text) => match ProcurementType::from(text) {
                ProcurementType::Unknown => {
                    return Err(TrackerError::invalid_input("procurement_type").with_reason(
                        format!("Unknown procurement type: {text}. Must be 'svp' or 'regular_bidding'"),
                    ))
                }
                known => known,
            },
        };

        let date_added = self
            .date_added
            .as_deref()
            .map(|text| {
                text.parse::<Timestamp>().map_err(|e| {
                    TrackerError::invalid_input("date_added")
                        .with_reason(format!("Invalid timestamp '{text}': {e}"))
                })
            })
            .transpose()?;

        Ok((procurement_type, date_added))
    }
}

/// Parameters for listing records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListRecords {
    /// Only records filed in this folder
    pub folder_id: Option<u64>,
    /// Only records with this status ('archived' or 'borrowed')
    pub status: Option<String>,
    /// Only records following this workflow
    pub procurement_type: Option<String>,
    /// Case-insensitive text matched against title and reference number
    pub search: Option<String>,
}

/// Parameters for recording the completion date of a monitoring step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetMilestone {
    /// ID of the record
    pub record_id: u64,
    /// Step key, e.g. 'receivedPrDate'
    pub step_key: String,
    /// Completion date as YYYY-MM-DD; defaults to today
    pub date: Option<String>,
}

impl SetMilestone {
    /// Parse the completion date, falling back to today's date in the
    /// system time zone.
    pub fn validate(&self) -> Result<Date> {
        match self.date.as_deref() {
            Some(text) => text.parse::<Date>().map_err(|e| {
                TrackerError::invalid_input("date")
                    .with_reason(format!("Invalid date '{text}': {e}. Use YYYY-MM-DD"))
            }),
            None => Ok(Zoned::now().date()),
        }
    }
}

/// Parameters for clearing a monitoring step and everything after it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ClearMilestone {
    /// ID of the record
    pub record_id: u64,
    /// Step key to clear
    pub step_key: String,
}

/// Parameters for moving a file to another position of its folder's stack.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RelocateRecord {
    /// ID of the archived record to move
    pub id: u64,
    /// 1-based target position; out-of-range values are clamped, and a
    /// missing value leaves the stack unchanged
    pub target_stack: Option<u32>,
}

/// Parameters for filing a record into another folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MoveRecord {
    /// ID of the record to move
    pub id: u64,
    /// ID of the destination folder
    pub folder_id: u64,
}
