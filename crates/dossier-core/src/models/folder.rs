//! Folder model: the innermost tier of the physical storage hierarchy.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A physical folder holding procurement files.
///
/// Drawer, cabinet and box are stored as location labels; they only group
/// folders and carry no behavior of their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Folder {
    /// Unique identifier for the folder
    pub id: u64,

    /// Folder name as written on its tab
    pub name: String,

    /// Drawer or shelf label
    pub drawer: Option<String>,

    /// Cabinet label
    pub cabinet: Option<String>,

    /// Box label
    #[serde(rename = "box")]
    pub box_label: Option<String>,

    /// Number of records filed in the folder (archived and borrowed)
    #[serde(default)]
    pub record_count: u32,

    /// Timestamp when the folder was created (UTC)
    pub created_at: Timestamp,
}

impl Folder {
    /// Location path from the outermost tier inward, skipping unset tiers.
    ///
    /// ```rust
    /// use dossier_core::models::Folder;
    /// use jiff::Timestamp;
    ///
    /// let folder = Folder {
    ///     id: 1,
    ///     name: "PR 2024-001".to_string(),
    ///     drawer: Some("Drawer 2".to_string()),
    ///     cabinet: None,
    ///     box_label: Some("Box B".to_string()),
    ///     record_count: 0,
    ///     created_at: Timestamp::now(),
    /// };
    /// assert_eq!(folder.location(), "Drawer 2 / Box B / PR 2024-001");
    /// ```
    pub fn location(&self) -> String {
        [
            self.drawer.as_deref(),
            self.cabinet.as_deref(),
            self.box_label.as_deref(),
            Some(self.name.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" / ")
    }
}
