//! Status and workflow-type enumerations for procurement records.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Physical whereabouts of a record's file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// File is shelved in its folder and takes part in stack ordering
    #[default]
    Archived,

    /// File has been borrowed out of its folder
    #[serde(alias = "borrowed")]
    Active,
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "archived" | "returned" => Ok(RecordStatus::Archived),
            "active" | "borrowed" => Ok(RecordStatus::Active),
            _ => Err(format!("Invalid record status: {s}")),
        }
    }
}

impl RecordStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Archived => "archived",
            RecordStatus::Active => "active",
        }
    }

    /// Status with an icon, for list output.
    ///
    /// ```rust
    /// use dossier_core::models::RecordStatus;
    ///
    /// assert_eq!(RecordStatus::Archived.with_icon(), "▣ Archived");
    /// assert_eq!(RecordStatus::Active.with_icon(), "⇢ Borrowed");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            RecordStatus::Archived => "▣ Archived",
            RecordStatus::Active => "⇢ Borrowed",
        }
    }
}

/// Procurement workflow a record follows.
///
/// Parsing never fails. Text that names neither workflow becomes
/// [`ProcurementType::Unknown`], which follows the SVP step sequence (see
/// [`crate::workflow::process_steps`]).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProcurementType {
    /// Small Value Procurement
    #[default]
    #[serde(alias = "SVP")]
    Svp,

    /// Regular (public) bidding
    #[serde(alias = "regular", alias = "Regular Bidding")]
    RegularBidding,

    /// Anything else found in stored data
    #[serde(other)]
    Unknown,
}

impl From<&str> for ProcurementType {
    fn from(s: &str) -> Self {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "svp" | "smallvalue" | "smallvalueprocurement" => ProcurementType::Svp,
            "regularbidding" | "regular" | "publicbidding" | "bidding" => {
                ProcurementType::RegularBidding
            }
            _ => ProcurementType::Unknown,
        }
    }
}

impl ProcurementType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcurementType::Svp => "svp",
            ProcurementType::RegularBidding => "regular_bidding",
            ProcurementType::Unknown => "unknown",
        }
    }

    /// Human-readable workflow name.
    pub fn label(&self) -> &'static str {
        match self {
            ProcurementType::Svp => "Small Value Procurement",
            ProcurementType::RegularBidding => "Regular Bidding",
            ProcurementType::Unknown => "Unknown (SVP workflow)",
        }
    }
}
