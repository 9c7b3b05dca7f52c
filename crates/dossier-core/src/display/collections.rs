//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::{
    models::{Folder, ProcurementRecord},
    workflow,
};

/// Newtype wrapper for displaying a list of records, one heading each.
///
/// # Examples
///
/// ```rust
/// use dossier_core::display::Records;
///
/// let records = Records(vec![]);
/// assert_eq!(records.to_string(), "No records found.\n");
/// ```
pub struct Records(pub Vec<ProcurementRecord>);

impl Records {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of records in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, ProcurementRecord> {
        self.0.iter()
    }
}

impl IntoIterator for Records {
    type Item = ProcurementRecord;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Records {
    type Item = &'a ProcurementRecord;
    type IntoIter = std::slice::Iter<'a, ProcurementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One-line heading used in record lists.
fn fmt_record_line(record: &ProcurementRecord, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let stack = record
        .stack_number
        .map(|n| format!("#{n}"))
        .unwrap_or_else(|| "-".to_string());

    writeln!(
        f,
        "## {}. {} ({}, stack {stack}, {}%)",
        record.id,
        record.title,
        record.status.with_icon(),
        record.completion_percentage()
    )?;
    writeln!(f)?;
    if let Some(reference) = &record.reference_number {
        writeln!(f, "- **Reference**: {reference}")?;
    }
    writeln!(f, "- **Type**: {}", record.procurement_type)?;
    writeln!(f, "- **Folder**: {}", record.folder_id)?;
    writeln!(f)
}

impl fmt::Display for Records {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No records found.")
        } else {
            for record in &self.0 {
                fmt_record_line(record, f)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a list of folders.
pub struct Folders(pub Vec<Folder>);

impl Folders {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of folders in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the folders.
    pub fn iter(&self) -> std::slice::Iter<'_, Folder> {
        self.0.iter()
    }
}

impl fmt::Display for Folders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No folders found.")
        } else {
            for folder in &self.0 {
                write!(f, "{folder}")?;
            }
            Ok(())
        }
    }
}

/// A folder together with its records in shelf order.
pub struct FolderStack {
    pub folder: Folder,
    pub records: Vec<ProcurementRecord>,
}

impl fmt::Display for FolderStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} (ID: {})", self.folder.name, self.folder.id)?;
        writeln!(f)?;
        writeln!(f, "- Location: {}", self.folder.location())?;
        writeln!(f)?;

        if self.records.is_empty() {
            return writeln!(f, "This folder is empty.");
        }

        writeln!(f, "## Stack")?;
        writeln!(f)?;
        for record in &self.records {
            match record.stack_number {
                Some(n) => writeln!(f, "{n}. {} (ID: {})", record.title, record.id)?,
                None => writeln!(
                    f,
                    "- {} (ID: {}) {}",
                    record.title,
                    record.id,
                    record.status.with_icon()
                )?,
            }
        }

        Ok(())
    }
}

/// Checklist of every monitoring step of a record with its state.
///
/// ```rust
/// use dossier_core::{
///     display::MonitoringSheet,
///     models::{Milestones, ProcurementRecord, ProcurementType, RecordStatus},
/// };
/// use jiff::{civil::date, Timestamp};
///
/// let record = ProcurementRecord {
///     id: 1,
///     folder_id: 1,
///     title: "Office supplies".to_string(),
///     reference_number: None,
///     procurement_type: ProcurementType::Svp,
///     status: RecordStatus::Archived,
///     stack_number: Some(1),
///     stack_order_date: None,
///     date_added: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     milestones: Milestones::new().with("receivedPrDate", date(2024, 3, 1)),
/// };
///
/// let output = MonitoringSheet(&record).to_string();
/// assert!(output.contains("✓ Received PR for Action"));
/// assert!(output.contains("➤ PR Deliberated"));
/// assert!(output.contains("○ Published (PhilGEPS)"));
/// ```
pub struct MonitoringSheet<'a>(pub &'a ProcurementRecord);

impl fmt::Display for MonitoringSheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        writeln!(
            f,
            "# Monitoring: {} ({}, {}%)",
            record.title,
            record.procurement_type,
            record.completion_percentage()
        )?;
        writeln!(f)?;

        for step in record.process_steps() {
            let icon = workflow::step_state(&record.milestones, step).icon();
            match record.milestones.get(step.key) {
                Some(date) => writeln!(f, "- {icon} {step}: {date}")?,
                None => writeln!(f, "- {icon} {step}")?,
            }
        }

        Ok(())
    }
}
