//! Procurement record model and its monitoring dates.

use std::collections::BTreeMap;

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{ProcurementType, RecordStatus};
use crate::workflow::{self, ProcessStep};

/// Completed monitoring steps of a record, keyed by step key.
///
/// A step counts as completed when its key is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Milestones(BTreeMap<String, Date>);

impl Milestones {
    /// Creates an empty set of milestones.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the step with `key` has a date recorded.
    pub fn is_set(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Date recorded for the step with `key`.
    pub fn get(&self, key: &str) -> Option<Date> {
        self.0.get(key).copied()
    }

    /// Records `date` for `key`, replacing any earlier date.
    pub fn set(&mut self, key: impl Into<String>, date: Date) {
        self.0.insert(key.into(), date);
    }

    /// Removes the date for `key`, returning it if one was recorded.
    pub fn clear(&mut self, key: &str) -> Option<Date> {
        self.0.remove(key)
    }

    /// Builder-style [`Milestones::set`].
    pub fn with(mut self, key: impl Into<String>, date: Date) -> Self {
        self.set(key, date);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(step key, date)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Date)> {
        self.0.iter().map(|(key, date)| (key.as_str(), *date))
    }
}

impl FromIterator<(String, Date)> for Milestones {
    fn from_iter<I: IntoIterator<Item = (String, Date)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A procurement file tracked through its workflow and through the folder it
/// is filed in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcurementRecord {
    /// Unique identifier for the record
    pub id: u64,

    /// ID of the containing folder
    pub folder_id: u64,

    /// Short description of the procurement (project or PR title)
    pub title: String,

    /// PR / reference number printed on the file
    pub reference_number: Option<String>,

    /// Workflow the record follows
    #[serde(default)]
    pub procurement_type: ProcurementType,

    /// Whether the file is shelved or borrowed
    #[serde(default)]
    pub status: RecordStatus,

    /// Dense 1-based rank among archived siblings; unset while borrowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_number: Option<u32>,

    /// Fractional ordering key written by relocation (epoch milliseconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_order_date: Option<f64>,

    /// When the file was added to the system; fallback ordering key
    pub date_added: Timestamp,

    /// Timestamp when the record was last updated (UTC)
    pub updated_at: Timestamp,

    /// Monitoring dates of completed steps
    #[serde(default)]
    pub milestones: Milestones,
}

impl ProcurementRecord {
    /// Whether the record is shelved and therefore takes part in stack
    /// ordering.
    pub fn is_archived(&self) -> bool {
        self.status == RecordStatus::Archived
    }

    /// Ordering key: `stack_order_date` when set, else `date_added` as epoch
    /// milliseconds.
    pub fn order_key(&self) -> f64 {
        self.stack_order_date
            .unwrap_or_else(|| self.date_added.as_millisecond() as f64)
    }

    /// Steps of this record's workflow.
    pub fn process_steps(&self) -> &'static [ProcessStep] {
        workflow::process_steps(self.procurement_type)
    }

    /// Completion of this record's workflow, 0..=100.
    pub fn completion_percentage(&self) -> u8 {
        workflow::completion_percentage(&self.milestones, self.procurement_type)
    }

    /// The step the user can act on next, if any.
    pub fn next_required_step(&self) -> Option<&'static ProcessStep> {
        workflow::next_required_step(&self.milestones, self.procurement_type)
    }
}
