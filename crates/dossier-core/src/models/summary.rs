//! Dashboard summary over a set of records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ProcurementRecord, ProcurementType};

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    /// Number of records
    pub total_records: u32,
    /// Records shelved in their folder
    pub archived: u32,
    /// Records currently borrowed
    pub borrowed: u32,
    /// Record count per workflow, keyed by [`ProcurementType::as_str`]
    pub by_type: BTreeMap<String, u32>,
    /// Records with every monitoring step completed
    pub fully_completed: u32,
    /// Mean completion percentage, rounded; 0 when there are no records
    pub average_completion: u8,
}

impl DashboardSummary {
    /// Summarize `records`.
    pub fn from_records(records: &[ProcurementRecord]) -> Self {
        let mut summary = Self {
            total_records: records.len() as u32,
            ..Default::default()
        };

        let mut completion_total: u32 = 0;
        for record in records {
            if record.is_archived() {
                summary.archived += 1;
            } else {
                summary.borrowed += 1;
            }
            *summary
                .by_type
                .entry(record.procurement_type.as_str().to_string())
                .or_insert(0) += 1;

            let completion = record.completion_percentage();
            if completion == 100 {
                summary.fully_completed += 1;
            }
            completion_total += u32::from(completion);
        }

        if summary.total_records > 0 {
            let n = summary.total_records;
            summary.average_completion = ((completion_total * 2 + n) / (2 * n)) as u8;
        }

        summary
    }

    /// Count of records following `procurement_type`.
    pub fn count_for(&self, procurement_type: ProcurementType) -> u32 {
        self.by_type
            .get(procurement_type.as_str())
            .copied()
            .unwrap_or(0)
    }
}
