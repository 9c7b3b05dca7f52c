//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it with termimad and the MCP
//! server can return it as-is.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    models::{DashboardSummary, Folder, ProcurementRecord, ProcurementType, RecordStatus},
    workflow::ProcessStep,
};

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ProcurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for ProcessStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (`{}`)", self.label, self.key)
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Location**: {}", self.location())?;
        writeln!(f, "- **Records**: {}", self.record_count)?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl ProcurementRecord {
    /// Short progress text, e.g. `29% (next: Published (PhilGEPS))`.
    fn progress(&self) -> String {
        let completion = self.completion_percentage();
        match self.next_required_step() {
            Some(step) => format!("{completion}% (next: {})", step.label),
            None if completion == 100 => "100% (complete)".to_string(),
            None => format!("{completion}% (blocked)"),
        }
    }
}

impl fmt::Display for ProcurementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        if let Some(reference) = &self.reference_number {
            writeln!(f, "- Reference: {reference}")?;
        }
        writeln!(f, "- Type: {}", self.procurement_type)?;
        writeln!(f, "- Status: {}", self.status.with_icon())?;
        writeln!(f, "- Folder: {}", self.folder_id)?;
        match self.stack_number {
            Some(n) => writeln!(f, "- Stack: #{n}")?,
            None => writeln!(f, "- Stack: (out of folder)")?,
        }
        writeln!(f, "- Progress: {}", self.progress())?;
        writeln!(f, "- Added: {}", LocalDateTime(&self.date_added))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        Ok(())
    }
}

impl fmt::Display for DashboardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Dashboard")?;
        writeln!(f)?;

        if self.total_records == 0 {
            return writeln!(f, "No records yet.");
        }

        writeln!(f, "- **Records**: {}", self.total_records)?;
        writeln!(f, "- **Archived**: {}", self.archived)?;
        writeln!(f, "- **Borrowed**: {}", self.borrowed)?;
        writeln!(
            f,
            "- **Completed workflows**: {}/{}",
            self.fully_completed, self.total_records
        )?;
        writeln!(f, "- **Average completion**: {}%", self.average_completion)?;

        writeln!(f)?;
        writeln!(f, "## By procurement type")?;
        writeln!(f)?;
        for (ty, count) in &self.by_type {
            writeln!(f, "- {}: {count}", ProcurementType::from(ty.as_str()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::models::Milestones;

    fn sample_record() -> ProcurementRecord {
        ProcurementRecord {
            id: 7,
            folder_id: 2,
            title: "Office supplies".to_string(),
            reference_number: Some("PR-2024-0113".to_string()),
            procurement_type: ProcurementType::Svp,
            status: RecordStatus::Archived,
            stack_number: Some(3),
            stack_order_date: None,
            date_added: Timestamp::now(),
            updated_at: Timestamp::now(),
            milestones: Milestones::new()
                .with("receivedPrDate", date(2024, 3, 1))
                .with("prDeliberatedDate", date(2024, 3, 4)),
        }
    }

    #[test]
    fn test_record_display() {
        let output = sample_record().to_string();

        assert!(output.starts_with("# 7. Office supplies"));
        assert!(output.contains("- Reference: PR-2024-0113"));
        assert!(output.contains("- Type: Small Value Procurement"));
        assert!(output.contains("- Stack: #3"));
        assert!(output.contains("29% (next: Published (PhilGEPS))"));
    }

    #[test]
    fn test_borrowed_record_display() {
        let mut record = sample_record();
        record.status = RecordStatus::Active;
        record.stack_number = None;

        let output = record.to_string();
        assert!(output.contains("⇢ Borrowed"));
        assert!(output.contains("(out of folder)"));
    }

    #[test]
    fn test_empty_dashboard_display() {
        let output = DashboardSummary::default().to_string();
        assert!(output.contains("No records yet."));
    }

    #[test]
    fn test_dashboard_display() {
        let summary = DashboardSummary::from_records(&[sample_record()]);
        let output = summary.to_string();

        assert!(output.contains("- **Records**: 1"));
        assert!(output.contains("- **Average completion**: 29%"));
        assert!(output.contains("- Small Value Procurement: 1"));
    }
}
