//! Short status messages for operations without a resource to show.

use std::fmt;

/// Outcome line plus optional bullet details, e.g. the steps cleared by a
/// cascade or the reason a relocation did nothing.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
    pub details: Vec<String>,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
            details: Vec::new(),
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
            details: Vec::new(),
        }
    }

    /// Attach detail lines shown as a bullet list.
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{prefix} {}", self.message)?;
        if !self.details.is_empty() {
            writeln!(f)?;
            for detail in &self.details {
                writeln!(f, "- {detail}")?;
            }
        }
        Ok(())
    }
}
