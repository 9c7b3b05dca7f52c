//! Monitoring-step validation for procurement workflows.
//!
//! Every workflow is a fixed sequence of [`ProcessStep`]s. A step may be
//! marked complete only once all of its dependencies are complete. The
//! functions here are read-only: they decide what a caller may do and
//! summarize progress, while the caller performs the write.
//!
//! Each step is in one of three states:
//!
//! ```text
//!   Locked ──(dependencies completed)──▶ Available ──(date set)──▶ Completed
//!                                           ▲                          │
//!                                           └──────(date cleared)──────┘
//! ```
//!
//! Clearing a date must also clear every step downstream of it;
//! [`clear_downstream_of`] computes that cascade.
//!
//! Malformed input never fails. An unknown step key is always allowed and
//! [`ProcurementType::Unknown`] follows the SVP sequence.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{Milestones, ProcurementType};

mod steps;


pub use steps::{is_known_step, ProcessStep, REGULAR_BIDDING_STEPS, SVP_STEPS};

/// Where a single step stands for a given record.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    /// Some dependency is not completed yet
    Locked,
    /// Dependencies are completed; the date may be set
    Available,
    /// The date is set
    Completed,
}

impl StepState {
    /// One-character icon for checklists.
    pub fn icon(&self) -> &'static str {
        match self {
            StepState::Completed => "✓",
            StepState::Available => "➤",
            StepState::Locked => "○",
        }
    }
}

/// Ordered steps of the workflow for `procurement_type`.
pub fn process_steps(procurement_type: ProcurementType) -> &'static [ProcessStep] {
    match procurement_type {
        ProcurementType::Svp => &SVP_STEPS,
        ProcurementType::RegularBidding => &REGULAR_BIDDING_STEPS,
        // Legacy and mistyped records keep working on the shorter workflow.
        ProcurementType::Unknown => &SVP_STEPS,
    }
}

/// Finds the step with `step_key` in the workflow for `procurement_type`.
pub fn find_step(step_key: &str, procurement_type: ProcurementType) -> Option<&'static ProcessStep> {
    process_steps(procurement_type)
        .iter()
        .find(|step| step.key == step_key)
}

fn dependencies_met(milestones: &Milestones, step: &ProcessStep) -> bool {
    step.dependencies.iter().all(|dep| milestones.is_set(dep))
}

/// Whether the step with `step_key` may be set on a record with
/// `milestones`.
///
/// Keys outside the workflow are allowed.
pub fn validate_process_step(
    milestones: &Milestones,
    step_key: &str,
    procurement_type: ProcurementType,
) -> bool {
    match find_step(step_key, procurement_type) {
        Some(step) => dependencies_met(milestones, step),
        None => true,
    }
}

/// Negation of [`validate_process_step`], for disabling inputs.
pub fn is_step_disabled(
    milestones: &Milestones,
    step_key: &str,
    procurement_type: ProcurementType,
) -> bool {
    !validate_process_step(milestones, step_key, procurement_type)
}

/// Dependencies of `step_key` that are not completed yet, in declaration
/// order. Empty for unknown keys.
pub fn missing_dependencies(
    milestones: &Milestones,
    step_key: &str,
    procurement_type: ProcurementType,
) -> Vec<&'static str> {
    find_step(step_key, procurement_type)
        .map(|step| {
            step.dependencies
                .iter()
                .copied()
                .filter(|dep| !milestones.is_set(dep))
                .collect()
        })
        .unwrap_or_default()
}

/// Percentage of workflow steps with a date recorded, rounded half up.
///
/// Counts raw presence: a date set out of order still counts.
pub fn completion_percentage(milestones: &Milestones, procurement_type: ProcurementType) -> u8 {
    let steps = process_steps(procurement_type);
    let total = steps.len() as u32;
    if total == 0 {
        return 0;
    }
    let done = steps.iter().filter(|step| milestones.is_set(step.key)).count() as u32;

    ((200 * done + total) / (2 * total)) as u8
}

/// First step that is not completed and whose dependencies are all
/// completed.
///
/// Returns `None` when every step is done, and also when the remaining steps
/// are blocked because a later date was written out of order.
pub fn next_required_step(
    milestones: &Milestones,
    procurement_type: ProcurementType,
) -> Option<&'static ProcessStep> {
    process_steps(procurement_type)
        .iter()
        .find(|step| !milestones.is_set(step.key) && dependencies_met(milestones, step))
}

/// State of `step` for a record with `milestones`.
pub fn step_state(milestones: &Milestones, step: &ProcessStep) -> StepState {
    if milestones.is_set(step.key) {
        StepState::Completed
    } else if dependencies_met(milestones, step) {
        StepState::Available
    } else {
        StepState::Locked
    }
}

/// Keys of every step in `steps` that depends on `step_key`, directly or
/// through other steps, in sequence order.
pub fn downstream_of(step_key: &str, steps: &[ProcessStep]) -> Vec<&'static str> {
    let mut affected: BTreeSet<&str> = BTreeSet::new();
    affected.insert(step_key);

    // Repeat until no new dependents turn up, so non-linear dependency sets
    // are handled as well as chains.
    loop {
        let before = affected.len();
        for step in steps {
            if step.dependencies.iter().any(|dep| affected.contains(dep)) {
                affected.insert(step.key);
            }
        }
        if affected.len() == before {
            break;
        }
    }

    steps
        .iter()
        .filter(|step| step.key != step_key && affected.contains(step.key))
        .map(|step| step.key)
        .collect()
}

/// Copy of `milestones` with every step downstream of `step_key` cleared.
///
/// `step_key` itself is left alone; the caller clears it.
pub fn clear_downstream_of(
    milestones: &Milestones,
    step_key: &str,
    steps: &[ProcessStep],
) -> Milestones {
    let mut cleared = milestones.clone();
    for key in downstream_of(step_key, steps) {
        cleared.clear(key);
    }
    cleared
}
