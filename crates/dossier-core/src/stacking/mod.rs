//! Position of archived files within a folder.
//!
//! Two ordering fields live on every record:
//!
//! - `stack_number`, a dense 1..N rank among the folder's archived records,
//!   recomputed for the whole folder whenever membership changes
//!   ([`calculate_stack_numbers`]);
//! - `stack_order_date`, a fractional key written by a single-record
//!   relocation ([`relocation_key`]) so that moving one file never rewrites
//!   its siblings.
//!
//! Dense recompute orders by `stack_number` and falls back to `date_added`;
//! it never reads `stack_order_date`. The record store follows a relocation
//! with [`apply_relocation`], which re-ranks the folder with the moved record
//! at its requested position, so `stack_number` stays the authoritative
//! order and both fields agree once the move is persisted.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::ProcurementRecord;


/// Gap placed before the first or after the last sibling on relocation, in
/// order-key units (milliseconds).
pub const RELOCATION_OFFSET: f64 = 1000.0;

/// New `stack_number` for one record of a folder.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StackAssignment {
    pub record_id: u64,
    /// `None` for borrowed records
    pub stack_number: Option<u32>,
}

/// New `stack_order_date` for a relocated record.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Relocation {
    pub record_id: u64,
    /// Requested rank after clamping into `1..=siblings + 1`
    pub rank: u32,
    pub stack_order_date: f64,
}

/// Stack comparison: by `stack_number` when both records have one, else by
/// `date_added`.
pub fn compare_stack_position(a: &ProcurementRecord, b: &ProcurementRecord) -> Ordering {
    match (a.stack_number, b.stack_number) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.date_added.cmp(&b.date_added),
    }
}

/// Stable insertion sort by [`compare_stack_position`].
///
/// The comparison is not transitive once numbered and unnumbered records
/// mix, which `slice::sort_by` is allowed to panic on.
fn sort_by_stack_position<'a>(
    records: impl IntoIterator<Item = &'a ProcurementRecord>,
) -> Vec<&'a ProcurementRecord> {
    let mut sorted: Vec<&ProcurementRecord> = Vec::new();
    for record in records {
        let at = sorted
            .iter()
            .rposition(|placed| compare_stack_position(placed, record) != Ordering::Greater)
            .map_or(0, |i| i + 1);
        sorted.insert(at, record);
    }
    sorted
}

/// Archived records of `siblings` in stack order.
pub fn archived_in_stack_order(siblings: &[ProcurementRecord]) -> Vec<&ProcurementRecord> {
    sort_by_stack_position(siblings.iter().filter(|r| r.is_archived()))
}

/// Dense stack numbers for every record in `siblings`, which should be all
/// records of one folder.
///
/// Archived records get 1..N in stack order; borrowed records get `None`.
/// Assignments for archived records come first, in rank order.
pub fn calculate_stack_numbers(siblings: &[ProcurementRecord]) -> Vec<StackAssignment> {
    assign_ranks(archived_in_stack_order(siblings), siblings)
}

/// Ranks `ranked` 1..N and clears the stack number of every borrowed record
/// in `siblings`.
fn assign_ranks(
    ranked: Vec<&ProcurementRecord>,
    siblings: &[ProcurementRecord],
) -> Vec<StackAssignment> {
    let numbered = ranked
        .into_iter()
        .zip(1u32..)
        .map(|(record, rank)| StackAssignment {
            record_id: record.id,
            stack_number: Some(rank),
        });

    let cleared = siblings
        .iter()
        .filter(|r| !r.is_archived())
        .map(|record| StackAssignment {
            record_id: record.id,
            stack_number: None,
        });

    numbered.chain(cleared).collect()
}

/// Fractional order key that places `target_id` at 1-based `target_stack`
/// among the other archived records of its folder.
///
/// `records` may span several folders; only the target's folder counts. The
/// rank is clamped into `1..=n + 1` for `n` siblings. Returns `None` when
/// either the target or the rank is missing, which callers treat as a
/// cancelled move.
///
/// Repeated insertions into the same gap halve it each time; nothing
/// rebalances keys once neighbours become indistinguishable.
pub fn relocation_key(
    records: &[ProcurementRecord],
    target_id: u64,
    target_stack: Option<u32>,
) -> Option<Relocation> {
    let target = records.iter().find(|r| r.id == target_id)?;
    let target_stack = target_stack?;

    let siblings = sort_by_stack_position(
        records
            .iter()
            .filter(|r| r.id != target_id && r.folder_id == target.folder_id && r.is_archived()),
    );

    let count = siblings.len() as u32;
    let rank = target_stack.clamp(1, count + 1);

    let key = match (siblings.first(), siblings.last()) {
        (None, _) | (_, None) => target.order_key(),
        (Some(first), _) if rank == 1 => first.order_key() - RELOCATION_OFFSET,
        (_, Some(last)) if rank > count => last.order_key() + RELOCATION_OFFSET,
        _ => {
            let prev = siblings[rank as usize - 2];
            let next = siblings[rank as usize - 1];
            (prev.order_key() + next.order_key()) / 2.0
        }
    };

    Some(Relocation {
        record_id: target_id,
        rank,
        stack_order_date: key,
    })
}

/// Dense stack numbers once `relocation` is applied: the moved record takes
/// `relocation.rank` and the other archived records keep their stack order.
///
/// The store writes these alongside the new order key so that
/// `stack_number` always shows the position the user asked for.
pub fn apply_relocation(
    siblings: &[ProcurementRecord],
    relocation: &Relocation,
) -> Vec<StackAssignment> {
    let mut ranked: Vec<&ProcurementRecord> = archived_in_stack_order(siblings)
        .into_iter()
        .filter(|r| r.id != relocation.record_id)
        .collect();

    let target = siblings
        .iter()
        .find(|r| r.id == relocation.record_id && r.is_archived());
    if let Some(target) = target {
        let at = (relocation.rank.max(1) as usize - 1).min(ranked.len());
        ranked.insert(at, target);
    }

    assign_ranks(ranked, siblings)
}

/// Records of one folder for display: archived ones in stack order, then
/// borrowed ones.
pub fn display_order(siblings: &[ProcurementRecord]) -> Vec<&ProcurementRecord> {
    let mut ordered = archived_in_stack_order(siblings);
    ordered.extend(sort_by_stack_position(
        siblings.iter().filter(|r| !r.is_archived()),
    ));
    ordered
}
