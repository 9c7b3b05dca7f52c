//! Fixed monitoring step sequences for each procurement workflow.

use serde::Serialize;

/// A monitoring checkpoint of a procurement workflow.
///
/// `key` doubles as the name of the date field stored on a record.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ProcessStep {
    pub key: &'static str,
    pub label: &'static str,
    /// Keys of the steps that must be completed first
    pub dependencies: &'static [&'static str],
}

const fn step(
    key: &'static str,
    label: &'static str,
    dependencies: &'static [&'static str],
) -> ProcessStep {
    ProcessStep {
        key,
        label,
        dependencies,
    }
}

pub const RECEIVED_PR: &str = "receivedPrDate";
pub const PR_DELIBERATED: &str = "prDeliberatedDate";
pub const PRE_PROC_CONFERENCE: &str = "preProcConferenceDate";
pub const PUBLISHED: &str = "publishedDate";
pub const RFQ_OPENING: &str = "rfqOpeningDate";
pub const PRE_BID_CONFERENCE: &str = "preBidConferenceDate";
pub const BID_OPENING: &str = "bidOpeningDate";
pub const BID_EVALUATION: &str = "bidEvaluationDate";
pub const POST_QUALIFICATION: &str = "postQualificationDate";
pub const BAC_RESOLUTION: &str = "bacResolutionDate";
pub const NOTICE_OF_AWARD: &str = "noticeOfAwardDate";
pub const CONTRACT_SIGNING: &str = "contractSigningDate";
pub const NOTICE_TO_PROCEED: &str = "noticeToProceedDate";
pub const FORWARDED_GSD: &str = "forwardedGsdDate";

/// Small Value Procurement: 7 steps, each depending on the one before.
pub static SVP_STEPS: [ProcessStep; 7] = [
    step(RECEIVED_PR, "Received PR for Action", &[]),
    step(PR_DELIBERATED, "PR Deliberated", &[RECEIVED_PR]),
    step(PUBLISHED, "Published (PhilGEPS)", &[PR_DELIBERATED]),
    step(RFQ_OPENING, "RFQ Opening / Canvass", &[PUBLISHED]),
    step(BAC_RESOLUTION, "BAC Resolution", &[RFQ_OPENING]),
    step(NOTICE_OF_AWARD, "Notice of Award", &[BAC_RESOLUTION]),
    step(FORWARDED_GSD, "Forwarded to GSD", &[NOTICE_OF_AWARD]),
];

/// Regular Bidding: 13 steps, each depending on the one before.
pub static REGULAR_BIDDING_STEPS: [ProcessStep; 13] = [
    step(RECEIVED_PR, "Received PR for Action", &[]),
    step(PR_DELIBERATED, "PR Deliberated", &[RECEIVED_PR]),
    step(PRE_PROC_CONFERENCE, "Pre-Procurement Conference", &[PR_DELIBERATED]),
    step(PUBLISHED, "Published (PhilGEPS)", &[PRE_PROC_CONFERENCE]),
    step(PRE_BID_CONFERENCE, "Pre-Bid Conference", &[PUBLISHED]),
    step(BID_OPENING, "Bid Opening", &[PRE_BID_CONFERENCE]),
    step(BID_EVALUATION, "Bid Evaluation", &[BID_OPENING]),
    step(POST_QUALIFICATION, "Post-Qualification", &[BID_EVALUATION]),
    step(BAC_RESOLUTION, "BAC Resolution", &[POST_QUALIFICATION]),
    step(NOTICE_OF_AWARD, "Notice of Award", &[BAC_RESOLUTION]),
    step(CONTRACT_SIGNING, "Contract Signing", &[NOTICE_OF_AWARD]),
    step(NOTICE_TO_PROCEED, "Notice to Proceed", &[CONTRACT_SIGNING]),
    step(FORWARDED_GSD, "Forwarded to GSD", &[NOTICE_TO_PROCEED]),
];

/// Whether `key` names a step of any workflow.
pub fn is_known_step(key: &str) -> bool {
    SVP_STEPS
        .iter()
        .chain(REGULAR_BIDDING_STEPS.iter())
        .any(|step| step.key == key)
}
