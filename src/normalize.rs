// src/normalize.rs
// Export-time shaping of activity rows: drop noise, split comments by visibility.

use crate::specs::ActivityRecord;

/// Administrative / metadata churn. Never exported.
pub const FILTERED_ACTIONS: [&str; 13] = [
    "ActivitiesReportRetestApproved",
    "ActivitiesUserCompletedRetest",
    "ActivitiesBugRetesting",
    "ActivitiesBountyAwarded",
    "ActivitiesReportOrganizationInboxesUpdated",
    "ActivitiesReportVulnerabilityTypesUpdated",
    "ActivitiesReportSeverityUpdated",
    "ActivitiesReportCollaboratorJoined",
    "ActivitiesReportCollaboratorInvited",
    "ActivitiesChangedScope",
    "ActivitiesNmiReminderComment",
    "ActivitiesReportTitleUpdated",
    "ActivitiesReportVulnerabilityInformationUpdated",
];

pub const COMMENT: &str = "ActivitiesComment";
pub const COMMENT_INTERNAL: &str = "ActivitiesCommentInternal";
pub const COMMENT_EXTERNAL: &str = "ActivitiesCommentExternal";

pub fn is_filtered(action_type: &str) -> bool {
    FILTERED_ACTIONS.contains(&action_type)
}

/// Label for a generic comment given its `internal` flag. An absent flag keeps
/// the generic label.
fn comment_label(internal: Option<bool>) -> &'static str {
    match internal {
        Some(true) => COMMENT_INTERNAL,
        Some(false) => COMMENT_EXTERNAL,
        None => COMMENT,
    }
}

/// Filter then relabel, keeping relative order. Pure.
pub fn normalize(records: Vec<ActivityRecord>) -> Vec<ActivityRecord> {
    records
        .into_iter()
        .filter(|r| !is_filtered(&r.action_type))
        .map(|mut r| {
            if r.action_type == COMMENT {
                r.action_type = comment_label(r.internal).to_string();
            }
            r
        })
        .collect()
}
