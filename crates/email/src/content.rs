//! Shared email content
//!
//! Canonical phrases and subject-line builders used by every template record.

pub const DETECTION_LEAD: &str = "This is to inform you that our monitoring systems have detected: ";
pub const RESOLVED_NOTICE: &str = "The issue has been resolved.";
pub const FURTHER_UPDATES: &str = "Further updates will be provided once available.";
pub const INCIDENT_REPORT_FOLLOWUP: &str = "More details will be provided in the incident report.";
pub const REPORT_ROOT_CAUSE: &str = "Under Aristocrat BI team investigation";
pub const UNDER_INVESTIGATION: &str = "Under investigation";
pub const REGARDS: &str = "Regards,";

pub const IMPACT_LABEL: &str = "Impact description:";
pub const ROOT_CAUSE_LABEL: &str = "Root cause:";
pub const START_TIME_LABEL: &str = "Start time:";
pub const END_TIME_LABEL: &str = "End time:";

/// Subject for a delayed report
pub fn report_subject(ticket: &str, report_name: &str, report_date: &str) -> String {
    format!(
        "{} - Critical Notification - The report {} for {} is being delayed",
        ticket, report_name, report_date
    )
}

/// Subject for a system issue; never carries the percentage suffix
pub fn system_subject(ticket: &str, issue: &str) -> String {
    format!("{} - Critical Notification - {}", ticket, issue)
}

/// "The report X for D is being delayed"
pub fn report_delay_sentence(report_name: &str, report_date: &str) -> String {
    format!("The report {} for {} is being delayed", report_name, report_date)
}

/// Issue text for the impact line, with "(~N%)" appended when a percentage applies
pub fn impact_with_percentage(issue: &str, percentage: Option<&str>) -> String {
    match percentage.map(str::trim).filter(|p| !p.is_empty()) {
        Some(percentage) => format!("{} (~{}%)", issue, percentage),
        None => issue.to_string(),
    }
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
