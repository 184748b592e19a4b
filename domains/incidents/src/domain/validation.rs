//! Validation gate for rendering
//!
//! A [`ValidationGap`] names the first missing requirement. Its `Display`
//! output is the placeholder shown instead of a rendered email.

use thiserror::Error;

use crate::domain::entities::{FormSnapshot, ResolvedEnvironment, OTHER};

/// Marker that makes the percentage field relevant
pub const DECREASE_IN_BETS: &str = "decrease in bets";

/// First missing requirement blocking a render
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationGap {
    #[error("Select an environment")]
    MissingEnvironment,

    #[error("Fill in custom environment")]
    MissingCustomEnvironment,

    #[error("Please select NGL site")]
    MissingNglSite,

    #[error("Unknown NGL site '{0}'")]
    UnknownNglSite(String),

    #[error("Fill in ticket number")]
    MissingTicketNumber,

    #[error("Fill in report name")]
    MissingReportName,

    #[error("Fill in custom report name")]
    MissingCustomReportName,

    #[error("Fill in report date")]
    MissingReportDate,

    #[error("Report date '{0}' is not a valid date")]
    InvalidReportDate(String),

    #[error("Fill in issue description")]
    MissingIssueDescription,

    #[error("Fill in custom issue description")]
    MissingCustomIssue,

    #[error("Please enter percentage for decrease")]
    MissingPercentage,

    #[error("Fill in custom root cause")]
    MissingCustomRootCause,

    #[error("{field} '{value}' is not a valid date and time")]
    InvalidTimestamp { field: String, value: String },
}

/// Case-insensitive "decrease in bets" detection on issue text
pub fn has_decrease_in_bets(issue_text: &str) -> bool {
    issue_text.to_lowercase().contains(DECREASE_IN_BETS)
}

/// Fields every template needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonFields {
    pub environment: ResolvedEnvironment,
    /// `{label}-{ticket}`
    pub ticket_label: String,
}

/// Validated report template inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFields {
    pub report_name: String,
    /// Raw `YYYY-MM-DD` date
    pub report_date: String,
}

/// Validated system template inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemFields {
    /// Issue text without percentage
    pub issue: String,
    /// Present only when the issue mentions a decrease in bets
    pub percentage: Option<String>,
    /// `None` when no root cause is known yet
    pub root_cause: Option<String>,
}

/// Step 1: environment resolved and ticket number present
pub fn validate_common(snapshot: &FormSnapshot) -> Result<CommonFields, ValidationGap> {
    let environment = snapshot.resolve_environment()?;

    let ticket = snapshot.ticket();
    if ticket.is_empty() {
        return Err(ValidationGap::MissingTicketNumber);
    }

    Ok(CommonFields {
        ticket_label: format!("{}-{}", environment.label, ticket),
        environment,
    })
}

/// Step 2 for reports: report name and date
pub fn validate_report(snapshot: &FormSnapshot) -> Result<ReportFields, ValidationGap> {
    if snapshot.report_name.trim().is_empty() {
        return Err(ValidationGap::MissingReportName);
    }

    let report_name = snapshot.report_name_text();
    if report_name.is_empty() {
        return Err(ValidationGap::MissingCustomReportName);
    }

    let report_date = snapshot.report_date.trim();
    if report_date.is_empty() {
        return Err(ValidationGap::MissingReportDate);
    }

    Ok(ReportFields {
        report_name: report_name.to_string(),
        report_date: report_date.to_string(),
    })
}

/// Step 2 for system issues: issue text, percentage when relevant, root cause
pub fn validate_system(snapshot: &FormSnapshot) -> Result<SystemFields, ValidationGap> {
    if snapshot.issue_description.trim().is_empty() {
        return Err(ValidationGap::MissingIssueDescription);
    }

    let issue = snapshot.issue_text();
    if issue.is_empty() {
        return Err(ValidationGap::MissingCustomIssue);
    }

    let percentage = if has_decrease_in_bets(issue) {
        let percentage = snapshot.percentage.trim();
        if percentage.is_empty() {
            return Err(ValidationGap::MissingPercentage);
        }
        Some(percentage.to_string())
    } else {
        None
    };

    let root_cause = snapshot.root_cause_text();
    if snapshot.root_cause.trim() == OTHER && root_cause.is_empty() {
        return Err(ValidationGap::MissingCustomRootCause);
    }

    Ok(SystemFields {
        issue: issue.to_string(),
        percentage,
        root_cause: Some(root_cause)
            .filter(|cause| !cause.is_empty())
            .map(str::to_string),
    })
}
