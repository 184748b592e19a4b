//! Domain entities for the incidents domain
//!
//! A [`FormSnapshot`] holds the current value of every form field. It is
//! re-read on every change and never outlives a render pass.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use critnotify_email::{EmailPhase, TemplateKind};

use crate::domain::validation::ValidationGap;

/// Dropdown sentinel meaning "use the paired free-text field"
pub const OTHER: &str = "other";

/// Environment that needs a site selection before it can be resolved
pub const NGL: &str = "NGL";

/// NGL site labelled with its own code in subject lines
pub const UNL_SITE: &str = "UNL";

/// Known NGL sites
pub const NGL_SITES: &[&str] = &[UNL_SITE, "MLT"];

/// Whether `site` is one of [`NGL_SITES`]
pub fn is_ngl_site(site: &str) -> bool {
    NGL_SITES.contains(&site.trim())
}

/// Errors raised when applying a field change
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: Field, reason: String },

    #[error("Malformed field change '{0}', expected field=value")]
    Malformed(String),
}

/// Every named form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Environment,
    CustomEnvironment,
    NglSite,
    TicketNumber,
    TemplateKind,
    EmailPhase,
    ReportName,
    CustomReportName,
    ReportDate,
    IssueDescription,
    CustomIssue,
    Percentage,
    StartTime,
    EndTime,
    RootCause,
    CustomRootCause,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::Environment,
        Field::CustomEnvironment,
        Field::NglSite,
        Field::TicketNumber,
        Field::TemplateKind,
        Field::EmailPhase,
        Field::ReportName,
        Field::CustomReportName,
        Field::ReportDate,
        Field::IssueDescription,
        Field::CustomIssue,
        Field::Percentage,
        Field::StartTime,
        Field::EndTime,
        Field::RootCause,
        Field::CustomRootCause,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Environment => "environment",
            Field::CustomEnvironment => "custom_environment",
            Field::NglSite => "ngl_site",
            Field::TicketNumber => "ticket_number",
            Field::TemplateKind => "template_kind",
            Field::EmailPhase => "email_phase",
            Field::ReportName => "report_name",
            Field::CustomReportName => "custom_report_name",
            Field::ReportDate => "report_date",
            Field::IssueDescription => "issue_description",
            Field::CustomIssue => "custom_issue",
            Field::Percentage => "percentage",
            Field::StartTime => "start_time",
            Field::EndTime => "end_time",
            Field::RootCause => "root_cause",
            Field::CustomRootCause => "custom_root_cause",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| FieldError::UnknownField(name.to_string()))
    }
}

/// Current value of every form field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSnapshot {
    pub environment: String,
    pub custom_environment: String,
    pub ngl_site: String,
    pub ticket_number: String,
    pub template_kind: TemplateKind,
    pub email_phase: EmailPhase,
    pub report_name: String,
    pub custom_report_name: String,
    /// `YYYY-MM-DD`
    pub report_date: String,
    pub issue_description: String,
    pub custom_issue: String,
    pub percentage: String,
    pub start_time: String,
    pub end_time: String,
    pub root_cause: String,
    pub custom_root_cause: String,
}

/// Pick the authoritative value of a dropdown with a paired custom field
pub fn authoritative<'a>(selected: &'a str, custom: &'a str) -> &'a str {
    if selected.trim() == OTHER {
        custom.trim()
    } else {
        selected.trim()
    }
}

/// Environment as used for labelling and timezone lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEnvironment {
    /// Prefix of the ticket label in the subject line
    pub label: String,
    /// Key for the timezone table
    pub timezone_code: String,
}

impl FormSnapshot {
    /// Issue text without any percentage, custom text when "other" is selected
    pub fn issue_text(&self) -> &str {
        authoritative(&self.issue_description, &self.custom_issue)
    }

    pub fn report_name_text(&self) -> &str {
        authoritative(&self.report_name, &self.custom_report_name)
    }

    /// Root cause text; empty means "not yet known"
    pub fn root_cause_text(&self) -> &str {
        authoritative(&self.root_cause, &self.custom_root_cause)
    }

    pub fn ticket(&self) -> &str {
        self.ticket_number.trim()
    }

    /// Resolve the environment selection into a label and timezone code
    pub fn resolve_environment(&self) -> Result<ResolvedEnvironment, ValidationGap> {
        match self.environment.trim() {
            "" => Err(ValidationGap::MissingEnvironment),
            OTHER => {
                let custom = self.custom_environment.trim().to_uppercase();
                if custom.is_empty() {
                    return Err(ValidationGap::MissingCustomEnvironment);
                }
                Ok(ResolvedEnvironment {
                    label: custom.clone(),
                    timezone_code: custom,
                })
            }
            NGL => {
                let site = self.ngl_site.trim();
                if site.is_empty() {
                    return Err(ValidationGap::MissingNglSite);
                }
                if !is_ngl_site(site) {
                    return Err(ValidationGap::UnknownNglSite(site.to_string()));
                }
                let label = if site == UNL_SITE { UNL_SITE } else { NGL };
                Ok(ResolvedEnvironment {
                    label: label.to_string(),
                    timezone_code: site.to_string(),
                })
            }
            code => Ok(ResolvedEnvironment {
                label: code.to_string(),
                timezone_code: code.to_string(),
            }),
        }
    }

    /// Current raw value of a field
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::Environment => self.environment.clone(),
            Field::CustomEnvironment => self.custom_environment.clone(),
            Field::NglSite => self.ngl_site.clone(),
            Field::TicketNumber => self.ticket_number.clone(),
            Field::TemplateKind => self.template_kind.to_string(),
            Field::EmailPhase => self.email_phase.to_string(),
            Field::ReportName => self.report_name.clone(),
            Field::CustomReportName => self.custom_report_name.clone(),
            Field::ReportDate => self.report_date.clone(),
            Field::IssueDescription => self.issue_description.clone(),
            Field::CustomIssue => self.custom_issue.clone(),
            Field::Percentage => self.percentage.clone(),
            Field::StartTime => self.start_time.clone(),
            Field::EndTime => self.end_time.clone(),
            Field::RootCause => self.root_cause.clone(),
            Field::CustomRootCause => self.custom_root_cause.clone(),
        }
    }

    /// Overwrite one field with a raw value
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), FieldError> {
        let value = value.to_string();
        match field {
            Field::Environment => self.environment = value,
            Field::CustomEnvironment => self.custom_environment = value,
            Field::NglSite => {
                if !value.trim().is_empty() && !is_ngl_site(&value) {
                    return Err(FieldError::InvalidValue {
                        field,
                        reason: format!("expected one of {}", NGL_SITES.join(", ")),
                    });
                }
                self.ngl_site = value;
            }
            Field::TicketNumber => self.ticket_number = value,
            Field::TemplateKind => {
                self.template_kind = value.parse().map_err(|e: critnotify_email::EmailError| {
                    FieldError::InvalidValue {
                        field,
                        reason: e.to_string(),
                    }
                })?;
            }
            Field::EmailPhase => {
                self.email_phase = value.parse().map_err(|e: critnotify_email::EmailError| {
                    FieldError::InvalidValue {
                        field,
                        reason: e.to_string(),
                    }
                })?;
            }
            Field::ReportName => self.report_name = value,
            Field::CustomReportName => self.custom_report_name = value,
            Field::ReportDate => self.report_date = value,
            Field::IssueDescription => self.issue_description = value,
            Field::CustomIssue => self.custom_issue = value,
            Field::Percentage => self.percentage = value,
            Field::StartTime => self.start_time = value,
            Field::EndTime => self.end_time = value,
            Field::RootCause => self.root_cause = value,
            Field::CustomRootCause => self.custom_root_cause = value,
        }
        Ok(())
    }
}
