//! Email composition
//!
//! `compose` runs the validation gate and renders the template record for the
//! snapshot's (kind, phase) cell. `derive_state` pairs that with the field
//! flags; it is the single entry point an adapter calls on every change.

use critnotify_common::{Config, Error};
use critnotify_email::content::{self, REPORT_ROOT_CAUSE, UNDER_INVESTIGATION};
use critnotify_email::{EmailPhase, Headline, RenderedEmail, TemplateFields, TemplateKind, TemplateRecord};
use critnotify_time::{format_calendar_date, parse_zone, TimestampFormatter, TimezoneResolver};

use crate::domain::entities::FormSnapshot;
use crate::domain::state::{derive_flags, FieldFlags};
use crate::domain::validation::{
    validate_common, validate_report, validate_system, CommonFields, ValidationGap,
};

/// Everything a render pass needs besides the snapshot
#[derive(Debug, Clone)]
pub struct RenderContext {
    formatter: TimestampFormatter,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(TimestampFormatter::new(
            TimezoneResolver::new(),
            chrono_tz::Asia::Jerusalem,
        ))
    }
}

impl RenderContext {
    pub fn new(formatter: TimestampFormatter) -> Self {
        Self { formatter }
    }

    /// Build the context from application configuration
    pub fn from_config(config: &Config) -> critnotify_common::Result<Self> {
        let input_zone = parse_zone(&config.input_timezone)
            .map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(Self::new(TimestampFormatter::new(
            TimezoneResolver::new(),
            input_zone,
        )))
    }

    pub fn formatter(&self) -> &TimestampFormatter {
        &self.formatter
    }
}

/// Result of one full re-derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedState {
    pub flags: FieldFlags,
    pub email: Result<RenderedEmail, ValidationGap>,
}

impl DerivedState {
    /// Placeholder text when rendering is blocked
    pub fn placeholder(&self) -> Option<String> {
        self.email.as_ref().err().map(ToString::to_string)
    }
}

/// Derive flags and the rendered email (or gap) from a snapshot
pub fn derive_state(snapshot: &FormSnapshot, context: &RenderContext) -> DerivedState {
    let flags = derive_flags(snapshot);
    let email = compose(snapshot, context);

    if let Err(gap) = &email {
        tracing::debug!(gap = %gap, "Render blocked by validation gap");
    }

    DerivedState { flags, email }
}

/// Validate the snapshot and render the email for its (kind, phase) cell
pub fn compose(
    snapshot: &FormSnapshot,
    context: &RenderContext,
) -> Result<RenderedEmail, ValidationGap> {
    let common = validate_common(snapshot)?;

    let fields = match snapshot.template_kind {
        TemplateKind::Report => report_fields(snapshot)?,
        TemplateKind::System => system_fields(snapshot, &common, context)?,
    };

    let record = TemplateRecord::lookup(snapshot.template_kind, snapshot.email_phase);
    Ok(RenderedEmail::render(record, &common.ticket_label, &fields))
}

fn report_fields(snapshot: &FormSnapshot) -> Result<TemplateFields, ValidationGap> {
    let report = validate_report(snapshot)?;
    let report_date = format_calendar_date(&report.report_date)
        .map_err(|_| ValidationGap::InvalidReportDate(report.report_date.clone()))?;

    Ok(TemplateFields {
        impact: content::report_delay_sentence(&report.report_name, &report_date),
        headline: Headline::ReportDelay {
            report_name: report.report_name,
            report_date,
        },
        root_cause: REPORT_ROOT_CAUSE.to_string(),
        start_time: None,
        end_time: None,
    })
}

fn system_fields(
    snapshot: &FormSnapshot,
    common: &CommonFields,
    context: &RenderContext,
) -> Result<TemplateFields, ValidationGap> {
    let system = validate_system(snapshot)?;
    let zone_code = &common.environment.timezone_code;

    let start_time = format_time(context, "Start time", &snapshot.start_time, zone_code)?;
    // End time only exists for resolved emails
    let end_time = match snapshot.email_phase {
        EmailPhase::Resolved => format_time(context, "End time", &snapshot.end_time, zone_code)?,
        EmailPhase::Opening => None,
    };

    Ok(TemplateFields {
        impact: content::impact_with_percentage(&system.issue, system.percentage.as_deref()),
        headline: Headline::Issue(system.issue),
        root_cause: system
            .root_cause
            .unwrap_or_else(|| UNDER_INVESTIGATION.to_string()),
        start_time,
        end_time,
    })
}

fn format_time(
    context: &RenderContext,
    label: &str,
    raw: &str,
    zone_code: &str,
) -> Result<Option<String>, ValidationGap> {
    let formatted = context
        .formatter
        .format_timestamp(raw, zone_code)
        .map_err(|_| ValidationGap::InvalidTimestamp {
            field: label.to_string(),
            value: raw.trim().to_string(),
        })?;

    Ok(Some(formatted).filter(|time| !time.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::OTHER;

    fn utc_context() -> RenderContext {
        RenderContext::new(TimestampFormatter::new(
            TimezoneResolver::new(),
            chrono_tz::UTC,
        ))
    }

    fn report_snapshot() -> FormSnapshot {
        FormSnapshot {
            environment: "NCEL".to_string(),
            ticket_number: "335674".to_string(),
            template_kind: TemplateKind::Report,
            email_phase: EmailPhase::Opening,
            report_name: "DailySales".to_string(),
            report_date: "2025-10-02".to_string(),
            ..Default::default()
        }
    }

    fn system_snapshot() -> FormSnapshot {
        FormSnapshot {
            environment: "Sazka".to_string(),
            ticket_number: "1001".to_string(),
            template_kind: TemplateKind::System,
            email_phase: EmailPhase::Resolved,
            issue_description: "Decrease in bets".to_string(),
            percentage: "15".to_string(),
            start_time: "2025-03-01T10:00".to_string(),
            end_time: "2025-03-01T12:00".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_report_opening_subject() {
        let email = compose(&report_snapshot(), &utc_context()).unwrap();
        assert_eq!(
            email.subject,
            "NCEL-335674 - Critical Notification - The report DailySales for October 2nd is being delayed"
        );
        assert!(email
            .body_html
            .contains("<u>Root cause:</u> Under Aristocrat BI team investigation.</p>"));
    }

    #[test]
    fn test_report_resolved_body() {
        let snapshot = FormSnapshot {
            email_phase: EmailPhase::Resolved,
            ..report_snapshot()
        };
        let email = compose(&snapshot, &utc_context()).unwrap();
        assert!(email.body_html.contains("<b>The issue has been resolved.</b>"));
        assert!(email.body_html.contains("More details will be provided in the incident report."));
    }

    #[test]
    fn test_invalid_report_date_is_a_gap() {
        let snapshot = FormSnapshot {
            report_date: "02/10/2025".to_string(),
            ..report_snapshot()
        };
        assert_eq!(
            compose(&snapshot, &utc_context()),
            Err(ValidationGap::InvalidReportDate("02/10/2025".to_string()))
        );
    }

    #[test]
    fn test_system_resolved_percentage_only_on_impact() {
        let email = compose(&system_snapshot(), &utc_context()).unwrap();

        assert_eq!(
            email.subject,
            "Sazka-1001 - Critical Notification - Decrease in bets"
        );
        assert!(email
            .body_html
            .contains("<u>Impact description:</u> Decrease in bets (~15%).</p>"));
        assert!(email.body_html.contains("detected: <b>Decrease in bets</b>.</p>"));
        assert_eq!(email.body_html.matches("(~15%)").count(), 1);
        assert!(email
            .body_html
            .contains("<u>Start time:</u> 01/03/2025 11:00(GMT +1).</p>"));
        assert!(email
            .body_html
            .contains("<u>End time:</u> 01/03/2025 13:00(GMT +1).</p>"));
        assert!(email
            .body_html
            .contains("<u>Root cause:</u> Under investigation.</p>"));
    }

    #[test]
    fn test_custom_issue_gets_percentage_too() {
        let snapshot = FormSnapshot {
            issue_description: OTHER.to_string(),
            custom_issue: "Severe decrease in bets on Keno".to_string(),
            percentage: "30".to_string(),
            email_phase: EmailPhase::Opening,
            ..system_snapshot()
        };
        let email = compose(&snapshot, &utc_context()).unwrap();

        assert_eq!(
            email.subject,
            "Sazka-1001 - Critical Notification - Severe decrease in bets on Keno"
        );
        assert!(email
            .body_text
            .contains("Impact description: Severe decrease in bets on Keno (~30%)."));
        assert!(email
            .body_text
            .contains("The issue started on 01/03/2025 11:00(GMT +1) and is currently ongoing."));
    }

    #[test]
    fn test_opening_ignores_end_time() {
        let snapshot = FormSnapshot {
            email_phase: EmailPhase::Opening,
            end_time: "not a time".to_string(),
            ..system_snapshot()
        };
        let email = compose(&snapshot, &utc_context()).unwrap();
        assert!(!email.body_html.contains("End time"));
    }

    #[test]
    fn test_invalid_start_time_is_a_gap() {
        let snapshot = FormSnapshot {
            start_time: "lunchtime".to_string(),
            ..system_snapshot()
        };
        assert_eq!(
            compose(&snapshot, &utc_context()),
            Err(ValidationGap::InvalidTimestamp {
                field: "Start time".to_string(),
                value: "lunchtime".to_string(),
            })
        );
    }

    #[test]
    fn test_padded_sentinel_defers_to_custom_text() {
        let snapshot = FormSnapshot {
            issue_description: " other ".to_string(),
            custom_issue: String::new(),
            ..system_snapshot()
        };
        assert_eq!(
            compose(&snapshot, &utc_context()),
            Err(ValidationGap::MissingCustomIssue)
        );

        let snapshot = FormSnapshot {
            custom_issue: "Payment outage".to_string(),
            ..snapshot
        };
        let email = compose(&snapshot, &utc_context()).unwrap();
        assert_eq!(
            email.subject,
            "Sazka-1001 - Critical Notification - Payment outage"
        );
        assert_eq!(
            derive_flags(&snapshot).custom_issue,
            crate::domain::state::FieldState::REQUIRED
        );
    }

    #[test]
    fn test_custom_root_cause_used() {
        let snapshot = FormSnapshot {
            root_cause: OTHER.to_string(),
            custom_root_cause: "Database failover".to_string(),
            ..system_snapshot()
        };
        let email = compose(&snapshot, &utc_context()).unwrap();
        assert!(email
            .body_html
            .contains("<u>Root cause:</u> Database failover.</p>"));
    }

    #[test]
    fn test_blank_ticket_yields_gap_not_email() {
        let snapshot = FormSnapshot {
            ticket_number: String::new(),
            ..report_snapshot()
        };
        let state = derive_state(&snapshot, &utc_context());
        assert_eq!(state.email, Err(ValidationGap::MissingTicketNumber));
        assert_eq!(state.placeholder().as_deref(), Some("Fill in ticket number"));
    }

    #[test]
    fn test_unknown_environment_renders_with_default_zone() {
        let snapshot = FormSnapshot {
            environment: OTHER.to_string(),
            custom_environment: "lotto".to_string(),
            ..system_snapshot()
        };
        let email = compose(&snapshot, &utc_context()).unwrap();
        assert!(email.subject.starts_with("LOTTO-1001 - "));
        assert!(email
            .body_html
            .contains("<u>Start time:</u> 01/03/2025 12:00(GMT +2).</p>"));
    }

    #[test]
    fn test_from_config_rejects_unknown_zone() {
        let config = Config {
            input_timezone: "Atlantis/Capital".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            RenderContext::from_config(&config),
            Err(Error::Configuration(_))
        ));

        let context = RenderContext::from_config(&Config::default()).unwrap();
        assert_eq!(context.formatter().input_zone(), chrono_tz::Asia::Jerusalem);
    }

    #[test_log::test]
    fn test_derive_state_is_idempotent() {
        let context = utc_context();
        let snapshot = system_snapshot();
        assert_eq!(
            derive_state(&snapshot, &context),
            derive_state(&snapshot, &context)
        );
    }
}
