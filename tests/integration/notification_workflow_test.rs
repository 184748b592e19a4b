//! End-to-end notification workflow through the public domain API
//!
//! Covers rendering of every template cell, the field state machine driven
//! through a `FormSession`, and the timestamp/date formatting rules.

mod common;

use anyhow::Result;
use critnotify_incidents::{
    compose, derive_state, EmailPhase, Field, FieldChange, FieldState, FormSnapshot,
    TemplateKind, ValidationGap, OTHER,
};
use critnotify_time::{format_calendar_date, TimestampFormatter, TimezoneResolver, DEFAULT_PROFILE};

use common::{ncel_report, sazka_resolved, session, utc_context};

#[test]
fn test_ncel_report_subject() -> Result<()> {
    let email = compose(&ncel_report(), &utc_context())?;

    assert_eq!(
        email.subject,
        "NCEL-335674 - Critical Notification - The report DailySales for October 2nd is being delayed"
    );
    Ok(())
}

#[test]
fn test_sazka_percentage_on_impact_line_only() -> Result<()> {
    let email = compose(&sazka_resolved(), &utc_context())?;

    assert_eq!(
        email.subject,
        "Sazka-1001 - Critical Notification - Decrease in bets"
    );
    assert!(email.body_text.contains("Impact description: Decrease in bets (~15%)."));
    assert!(email
        .body_text
        .contains("have detected: Decrease in bets.\n"));
    assert!(email.body_text.contains("Start time: 01/03/2025 11:00(GMT +1)."));
    assert!(email.body_text.contains("End time: 01/03/2025 13:00(GMT +1)."));
    Ok(())
}

#[test]
fn test_custom_issue_percentage_detection_is_case_insensitive() -> Result<()> {
    let snapshot = FormSnapshot {
        issue_description: OTHER.to_string(),
        custom_issue: "Unexpected DECREASE IN BETS on Keno".to_string(),
        percentage: "40".to_string(),
        ..sazka_resolved()
    };

    let email = compose(&snapshot, &utc_context())?;

    assert!(email.subject.ends_with("- Unexpected DECREASE IN BETS on Keno"));
    assert!(email
        .body_text
        .contains("Impact description: Unexpected DECREASE IN BETS on Keno (~40%)."));
    Ok(())
}

#[test]
fn test_blank_ticket_yields_gap() {
    let snapshot = FormSnapshot {
        ticket_number: "  ".to_string(),
        ..ncel_report()
    };

    let state = derive_state(&snapshot, &utc_context());

    assert_eq!(state.email, Err(ValidationGap::MissingTicketNumber));
    assert_eq!(state.placeholder().as_deref(), Some("Fill in ticket number"));
}

#[test]
fn test_unknown_environment_resolves_to_default_profile() {
    let resolver = TimezoneResolver::new();
    assert!(!resolver.is_known("ZZTOP"));
    assert_eq!(resolver.resolve("ZZTOP"), DEFAULT_PROFILE);

    let formatter = TimestampFormatter::new(resolver, chrono_tz::UTC);
    assert_eq!(
        formatter.format_timestamp("2025-07-01T09:30", "ZZTOP").unwrap(),
        "01/07/2025 12:30(GMT +3)"
    );
}

#[test]
fn test_timestamp_formatting_is_idempotent_and_blank_is_empty() {
    let formatter = TimestampFormatter::new(TimezoneResolver::new(), chrono_tz::UTC);

    let first = formatter.format_timestamp("2025-01-15T18:05", "NCEL").unwrap();
    let second = formatter.format_timestamp("2025-01-15T18:05", "NCEL").unwrap();

    assert_eq!(first, "01/15/2025 01:05 PM(GMT -5)");
    assert_eq!(first, second);
    assert_eq!(formatter.format_timestamp("", "NCEL").unwrap(), "");
}

#[test]
fn test_ordinal_suffixes() {
    let cases = [
        ("2025-01-01", "January 1st"),
        ("2025-01-02", "January 2nd"),
        ("2025-01-03", "January 3rd"),
        ("2025-01-04", "January 4th"),
        ("2025-01-11", "January 11th"),
        ("2025-01-21", "January 21st"),
        ("2025-01-22", "January 22nd"),
        ("2025-01-23", "January 23rd"),
        ("2025-01-31", "January 31st"),
    ];

    for (input, expected) in cases {
        assert_eq!(format_calendar_date(input).unwrap(), expected, "{}", input);
    }
}

#[test]
fn test_phase_toggle_drives_end_time() {
    let mut session = session(FormSnapshot {
        email_phase: EmailPhase::Opening,
        end_time: String::new(),
        ..sazka_resolved()
    });
    assert_eq!(session.current().flags.end_time, FieldState::HIDDEN);

    let state = session
        .apply(FieldChange::new(Field::EmailPhase, "resolved"))
        .unwrap();
    assert_eq!(state.flags.end_time, FieldState::REQUIRED);

    session
        .apply(FieldChange::new(Field::EndTime, "2025-03-01T12:00"))
        .unwrap();

    let state = session
        .apply(FieldChange::new(Field::EmailPhase, "opening"))
        .unwrap();
    assert_eq!(state.flags.end_time, FieldState::HIDDEN);
    assert_eq!(session.snapshot().end_time, "");

    // Back to resolved: the old value is gone for good
    session
        .apply(FieldChange::new(Field::EmailPhase, "resolved"))
        .unwrap();
    assert_eq!(session.snapshot().end_time, "");
}

#[test_log::test]
fn test_session_walks_report_to_system() {
    let mut session = session(FormSnapshot::default());
    assert_eq!(
        session.current().email,
        Err(ValidationGap::MissingEnvironment)
    );

    let events = [
        "environment=NGL",
        "ngl_site=UNL",
        "ticket_number=77",
        "report_name=other",
        "custom_report_name=Liability",
        "report_date=2025-12-23",
    ];
    let mut last = None;
    for event in events {
        let change: FieldChange = event.parse().unwrap();
        last = Some(session.apply(change).unwrap());
    }

    let email = last.unwrap().email.unwrap();
    assert_eq!(
        email.subject,
        "UNL-77 - Critical Notification - The report Liability for December 23rd is being delayed"
    );

    let state = session
        .apply(FieldChange::new(Field::TemplateKind, TemplateKind::System.to_string()))
        .unwrap();
    assert_eq!(state.flags.report_fields, FieldState::HIDDEN);
    assert_eq!(state.flags.system_fields, FieldState::OPTIONAL);
    assert_eq!(state.email, Err(ValidationGap::MissingIssueDescription));
}

#[test]
fn test_body_escapes_user_text() -> Result<()> {
    let snapshot = FormSnapshot {
        issue_description: OTHER.to_string(),
        custom_issue: "Odds <script> & friends".to_string(),
        ..sazka_resolved()
    };

    let email = compose(&snapshot, &utc_context())?;

    assert!(email.body_html.contains("<b>Odds &lt;script&gt; &amp; friends</b>"));
    assert!(email.subject.ends_with("Odds <script> & friends"));
    Ok(())
}

#[test]
fn test_padded_sentinel_from_session_line() {
    let mut session = session(sazka_resolved());

    let change: FieldChange = "issue_description= other ".parse().unwrap();
    let state = session.apply(change).unwrap();
    assert_eq!(state.flags.custom_issue, FieldState::REQUIRED);
    assert_eq!(state.email, Err(ValidationGap::MissingCustomIssue));

    let state = session
        .apply(FieldChange::new(Field::CustomIssue, "Payment outage"))
        .unwrap();
    assert_eq!(
        state.email.unwrap().subject,
        "Sazka-1001 - Critical Notification - Payment outage"
    );
}
