//! Common test utilities and fixtures for integration tests
//!
//! - Render contexts pinned to a known input zone
//! - Snapshot fixtures for each template cell

#![allow(dead_code)]

use std::sync::Once;

use critnotify_incidents::{
    EmailPhase, FormSession, FormSnapshot, RenderContext, TemplateKind,
};
use critnotify_time::{TimestampFormatter, TimezoneResolver};

static INIT: Once = Once::new();

/// Load `.env.test` once so local overrides apply to every test binary
pub fn init_env() {
    INIT.call_once(|| {
        dotenvy::from_filename(".env.test").ok();
    });
}

/// Context that reads naive timestamps as UTC
pub fn utc_context() -> RenderContext {
    init_env();
    RenderContext::new(TimestampFormatter::new(
        TimezoneResolver::new(),
        chrono_tz::UTC,
    ))
}

/// NCEL delayed-report snapshot
pub fn ncel_report() -> FormSnapshot {
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

/// Sazka resolved decrease-in-bets snapshot
pub fn sazka_resolved() -> FormSnapshot {
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

/// Session over a snapshot with the UTC context
pub fn session(snapshot: FormSnapshot) -> FormSession {
    FormSession::new(snapshot, utc_context())
}
