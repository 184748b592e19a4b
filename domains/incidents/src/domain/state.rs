//! Field state machine for the notification form
//!
//! Visibility and required-ness of every conditional field is a pure function
//! of the current snapshot. The same snapshot always yields the same flags,
//! whatever flags were shown before.

use serde::Serialize;

use critnotify_email::{EmailPhase, TemplateKind};

use crate::domain::entities::{FormSnapshot, NGL, OTHER};
use crate::domain::validation::has_decrease_in_bets;

/// Visibility and required-ness of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FieldState {
    pub visible: bool,
    pub required: bool,
}

impl FieldState {
    pub const HIDDEN: FieldState = FieldState {
        visible: false,
        required: false,
    };

    pub const OPTIONAL: FieldState = FieldState {
        visible: true,
        required: false,
    };

    pub const REQUIRED: FieldState = FieldState {
        visible: true,
        required: true,
    };

    /// Shown but optional when `active`, hidden otherwise
    pub fn shown_when(active: bool) -> Self {
        if active {
            Self::OPTIONAL
        } else {
            Self::HIDDEN
        }
    }

    /// Shown and required when `active`, hidden otherwise
    pub fn required_when(active: bool) -> Self {
        if active {
            Self::REQUIRED
        } else {
            Self::HIDDEN
        }
    }
}

/// Flags for every conditional field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldFlags {
    pub custom_environment: FieldState,
    pub ngl_site: FieldState,
    /// Report name/date group
    pub report_fields: FieldState,
    /// Issue/percentage/times/root cause group
    pub system_fields: FieldState,
    pub custom_report_name: FieldState,
    pub custom_issue: FieldState,
    pub percentage: FieldState,
    pub custom_root_cause: FieldState,
    pub end_time: FieldState,
}

/// Derive field flags from the current snapshot
pub fn derive_flags(snapshot: &FormSnapshot) -> FieldFlags {
    let environment = snapshot.environment.trim();
    let is_report = snapshot.template_kind == TemplateKind::Report;

    FieldFlags {
        custom_environment: FieldState::required_when(environment == OTHER),
        ngl_site: FieldState::required_when(environment == NGL),
        report_fields: FieldState::shown_when(is_report),
        system_fields: FieldState::shown_when(!is_report),
        custom_report_name: FieldState::required_when(snapshot.report_name.trim() == OTHER),
        custom_issue: FieldState::required_when(snapshot.issue_description.trim() == OTHER),
        percentage: FieldState::required_when(has_decrease_in_bets(snapshot.issue_text())),
        custom_root_cause: FieldState::required_when(snapshot.root_cause.trim() == OTHER),
        end_time: FieldState::required_when(snapshot.email_phase == EmailPhase::Resolved),
    }
}

/// Clear values whose fields the flags hide.
///
/// Percentage is cleared when the issue no longer mentions a decrease in
/// bets, end time when the phase is opening, and the NGL site when the
/// environment is not NGL. Applying it twice changes nothing further.
pub fn normalize(snapshot: &FormSnapshot) -> FormSnapshot {
    let flags = derive_flags(snapshot);
    let mut normalized = snapshot.clone();

    if !flags.percentage.visible {
        normalized.percentage.clear();
    }
    if !flags.end_time.visible {
        normalized.end_time.clear();
    }
    if !flags.ngl_site.visible {
        normalized.ngl_site.clear();
    }

    normalized
}
