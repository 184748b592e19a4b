//! Critnotify Email Templates
//!
//! Provides the critical notification email variants:
//! - Report delay and system issue templates, each in an opening and a
//!   resolved phase
//! - Data-driven template records rendered by one generic renderer
//! - Subject lines plus HTML and plain-text bodies

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod content;
pub mod templates;

pub use templates::{Headline, LineSpec, TemplateFields, TemplateRecord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("Unknown template kind: {0}. Expected report or system")]
    UnknownTemplateKind(String),

    #[error("Unknown email phase: {0}. Expected opening or resolved")]
    UnknownEmailPhase(String),
}

/// Notification family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// Scheduled report delay
    #[default]
    Report,
    /// Live system issue
    System,
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Report => write!(f, "report"),
            Self::System => write!(f, "system"),
        }
    }
}

impl FromStr for TemplateKind {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "report" => Ok(Self::Report),
            "system" => Ok(Self::System),
            _ => Err(EmailError::UnknownTemplateKind(s.to_string())),
        }
    }
}

/// Which boilerplate variant renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailPhase {
    /// Issue just detected
    #[default]
    Opening,
    /// Issue closed
    Resolved,
}

impl std::fmt::Display for EmailPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opening => write!(f, "opening"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

impl FromStr for EmailPhase {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opening" => Ok(Self::Opening),
            "resolved" => Ok(Self::Resolved),
            _ => Err(EmailError::UnknownEmailPhase(s.to_string())),
        }
    }
}

/// Output of one render pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEmail {
    pub subject: String,
    pub body_html: String,
    pub body_text: String,
}

impl RenderedEmail {
    /// Render a template record into a complete email
    pub fn render(record: &TemplateRecord, ticket: &str, fields: &TemplateFields) -> Self {
        let email = Self {
            subject: fields.headline.subject(ticket),
            body_html: record.render_html(fields),
            body_text: record.render_text(fields),
        };

        tracing::debug!(
            kind = %record.kind,
            phase = %record.phase,
            subject = %email.subject,
            "Rendered notification email"
        );

        email
    }
}
