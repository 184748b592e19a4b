//! Critnotify Clipboard Publisher
//!
//! Places a rendered notification body on the clipboard with support for:
//! - The system clipboard (rich HTML with a plain-text alternative)
//! - A mock publisher for tests and headless environments
//! - An explicit fallback chain that reports which path succeeded

use std::time::Duration;

use critnotify_email::RenderedEmail;
use serde::Serialize;
use thiserror::Error;

pub mod mock;
pub mod system;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("Clipboard configuration error: {0}")]
    Configuration(String),

    #[error("Rich HTML clipboard write failed: {0}")]
    RichHtml(String),

    #[error("Plain-text clipboard write failed: {0}")]
    PlainText(String),

    #[error("Could not copy to clipboard. Rich HTML: {html}. Plain text: {text}")]
    Exhausted { html: String, text: String },
}

/// Which clipboard path accepted the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishOutcome {
    RichHtml,
    PlainText,
    /// Clipboard writes are disabled; nothing was copied
    Discarded,
}

impl std::fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RichHtml => write!(f, "rich HTML"),
            Self::PlainText => write!(f, "plain text"),
            Self::Discarded => write!(f, "nothing (clipboard disabled)"),
        }
    }
}

/// Clipboard publisher configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardConfig {
    /// Clipboard provider (system, mock)
    pub provider: String,
    /// Enable clipboard writes (disabled falls back to the mock publisher)
    pub enabled: bool,
    /// Serve the selection before a short-lived process exits (X11/Wayland)
    pub hold: SelectionHold,
}

/// How long a one-shot process keeps serving its clipboard selection.
///
/// On X11 and Wayland the copying process owns the selection, so the
/// content disappears when the process exits unless a clipboard manager
/// took it over. Other platforms ignore this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionHold {
    /// Return right after the write; the handle is kept for later writes
    #[default]
    None,
    /// Block until another application replaces the selection
    UntilReplaced,
    /// Block until replaced or until the duration elapses
    For(Duration),
}

impl SelectionHold {
    /// Parse `CLIPBOARD_HOLD_SECS`: unset or `0` waits until replaced
    pub fn from_secs(raw: Option<&str>) -> Result<Self, PublishError> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(Self::UntilReplaced),
            Some(secs) => match secs.parse::<u64>() {
                Ok(0) => Ok(Self::UntilReplaced),
                Ok(secs) => Ok(Self::For(Duration::from_secs(secs))),
                Err(_) => Err(PublishError::Configuration(format!(
                    "CLIPBOARD_HOLD_SECS must be a whole number of seconds, got '{}'",
                    secs
                ))),
            },
        }
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            provider: "system".to_string(),
            enabled: true,
            hold: SelectionHold::None,
        }
    }
}

impl ClipboardConfig {
    /// Create clipboard config from environment variables.
    ///
    /// The selection is not held; one-shot commands opt in with
    /// [`ClipboardConfig::one_shot`].
    pub fn from_env() -> Result<Self, PublishError> {
        dotenvy::dotenv().ok();

        let provider =
            std::env::var("CLIPBOARD_PROVIDER").unwrap_or_else(|_| "system".to_string());

        let enabled = std::env::var("CLIPBOARD_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        Ok(Self {
            provider,
            enabled,
            hold: SelectionHold::None,
        })
    }

    /// Config for a process that exits right after copying, holding the
    /// selection per `CLIPBOARD_HOLD_SECS`
    pub fn one_shot(self) -> Result<Self, PublishError> {
        let raw = std::env::var("CLIPBOARD_HOLD_SECS").ok();
        Ok(Self {
            hold: SelectionHold::from_secs(raw.as_deref())?,
            ..self
        })
    }
}

/// Clipboard publisher trait for different implementations
#[async_trait::async_trait]
pub trait ClipboardPublisher: Send + Sync {
    /// Write HTML with a plain-text alternative
    async fn write_html(&self, html: &str, alt_text: &str) -> Result<(), PublishError>;

    /// Write plain text only
    async fn write_text(&self, text: &str) -> Result<(), PublishError>;

    /// Name of the backing provider
    fn provider_name(&self) -> &'static str;

    /// Whether writes reach a clipboard at all
    fn accepts_writes(&self) -> bool {
        true
    }

    /// Publish a rendered body: rich HTML first, then plain text.
    ///
    /// Returns the path that succeeded, or [`PublishError::Exhausted`] when
    /// both writes failed.
    async fn publish(&self, email: &RenderedEmail) -> Result<PublishOutcome, PublishError> {
        if !self.accepts_writes() {
            tracing::info!(provider = self.provider_name(), "Clipboard disabled, nothing copied");
            return Ok(PublishOutcome::Discarded);
        }

        let html_error = match self.write_html(&email.body_html, &email.body_text).await {
            Ok(()) => {
                tracing::info!(provider = self.provider_name(), "Copied rich HTML to clipboard");
                return Ok(PublishOutcome::RichHtml);
            }
            Err(e) => e,
        };

        tracing::warn!(
            provider = self.provider_name(),
            error = %html_error,
            "Rich HTML clipboard write failed, falling back to plain text"
        );

        match self.write_text(&email.body_text).await {
            Ok(()) => {
                tracing::info!(provider = self.provider_name(), "Copied plain text to clipboard");
                Ok(PublishOutcome::PlainText)
            }
            Err(text_error) => {
                tracing::error!(
                    provider = self.provider_name(),
                    error = %text_error,
                    "Plain-text clipboard fallback failed"
                );
                Err(PublishError::Exhausted {
                    html: html_error.to_string(),
                    text: text_error.to_string(),
                })
            }
        }
    }
}

/// Clipboard publisher factory
pub struct ClipboardPublisherFactory;

impl ClipboardPublisherFactory {
    /// Create clipboard publisher based on configuration
    pub fn create(config: &ClipboardConfig) -> Result<Box<dyn ClipboardPublisher>, PublishError> {
        if !config.enabled {
            tracing::info!("Clipboard disabled, using mock publisher");
            return Ok(Box::new(mock::MockClipboardPublisher::new_disabled()));
        }

        match config.provider.as_str() {
            "system" => {
                tracing::debug!("Creating system clipboard publisher");
                Ok(Box::new(system::SystemClipboardPublisher::with_hold(
                    config.hold,
                )))
            }
            "mock" => {
                tracing::debug!("Creating mock clipboard publisher");
                Ok(Box::new(mock::MockClipboardPublisher::new()))
            }
            provider => Err(PublishError::Configuration(format!(
                "Unknown clipboard provider: {}. Supported providers: system, mock",
                provider
            ))),
        }
    }
}
