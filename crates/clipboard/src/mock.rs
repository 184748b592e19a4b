//! Mock Clipboard Publisher Implementation
//!
//! Captures clipboard writes in memory so the publish fallback chain can be
//! exercised without a desktop session. Either write path can be configured
//! to fail.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::{ClipboardPublisher, PublishError};

/// Format of a captured write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturedFormat {
    Html,
    Text,
}

/// Clipboard write captured by the mock publisher
#[derive(Debug, Clone)]
pub struct CapturedWrite {
    pub format: CapturedFormat,
    pub content: String,
    pub alt_text: Option<String>,
    pub captured_at: DateTime<Utc>,
}

/// Mock clipboard publisher for testing
#[derive(Debug, Clone)]
pub struct MockClipboardPublisher {
    writes: Arc<Mutex<Vec<CapturedWrite>>>,
    fail_html: bool,
    fail_text: bool,
    enabled: bool,
}

impl MockClipboardPublisher {
    /// Create a new mock publisher
    pub fn new() -> Self {
        Self {
            writes: Arc::new(Mutex::new(Vec::new())),
            fail_html: false,
            fail_text: false,
            enabled: true,
        }
    }

    /// Create a disabled mock publisher that accepts and discards writes
    pub fn new_disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Make rich HTML writes fail
    pub fn with_html_failure(mut self) -> Self {
        self.fail_html = true;
        self
    }

    /// Make plain-text writes fail
    pub fn with_text_failure(mut self) -> Self {
        self.fail_text = true;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CapturedWrite>> {
        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn capture(&self, format: CapturedFormat, content: &str, alt_text: Option<&str>) {
        if !self.enabled {
            tracing::warn!("Mock clipboard disabled, discarding write");
            return;
        }

        self.lock().push(CapturedWrite {
            format,
            content: content.to_string(),
            alt_text: alt_text.map(str::to_string),
            captured_at: Utc::now(),
        });
    }

    /// Get all captured writes
    pub fn get_all_writes(&self) -> Vec<CapturedWrite> {
        self.lock().clone()
    }

    /// Most recent write, i.e. what the clipboard now holds
    pub fn latest_write(&self) -> Option<CapturedWrite> {
        self.lock().last().cloned()
    }

    /// Get count of captured writes
    pub fn write_count(&self) -> usize {
        self.lock().len()
    }

    /// Clear all captured writes
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Check if writes are captured
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for MockClipboardPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ClipboardPublisher for MockClipboardPublisher {
    async fn write_html(&self, html: &str, alt_text: &str) -> Result<(), PublishError> {
        if self.fail_html {
            return Err(PublishError::RichHtml(
                "rich HTML is not supported by this clipboard".to_string(),
            ));
        }
        self.capture(CapturedFormat::Html, html, Some(alt_text));
        Ok(())
    }

    async fn write_text(&self, text: &str) -> Result<(), PublishError> {
        if self.fail_text {
            return Err(PublishError::PlainText("clipboard is unavailable".to_string()));
        }
        self.capture(CapturedFormat::Text, text, None);
        Ok(())
    }

    fn accepts_writes(&self) -> bool {
        self.enabled
    }

    fn provider_name(&self) -> &'static str {
        if self.enabled {
            "mock"
        } else {
            "mock-disabled"
        }
    }
}
