//! System clipboard publisher backed by `arboard`

use std::sync::{Arc, Mutex};

use crate::{ClipboardPublisher, PublishError, SelectionHold};

/// Publishes to the platform clipboard.
///
/// One `arboard::Clipboard` handle is opened lazily and kept for the life of
/// the publisher; on X11 and Wayland dropping it would drop the selection.
/// Writes run on a blocking worker thread since clipboard access is
/// synchronous on every platform arboard supports.
#[derive(Clone, Default)]
pub struct SystemClipboardPublisher {
    clipboard: Arc<Mutex<Option<arboard::Clipboard>>>,
    hold: SelectionHold,
}

impl std::fmt::Debug for SystemClipboardPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboardPublisher")
            .field("hold", &self.hold)
            .finish_non_exhaustive()
    }
}

impl SystemClipboardPublisher {
    /// Publisher for long-running sessions; the kept handle serves the selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Publisher that blocks after each write per `hold`
    pub fn with_hold(hold: SelectionHold) -> Self {
        Self {
            hold,
            ..Self::default()
        }
    }

    pub fn hold(&self) -> SelectionHold {
        self.hold
    }

    /// Run `write` against the shared handle on a blocking thread
    async fn write_with<F>(&self, write: F) -> Result<(), String>
    where
        F: FnOnce(&mut arboard::Clipboard, SelectionHold) -> Result<(), arboard::Error>
            + Send
            + 'static,
    {
        let clipboard = Arc::clone(&self.clipboard);
        let hold = self.hold;

        if hold != SelectionHold::None {
            tracing::info!(hold = ?hold, "Holding clipboard selection after write");
        }

        tokio::task::spawn_blocking(move || {
            let mut guard = clipboard
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());

            if guard.is_none() {
                *guard = Some(arboard::Clipboard::new().map_err(|e| e.to_string())?);
            }
            let Some(handle) = guard.as_mut() else {
                return Err("clipboard handle unavailable".to_string());
            };

            let result = write(handle, hold);
            if result.is_err() {
                // Reopen on the next write in case the display connection broke
                *guard = None;
            }
            result.map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| e.to_string())?
    }
}

/// Start a set operation, holding the selection where the platform needs it
fn set_with_hold(clipboard: &mut arboard::Clipboard, hold: SelectionHold) -> arboard::Set<'_> {
    let set = clipboard.set();

    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))]
    let set = {
        use arboard::SetExtLinux;
        match hold {
            SelectionHold::None => set,
            SelectionHold::UntilReplaced => set.wait(),
            SelectionHold::For(duration) => set.wait_until(std::time::Instant::now() + duration),
        }
    };

    #[cfg(not(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )))]
    let _ = hold;

    set
}

#[async_trait::async_trait]
impl ClipboardPublisher for SystemClipboardPublisher {
    async fn write_html(&self, html: &str, alt_text: &str) -> Result<(), PublishError> {
        let html = html.to_string();
        let alt_text = alt_text.to_string();

        self.write_with(move |clipboard, hold| {
            set_with_hold(clipboard, hold).html(html, Some(alt_text))
        })
        .await
        .map_err(PublishError::RichHtml)
    }

    async fn write_text(&self, text: &str) -> Result<(), PublishError> {
        let text = text.to_string();

        self.write_with(move |clipboard, hold| set_with_hold(clipboard, hold).text(text))
            .await
            .map_err(PublishError::PlainText)
    }

    fn provider_name(&self) -> &'static str {
        "system"
    }
}
