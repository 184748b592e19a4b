//! Clipboard publishing through the adapter with the mock publisher

mod common;

use critnotify_app::{publish_state, render_preview};
use critnotify_clipboard::mock::{CapturedFormat, MockClipboardPublisher};
use critnotify_clipboard::{
    ClipboardConfig, ClipboardPublisher, ClipboardPublisherFactory, PublishOutcome,
};
use critnotify_common::Error;
use critnotify_incidents::{derive_state, FormSnapshot};

use common::{ncel_report, sazka_resolved, utc_context};

#[tokio::test]
async fn test_rich_html_publish_carries_text_alternative() {
    let publisher = MockClipboardPublisher::new();
    let state = derive_state(&sazka_resolved(), &utc_context());

    let outcome = publish_state(&publisher, &state).await.unwrap();

    assert_eq!(outcome, PublishOutcome::RichHtml);
    let write = publisher.latest_write().unwrap();
    assert_eq!(write.format, CapturedFormat::Html);
    assert!(write.content.contains("Decrease in bets (~15%)"));
    assert!(write
        .alt_text
        .as_deref()
        .is_some_and(|text| text.contains("Impact description: Decrease in bets (~15%).")));
}

#[test_log::test(tokio::test)]
async fn test_fallback_to_plain_text() {
    let publisher = MockClipboardPublisher::new().with_html_failure();
    let state = derive_state(&ncel_report(), &utc_context());

    let outcome = publish_state(&publisher, &state).await.unwrap();

    assert_eq!(outcome, PublishOutcome::PlainText);
    let write = publisher.latest_write().unwrap();
    assert_eq!(write.format, CapturedFormat::Text);
    assert!(!write.content.contains('<'));
}

#[test_log::test(tokio::test)]
async fn test_both_paths_failing_is_surfaced() {
    let publisher = MockClipboardPublisher::new()
        .with_html_failure()
        .with_text_failure();
    let state = derive_state(&ncel_report(), &utc_context());

    let error = publish_state(&publisher, &state).await.unwrap_err();

    assert!(matches!(error, Error::Clipboard(_)));
    assert!(error.to_string().contains("Could not copy to clipboard"));
    assert_eq!(publisher.write_count(), 0);
}

#[tokio::test]
async fn test_gap_is_never_published() {
    let publisher = MockClipboardPublisher::new();
    let state = derive_state(&FormSnapshot::default(), &utc_context());

    let error = publish_state(&publisher, &state).await.unwrap_err();

    assert!(matches!(error, Error::Validation(_)));
    assert_eq!(publisher.write_count(), 0);
    assert_eq!(
        render_preview(&state),
        "<div class=\"empty-preview\">Select an environment</div>"
    );
}

#[test]
fn test_disabled_clipboard_reports_nothing_copied() {
    let config = ClipboardConfig {
        enabled: false,
        ..ClipboardConfig::default()
    };
    let publisher = ClipboardPublisherFactory::create(&config).unwrap();
    assert_eq!(publisher.provider_name(), "mock-disabled");

    let state = derive_state(&ncel_report(), &utc_context());
    let outcome = tokio_test::block_on(publish_state(publisher.as_ref(), &state)).unwrap();
    assert_eq!(outcome, PublishOutcome::Discarded);
    assert_eq!(
        critnotify_app::describe_outcome(outcome),
        "Clipboard disabled, nothing was copied"
    );
}
