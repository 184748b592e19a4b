//! Critnotify command-line adapter
//!
//! Wires the incidents domain to stdin/stdout and the clipboard. All
//! composition happens in `critnotify-incidents`; this crate only loads
//! snapshots, prints previews and reports publish outcomes.

pub mod cli;

use std::io::{BufRead, Read, Write};

use critnotify_clipboard::{ClipboardPublisher, PublishOutcome};
use critnotify_common::{Config, Error, Result};
use critnotify_email::content::html_escape;
use critnotify_incidents::{
    derive_state, DerivedState, FieldChange, FormSession, FormSnapshot, RenderContext,
};

pub use cli::{Cli, Commands};

/// Session command that publishes the current body
pub const COPY_COMMAND: &str = ":copy";

/// Session command that ends the loop
pub const QUIT_COMMAND: &str = ":quit";

/// HTML preview fragment: subject, rule, then body; or the gap placeholder
pub fn render_preview(state: &DerivedState) -> String {
    match &state.email {
        Ok(email) => format!(
            "<div style=\"margin-bottom: 15px;\"><strong>Subject:</strong> {}</div>\n<hr style=\"margin: 15px 0;\">\n{}",
            html_escape(&email.subject),
            email.body_html
        ),
        Err(gap) => format!(
            "<div class=\"empty-preview\">{}</div>",
            html_escape(&gap.to_string())
        ),
    }
}

/// Terminal-friendly preview
pub fn render_text_preview(state: &DerivedState) -> String {
    match &state.email {
        Ok(email) => format!("Subject: {}\n\n{}", email.subject, email.body_text),
        Err(gap) => gap.to_string(),
    }
}

/// Load a snapshot from a JSON file, or from `input` when the path is `-`
pub fn load_snapshot<R: BufRead>(source: &str, input: &mut R) -> Result<FormSnapshot> {
    let raw = if source == "-" {
        let mut raw = String::new();
        input.read_to_string(&mut raw)?;
        raw
    } else {
        std::fs::read_to_string(source)?
    };

    Ok(serde_json::from_str(&raw)?)
}

/// One-line report of a publish outcome
pub fn describe_outcome(outcome: PublishOutcome) -> String {
    match outcome {
        PublishOutcome::Discarded => "Clipboard disabled, nothing was copied".to_string(),
        copied => format!("Copied to clipboard as {}", copied),
    }
}

/// Publish the rendered body, refusing when a gap blocks rendering
pub async fn publish_state(
    publisher: &dyn ClipboardPublisher,
    state: &DerivedState,
) -> Result<PublishOutcome> {
    let email = state
        .email
        .as_ref()
        .map_err(|gap| Error::Validation(gap.to_string()))?;

    publisher
        .publish(email)
        .await
        .map_err(|e| Error::Clipboard(e.to_string()))
}

/// Apply `field=value` lines to the session, printing the preview after each.
///
/// Malformed lines and failed copies are reported and the loop continues.
pub async fn run_session<R: BufRead, W: Write>(
    session: &mut FormSession,
    publisher: &dyn ClipboardPublisher,
    input: R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "{}", render_text_preview(&session.current()))?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();

        match line {
            "" => continue,
            QUIT_COMMAND => break,
            COPY_COMMAND => match publish_state(publisher, &session.current()).await {
                Ok(outcome) => writeln!(output, "{}", describe_outcome(outcome))?,
                Err(e) => writeln!(output, "Copy failed: {}", e)?,
            },
            _ => match line.parse::<FieldChange>() {
                Ok(change) => match session.apply(change) {
                    Ok(state) => writeln!(output, "---\n{}", render_text_preview(&state))?,
                    Err(e) => writeln!(output, "error: {}", e)?,
                },
                Err(e) => writeln!(output, "error: {}", e)?,
            },
        }
    }

    Ok(())
}

/// Run one CLI command against the given streams
pub async fn run<R: BufRead, W: Write>(
    cli: Cli,
    mut config: Config,
    publisher: &dyn ClipboardPublisher,
    mut input: R,
    output: &mut W,
) -> Result<()> {
    if let Some(zone) = cli.input_timezone {
        config.input_timezone = zone;
    }
    let context = RenderContext::from_config(&config)?;

    match cli.command {
        Commands::Preview { snapshot, text } => {
            let snapshot = load_snapshot(&snapshot, &mut input)?;
            let state = derive_state(&snapshot, &context);
            let preview = if text {
                render_text_preview(&state)
            } else {
                render_preview(&state)
            };
            writeln!(output, "{}", preview)?;
        }
        Commands::Flags { snapshot } => {
            let snapshot = load_snapshot(&snapshot, &mut input)?;
            let state = derive_state(&snapshot, &context);
            writeln!(output, "{}", serde_json::to_string_pretty(&state.flags)?)?;
        }
        Commands::Copy { snapshot } => {
            let snapshot = load_snapshot(&snapshot, &mut input)?;
            let state = derive_state(&snapshot, &context);
            let outcome = publish_state(publisher, &state).await?;
            writeln!(output, "{}", describe_outcome(outcome))?;
        }
        Commands::Session { from } => {
            let snapshot = match from {
                // Stdin carries the field events
                Some(path) if path == "-" => {
                    return Err(Error::Validation(
                        "session --from needs a file path; stdin is reserved for field events"
                            .to_string(),
                    ))
                }
                Some(path) => load_snapshot(&path, &mut input)?,
                None => FormSnapshot::default(),
            };
            let mut session = FormSession::new(snapshot, context);
            run_session(&mut session, publisher, input, output).await?;
        }
    }

    Ok(())
}
