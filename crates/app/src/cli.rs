//! Command-line interface for the `critnotify` binary.
//!
//! - `preview <file>` - Render the preview for a form snapshot
//! - `flags <file>` - Print derived field flags as JSON
//! - `copy <file>` - Copy the rendered body to the clipboard
//! - `session` - Edit a snapshot interactively from `field=value` lines

use clap::{Parser, Subcommand};

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "critnotify")]
#[command(author, version, about = "Critical notification email composer", long_about = None)]
pub struct Cli {
    /// IANA zone that timestamps without an offset were entered in
    #[arg(long, env = "CRITNOTIFY_INPUT_TIMEZONE")]
    pub input_timezone: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Render the preview (subject, rule, body) or the blocking gap
    Preview {
        /// Snapshot JSON file, or `-` for stdin
        snapshot: String,
        /// Print subject and plain-text body instead of the HTML fragment
        #[arg(long)]
        text: bool,
    },

    /// Print visibility and required flags for every conditional field
    Flags {
        /// Snapshot JSON file, or `-` for stdin
        snapshot: String,
    },

    /// Copy the rendered body to the clipboard
    Copy {
        /// Snapshot JSON file, or `-` for stdin
        snapshot: String,
    },

    /// Read `field=value` lines from stdin and re-render after each one
    Session {
        /// Starting snapshot JSON file (not `-`: stdin carries the events)
        #[arg(long)]
        from: Option<String>,
    },
}
