//! CLI commands implementation

pub mod chat;
pub mod ingest;
pub mod search;

pub use chat::*;
pub use ingest::*;
pub use search::*;

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Start a transient spinner shown while an external call is in flight.
///
/// Callers clear it with `finish_and_clear` once the call returns, on
/// success or failure alike.
pub(crate) fn start_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
