//! Spinner helpers for long-running operations

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner with the given message
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Stop a spinner and erase it
pub fn complete_spinner_and_clear(spinner: ProgressBar) {
    spinner.finish_and_clear();
}

/// Stop a spinner, leaving an error line behind
pub fn complete_spinner_error(spinner: ProgressBar, message: &str) {
    spinner.abandon_with_message(format!(
        "{} {}",
        console::style("✗").red().bold(),
        message
    ));
}
