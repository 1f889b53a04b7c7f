//! Progress reporting for multi-file runs
//!
//! Wraps `indicatif` with the bar style used by the command line tool.

use indicatif::{ProgressBar, ProgressStyle};

/// Default style for the main progress bar
pub const DEFAULT_MAIN_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}";

/// Create a main progress bar with a standardized style
///
/// Falls back to the default `indicatif` style if the template is rejected.
///
/// # Arguments
/// * `length` - Total length for the progress bar
/// * `description` - Optional description to display as the initial message
#[must_use]
pub fn create_main_progress_bar(length: u64, description: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(length);
    match ProgressStyle::default_bar().template(DEFAULT_MAIN_TEMPLATE) {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => log::debug!("Invalid progress template: {e}"),
    }

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Finish a progress bar with a completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}
