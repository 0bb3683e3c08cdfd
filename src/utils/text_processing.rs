//! Text processing utilities.
//!
//! This module contains utilities for preparing stored text for terminal
//! display, such as truncating long titles and cleaning up attachment paths.

use log::*;
use regex::Regex;

/// Truncate text to a maximum number of characters, appending an ellipsis
/// when anything was cut off.
///
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Clean an attachment path for display.
///
/// Paths recorded from pickers often carry a "file://" scheme and
/// percent-encoded spaces; both are stripped so the path reads naturally.
///
/// # Arguments
/// * `path` - The raw attachment path
///
/// # Returns
/// The path without a URI scheme and with encoded spaces decoded.
pub fn display_path(path: &str) -> String {
    let re = match Regex::new(r"^file://") {
        Ok(r) => r,
        Err(e) => {
            warn!("Failed to compile file scheme pattern: {}", e);
            return path.to_string();
        }
    };
    re.replace(path, "").replace("%20", " ")
}
