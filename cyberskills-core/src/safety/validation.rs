//! Structural validation of raw user input

use super::pipeline::Rejection;

/// Default maximum message length in UTF-16 code units
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 500;

/// Length of a message in UTF-16 code units.
///
/// The limit is expressed in the unit a browser text field counts, so a
/// character outside the Basic Multilingual Plane counts as two.
pub fn message_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Whitespace in the browser's sense, which also counts the byte order mark
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Reject empty, whitespace-only, or over-long input
pub fn validate_message(text: &str, max_length: usize) -> Result<(), Rejection> {
    if text.trim_matches(is_blank).is_empty() {
        return Err(Rejection::Empty);
    }
    if message_length(text) > max_length {
        return Err(Rejection::TooLong);
    }
    Ok(())
}
