//! Player identifier canonicalization.

use super::cell::{format_number, parse_number};

/// Canonicalize a player UID.
///
/// Numeric-looking identifiers are reduced to their canonical number form so
/// that `"007"` and `"7"` compare equal across exports. Anything else,
/// including the empty string, passes through unchanged.
pub fn normalize_uid(raw: &str) -> String {
    match parse_number(raw) {
        Some(n) => format_number(n),
        None => raw.to_string(),
    }
}
