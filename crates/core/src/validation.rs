//! Shared input-normalization and validation helpers.

use std::sync::OnceLock;

use regex::Regex;

/// Trim a submitted optional field and map the empty string to `None`.
///
/// Form submissions deliver absent optional fields as empty strings; the
/// storage layer must see NULL ("no value"), never a literal `""`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    match value {
        Some(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => None,
    }
}

/// Check a phone number: digits, spaces, `+`, `-`, and parentheses only.
pub fn is_valid_phone(phone: &str) -> bool {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE_REGEX
        .get_or_init(|| Regex::new(r"^[\d\s\-\+\(\)]+$").expect("phone regex must compile"));
    regex.is_match(phone)
}
