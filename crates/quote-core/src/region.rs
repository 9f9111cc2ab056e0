//! Address Region Extraction
//!
//! Best-effort inference of a two-letter region code from a free-text
//! mailing address. The code is only used as a display component of the
//! policy identifier, so a wrong guess is cosmetic, never an error.

use std::sync::LazyLock;

use regex::Regex;

/// Fallback region when nothing in the address looks like a state code.
pub const DEFAULT_REGION: &str = "US";

/// Trailing `<sep>ST 12345` or `<sep>ST 12345-6789` at the end of the
/// address, where `<sep>` is a comma or whitespace.
static STATE_ZIP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:,|\s)([A-Za-z]{2})\s*\d{5}(?:-\d{4})?$")
        .expect("invalid state/zip regex pattern")
});

/// Infers a two-letter region code from a mailing address.
///
/// Matching order: a trailing `", ST 12345"` state-and-zip pattern wins;
/// otherwise the first standalone two-letter token is taken; otherwise
/// [`DEFAULT_REGION`]. Total over all inputs, including the empty string.
///
/// The token fallback is a heuristic and can misread: `"PO Box 12"` yields
/// `"PO"`. The matching order is contractual; do not reorder it.
pub fn extract_region(address: &str) -> String {
    let trimmed = address.trim();

    if let Some(caps) = STATE_ZIP_PATTERN.captures(trimmed) {
        return caps[1].to_uppercase();
    }

    trimmed
        .split(|c: char| !c.is_ascii_alphabetic())
        .find(|token| token.len() == 2)
        .map_or_else(|| DEFAULT_REGION.to_string(), str::to_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_state_and_zip() {
        assert_eq!(extract_region("123 Test St, NJ 07102"), "NJ");
    }

    #[test]
    fn trailing_state_is_case_insensitive() {
        assert_eq!(extract_region("88 Oak Ave, ca 90210"), "CA");
    }

    #[test]
    fn trailing_state_with_zip_plus_four() {
        assert_eq!(extract_region("1 Main St, TX 75001-1234"), "TX");
    }

    #[test]
    fn trailing_state_without_comma() {
        assert_eq!(extract_region("500 Grand Blvd FL 33101"), "FL");
    }

    #[test]
    fn first_two_letter_token_without_trailing_zip() {
        assert_eq!(extract_region("NJ 07102, United States of America"), "NJ");
    }

    #[test]
    fn token_fallback_can_misread() {
        // Documented limitation of the heuristic: "PO" is not a state.
        assert_eq!(extract_region("PO Box 12"), "PO");
    }

    #[test]
    fn defaults_to_us() {
        assert_eq!(extract_region("123 Main Street"), "US");
    }

    #[test]
    fn empty_address_defaults_to_us() {
        assert_eq!(extract_region(""), "US");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(extract_region("  9 Elm Ct, WA 98101  "), "WA");
    }
}
