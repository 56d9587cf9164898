//! Text checks used by the section validators.
//!
//! This module contains the small string predicates shared by validation,
//! such as blank detection and email format matching.

use log::*;
use regex::Regex;
use std::sync::LazyLock;

/// Pattern for a standard `local@domain.tld` address.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Return true when the text is empty or whitespace only.
///
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Return true when the optional text is present and not blank.
///
pub fn is_present(text: Option<&str>) -> bool {
    text.map_or(false, |t| !is_blank(t))
}

/// Email pattern compiled once; `None` if it failed to compile.
static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(EMAIL_PATTERN)
        .map_err(|e| warn!("Failed to compile regex pattern '{}': {}", EMAIL_PATTERN, e))
        .ok()
});

/// Return true when the text looks like a `local@domain.tld` email address.
///
pub fn is_valid_email(text: &str) -> bool {
    EMAIL_RE.as_ref().map_or(false, |re| re.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \t"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_is_present() {
        assert!(!is_present(None));
        assert!(!is_present(Some("  ")));
        assert!(is_present(Some("beauty")));
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("owner.name+deals@salon.co.uk"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
    }

    #[test]
    fn test_email_pattern_compiles_once() {
        assert!(EMAIL_RE.is_some());
        let first = EMAIL_RE.as_ref().map(|re| re as *const Regex);
        let second = EMAIL_RE.as_ref().map(|re| re as *const Regex);
        assert_eq!(first, second);
    }
}
