//! Field predicates shared by the request handlers.

use lazy_static::lazy_static;
use regex::Regex;

pub const SLUG_MAX_LEN: usize = 256;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref URL_RE: Regex = Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Slugs are non-empty runs of ASCII letters, digits, underscores and hyphens.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= SLUG_MAX_LEN
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

pub fn is_valid_url(value: &str) -> bool {
    URL_RE.is_match(value)
}

/// Trim and lowercase an email before it is stored or looked up.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails() {
        assert!(is_valid_email("matt@test.com"));
        assert!(!is_valid_email("matt@test"));
        assert!(!is_valid_email("not an email"));
        assert_eq!(normalize_email("  Matt@Test.COM "), "matt@test.com");
    }

    #[test]
    fn slugs() {
        assert!(is_valid_slug("cnu"));
        assert!(is_valid_slug("christopher-newport-2"));
        assert!(!is_valid_slug(""));
        assert!(is_valid_slug("CNU"));
        assert!(is_valid_slug("fall_2024"));
        assert!(is_valid_slug("Christopher-Newport"));
        assert!(!is_valid_slug(" cnu"));
        assert!(!is_valid_slug("not a slug"));
        assert!(!is_valid_slug("cnu.edu"));
        assert!(is_valid_slug(&"a".repeat(SLUG_MAX_LEN)));
        assert!(!is_valid_slug(&"a".repeat(SLUG_MAX_LEN + 1)));
    }

    #[test]
    fn urls() {
        assert!(is_valid_url("https://www.cnu.edu"));
        assert!(is_valid_url("http://example.com/calendar?term=fall"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("www.cnu.edu"));
        assert!(!is_valid_url("https://"));
    }
}
