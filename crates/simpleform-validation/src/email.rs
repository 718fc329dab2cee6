//! Email shape check

use once_cell::sync::Lazy;
use regex::Regex;

// Deliberately loose: one `@`, a dotted domain, no TLD length rule.
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9-.]+$").expect("email pattern compiles")
});

/// Returns true when `value` looks like an email address.
///
/// This is the basic shape test used for warnings, not RFC 5322 validation:
/// `a@b.co` passes, `not-an-email` and `user@localhost` do not.
pub fn is_plausible_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@b.co")]
    #[case("user+tag@example.com")]
    #[case("first.last@sub-domain.example.co.uk")]
    #[case("under_score@x.y")]
    fn test_plausible_emails(#[case] email: &str) {
        assert!(is_plausible_email(email));
    }

    #[rstest]
    #[case("")]
    #[case("not-an-email")]
    #[case("user@localhost")]
    #[case("@example.com")]
    #[case("user@@example.com")]
    #[case("user name@example.com")]
    fn test_implausible_emails(#[case] email: &str) {
        assert!(!is_plausible_email(email));
    }
}
