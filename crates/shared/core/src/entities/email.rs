use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-\+\(\)]+$").expect("valid phone regex"));

/// Loose structural email check: `local@domain.tld` with no whitespace and a single `@`
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Digits, whitespace and `-+()` only
pub fn validate_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}
