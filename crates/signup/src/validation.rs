use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Letters and whitespace only.
    static ref NAME_RE: Regex = Regex::new(r"^[A-Za-z\s]+$").expect("name pattern compiles");
    /// Something before an `@`, a domain, a dot and a suffix. No whitespace anywhere.
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles");
}

pub fn is_valid_name(value: &str) -> bool {
    NAME_RE.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}
