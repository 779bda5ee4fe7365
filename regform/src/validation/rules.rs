//! Per-field validators.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use super::result::ValidationResult;

/// Youngest accepted student age, inclusive.
pub const MIN_AGE: u32 = 5;
/// Oldest accepted student age, inclusive.
pub const MAX_AGE: u32 = 100;

// Patterns are literals, compiling them cannot fail.
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{3}\) \d{3}-\d{4}$").expect("phone pattern"));
static ZIP_US: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("us zip pattern"));
static ZIP_CA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]\d[A-Za-z] ?\d[A-Za-z]\d$").expect("canadian postal pattern")
});
static ZIP_GENERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\s-]{3,10}$").expect("generic postal pattern"));
static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z '-]+$").expect("name pattern"));

const NAME_MESSAGE: &str =
    "Please enter a valid name (at least 2 letters; spaces, hyphens and apostrophes allowed)";
const PHONE_MESSAGE: &str = "Please enter a valid phone number: (555) 123-4567";

/// `local@domain.tld` with no whitespace. Rejects clearly malformed input only.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Only the canonical `(###) ###-####` shape produced by
/// [`format_phone_number`](super::format_phone_number).
pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

pub fn check_phone(value: &str) -> ValidationResult {
    if is_valid_phone(value) {
        ValidationResult::valid()
    } else {
        ValidationResult::invalid(PHONE_MESSAGE)
    }
}

/// US ZIP (`12345`, `12345-6789`), Canadian postal code (`A1A 1A1`), or any
/// 3-10 character run of letters, digits, spaces and hyphens.
pub fn is_valid_zip(value: &str) -> bool {
    ZIP_US.is_match(value) || ZIP_CA.is_match(value) || ZIP_GENERIC.is_match(value)
}

/// A number in `[0, 4]`.
pub fn is_valid_gpa(value: &str) -> bool {
    match value.trim().parse::<f64>() {
        Ok(gpa) => gpa.is_finite() && (0.0..=4.0).contains(&gpa),
        Err(_) => false,
    }
}

/// Letters, spaces, hyphens and apostrophes, at least two characters once
/// trimmed.
pub fn is_valid_name(value: &str) -> bool {
    NAME.is_match(value) && value.trim().chars().count() >= 2
}

pub fn check_name(value: &str) -> ValidationResult {
    if is_valid_name(value) {
        ValidationResult::valid()
    } else {
        ValidationResult::invalid(NAME_MESSAGE)
    }
}

/// Parse a date the way a date input submits it (`YYYY-MM-DD`).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Age in whole years on `today`.
///
/// Negative when `birth` is after `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

pub fn check_date_of_birth(value: &str, today: NaiveDate) -> ValidationResult {
    let Some(birth) = parse_date(value) else {
        return ValidationResult::invalid("Please enter a valid date of birth");
    };
    if birth > today {
        return ValidationResult::invalid("Date of birth cannot be in the future");
    }

    let age = age_on(birth, today);
    if age < MIN_AGE as i32 || age > MAX_AGE as i32 {
        return ValidationResult::invalid(format!(
            "Student must be between {MIN_AGE} and {MAX_AGE} years old"
        ));
    }
    ValidationResult::valid()
}

/// A real calendar date, not in the future, giving an age within
/// [`MIN_AGE`]..=[`MAX_AGE`] on `today`.
pub fn is_valid_date_of_birth(value: &str, today: NaiveDate) -> bool {
    check_date_of_birth(value, today).is_valid()
}
