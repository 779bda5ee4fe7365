//! Field validation for the registration form.
//!
//! Validators are pure predicates over the raw field text. The `check_*`
//! variants also carry the message shown next to the field when the value is
//! rejected.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use regform::validation::{check_date_of_birth, format_phone_number, is_valid_phone};
//!
//! let phone = format_phone_number("5551234567");
//! assert!(is_valid_phone(&phone));
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! assert!(check_date_of_birth("2019-01-15", today).is_valid());
//! ```

mod format;
mod result;
mod rules;

pub use format::{digit_count, format_phone_number, normalize_zip};
pub use result::{FieldError, FormReport, ValidationResult};
pub use rules::{
    age_on, check_date_of_birth, check_name, check_phone, is_valid_date_of_birth, is_valid_email,
    is_valid_gpa, is_valid_name, is_valid_phone, is_valid_zip, parse_date, MAX_AGE, MIN_AGE,
};
