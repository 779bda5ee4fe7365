//! As-you-type formatting.

/// Number of ASCII digits in `raw`.
pub fn digit_count(raw: &str) -> usize {
    raw.chars().filter(char::is_ascii_digit).count()
}

/// Reformat whatever the user typed into `(###) ###-####`.
///
/// Non-digits are dropped and anything past ten digits is cut off. Shorter
/// input renders the prefix typed so far, so the field fills in while
/// typing: `555` → `(555`, `555123` → `(555) 123`.
pub fn format_phone_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(10).collect();

    match digits.len() {
        0 => String::new(),
        1..=3 => format!("({digits}"),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

/// Upper-case postal codes (`k1a 0b1` → `K1A 0B1`).
pub fn normalize_zip(raw: &str) -> String {
    raw.to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progressive_phone_format() {
        assert_eq!(format_phone_number(""), "");
        assert_eq!(format_phone_number("5"), "(5");
        assert_eq!(format_phone_number("555"), "(555");
        assert_eq!(format_phone_number("5551"), "(555) 1");
        assert_eq!(format_phone_number("555123"), "(555) 123");
        assert_eq!(format_phone_number("5551234"), "(555) 123-4");
        assert_eq!(format_phone_number("5551234567"), "(555) 123-4567");
    }

    #[test]
    fn test_phone_format_strips_and_truncates() {
        assert_eq!(format_phone_number("555-123-4567"), "(555) 123-4567");
        assert_eq!(format_phone_number("+1 555 123 45678"), "(155) 512-3456");
        assert_eq!(format_phone_number("abc"), "");
    }

    #[test]
    fn test_digit_count_ignores_punctuation() {
        assert_eq!(digit_count("(555) 123-4567"), 10);
        assert_eq!(digit_count("(555"), 3);
    }

    #[test]
    fn test_normalize_zip() {
        assert_eq!(normalize_zip("k1a 0b1"), "K1A 0B1");
        assert_eq!(normalize_zip("12345"), "12345");
    }
}
