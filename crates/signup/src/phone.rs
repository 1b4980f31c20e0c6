//! Phone number digit grouping.
//!
//! Input is reduced to its digits on every change. Once ten digits are
//! present the first ten are grouped as `DDD-DDD-DDDD`; anything typed past
//! that stays attached to the last group so validation can flag it.

/// All ASCII digits of `input`, in order.
pub fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn digit_count(input: &str) -> usize {
    input.chars().filter(|c| c.is_ascii_digit()).count()
}

pub fn format_phone(input: &str) -> String {
    let d = digits(input);
    if d.len() < 10 {
        return d;
    }
    // ASCII only, so byte slicing is on char boundaries.
    format!("{}-{}-{}", &d[..3], &d[3..6], &d[6..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_stays_bare_digits() {
        assert_eq!(format_phone("555"), "555");
        assert_eq!(format_phone("555-12"), "55512");
        assert_eq!(format_phone("(555) 123 456"), "555123456");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn ten_digits_are_grouped() {
        assert_eq!(format_phone("5551234567"), "555-123-4567");
        assert_eq!(format_phone("(555) 123-4567"), "555-123-4567");
    }

    #[test]
    fn regrouping_a_formatted_value_is_stable() {
        let once = format_phone("5551234567");
        assert_eq!(format_phone(&once), once);
    }

    #[test]
    fn overflow_digits_are_appended_to_the_last_group() {
        assert_eq!(format_phone("55512345678"), "555-123-45678");
        assert_eq!(digit_count("555-123-45678"), 11);
    }

    #[test]
    fn deleting_a_digit_from_a_grouped_value_ungroups_it() {
        // Editor backspace on "555-123-4567" leaves "555-123-456".
        assert_eq!(format_phone("555-123-456"), "555123456");
    }

    #[test]
    fn non_ascii_digits_are_ignored() {
        assert_eq!(digits("٣12x3"), "123");
    }
}
