//! Shared input helpers used across modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse a user-typed number that must be finite and strictly positive.
///
/// Surrounding whitespace is ignored. Anything else (empty, non-numeric,
/// `inf`, `NaN`, zero, negative) yields `None`.
pub fn parse_positive(input: &str) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Current Unix timestamp in milliseconds.
pub fn unix_timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ")), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" Cold Brew ")),
            Some("Cold Brew".to_string())
        );
    }

    #[test]
    fn parse_positive_accepts_plain_numbers() {
        assert_eq!(parse_positive("300"), Some(300.0));
        assert_eq!(parse_positive(" 15.5 "), Some(15.5));
    }

    #[test]
    fn parse_positive_rejects_invalid_input() {
        for input in ["", "abc", "0", "-100", "inf", "NaN", "1,5"] {
            assert_eq!(parse_positive(input), None, "{input:?}");
        }
    }
}
