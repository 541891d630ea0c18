//! Parsing of raw form input into DTO fields.

/// Trimmed text, `None` when blank.
pub fn opt_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn parse_opt_u32(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

/// Accepts both `.` and `,` as decimal separator.
pub fn parse_opt_f64(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

pub fn parse_f64_or_zero(value: &str) -> f64 {
    parse_opt_f64(value).unwrap_or(0.0)
}

pub fn opt_to_input<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opt_text() {
        assert_eq!(opt_text("  "), None);
        assert_eq!(opt_text(" Lyon "), Some("Lyon".to_string()));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_opt_u32("30"), Some(30));
        assert_eq!(parse_opt_u32("-1"), None);
        assert_eq!(parse_opt_f64("4,5"), Some(4.5));
        assert_eq!(parse_opt_f64("abc"), None);
        assert_eq!(parse_f64_or_zero(""), 0.0);
        assert_eq!(opt_to_input(Some(12u32)), "12");
        assert_eq!(opt_to_input::<u32>(None), "");
    }
}
