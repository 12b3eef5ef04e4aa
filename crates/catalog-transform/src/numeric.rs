//! Numeric normalization utilities.

use catalog_model::DecimalSeparator;

/// Rewrites a numeric cell into Rust's period-decimal syntax.
///
/// Returns None when the text cannot be a number under `separator`.
fn normalize_decimal(value: &str, separator: DecimalSeparator) -> Option<String> {
    let comma_rule = match separator {
        DecimalSeparator::Comma => true,
        DecimalSeparator::Period => false,
        DecimalSeparator::Auto => value.contains(','),
    };
    if comma_rule {
        if value.matches(',').count() > 1 {
            return None;
        }
        Some(value.replace('.', "").replace(',', "."))
    } else if value.contains(',') {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parses a string as f64, returning None for invalid, empty or non-finite values.
pub fn parse_f64(value: &str, separator: DecimalSeparator) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    normalize_decimal(trimmed, separator)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parses a string as i64, returning None for invalid or empty strings.
///
/// Integral decimal renderings (`10,0`) are accepted; fractional ones are not.
/// The digits are parsed as text so values past 2^53 stay exact and anything
/// outside the i64 range is rejected.
pub fn parse_i64(value: &str, separator: DecimalSeparator) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    let normalized = normalize_decimal(trimmed, separator)?;
    let (integral, fraction) = match normalized.split_once('.') {
        Some((integral, fraction)) => (integral, fraction),
        None => (normalized.as_str(), ""),
    };
    if !fraction.bytes().all(|b| b == b'0') {
        return None;
    }
    integral.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_accepts_both_marks() {
        assert_eq!(parse_f64("19,90", DecimalSeparator::Auto), Some(19.9));
        assert_eq!(parse_f64("19.90", DecimalSeparator::Auto), Some(19.9));
        assert_eq!(parse_f64("1.234,56", DecimalSeparator::Auto), Some(1234.56));
        assert_eq!(parse_f64(" 10 ", DecimalSeparator::Auto), Some(10.0));
    }

    #[test]
    fn comma_mode_treats_period_as_grouping() {
        assert_eq!(parse_f64("1.234", DecimalSeparator::Comma), Some(1234.0));
        assert_eq!(parse_f64("0,250", DecimalSeparator::Comma), Some(0.25));
    }

    #[test]
    fn period_mode_rejects_commas() {
        assert_eq!(parse_f64("19,90", DecimalSeparator::Period), None);
        assert_eq!(parse_f64("19.90", DecimalSeparator::Period), Some(19.9));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_f64("", DecimalSeparator::Auto), None);
        assert_eq!(parse_f64("abc", DecimalSeparator::Auto), None);
        assert_eq!(parse_f64("1,2,3", DecimalSeparator::Auto), None);
        assert_eq!(parse_f64("NaN", DecimalSeparator::Auto), None);
        assert_eq!(parse_f64("inf", DecimalSeparator::Auto), None);
        assert_eq!(parse_f64("R$ 10", DecimalSeparator::Auto), None);
    }

    #[test]
    fn integers() {
        assert_eq!(parse_i64("10", DecimalSeparator::Auto), Some(10));
        assert_eq!(parse_i64("-3", DecimalSeparator::Auto), Some(-3));
        assert_eq!(parse_i64("10,0", DecimalSeparator::Auto), Some(10));
        assert_eq!(parse_i64("10,5", DecimalSeparator::Auto), None);
        assert_eq!(parse_i64("", DecimalSeparator::Auto), None);
        assert_eq!(parse_i64("dez", DecimalSeparator::Auto), None);
    }

    #[test]
    fn integers_outside_i64_are_rejected() {
        assert_eq!(parse_i64("9223372036854775808,0", DecimalSeparator::Auto), None);
        assert_eq!(parse_i64("9223372036854775808", DecimalSeparator::Auto), None);
        assert_eq!(
            parse_i64("9223372036854775807,00", DecimalSeparator::Auto),
            Some(i64::MAX)
        );
        assert_eq!(
            parse_i64("-9.223.372.036.854.775.808", DecimalSeparator::Comma),
            Some(i64::MIN)
        );
    }

    #[test]
    fn large_integers_keep_every_digit() {
        assert_eq!(
            parse_i64("9.007.199.254.740.993", DecimalSeparator::Comma),
            Some(9_007_199_254_740_993)
        );
        assert_eq!(
            parse_i64("9007199254740993.0", DecimalSeparator::Period),
            Some(9_007_199_254_740_993)
        );
        assert_eq!(parse_i64("10.5.0", DecimalSeparator::Period), None);
        assert_eq!(parse_i64("1e3", DecimalSeparator::Auto), None);
    }
}
