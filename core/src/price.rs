//! Numeric helpers shared by price resolution and price sorting.

/// Parses the leading decimal number of `text`, ignoring anything after it.
///
/// Leading whitespace is skipped. An optional sign, integer and fraction
/// digits, and an exponent are accepted; the remainder of the string is
/// ignored. Returns `None` when no digits lead the text.
///
/// # Examples
///
/// ```
/// use handle_feed_core::leading_number;
///
/// assert_eq!(leading_number("40"), Some(40.0));
/// assert_eq!(leading_number(" 12.5 (10% off $14)"), Some(12.5));
/// assert_eq!(leading_number(".5"), Some(0.5));
/// assert_eq!(leading_number("TBA"), None);
/// ```
pub fn leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses a price-or-status string: one `$` is stripped before reading the
/// leading number.
///
/// Display strings with discount annotations resolve to their leading amount.
///
/// # Examples
///
/// ```
/// use handle_feed_core::price_amount;
///
/// assert_eq!(price_amount("$40"), Some(40.0));
/// assert_eq!(price_amount("$20 (50% off $40)"), Some(20.0));
/// assert_eq!(price_amount("SOLD"), None);
/// ```
pub fn price_amount(price: &str) -> Option<f64> {
    let trimmed = price.trim_start();
    leading_number(trimmed.strip_prefix('$').unwrap_or(trimmed))
}

/// Formats an amount in its natural form: no forced decimals, no trailing zeros.
///
/// # Examples
///
/// ```
/// use handle_feed_core::format_amount;
///
/// assert_eq!(format_amount(40.0), "40");
/// assert_eq!(format_amount(40.5), "40.5");
/// assert_eq!(format_amount(-0.0), "0");
/// ```
pub fn format_amount(amount: f64) -> String {
    // -0.0 + 0.0 == +0.0
    format!("{}", amount + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_number_ignores_trailing_text() {
        assert_eq!(leading_number("25abc"), Some(25.0));
        assert_eq!(leading_number("25 each"), Some(25.0));
        assert_eq!(leading_number("1.5.6"), Some(1.5));
    }

    #[test]
    fn test_leading_number_accepts_sign_and_exponent() {
        assert_eq!(leading_number("-3"), Some(-3.0));
        assert_eq!(leading_number("+3"), Some(3.0));
        assert_eq!(leading_number("2e3"), Some(2000.0));
        // dangling exponent marker is not part of the number
        assert_eq!(leading_number("2e"), Some(2.0));
        assert_eq!(leading_number("7."), Some(7.0));
    }

    #[test]
    fn test_leading_number_rejects_non_numeric() {
        assert_eq!(leading_number(""), None);
        assert_eq!(leading_number("."), None);
        assert_eq!(leading_number("-"), None);
        assert_eq!(leading_number("sold"), None);
        assert_eq!(leading_number("$40"), None);
    }

    #[test]
    fn test_price_amount_strips_single_dollar() {
        assert_eq!(price_amount("$ 15"), Some(15.0));
        assert_eq!(price_amount("15"), Some(15.0));
        assert_eq!(price_amount("$$15"), None);
    }

    #[test]
    fn test_format_amount_natural_form() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(19.0), "19");
        assert_eq!(format_amount(0.25), "0.25");
    }
}
