//! Amount formatting for Korean won strings.

/// Insert `,` thousands separators into a decimal amount string.
///
/// Only the integer digits are grouped. A leading `-` or `+` and anything from
/// the first `.` onwards is preserved verbatim, so `-1234.5678` becomes
/// `-1,234.5678`. Input that is not a plain number is returned unchanged.
pub fn format_amount_str(raw: &str) -> String {
    let trimmed = raw.trim();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') | Some(b'+') => trimmed.split_at(1),
        _ => ("", trimmed),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed.to_string();
    }
    if !frac_part.is_empty() && !frac_part[1..].bytes().all(|b| b.is_ascii_digit()) {
        return trimmed.to_string();
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}{frac_part}")
}

/// Format an integer amount with thousands separators.
pub fn format_amount(amount: i64) -> String {
    format_amount_str(&amount.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_millions() {
        assert_eq!(format_amount(1_234_567), "1,234,567");
    }

    #[test]
    fn small_amounts_unchanged() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1000), "1,000");
    }

    #[test]
    fn negative_keeps_sign_outside_groups() {
        assert_eq!(format_amount(-123_456), "-123,456");
        assert_eq!(format_amount(-100), "-100");
    }

    #[test]
    fn fraction_is_not_grouped() {
        assert_eq!(format_amount_str("1234.5678"), "1,234.5678");
        assert_eq!(format_amount_str("-1234567.01"), "-1,234,567.01");
    }

    #[test]
    fn non_numeric_passes_through() {
        assert_eq!(format_amount_str("abc"), "abc");
        assert_eq!(format_amount_str("12a4"), "12a4");
    }
}
