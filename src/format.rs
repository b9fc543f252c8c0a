//! Number formatting shared by tick labels and the tooltip.

use num_format::{Locale, ToFormattedString};

/// Insert thousands separators into the integer part of `x`.
///
/// The value is printed with Rust's shortest round-trip representation first, so
/// fractional digits are kept as-is and never grouped.
pub fn number_with_commas(x: f64) -> String {
    group_thousands(&x.to_string())
}

/// Format `v` with a fixed number of decimals and thousands separators.
pub fn format_fixed(v: f64, decimals: usize) -> String {
    // avoid printing "-0" for values that round to zero
    let v = if v.abs() < 0.5 * 10f64.powi(-(decimals as i32)) {
        0.0
    } else {
        v
    };
    group_thousands(&format!("{:.*}", decimals, v))
}

/// Group the integer digits of an already formatted decimal number.
pub fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", s),
    };
    let (int, frac) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };
    let grouped = match int.parse::<u128>() {
        Ok(n) => n.to_formatted_string(&Locale::en),
        Err(_) => int.to_string(),
    };
    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas_for_whole_numbers() {
        assert_eq!(number_with_commas(1_000_000.0), "1,000,000");
        assert_eq!(number_with_commas(999.0), "999");
        assert_eq!(number_with_commas(1000.0), "1,000");
        assert_eq!(number_with_commas(0.0), "0");
    }

    #[test]
    fn fraction_is_untouched() {
        assert_eq!(number_with_commas(1234.5), "1,234.5");
        assert_eq!(number_with_commas(-98765.4321), "-98,765.4321");
    }

    #[test]
    fn fixed_decimals() {
        assert_eq!(format_fixed(2.0, 0), "2");
        assert_eq!(format_fixed(0.5, 1), "0.5");
        assert_eq!(format_fixed(12000.0, 0), "12,000");
        assert_eq!(format_fixed(-0.0001, 1), "0.0");
    }
}
