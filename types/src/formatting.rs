//! Number and time formatting shared by the summaries and the CLI.
//!
//! Everything the meter prints goes through this module so the export text
//! and the live table agree on rounding.

/// Shorten a number to one decimal with a k/m/b/t unit.
///
/// Trailing `.0` is dropped. Values below 1,000 are rounded to an integer
/// and returned without a unit.
///
/// # Examples
/// ```
/// use relink_types::formatting::humanize;
/// assert_eq!(humanize(999.4), ("999".to_string(), ""));
/// assert_eq!(humanize(1_200.0), ("1.2".to_string(), "k"));
/// assert_eq!(humanize(1_000_000.0), ("1".to_string(), "m"));
/// assert_eq!(humanize(2_560_000_000.0), ("2.6".to_string(), "b"));
/// ```
pub fn humanize(n: f64) -> (String, &'static str) {
    let (scaled, unit) = if n >= 1e12 {
        (n / 1e12, "t")
    } else if n >= 1e9 {
        (n / 1e9, "b")
    } else if n >= 1e6 {
        (n / 1e6, "m")
    } else if n >= 1e3 {
        (n / 1e3, "k")
    } else {
        let n = if n.is_finite() { n } else { 0.0 };
        return (format!("{:.0}", n), "");
    };
    let mut s = format!("{:.1}", scaled);
    if s.ends_with(".0") {
        s.truncate(s.len() - 2);
    }
    (s, unit)
}

/// [`humanize`] joined into a single string.
///
/// # Examples
/// ```
/// use relink_types::formatting::format_humanized;
/// assert_eq!(format_humanized(15_300.0), "15.3k");
/// assert_eq!(format_humanized(42.0), "42");
/// ```
pub fn format_humanized(n: f64) -> String {
    let (value, unit) = humanize(n);
    format!("{}{}", value, unit)
}

/// Format elapsed milliseconds as `MM:SS`.
///
/// Minutes keep counting past 59; negative input clamps to zero.
///
/// # Examples
/// ```
/// use relink_types::formatting::format_elapsed;
/// assert_eq!(format_elapsed(0), "00:00");
/// assert_eq!(format_elapsed(65_999), "01:05");
/// assert_eq!(format_elapsed(3_725_000), "62:05");
/// assert_eq!(format_elapsed(-10), "00:00");
/// ```
pub fn format_elapsed(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format a percentage with two decimals, as the exports do.
///
/// # Examples
/// ```
/// use relink_types::formatting::format_pct2;
/// assert_eq!(format_pct2(70.0), "70.00%");
/// assert_eq!(format_pct2(33.3333), "33.33%");
/// ```
pub fn format_pct2(n: f64) -> String {
    format!("{:.2}%", n)
}

/// Format a number with thousands separators.
///
/// # Examples
/// ```
/// use relink_types::formatting::format_thousands;
/// assert_eq!(format_thousands(0), "0");
/// assert_eq!(format_thousands(1_500), "1,500");
/// assert_eq!(format_thousands(12_345_678), "12,345,678");
/// ```
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Format a 0-1000 gauge reading as a percentage with two decimals.
///
/// # Examples
/// ```
/// use relink_types::formatting::format_gauge;
/// assert_eq!(format_gauge(655.0), "65.50%");
/// ```
pub fn format_gauge(gauge: f64) -> String {
    format!("{:.2}%", gauge / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_rounds_at_unit_boundaries() {
        assert_eq!(humanize(999_999.0), ("1000".to_string(), "k"));
        assert_eq!(humanize(1_000.0), ("1".to_string(), "k"));
        assert_eq!(humanize(0.4), ("0".to_string(), ""));
        assert_eq!(humanize(3.2e12), ("3.2".to_string(), "t"));
    }

    #[test]
    fn elapsed_minutes_do_not_wrap_at_an_hour() {
        assert_eq!(format_elapsed(3_599_000), "59:59");
        assert_eq!(format_elapsed(3_600_000), "60:00");
        assert_eq!(format_elapsed(3_661_000), "61:01");
    }

    #[test]
    fn elapsed_clamps_negative_durations() {
        assert_eq!(format_elapsed(-5_000), "00:00");
    }

    #[test]
    fn humanize_tolerates_non_finite_input() {
        assert_eq!(humanize(f64::NAN), ("0".to_string(), ""));
    }
}
