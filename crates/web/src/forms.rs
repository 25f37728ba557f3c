//! Parsing of free-text form input.

/// Decimal price (`"12.5"`, `"12.50"`, `"12"`) to minor units.
pub fn parse_price(input: &str) -> Option<u64> {
    let input = input.trim();
    let (whole, frac) = input.split_once('.').unwrap_or((input, ""));
    if frac.len() > 2 || (whole.is_empty() && frac.is_empty()) {
        return None;
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let cents: u64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<u64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    whole.checked_mul(100)?.checked_add(cents)
}

/// Whole percentage between 1 and 100.
pub fn parse_percent(input: &str) -> Option<u32> {
    let value: u32 = input.trim().trim_end_matches('%').trim().parse().ok()?;
    (1..=100).contains(&value).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices() {
        assert_eq!(parse_price("12"), Some(1200));
        assert_eq!(parse_price("12.5"), Some(1250));
        assert_eq!(parse_price(" 12.05 "), Some(1205));
        assert_eq!(parse_price(".99"), Some(99));
        assert_eq!(parse_price("0.00"), Some(0));
    }

    #[test]
    fn rejects_bad_prices() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("."), None);
        assert_eq!(parse_price("1.999"), None);
        assert_eq!(parse_price("-1"), None);
        assert_eq!(parse_price("1.-5"), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price("99999999999999999999"), None);
    }

    #[test]
    fn percents() {
        assert_eq!(parse_percent("15"), Some(15));
        assert_eq!(parse_percent("15 %"), Some(15));
        assert_eq!(parse_percent("0"), None);
        assert_eq!(parse_percent("101"), None);
    }
}
