use std::time::Duration;

/// Parses a lifetime such as `30d`, `12h`, `45m`, `90s` or a plain number of seconds.
///
/// # Arguments
/// - `value` - The string to parse; surrounding whitespace is ignored
///
/// # Returns
/// - `Some(Duration)` - Successfully parsed, non-zero lifetime
/// - `None` - Empty, zero, negative, overflowing or an unknown unit
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (amount, unit) = value.split_at(split);

    let amount: u64 = amount.parse().ok()?;
    let multiplier = match unit {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return None,
    };

    amount
        .checked_mul(multiplier)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_units() {
        assert_eq!(parse_duration("30d"), Some(Duration::from_secs(30 * 86_400)));
        assert_eq!(parse_duration("12h"), Some(Duration::from_secs(43_200)));
        assert_eq!(parse_duration("45m"), Some(Duration::from_secs(2_700)));
        assert_eq!(parse_duration("90s"), Some(Duration::from_secs(90)));
        assert_eq!(parse_duration(" 3600 "), Some(Duration::from_secs(3_600)));
    }

    #[test]
    fn rejects_garbage() {
        for value in ["", "d", "0", "0d", "-5m", "10w", "1.5h", "12 h"] {
            assert_eq!(parse_duration(value), None, "{value:?}");
        }
    }
}
