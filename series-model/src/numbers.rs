/// Parse a season or episode number from page input.
///
/// Reads like `parseInt` on legacy links: leading whitespace and a `+` sign
/// are skipped, then the leading run of ASCII digits is taken and anything
/// after it ignored, so `"2-temporada"` is 2 and `"5.0"` is 5. No leading
/// digit, a negative sign, or a value past `u32::MAX` yields `None`.
pub fn parse_ordinal(raw: &str) -> Option<u32> {
    let rest = raw.trim_start();
    let rest = rest.strip_prefix('+').unwrap_or(rest);
    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_ordinal;

    #[test]
    fn accepts_plain_digits() {
        assert_eq!(parse_ordinal("2"), Some(2));
        assert_eq!(parse_ordinal(" 12 "), Some(12));
        assert_eq!(parse_ordinal("0"), Some(0));
        assert_eq!(parse_ordinal("+3"), Some(3));
    }

    #[test]
    fn takes_the_leading_digit_run() {
        assert_eq!(parse_ordinal("2-temporada"), Some(2));
        assert_eq!(parse_ordinal("5.0"), Some(5));
        assert_eq!(parse_ordinal("2a"), Some(2));
        assert_eq!(parse_ordinal("\t07x"), Some(7));
    }

    #[test]
    fn rejects_input_without_leading_digits() {
        assert_eq!(parse_ordinal(""), None);
        assert_eq!(parse_ordinal("   "), None);
        assert_eq!(parse_ordinal("two"), None);
        assert_eq!(parse_ordinal("a2"), None);
        assert_eq!(parse_ordinal("-1"), None);
        assert_eq!(parse_ordinal("+"), None);
        assert_eq!(parse_ordinal("99999999999"), None);
    }
}
