//! Fixed-point formatting of raw token amounts.

use num_bigint::BigUint;

use super::error::QueryError;

/// Parse a raw token amount as returned by the backend.
///
/// Only non-negative base-10 integers are accepted.
pub fn parse_raw_amount(raw: &str) -> Result<BigUint, QueryError> {
    let s = raw.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QueryError::Decode(format!("Cannot convert {raw} to a token amount")));
    }
    s.parse::<BigUint>()
        .map_err(|e| QueryError::Decode(format!("Cannot convert {raw} to a token amount: {e}")))
}

/// Format `value / 10^decimals` as a decimal string.
///
/// Trailing zeros of the fraction are dropped, and so is the dot when the
/// fraction is empty: `1500000000000000000` at 18 decimals is `"1.5"`.
pub fn format_units(value: &BigUint, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let scale = BigUint::from(10u32).pow(u32::from(decimals));
    let int = value / &scale;
    let frac = value % &scale;

    let frac = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    let frac = frac.trim_end_matches('0');

    if frac.is_empty() {
        int.to_string()
    } else {
        format!("{int}.{frac}")
    }
}

/// Format a raw amount string for display.
///
/// Falls back to the raw string unchanged while decimals are unknown.
pub fn display_amount(raw: &str, decimals: Option<u8>) -> Result<String, QueryError> {
    match decimals {
        Some(decimals) => Ok(format_units(&parse_raw_amount(raw)?, decimals)),
        None => Ok(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(raw: &str, decimals: u8) -> String {
        format_units(&parse_raw_amount(raw).unwrap(), decimals)
    }

    #[test]
    fn test_format_whole_token() {
        assert_eq!(fmt("1000000000000000000", 18), "1");
        assert_eq!(fmt("42000000", 6), "42");
    }

    #[test]
    fn test_format_fraction() {
        assert_eq!(fmt("1500000000000000000", 18), "1.5");
        assert_eq!(fmt("1", 18), "0.000000000000000001");
        assert_eq!(fmt("123456789", 4), "12345.6789");
    }

    #[test]
    fn test_format_zero_and_no_decimals() {
        assert_eq!(fmt("0", 18), "0");
        assert_eq!(fmt("987", 0), "987");
    }

    #[test]
    fn test_format_beyond_u128() {
        let raw = "340282366920938463463374607431768211456000000000000000000";
        assert_eq!(fmt(raw, 18), "340282366920938463463374607431768211456");
    }

    #[test]
    fn test_display_amount_without_decimals_is_raw() {
        assert_eq!(display_amount("1000000000000000000", None).unwrap(), "1000000000000000000");
        // No parsing happens on the fallback path.
        assert_eq!(display_amount("not-a-number", None).unwrap(), "not-a-number");
    }

    #[test]
    fn test_rejects_non_integers() {
        for raw in ["", "-5", "1.5", "0x10", "abc"] {
            assert!(matches!(parse_raw_amount(raw), Err(QueryError::Decode(_))), "{raw:?}");
        }
    }
}
