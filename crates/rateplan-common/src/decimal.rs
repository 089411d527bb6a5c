//! Money helpers
//!
//! Truncation operates on the exact decimal expansion, so values such as `0.1 + 0.2`
//! never pick up binary floating point artifacts before the cut.

use rust_decimal::prelude::*;
use serde_json::Value;

/// Fractional digits kept on every reported amount
pub const MONEY_SCALE: u32 = 2;

/// Largest base rate or flat add-on accepted, in either direction
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Largest tax rate or percentage surcharge accepted, in either direction
pub const MAX_RATE: Decimal = Decimal::ONE;

/// Most adjustments a profile may hold.
///
/// With every input inside [`MAX_AMOUNT`] and [`MAX_RATE`], the largest reachable
/// amount is `(1 + 32) * 10^6 * 2^32 * 2`, far below `Decimal::MAX`, so pricing never
/// overflows.
pub const MAX_ADJUSTMENTS: usize = 32;

/// Truncate toward zero to two fractional digits.
///
/// `0.408` becomes `0.40`, never `0.41`. The result always carries a scale of exactly
/// two, so `60` is reported as `60.00`.
pub fn truncate2(value: Decimal) -> Decimal {
    let mut truncated = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::ToZero);
    truncated.rescale(MONEY_SCALE);
    truncated
}

/// Parse a JSON number or numeric string into an exact decimal.
///
/// Numbers go through their textual form so `0.01` stays `0.01`. Booleans, nulls and
/// non-numeric strings yield `None`.
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal_str(&n.to_string()),
        Value::String(s) => parse_decimal_str(s.trim()),
        _ => None,
    }
}

/// `value` lies in `-bound..=bound`
pub fn within(value: Decimal, bound: Decimal) -> bool {
    value.abs() <= bound
}

fn parse_decimal_str(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_truncate_does_not_round() {
        assert_eq!(truncate2(dec!(0.408)), dec!(0.40));
        assert_eq!(truncate2(dec!(41.208)), dec!(41.20));
        assert_eq!(truncate2(dec!(0.999)), dec!(0.99));
    }

    #[test]
    fn test_truncate_negative_toward_zero() {
        assert_eq!(truncate2(dec!(-0.408)), dec!(-0.40));
        assert_eq!(truncate2(dec!(-19.001)).to_string(), "-19.00");
    }

    #[test]
    fn test_within_bounds() {
        assert!(within(MAX_AMOUNT, MAX_AMOUNT));
        assert!(within(-MAX_AMOUNT, MAX_AMOUNT));
        assert!(!within(MAX_AMOUNT + dec!(0.01), MAX_AMOUNT));
        assert!(!within(dec!(-1.5), MAX_RATE));
    }

    #[test]
    fn test_truncate_pads_to_two_digits() {
        let value = truncate2(dec!(60));
        assert_eq!(value.scale(), 2);
        assert_eq!(value.to_string(), "60.00");
        assert_eq!(truncate2(dec!(1.5)).to_string(), "1.50");
    }

    #[test]
    fn test_truncate_exact_sum() {
        assert_eq!(truncate2(dec!(0.1) + dec!(0.2)).to_string(), "0.30");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(&json!(0.01)), Some(dec!(0.01)));
        assert_eq!(parse_decimal(&json!(20)), Some(dec!(20)));
        assert_eq!(parse_decimal(&json!("0.005")), Some(dec!(0.005)));
        assert_eq!(parse_decimal(&json!("1e-2")), Some(dec!(0.01)));
        assert_eq!(parse_decimal(&json!("abc")), None);
        assert_eq!(parse_decimal(&json!(true)), None);
        assert_eq!(parse_decimal(&json!(null)), None);
    }

    proptest! {
        #[test]
        fn prop_truncate_is_within_one_cent(mantissa in 0i64..10_000_000_000i64, scale in 0u32..8) {
            let value = Decimal::new(mantissa, scale);
            let truncated = truncate2(value);
            prop_assert!(truncated <= value);
            prop_assert!(truncated > value - dec!(0.01));
        }
    }
}
