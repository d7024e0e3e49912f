//! Integer-cent money arithmetic.
//!
//! The UI works in decimal currency units; storage holds integer cents.
//! All conversion goes through `rust_decimal` so the stored value never
//! depends on binary floating point.

use anyhow::{anyhow, bail, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Converts a decimal currency amount to integer cents.
///
/// Rejects negative amounts. Fractions of a cent round half-away-from-zero,
/// matching how the currency formatter displays them.
pub fn to_cents(amount: Decimal) -> Result<i64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        bail!("money amount cannot be negative: {amount}");
    }
    let cents = (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    cents
        .to_i64()
        .ok_or_else(|| anyhow!("money amount out of range: {amount}"))
}

/// Converts integer cents back to a decimal currency amount.
pub fn to_dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn whole_dollars() {
        assert_eq!(to_cents(dec("600")).unwrap(), 60_000);
    }

    #[test]
    fn fractional_cents_round_half_away_from_zero() {
        assert_eq!(to_cents(dec("10.005")).unwrap(), 1_001);
        assert_eq!(to_cents(dec("10.004")).unwrap(), 1_000);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(to_cents(dec("-1")).is_err());
    }

    #[test]
    fn roundtrip_is_exact() {
        for cents in [0i64, 1, 99, 100, 60_000, 123_456_789] {
            assert_eq!(to_cents(to_dollars(cents)).unwrap(), cents);
        }
    }
}
