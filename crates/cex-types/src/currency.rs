//! Per-currency amount scaling
//!
//! The remote reports raw integer-ish amounts that need a per-currency
//! `(scale, precision)` correction before display. Currencies without a
//! profile are satoshi-style and divide by 1e8.

use rust_decimal::Decimal;

/// Display profile for one currency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyProfile {
    /// Power-of-ten multiplier applied to the raw amount
    pub scale: u32,
    /// Number of fractional digits the raw amount encodes
    pub precision: u32,
}

const PROFILES: &[(&str, CurrencyProfile)] = &[
    ("BTC", CurrencyProfile { scale: 0, precision: 8 }),
    ("LTC", CurrencyProfile { scale: 0, precision: 8 }),
    ("USD", CurrencyProfile { scale: 0, precision: 2 }),
    ("EUR", CurrencyProfile { scale: 0, precision: 2 }),
    ("RUB", CurrencyProfile { scale: 0, precision: 2 }),
    ("DOGE", CurrencyProfile { scale: 2, precision: 2 }),
];

/// Look up the profile for a currency code (case-insensitive)
pub fn profile(currency: &str) -> Option<CurrencyProfile> {
    let upper = currency.to_uppercase();
    PROFILES
        .iter()
        .find(|(code, _)| *code == upper)
        .map(|(_, p)| *p)
}

/// Scale a raw remote amount into display units for the given currency
///
/// Unknown currencies fall back to dividing by 1e8.
pub fn format_amount(currency: &str, amount: Decimal) -> Decimal {
    match profile(currency) {
        Some(CurrencyProfile { scale, precision }) => {
            if scale > precision {
                // integer part padded with constant zeroes
                let zeroes = pow10(scale - precision + 1);
                amount.trunc() * zeroes
            } else {
                amount * pow10(scale) / pow10(precision)
            }
        }
        None => amount / pow10(8),
    }
}

fn pow10(exp: u32) -> Decimal {
    Decimal::from(10u64.pow(exp))
}
