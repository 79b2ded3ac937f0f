//! Presentation adapters.
//!
//! The single source of truth for rendering currency and percent values.
//! Screen tables and both export serializers format through these two
//! functions; a divergence between surfaces is a correctness bug here, not
//! a style choice at a call site.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::metrics::round_currency;
use crate::types::Money;

const THOUSAND: Decimal = dec!(1_000);
const MILLION: Decimal = dec!(1_000_000);

/// Currency for display. Full form is whole dollars with thousands
/// separators ("$1,235"). Compact form uses K/M suffixes with one decimal
/// place and the sign before the symbol ("-$1.2K", never "$-1.2K").
pub fn format_currency(amount: Money, compact: bool) -> String {
    let rounded = round_currency(amount);
    let negative = rounded < Decimal::ZERO;
    let abs = rounded.abs();
    let sign = if negative { "-" } else { "" };

    if compact && abs >= THOUSAND {
        let (scaled, suffix) = if abs >= MILLION {
            (abs / MILLION, "M")
        } else {
            (abs / THOUSAND, "K")
        };
        let scaled = scaled.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        return format!("{sign}${scaled:.1}{suffix}");
    }

    format!("{sign}${}", group_thousands(&abs.normalize().to_string()))
}

/// Percent for display, default one decimal place at call sites.
pub fn format_percent(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}%", decimals as usize, rounded)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let bytes = digits.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}
