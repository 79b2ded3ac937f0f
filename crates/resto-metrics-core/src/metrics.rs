//! Metric primitives: stateless arithmetic over plain numbers.
//!
//! These functions know nothing about fixture shape. Every division is
//! guarded — zero denominators resolve to a defined sentinel, never to
//! `NaN`/`Infinity` leaking into a displayed figure.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::Money;

const HUNDRED: Decimal = dec!(100);

/// A value as a percentage of revenue. Zero revenue resolves to 0 rather
/// than a misleading large number.
pub fn percent_of_revenue(value: Money, revenue: Money) -> Decimal {
    if revenue.is_zero() {
        return Decimal::ZERO;
    }
    value / revenue * HUNDRED
}

/// Year-over-year percent change. Defined as 0 when the previous value is
/// exactly zero — an explicit policy choice, not an error.
pub fn yoy_change(current: Money, previous: Money) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    (current - previous) / previous.abs() * HUNDRED
}

/// Weighted average over (value, weight) pairs. Returns 0 when the total
/// weight is zero.
pub fn weighted_average(pairs: &[(Decimal, Decimal)]) -> Decimal {
    let total_weight: Decimal = pairs.iter().map(|(_, w)| *w).sum();
    if total_weight.is_zero() {
        return Decimal::ZERO;
    }
    let weighted_sum: Decimal = pairs.iter().map(|(v, w)| v * w).sum();
    weighted_sum / total_weight
}

/// Round to whole currency units, half away from zero. Every displayed or
/// compared figure goes through this one function so two call sites
/// computing "the same" number never disagree after rounding.
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Division with a 0 sentinel on a zero denominator.
pub fn safe_divide(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator / denominator
}
