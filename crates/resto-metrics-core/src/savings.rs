//! Savings-opportunity detection.
//!
//! A cost line only materializes as an opportunity when its actual
//! percent-of-revenue strictly exceeds the industry ceiling of its
//! benchmark range. Lines without a comparable range, and the tips-paid
//! pass-through, never appear regardless of ratio.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::metrics::{percent_of_revenue, round_currency};
use crate::statements::{LineCategory, StatementSet};
use crate::types::{with_metadata, ComputationOutput, FiscalYear, Money, Rate};
use crate::RestoMetricsResult;

/// How many opportunities the roadmap surfaces. Every call site shows the
/// same top-N.
pub const ROADMAP_LEN: usize = 5;

const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One cost line spending above its industry ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsOpportunity {
    pub account: String,
    /// Current annual spend.
    pub current: Money,
    /// Actual spend as percent of revenue.
    pub actual_pct: Decimal,
    /// Industry maximum acceptable percent of revenue (as a fraction).
    pub ceiling: Rate,
    /// Implied dollar target at the ceiling, rounded.
    pub target: Money,
    /// current - target; always positive when an opportunity exists.
    pub savings: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsOutput {
    pub year: FiscalYear,
    /// Every detected opportunity, ranked descending by dollar savings.
    pub opportunities: Vec<SavingsOpportunity>,
    /// The top-N slice surfaced as "the roadmap".
    pub roadmap: Vec<SavingsOpportunity>,
    pub total_potential_savings: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Detect savings opportunities against industry ceilings for one year.
pub fn find_savings(
    set: &StatementSet,
    year_idx: usize,
) -> RestoMetricsResult<ComputationOutput<SavingsOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let yr = set.year_record(year_idx)?;
    let revenue = yr.revenue;

    let mut opportunities: Vec<SavingsOpportunity> = Vec::new();

    for item in &set.pnl {
        if item.category != LineCategory::Cost || item.is_subtotal {
            continue;
        }
        // Tips paid are structurally offset by an equal tips-received
        // income line; treating them as savings would double-count a
        // pass-through.
        if item.account == set.accounts.tips_paid {
            continue;
        }
        let Some(ceiling) = item.benchmark.ceiling() else {
            continue;
        };

        let current = item.values[year_idx];
        let actual_pct = percent_of_revenue(current, revenue);
        if actual_pct <= ceiling * HUNDRED {
            continue;
        }

        let target = round_currency(ceiling * revenue);
        let savings = current - target;
        opportunities.push(SavingsOpportunity {
            account: item.account.clone(),
            current,
            actual_pct,
            ceiling,
            target,
            savings,
        });
    }

    opportunities.sort_by(|a, b| b.savings.cmp(&a.savings));

    if opportunities.is_empty() {
        warnings.push("No cost line exceeds its industry ceiling.".to_string());
    }

    let total_potential_savings = opportunities.iter().map(|o| o.savings).sum();
    let roadmap = opportunities
        .iter()
        .take(ROADMAP_LEN)
        .cloned()
        .collect::<Vec<_>>();

    let output = SavingsOutput {
        year: yr.year,
        opportunities,
        roadmap,
        total_potential_savings,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Savings Opportunities vs Industry Ceilings",
        &yr.year,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
