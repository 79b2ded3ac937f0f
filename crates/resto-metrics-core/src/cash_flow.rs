//! Cash-flow bridge.
//!
//! Indirect-method bridge from net income to the change in cash, for a
//! target year against the prior year. The computed net change MUST
//! reconcile to the balance-sheet cash delta — that reconciliation is the
//! correctness property of this whole module and is asserted, not assumed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RestoMetricsError;
use crate::statements::StatementSet;
use crate::types::{with_metadata, ComputationOutput, FiscalYear, Money};
use crate::RestoMetricsResult;

/// Reconciliation must hold to within cent rounding.
const CASH_TOLERANCE: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Year-over-year movement in one balance-sheet account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDelta {
    pub account: String,
    pub delta: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowBridge {
    pub year: FiscalYear,
    pub prior_year: FiscalYear,
    pub net_income: Money,
    pub depreciation: Money,
    /// Per-account working-capital movements (current liabilities).
    pub working_capital: Vec<AccountDelta>,
    pub working_capital_change: Money,
    pub operating_cash: Money,
    pub loan_change: Money,
    pub dividend_change: Money,
    pub financing_cash: Money,
    pub net_cash_change: Money,
    pub prior_ending_cash: Money,
    pub ending_cash: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the cash-flow bridge for `year_idx` against the prior year.
///
/// `year_idx` must be 1 or later; there is no prior year to bridge from
/// for the earliest tracked year.
pub fn cash_flow_bridge(
    set: &StatementSet,
    year_idx: usize,
) -> RestoMetricsResult<ComputationOutput<CashFlowBridge>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    if year_idx == 0 {
        return Err(RestoMetricsError::InvalidInput {
            field: "year_idx".into(),
            reason: "the earliest tracked year has no prior year to bridge from".into(),
        });
    }
    let yr = set.year_record(year_idx)?;
    let prior = set.year_record(year_idx - 1)?;

    let depreciation = set.value_for(&set.accounts.depreciation, year_idx)?;

    // Working capital: movement in each named current-liability account.
    let mut working_capital = Vec::with_capacity(set.accounts.working_capital_accounts.len());
    let mut working_capital_change = Decimal::ZERO;
    for account in &set.accounts.working_capital_accounts {
        let delta = set.value_for(account, year_idx)? - set.value_for(account, year_idx - 1)?;
        working_capital_change += delta;
        working_capital.push(AccountDelta {
            account: account.clone(),
            delta,
        });
    }

    let operating_cash = yr.net_income + depreciation + working_capital_change;

    let loan_change = set.value_for(&set.accounts.long_term_loan, year_idx)?
        - set.value_for(&set.accounts.long_term_loan, year_idx - 1)?;
    let dividend_change = set.value_for(&set.accounts.dividends_paid, year_idx)?
        - set.value_for(&set.accounts.dividends_paid, year_idx - 1)?;
    let financing_cash = loan_change + dividend_change;

    let net_cash_change = operating_cash + financing_cash;

    let ending_cash = set.value_for(&set.accounts.ending_cash, year_idx)?;
    let prior_ending_cash = set.value_for(&set.accounts.ending_cash, year_idx - 1)?;

    // The core correctness property: the bridge must land on the
    // balance-sheet cash movement.
    let residual = net_cash_change - (ending_cash - prior_ending_cash);
    if residual.abs() > CASH_TOLERANCE {
        return Err(RestoMetricsError::ReconciliationFailure {
            context: format!("cash-flow bridge {} -> {}", prior.year, yr.year),
            delta: residual,
        });
    }

    let output = CashFlowBridge {
        year: yr.year,
        prior_year: prior.year,
        net_income: yr.net_income,
        depreciation,
        working_capital,
        working_capital_change,
        operating_cash,
        loan_change,
        dividend_change,
        financing_cash,
        net_cash_change,
        prior_ending_cash,
        ending_cash,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Cash-Flow Bridge (indirect method)",
        &(prior.year, yr.year),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
