//! What-if scenarios.
//!
//! The dashboard's sliders feed this one pure function: adjust sales
//! volume, food cost, labor, and fixed overhead, then recompute the
//! operating picture and the accounting break-even under the adjusted cost
//! structure. No stored state — every slider move recomputes from the
//! fixture.
//!
//! Tips are netted out of both sides (pass-through), so the operating
//! income here is net ordinary income plus tips paid.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::break_even::{cost_coverage_target, BreakEvenTarget};
use crate::error::RestoMetricsError;
use crate::statements::StatementSet;
use crate::types::{with_metadata, ComputationOutput, FiscalYear, Money, Rate};
use crate::RestoMetricsResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Slider positions, all relative to the chosen year's actuals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Sales volume change as a fraction (0.05 = +5%). Variable costs
    /// (COGS, card processing) scale with it.
    pub revenue_delta_pct: Rate,
    /// Change in food cost per dollar of sales (applied on top of the
    /// volume scaling).
    pub food_cost_delta_pct: Rate,
    /// Absolute change to annual payroll.
    pub labor_delta: Money,
    /// Absolute change to annual fixed overhead.
    pub other_fixed_delta: Money,
}

impl ScenarioInput {
    /// The do-nothing scenario.
    pub fn baseline() -> Self {
        ScenarioInput {
            revenue_delta_pct: Decimal::ZERO,
            food_cost_delta_pct: Decimal::ZERO,
            labor_delta: Decimal::ZERO,
            other_fixed_delta: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutput {
    pub year: FiscalYear,
    pub revenue: Money,
    pub cogs: Money,
    pub payment_processing: Money,
    pub payroll: Money,
    pub other_fixed: Money,
    pub contribution_margin: Rate,
    /// Operating income with tips netted out.
    pub operating_income: Money,
    pub baseline_operating_income: Money,
    pub operating_income_change: Money,
    /// Accounting break-even under the adjusted cost structure.
    pub break_even: BreakEvenTarget,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Recompute the operating picture under adjusted assumptions.
pub fn run_scenario(
    set: &StatementSet,
    year_idx: usize,
    input: &ScenarioInput,
) -> RestoMetricsResult<ComputationOutput<ScenarioOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let yr = set.year_record(year_idx)?;
    let base_processing = set.value_for(&set.accounts.payment_processing, year_idx)?;
    let tips_paid = set.value_for(&set.accounts.tips_paid, year_idx)?;

    let base_other_fixed = yr.total_expenses - yr.payroll - base_processing - tips_paid;
    let baseline_operating_income =
        yr.revenue - yr.total_cogs - base_processing - yr.payroll - base_other_fixed;

    let volume = Decimal::ONE + input.revenue_delta_pct;
    let revenue = yr.revenue * volume;
    let cogs = yr.total_cogs * volume * (Decimal::ONE + input.food_cost_delta_pct);
    let payment_processing = base_processing * volume;
    let payroll = yr.payroll + input.labor_delta;
    let other_fixed = base_other_fixed + input.other_fixed_delta;

    if payroll < Decimal::ZERO {
        return Err(RestoMetricsError::InvalidInput {
            field: "labor_delta".into(),
            reason: "adjusted payroll cannot go negative".into(),
        });
    }

    let operating_income = revenue - cogs - payment_processing - payroll - other_fixed;

    let contribution_margin = if revenue.is_zero() {
        Decimal::ZERO
    } else {
        Decimal::ONE - (cogs + payment_processing) / revenue
    };

    let fixed_costs = payroll + other_fixed;
    let break_even = cost_coverage_target(fixed_costs, Decimal::ZERO, contribution_margin, revenue);
    if break_even == BreakEvenTarget::Unreachable {
        warnings.push(
            "Adjusted variable costs consume all revenue; break-even is unreachable.".to_string(),
        );
    }

    let output = ScenarioOutput {
        year: yr.year,
        revenue,
        cogs,
        payment_processing,
        payroll,
        other_fixed,
        contribution_margin,
        operating_income,
        baseline_operating_income,
        operating_income_change: operating_income - baseline_operating_income,
        break_even,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "What-If Scenario (volume / food cost / labor / overhead)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_input(input: &ScenarioInput) -> RestoMetricsResult<()> {
    if input.revenue_delta_pct <= Decimal::NEGATIVE_ONE {
        return Err(RestoMetricsError::InvalidInput {
            field: "revenue_delta_pct".into(),
            reason: "sales cannot fall more than 100%".into(),
        });
    }
    if input.food_cost_delta_pct <= Decimal::NEGATIVE_ONE {
        return Err(RestoMetricsError::InvalidInput {
            field: "food_cost_delta_pct".into(),
            reason: "food cost cannot fall more than 100%".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
