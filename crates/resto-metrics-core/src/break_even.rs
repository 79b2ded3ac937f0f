//! Break-even levels.
//!
//! Three named targets are standard in this domain. The first two are
//! cost-coverage questions answered by the contribution-margin formula
//! `(fixed + addend) / c`; the third answers "what revenue would make the
//! current payroll equal the industry labor ratio" and is an independent
//! formula family. They must stay distinct.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RestoMetricsError;
use crate::metrics::round_currency;
use crate::statements::StatementSet;
use crate::types::{with_metadata, ComputationOutput, FiscalYear, Money, Rate};
use crate::RestoMetricsResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Assumptions the break-even levels depend on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenAssumptions {
    /// A fair annual salary for the owner; the gap between this and the
    /// owner's actual gross pay is the fair-pay fixed-cost addend.
    pub owner_target_salary: Money,
    /// Industry target for payroll as a fraction of revenue, e.g. 0.34.
    pub industry_labor_ratio: Rate,
}

/// Everything the break-even formulas consume for one year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenInput {
    pub year: FiscalYear,
    pub revenue: Money,
    pub total_cogs: Money,
    pub total_expenses: Money,
    pub total_payroll: Money,
    pub payment_processing: Money,
    /// Pass-through: offset by an equal tips-received income line, so it is
    /// excluded from the fixed-cost base.
    pub tips_paid: Money,
    pub owner_actual_pay: Money,
    pub owner_target_salary: Money,
    pub industry_labor_ratio: Rate,
}

impl BreakEvenInput {
    /// Assemble the input from the fixture set for one year.
    pub fn from_statements(
        set: &StatementSet,
        year_idx: usize,
        assumptions: &BreakEvenAssumptions,
    ) -> RestoMetricsResult<Self> {
        let yr = set.year_record(year_idx)?;
        let payment_processing = set.value_for(&set.accounts.payment_processing, year_idx)?;
        let tips_paid = set.value_for(&set.accounts.tips_paid, year_idx)?;
        let owner = set.owner_record(year_idx)?;

        Ok(BreakEvenInput {
            year: yr.year,
            revenue: yr.revenue,
            total_cogs: yr.total_cogs,
            total_expenses: yr.total_expenses,
            total_payroll: yr.payroll,
            payment_processing,
            tips_paid,
            owner_actual_pay: owner.gross_pay,
            owner_target_salary: assumptions.owner_target_salary,
            industry_labor_ratio: assumptions.industry_labor_ratio,
        })
    }
}

/// The three named break-even levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakEvenBasis {
    /// Cover the actual fixed-cost base.
    Accounting,
    /// Cover fixed costs plus the gap to a fair owner salary.
    FairOwnerPay,
    /// Revenue at which current payroll equals the industry labor ratio.
    IndustryStandard,
}

impl std::fmt::Display for BreakEvenBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BreakEvenBasis::Accounting => "Accounting break-even",
            BreakEvenBasis::FairOwnerPay => "Fair-owner-pay break-even",
            BreakEvenBasis::IndustryStandard => "Industry-standard break-even",
        };
        write!(f, "{s}")
    }
}

/// A break-even target. When variable costs alone consume all revenue
/// (contribution margin ≤ 0), no finite revenue covers the fixed base —
/// that is an explicit state, never a finite number and never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakEvenTarget {
    Reachable {
        /// Revenue needed, rounded to whole currency.
        target_revenue: Money,
        /// target_revenue - actual revenue (positive means short of target).
        gap: Money,
    },
    Unreachable,
}

impl BreakEvenTarget {
    pub fn target_revenue(&self) -> Option<Money> {
        match self {
            BreakEvenTarget::Reachable { target_revenue, .. } => Some(*target_revenue),
            BreakEvenTarget::Unreachable => None,
        }
    }
}

/// One computed level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenLevel {
    pub basis: BreakEvenBasis,
    /// Fixed-cost base the level covers (zero for the industry level,
    /// which is not a cost-coverage formula).
    pub fixed_base: Money,
    /// Fixed-cost addend on top of the base.
    pub addend: Money,
    pub target: BreakEvenTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenOutput {
    pub year: FiscalYear,
    pub fixed_costs: Money,
    pub variable_cost_rate: Rate,
    pub contribution_margin: Rate,
    pub levels: Vec<BreakEvenLevel>,
}

impl BreakEvenOutput {
    pub fn level(&self, basis: BreakEvenBasis) -> Option<&BreakEvenLevel> {
        self.levels.iter().find(|l| l.basis == basis)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The cost-coverage break-even formula: `(fixed + addend) / c`, rounded to
/// whole currency. This is the single implementation every surface uses.
pub fn cost_coverage_target(
    fixed_costs: Money,
    addend: Money,
    contribution_margin: Rate,
    actual_revenue: Money,
) -> BreakEvenTarget {
    if contribution_margin <= Decimal::ZERO {
        return BreakEvenTarget::Unreachable;
    }
    let target_revenue = round_currency((fixed_costs + addend) / contribution_margin);
    BreakEvenTarget::Reachable {
        target_revenue,
        gap: target_revenue - round_currency(actual_revenue),
    }
}

/// Compute all three break-even levels for one year.
pub fn analyze_break_even(
    input: &BreakEvenInput,
) -> RestoMetricsResult<ComputationOutput<BreakEvenOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    // Variable costs scale with sales: COGS plus card processing.
    let variable_costs = input.total_cogs + input.payment_processing;
    let variable_cost_rate = variable_costs / input.revenue;
    let contribution_margin = Decimal::ONE - variable_cost_rate;

    if contribution_margin <= Decimal::ZERO {
        warnings.push(
            "Variable costs consume all revenue; cost-coverage break-even is unreachable."
                .to_string(),
        );
    }

    // Fixed base: everything in operating expenses that does not scale with
    // sales. Tips paid are excluded as a pass-through.
    let fixed_costs = input.total_expenses - input.payment_processing - input.tips_paid;

    let accounting = BreakEvenLevel {
        basis: BreakEvenBasis::Accounting,
        fixed_base: fixed_costs,
        addend: Decimal::ZERO,
        target: cost_coverage_target(
            fixed_costs,
            Decimal::ZERO,
            contribution_margin,
            input.revenue,
        ),
    };

    let salary_gap = (input.owner_target_salary - input.owner_actual_pay).max(Decimal::ZERO);
    if salary_gap.is_zero() && input.owner_target_salary > Decimal::ZERO {
        warnings.push(
            "Owner already earns the target salary; fair-pay break-even equals accounting."
                .to_string(),
        );
    }
    let fair_owner_pay = BreakEvenLevel {
        basis: BreakEvenBasis::FairOwnerPay,
        fixed_base: fixed_costs,
        addend: salary_gap,
        target: cost_coverage_target(fixed_costs, salary_gap, contribution_margin, input.revenue),
    };

    // Different formula family: what revenue makes current payroll equal
    // the industry labor ratio. Not derived from contribution margin.
    let industry_target = round_currency(input.total_payroll / input.industry_labor_ratio);
    let industry_standard = BreakEvenLevel {
        basis: BreakEvenBasis::IndustryStandard,
        fixed_base: Decimal::ZERO,
        addend: Decimal::ZERO,
        target: BreakEvenTarget::Reachable {
            target_revenue: industry_target,
            gap: industry_target - round_currency(input.revenue),
        },
    };

    let output = BreakEvenOutput {
        year: input.year,
        fixed_costs,
        variable_cost_rate,
        contribution_margin,
        levels: vec![accounting, fair_owner_pay, industry_standard],
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Break-Even Levels (accounting / fair-owner-pay / industry-standard)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_input(input: &BreakEvenInput) -> RestoMetricsResult<()> {
    if input.revenue <= Decimal::ZERO {
        return Err(RestoMetricsError::InvalidInput {
            field: "revenue".into(),
            reason: format!("revenue must be positive, got {}", input.revenue),
        });
    }
    if input.industry_labor_ratio <= Decimal::ZERO {
        return Err(RestoMetricsError::InvalidInput {
            field: "industry_labor_ratio".into(),
            reason: "industry labor ratio must be positive".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
