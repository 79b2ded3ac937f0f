//! Business snapshot.
//!
//! The single composition every surface consumes: the KPI set, the three
//! break-even levels, the savings roadmap, and the health score, computed
//! once by the same shared functions. Screen tables and both export
//! serializers call this and nothing else, so their figures cannot drift
//! apart.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::break_even::{analyze_break_even, BreakEvenAssumptions, BreakEvenInput, BreakEvenOutput};
use crate::forecast::ProjectionPolicy;
use crate::health::{health_score, HealthScoreOutput};
use crate::metrics::{percent_of_revenue, yoy_change};
use crate::savings::{find_savings, SavingsOpportunity};
use crate::statements::StatementSet;
use crate::types::{with_metadata, ComputationOutput, FiscalYear, Money};
use crate::RestoMetricsResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Assumptions threaded through the snapshot's sub-analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotAssumptions {
    pub break_even: BreakEvenAssumptions,
    pub forecast_policy: ProjectionPolicy,
}

impl Default for SnapshotAssumptions {
    fn default() -> Self {
        SnapshotAssumptions {
            break_even: BreakEvenAssumptions {
                owner_target_salary: dec!(65_000),
                industry_labor_ratio: dec!(0.34),
            },
            forecast_policy: ProjectionPolicy::default(),
        }
    }
}

/// Headline figures for one year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiSet {
    pub revenue: Money,
    pub revenue_yoy: Decimal,
    pub net_income: Money,
    pub net_income_yoy: Decimal,
    pub gross_margin_pct: Decimal,
    pub food_cost_pct: Decimal,
    pub labor_cost_pct: Decimal,
    pub prime_cost_pct: Decimal,
    pub total_assets: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessSnapshot {
    pub business_name: String,
    pub year: FiscalYear,
    pub kpis: KpiSet,
    pub break_even: BreakEvenOutput,
    /// Top-N savings opportunities, ranked.
    pub roadmap: Vec<SavingsOpportunity>,
    pub total_potential_savings: Money,
    pub health: HealthScoreOutput,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compose the full snapshot for one year. Needs a prior year for the YoY
/// figures, so `year_idx` must be 1 or later.
pub fn business_snapshot(
    set: &StatementSet,
    year_idx: usize,
    assumptions: &SnapshotAssumptions,
) -> RestoMetricsResult<ComputationOutput<BusinessSnapshot>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let yr = set.year_record(year_idx)?;
    let prior = set.year_record(year_idx.checked_sub(1).ok_or_else(|| {
        crate::RestoMetricsError::InvalidInput {
            field: "year_idx".into(),
            reason: "the snapshot needs a prior year for YoY figures".into(),
        }
    })?)?;

    let kpis = KpiSet {
        revenue: yr.revenue,
        revenue_yoy: yoy_change(yr.revenue, prior.revenue),
        net_income: yr.net_income,
        net_income_yoy: yoy_change(yr.net_income, prior.net_income),
        gross_margin_pct: percent_of_revenue(yr.gross_profit, yr.revenue),
        food_cost_pct: percent_of_revenue(yr.total_cogs, yr.revenue),
        labor_cost_pct: percent_of_revenue(yr.payroll, yr.revenue),
        prime_cost_pct: percent_of_revenue(yr.total_cogs + yr.payroll, yr.revenue),
        total_assets: yr.total_assets,
    };

    let break_even_input = BreakEvenInput::from_statements(set, year_idx, &assumptions.break_even)?;
    let break_even = analyze_break_even(&break_even_input)?;
    warnings.extend(break_even.warnings.clone());

    let savings = find_savings(set, year_idx)?;
    warnings.extend(savings.warnings.clone());

    let health = health_score(set, year_idx)?;
    warnings.extend(health.warnings.clone());

    let output = BusinessSnapshot {
        business_name: set.business_name.clone(),
        year: yr.year,
        kpis,
        break_even: break_even.result,
        roadmap: savings.result.roadmap,
        total_potential_savings: savings.result.total_potential_savings,
        health: health.result,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Business Snapshot (KPIs / break-even / roadmap / health)",
        &(yr.year, &set.business_name),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::break_even::BreakEvenBasis;
    use crate::statements::{
        AccountNames, Benchmark, LineCategory, LineItem, StatementSet, WageRecord, YearRecord,
    };
    use rust_decimal_macros::dec;

    fn year_record(year: FiscalYear, revenue: Money, net_income: Money) -> YearRecord {
        YearRecord {
            year,
            revenue,
            total_cogs: revenue * dec!(0.25),
            gross_profit: revenue * dec!(0.75),
            total_expenses: revenue * dec!(0.70),
            payroll: revenue * dec!(0.40),
            net_ordinary_income: revenue * dec!(0.05),
            other_income: Decimal::ZERO,
            other_expense: Decimal::ZERO,
            net_income,
            total_assets: dec!(80_000),
        }
    }

    fn sample_set() -> StatementSet {
        let years = [2023, 2024, 2025];
        let revenues = [dec!(200_000), dec!(220_000), dec!(240_000)];
        let pnl = vec![
            LineItem::plain(
                "Payment Processing Fees",
                [dec!(6_000), dec!(6_600), dec!(7_200)],
                LineCategory::Cost,
            )
            .with_benchmark(Benchmark::parse("~3%").unwrap()),
            LineItem::plain(
                "Tips Paid",
                [dec!(20_000), dec!(22_000), dec!(24_000)],
                LineCategory::Cost,
            )
            .with_benchmark(Benchmark::parse("100%").unwrap()),
            LineItem::plain(
                "Payroll & Wages",
                [dec!(80_000), dec!(88_000), dec!(96_000)],
                LineCategory::Cost,
            )
            .with_benchmark(Benchmark::parse("30-34%").unwrap()),
            LineItem::plain(
                "Rent",
                [dec!(30_000), dec!(31_000), dec!(32_000)],
                LineCategory::Cost,
            )
            .with_benchmark(Benchmark::parse("8-12%").unwrap()),
        ];
        let balance = vec![LineItem::plain(
            "Business Chequing",
            [dec!(15_000), dec!(18_000), dec!(21_000)],
            LineCategory::CurrentAsset,
        )];
        let owner = WageRecord {
            name: "Marco Beltran".into(),
            role: "Owner".into(),
            hourly_rate: None,
            hours: dec!(2_300),
            gross_pay: dec!(36_000),
            employer_tax: dec!(2_950),
        };
        StatementSet {
            business_name: "Test Kitchen".into(),
            years,
            annual: [
                year_record(2023, revenues[0], dec!(10_000)),
                year_record(2024, revenues[1], dec!(11_000)),
                year_record(2025, revenues[2], dec!(12_500)),
            ],
            pnl,
            balance,
            rosters: [vec![owner.clone()], vec![owner.clone()], vec![owner]],
            minimum_wage: [dec!(16.55), dec!(17.20), dec!(17.20)],
            accounts: AccountNames::default(),
        }
    }

    #[test]
    fn test_snapshot_kpis() {
        let set = sample_set();
        let result = business_snapshot(&set, 2, &SnapshotAssumptions::default()).unwrap();
        let snap = &result.result;

        assert_eq!(snap.year, 2025);
        assert_eq!(snap.kpis.revenue, dec!(240_000));
        assert_eq!(
            snap.kpis.revenue_yoy,
            yoy_change(dec!(240_000), dec!(220_000))
        );
        assert_eq!(snap.kpis.food_cost_pct, dec!(25));
        assert_eq!(snap.kpis.labor_cost_pct, dec!(40));
        assert_eq!(snap.kpis.prime_cost_pct, dec!(65));
    }

    #[test]
    fn test_snapshot_carries_all_three_break_even_levels() {
        let set = sample_set();
        let result = business_snapshot(&set, 2, &SnapshotAssumptions::default()).unwrap();
        let be = &result.result.break_even;
        assert_eq!(be.levels.len(), 3);
        assert!(be.level(BreakEvenBasis::Accounting).is_some());
        assert!(be.level(BreakEvenBasis::FairOwnerPay).is_some());
        assert!(be.level(BreakEvenBasis::IndustryStandard).is_some());
    }

    #[test]
    fn test_snapshot_roadmap_comes_from_savings_detection() {
        let set = sample_set();
        let result = business_snapshot(&set, 2, &SnapshotAssumptions::default()).unwrap();
        let roadmap = &result.result.roadmap;

        // Payroll 40% > 34% and rent 13.3% > 12% both materialize;
        // tips and processing never do.
        let accounts: Vec<&str> = roadmap.iter().map(|o| o.account.as_str()).collect();
        assert_eq!(accounts, ["Payroll & Wages", "Rent"]);
    }

    #[test]
    fn test_snapshot_requires_prior_year() {
        let set = sample_set();
        assert!(business_snapshot(&set, 0, &SnapshotAssumptions::default()).is_err());
    }
}
