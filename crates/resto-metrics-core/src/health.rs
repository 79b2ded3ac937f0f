//! Financial health scoring.
//!
//! A fixed rubric classifies this business's actual ratios into scored
//! status tiers. The thresholds live in one declarative table so the whole
//! rubric is auditable in one place — classification walks the table, no
//! inline conditional chains.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RestoMetricsError;
use crate::metrics::{percent_of_revenue, safe_divide, yoy_change};
use crate::statements::StatementSet;
use crate::types::{with_metadata, ComputationOutput, FiscalYear};
use crate::RestoMetricsResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Rubric types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Critical,
    Warning,
    Fair,
    Good,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HealthStatus::Critical => "Critical",
            HealthStatus::Warning => "Warning",
            HealthStatus::Fair => "Fair",
            HealthStatus::Good => "Good",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthCategory {
    SalesTrend,
    FoodCost,
    LaborCost,
    ProfitMargin,
    PrimeCost,
    AssetBase,
    CashRunway,
}

impl std::fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HealthCategory::SalesTrend => "Sales trend",
            HealthCategory::FoodCost => "Food cost ratio",
            HealthCategory::LaborCost => "Labor cost ratio",
            HealthCategory::ProfitMargin => "Profit margin",
            HealthCategory::PrimeCost => "Prime cost",
            HealthCategory::AssetBase => "Asset base",
            HealthCategory::CashRunway => "Cash runway",
        };
        write!(f, "{s}")
    }
}

/// One threshold band: matches when `floor <= value < ceiling` (either
/// bound open when absent). Bands are walked in order; the first match
/// wins, and each list ends in a catch-all.
#[derive(Debug, Clone, Copy)]
pub struct ScoreBand {
    pub floor: Option<Decimal>,
    pub ceiling: Option<Decimal>,
    pub score: u32,
    pub status: HealthStatus,
}

/// One category's rubric entry.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRubric {
    pub category: HealthCategory,
    pub max_score: u32,
    pub bands: &'static [ScoreBand],
}

const fn band(
    floor: Option<Decimal>,
    ceiling: Option<Decimal>,
    score: u32,
    status: HealthStatus,
) -> ScoreBand {
    ScoreBand {
        floor,
        ceiling,
        score,
        status,
    }
}

/// Revenue YoY percent change.
const SALES_TREND_BANDS: &[ScoreBand] = &[
    band(Some(dec!(10)), None, 15, HealthStatus::Good),
    band(Some(dec!(0)), Some(dec!(10)), 10, HealthStatus::Fair),
    band(Some(dec!(-10)), Some(dec!(0)), 5, HealthStatus::Warning),
    band(None, Some(dec!(-10)), 0, HealthStatus::Critical),
];

/// COGS as percent of revenue.
const FOOD_COST_BANDS: &[ScoreBand] = &[
    band(None, Some(dec!(28)), 15, HealthStatus::Good),
    band(Some(dec!(28)), Some(dec!(32)), 10, HealthStatus::Fair),
    band(Some(dec!(32)), Some(dec!(36)), 5, HealthStatus::Warning),
    band(Some(dec!(36)), None, 0, HealthStatus::Critical),
];

/// Payroll as percent of revenue.
const LABOR_COST_BANDS: &[ScoreBand] = &[
    band(None, Some(dec!(30)), 20, HealthStatus::Good),
    band(Some(dec!(30)), Some(dec!(36)), 13, HealthStatus::Fair),
    band(Some(dec!(36)), Some(dec!(45)), 6, HealthStatus::Warning),
    band(Some(dec!(45)), None, 0, HealthStatus::Critical),
];

/// Net income as percent of revenue.
const PROFIT_MARGIN_BANDS: &[ScoreBand] = &[
    band(Some(dec!(10)), None, 20, HealthStatus::Good),
    band(Some(dec!(5)), Some(dec!(10)), 14, HealthStatus::Fair),
    band(Some(dec!(0)), Some(dec!(5)), 7, HealthStatus::Warning),
    band(None, Some(dec!(0)), 0, HealthStatus::Critical),
];

/// COGS + payroll as percent of revenue.
const PRIME_COST_BANDS: &[ScoreBand] = &[
    band(None, Some(dec!(60)), 15, HealthStatus::Good),
    band(Some(dec!(60)), Some(dec!(65)), 10, HealthStatus::Fair),
    band(Some(dec!(65)), Some(dec!(75)), 5, HealthStatus::Warning),
    band(Some(dec!(75)), None, 0, HealthStatus::Critical),
];

/// Total assets in dollars.
const ASSET_BASE_BANDS: &[ScoreBand] = &[
    band(Some(dec!(100_000)), None, 5, HealthStatus::Good),
    band(Some(dec!(50_000)), Some(dec!(100_000)), 3, HealthStatus::Fair),
    band(Some(dec!(20_000)), Some(dec!(50_000)), 1, HealthStatus::Warning),
    band(None, Some(dec!(20_000)), 0, HealthStatus::Critical),
];

/// Months of operating expenses covered by cash on hand.
const CASH_RUNWAY_BANDS: &[ScoreBand] = &[
    band(Some(dec!(6)), None, 10, HealthStatus::Good),
    band(Some(dec!(3)), Some(dec!(6)), 6, HealthStatus::Fair),
    band(Some(dec!(1)), Some(dec!(3)), 3, HealthStatus::Warning),
    band(None, Some(dec!(1)), 0, HealthStatus::Critical),
];

/// The whole rubric. Max scores sum to 100.
pub const RUBRIC: &[CategoryRubric] = &[
    CategoryRubric {
        category: HealthCategory::SalesTrend,
        max_score: 15,
        bands: SALES_TREND_BANDS,
    },
    CategoryRubric {
        category: HealthCategory::FoodCost,
        max_score: 15,
        bands: FOOD_COST_BANDS,
    },
    CategoryRubric {
        category: HealthCategory::LaborCost,
        max_score: 20,
        bands: LABOR_COST_BANDS,
    },
    CategoryRubric {
        category: HealthCategory::ProfitMargin,
        max_score: 20,
        bands: PROFIT_MARGIN_BANDS,
    },
    CategoryRubric {
        category: HealthCategory::PrimeCost,
        max_score: 15,
        bands: PRIME_COST_BANDS,
    },
    CategoryRubric {
        category: HealthCategory::AssetBase,
        max_score: 5,
        bands: ASSET_BASE_BANDS,
    },
    CategoryRubric {
        category: HealthCategory::CashRunway,
        max_score: 10,
        bands: CASH_RUNWAY_BANDS,
    },
];

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: HealthCategory,
    /// The measured value the band matched against (percent, dollars, or
    /// months depending on the category).
    pub value: Decimal,
    pub score: u32,
    pub max_score: u32,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthScoreOutput {
    pub year: FiscalYear,
    pub categories: Vec<CategoryScore>,
    pub total_score: u32,
    pub max_total: u32,
    pub overall_status: HealthStatus,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score one year against the rubric. Requires a prior year for the sales
/// trend category, so `year_idx` must be 1 or later.
pub fn health_score(
    set: &StatementSet,
    year_idx: usize,
) -> RestoMetricsResult<ComputationOutput<HealthScoreOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    if year_idx == 0 {
        return Err(RestoMetricsError::InvalidInput {
            field: "year_idx".into(),
            reason: "sales trend needs a prior year; score the second year onward".into(),
        });
    }
    let yr = set.year_record(year_idx)?;
    let prior = set.year_record(year_idx - 1)?;

    let cash = set.value_for(&set.accounts.ending_cash, year_idx)?;
    let monthly_expenses = yr.total_expenses / MONTHS_PER_YEAR;

    let measured = |category: HealthCategory| -> Decimal {
        match category {
            HealthCategory::SalesTrend => yoy_change(yr.revenue, prior.revenue),
            HealthCategory::FoodCost => percent_of_revenue(yr.total_cogs, yr.revenue),
            HealthCategory::LaborCost => percent_of_revenue(yr.payroll, yr.revenue),
            HealthCategory::ProfitMargin => percent_of_revenue(yr.net_income, yr.revenue),
            HealthCategory::PrimeCost => {
                percent_of_revenue(yr.total_cogs + yr.payroll, yr.revenue)
            }
            HealthCategory::AssetBase => yr.total_assets,
            HealthCategory::CashRunway => safe_divide(cash, monthly_expenses),
        }
    };

    let mut categories = Vec::with_capacity(RUBRIC.len());
    let mut total_score = 0u32;
    let mut max_total = 0u32;

    for rubric in RUBRIC {
        let value = measured(rubric.category);
        let (score, status) = classify(rubric, value);
        total_score += score;
        max_total += rubric.max_score;
        categories.push(CategoryScore {
            category: rubric.category,
            value,
            score,
            max_score: rubric.max_score,
            status,
        });
    }

    let overall_status = overall(total_score, max_total);

    let output = HealthScoreOutput {
        year: yr.year,
        categories,
        total_score,
        max_total,
        overall_status,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Financial Health Score (fixed rubric)",
        &yr.year,
        warnings,
        elapsed,
        output,
    ))
}

/// Walk a category's bands; first match wins.
fn classify(rubric: &CategoryRubric, value: Decimal) -> (u32, HealthStatus) {
    for band in rubric.bands {
        let above_floor = band.floor.map_or(true, |f| value >= f);
        let below_ceiling = band.ceiling.map_or(true, |c| value < c);
        if above_floor && below_ceiling {
            return (band.score, band.status);
        }
    }
    // Every band list ends in a catch-all; this is unreachable with a
    // well-formed rubric.
    (0, HealthStatus::Critical)
}

fn overall(total: u32, max: u32) -> HealthStatus {
    if max == 0 {
        return HealthStatus::Critical;
    }
    let pct = Decimal::from(total) / Decimal::from(max);
    if pct >= dec!(0.75) {
        HealthStatus::Good
    } else if pct >= dec!(0.50) {
        HealthStatus::Fair
    } else if pct >= dec!(0.30) {
        HealthStatus::Warning
    } else {
        HealthStatus::Critical
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
