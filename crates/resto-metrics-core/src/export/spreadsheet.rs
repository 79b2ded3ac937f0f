//! Workbook export contract.
//!
//! Builds the spreadsheet value model: named sheets of row-oriented tables
//! with header rows and blank separator rows. Every figure is produced by
//! the same shared analyses and rounding the screen uses, so each cell
//! equals its on-screen counterpart.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::break_even::BreakEvenTarget;
use crate::export::write_atomic;
use crate::forecast::{forecast_series, ForecastPoint, ObservedPoint};
use crate::format::{format_currency, format_percent};
use crate::labor::staffing_stats;
use crate::metrics::round_currency;
use crate::statements::{LineCategory, StatementSet};
use crate::summary::{business_snapshot, SnapshotAssumptions};
use crate::types::{FiscalYear, Money, LATEST_YEAR_IDX, YEARS_TRACKED};
use crate::RestoMetricsResult;

// ---------------------------------------------------------------------------
// Workbook value model
// ---------------------------------------------------------------------------

/// A single cell. Currency cells carry whole-dollar rounded values — the
/// binding contract with the on-screen tables is value equality, and
/// rounding happens once, at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Blank,
    Text(String),
    Currency(Money),
    /// Percent points, displayed to one decimal.
    Percent(Decimal),
    Number(Decimal),
}

impl CellValue {
    pub fn display(&self) -> String {
        match self {
            CellValue::Blank => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Currency(v) => format_currency(*v, false),
            CellValue::Percent(p) => format_percent(*p, 1),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

pub type Row = Vec<CellValue>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workbook {
    pub business_name: String,
    pub generated_on: NaiveDate,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full workbook for the latest fiscal year.
pub fn build_workbook(
    set: &StatementSet,
    assumptions: &SnapshotAssumptions,
) -> RestoMetricsResult<Workbook> {
    let sheets = vec![
        pnl_sheet(set),
        balance_sheet(set),
        wages_sheet(set)?,
        summary_sheet(set, assumptions)?,
        forecast_sheet(set, assumptions)?,
        definitions_sheet(),
    ];

    Ok(Workbook {
        business_name: set.business_name.clone(),
        generated_on: chrono::Local::now().date_naive(),
        sheets,
    })
}

/// Serialize the workbook body and write it atomically. On failure no file
/// is produced.
pub fn write_workbook(workbook: &Workbook, path: &Path) -> RestoMetricsResult<()> {
    let bytes = serde_json::to_vec_pretty(workbook)?;
    write_atomic(path, &bytes)
}

// ---------------------------------------------------------------------------
// Sheet builders
// ---------------------------------------------------------------------------

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn year_cell(year: FiscalYear) -> CellValue {
    CellValue::Number(Decimal::from(year))
}

fn blank_row() -> Row {
    vec![CellValue::Blank]
}

fn pnl_sheet(set: &StatementSet) -> Sheet {
    let mut rows: Vec<Row> = Vec::with_capacity(set.pnl.len() + 4);
    let mut header: Row = vec![text("Account")];
    header.extend(set.years.iter().map(|y| text(&y.to_string())));
    header.push(text("Benchmark"));
    rows.push(header);

    for item in &set.pnl {
        let label = if item.parent.is_some() {
            format!("  {}", item.account)
        } else {
            item.account.clone()
        };
        let mut row: Row = vec![text(&label)];
        row.extend(
            item.values
                .iter()
                .map(|v| CellValue::Currency(round_currency(*v))),
        );
        row.push(text(&item.benchmark.to_string()));
        rows.push(row);
        // Subtotals close a group; separate them from what follows.
        if item.is_subtotal {
            rows.push(blank_row());
        }
    }

    Sheet {
        name: "P&L".to_string(),
        rows,
    }
}

fn balance_sheet(set: &StatementSet) -> Sheet {
    let sections: [(&str, LineCategory); 4] = [
        ("Current Assets", LineCategory::CurrentAsset),
        ("Fixed Assets", LineCategory::FixedAsset),
        ("Liabilities", LineCategory::Liability),
        ("Equity", LineCategory::Equity),
    ];

    let mut rows: Vec<Row> = Vec::new();
    let mut header: Row = vec![text("Account")];
    header.extend(set.years.iter().map(|y| text(&y.to_string())));
    rows.push(header);
    rows.push(blank_row());

    for (title, category) in sections {
        rows.push(vec![text(title)]);
        for item in set
            .balance
            .iter()
            .filter(|i| i.category == category && !i.is_subtotal)
        {
            let mut row: Row = vec![text(&format!("  {}", item.account))];
            row.extend(
                item.values
                    .iter()
                    .map(|v| CellValue::Currency(round_currency(*v))),
            );
            rows.push(row);
        }
        let mut total_row: Row = vec![text(&format!("Total {title}"))];
        for year_idx in 0..YEARS_TRACKED {
            total_row.push(CellValue::Currency(round_currency(
                set.section_total(category, year_idx),
            )));
        }
        rows.push(total_row);
        rows.push(blank_row());
    }

    let mut assets_row: Row = vec![text("Total Assets")];
    let mut liab_eq_row: Row = vec![text("Total Liabilities & Equity")];
    for year_idx in 0..YEARS_TRACKED {
        let assets = set.section_total(LineCategory::CurrentAsset, year_idx)
            + set.section_total(LineCategory::FixedAsset, year_idx);
        let liab_eq = set.section_total(LineCategory::Liability, year_idx)
            + set.section_total(LineCategory::Equity, year_idx);
        assets_row.push(CellValue::Currency(round_currency(assets)));
        liab_eq_row.push(CellValue::Currency(round_currency(liab_eq)));
    }
    rows.push(assets_row);
    rows.push(liab_eq_row);

    Sheet {
        name: "Balance Sheet".to_string(),
        rows,
    }
}

fn wages_sheet(set: &StatementSet) -> RestoMetricsResult<Sheet> {
    let mut rows: Vec<Row> = Vec::new();

    for year_idx in 0..YEARS_TRACKED {
        let stats = staffing_stats(set, year_idx)?.result;

        rows.push(vec![text(&set.years[year_idx].to_string())]);
        rows.push(vec![
            text("Name"),
            text("Role"),
            text("Hourly Rate"),
            text("Hours"),
            text("Gross Pay"),
            text("Employer Tax"),
            text("FTE"),
        ]);

        for worker in set.roster(year_idx)? {
            rows.push(vec![
                text(&worker.name),
                text(&worker.role),
                match worker.hourly_rate {
                    Some(rate) => CellValue::Number(rate),
                    None => text("Salaried"),
                },
                CellValue::Number(worker.hours),
                CellValue::Currency(round_currency(worker.gross_pay)),
                CellValue::Currency(round_currency(worker.employer_tax)),
                CellValue::Number(
                    worker
                        .fte()
                        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
                ),
            ]);
        }

        rows.push(vec![
            text("Total"),
            CellValue::Blank,
            CellValue::Blank,
            CellValue::Number(stats.total_hours),
            CellValue::Currency(round_currency(stats.total_gross_pay)),
            CellValue::Currency(round_currency(stats.total_employer_tax)),
            CellValue::Number(
                stats
                    .total_fte
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            ),
        ]);
        rows.push(blank_row());
    }

    Ok(Sheet {
        name: "Wages".to_string(),
        rows,
    })
}

fn summary_sheet(
    set: &StatementSet,
    assumptions: &SnapshotAssumptions,
) -> RestoMetricsResult<Sheet> {
    let snapshot = business_snapshot(set, LATEST_YEAR_IDX, assumptions)?.result;
    let kpis = &snapshot.kpis;

    let mut rows: Vec<Row> = vec![
        vec![text("Business"), text(&snapshot.business_name)],
        vec![text("Fiscal Year"), year_cell(snapshot.year)],
        blank_row(),
        vec![
            text("Revenue"),
            CellValue::Currency(round_currency(kpis.revenue)),
        ],
        vec![text("Revenue YoY"), CellValue::Percent(kpis.revenue_yoy)],
        vec![
            text("Net Income"),
            CellValue::Currency(round_currency(kpis.net_income)),
        ],
        vec![
            text("Net Income YoY"),
            CellValue::Percent(kpis.net_income_yoy),
        ],
        vec![
            text("Gross Margin"),
            CellValue::Percent(kpis.gross_margin_pct),
        ],
        vec![text("Food Cost"), CellValue::Percent(kpis.food_cost_pct)],
        vec![text("Labor Cost"), CellValue::Percent(kpis.labor_cost_pct)],
        vec![text("Prime Cost"), CellValue::Percent(kpis.prime_cost_pct)],
        vec![
            text("Total Assets"),
            CellValue::Currency(round_currency(kpis.total_assets)),
        ],
        blank_row(),
        vec![text("Break-Even Level"), text("Target Revenue"), text("Gap")],
    ];

    for level in &snapshot.break_even.levels {
        let (target_cell, gap_cell) = match level.target {
            BreakEvenTarget::Reachable {
                target_revenue,
                gap,
            } => (
                CellValue::Currency(target_revenue),
                CellValue::Currency(gap),
            ),
            BreakEvenTarget::Unreachable => (text("Unreachable"), CellValue::Blank),
        };
        rows.push(vec![text(&level.basis.to_string()), target_cell, gap_cell]);
    }

    rows.push(blank_row());
    rows.push(vec![
        text("Rank"),
        text("Expense"),
        text("Current"),
        text("Target"),
        text("Annual Savings"),
    ]);
    for (rank, opportunity) in snapshot.roadmap.iter().enumerate() {
        rows.push(vec![
            CellValue::Number(Decimal::from(rank as u32 + 1)),
            text(&opportunity.account),
            CellValue::Currency(round_currency(opportunity.current)),
            CellValue::Currency(opportunity.target),
            CellValue::Currency(round_currency(opportunity.savings)),
        ]);
    }

    rows.push(blank_row());
    rows.push(vec![
        text("Health Score"),
        text(&format!(
            "{}/{}",
            snapshot.health.total_score, snapshot.health.max_total
        )),
        text(&snapshot.health.overall_status.to_string()),
    ]);

    Ok(Sheet {
        name: "Summary".to_string(),
        rows,
    })
}

fn forecast_sheet(
    set: &StatementSet,
    assumptions: &SnapshotAssumptions,
) -> RestoMetricsResult<Sheet> {
    let revenue_history = history(set, |idx| set.annual[idx].revenue);
    let net_income_history = history(set, |idx| set.annual[idx].net_income);

    let mut rows: Vec<Row> = Vec::new();
    for (title, series) in [
        (
            "Revenue",
            forecast_series(&revenue_history, assumptions.forecast_policy)?,
        ),
        (
            "Net Income",
            forecast_series(&net_income_history, assumptions.forecast_policy)?,
        ),
    ] {
        rows.push(vec![text(title)]);
        rows.push(vec![
            text("Year"),
            text("Actual"),
            text("Projected"),
            text("Low"),
            text("High"),
        ]);
        for point in &series {
            rows.push(forecast_row(point));
        }
        rows.push(blank_row());
    }

    Ok(Sheet {
        name: "Forecast".to_string(),
        rows,
    })
}

fn history(
    set: &StatementSet,
    value: impl Fn(usize) -> Money,
) -> [ObservedPoint; YEARS_TRACKED] {
    std::array::from_fn(|idx| ObservedPoint {
        year: set.years[idx],
        value: value(idx),
    })
}

fn forecast_row(point: &ForecastPoint) -> Row {
    let currency_or_blank = |v: Option<Money>| match v {
        Some(v) => CellValue::Currency(round_currency(v)),
        None => CellValue::Blank,
    };
    vec![
        year_cell(point.year),
        currency_or_blank(point.actual),
        currency_or_blank(point.projected),
        currency_or_blank(point.lower),
        currency_or_blank(point.upper),
    ]
}

fn definitions_sheet() -> Sheet {
    let definitions: [(&str, &str); 8] = [
        (
            "COGS",
            "Cost of goods sold: direct cost of food, alcohol, and supplies consumed.",
        ),
        (
            "Prime cost",
            "COGS plus labor, as a percent of revenue; the primary restaurant profitability lever.",
        ),
        (
            "Contribution margin",
            "Fraction of each revenue dollar left to cover fixed costs after variable costs.",
        ),
        (
            "Break-even revenue",
            "Revenue at which a defined cost base is exactly covered by contribution margin.",
        ),
        (
            "FTE",
            "Full-time equivalent: hours worked divided by 2,080.",
        ),
        ("YoY", "Year-over-year percent change."),
        (
            "Pass-through",
            "A cost offset by an equal income line (tips paid vs. tips received), excluded from controllable-cost analysis.",
        ),
        (
            "Savings opportunity",
            "A cost line spending above the top of its industry benchmark range.",
        ),
    ];

    let mut rows: Vec<Row> = vec![vec![text("Term"), text("Definition")]];
    rows.extend(
        definitions
            .iter()
            .map(|(term, definition)| vec![text(term), text(definition)]),
    );

    Sheet {
        name: "Definitions".to_string(),
        rows,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
