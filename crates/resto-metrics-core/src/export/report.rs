//! Printable report contract.
//!
//! The multi-section document mirroring the on-screen executive summary:
//! business snapshot, KPI table, break-even table, and the top-N action
//! items. Values come from the same snapshot composition the screen uses
//! and must equal it after rounding.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::break_even::BreakEvenTarget;
use crate::export::write_atomic;
use crate::format::{format_currency, format_percent};
use crate::metrics::round_currency;
use crate::statements::StatementSet;
use crate::summary::{business_snapshot, SnapshotAssumptions};
use crate::types::{FiscalYear, Money, LATEST_YEAR_IDX};
use crate::RestoMetricsResult;

// ---------------------------------------------------------------------------
// Report value model
// ---------------------------------------------------------------------------

/// Headline block at the top of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotSection {
    pub business_name: String,
    pub fiscal_year: FiscalYear,
    pub revenue: Money,
    pub net_income: Money,
    pub health_score: u32,
    pub health_max: u32,
    pub overall_status: String,
}

/// One KPI line, already formatted for print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenRow {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_revenue: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<Money>,
    pub reachable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub rank: usize,
    pub expense: String,
    pub current_spend: Money,
    pub target_spend: Money,
    pub annual_savings: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub generated_on: NaiveDate,
    pub snapshot: SnapshotSection,
    pub kpis: Vec<KpiRow>,
    pub break_even: Vec<BreakEvenRow>,
    pub action_items: Vec<ActionItem>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the report for the latest fiscal year.
pub fn build_report(
    set: &StatementSet,
    assumptions: &SnapshotAssumptions,
) -> RestoMetricsResult<Report> {
    let snapshot = business_snapshot(set, LATEST_YEAR_IDX, assumptions)?.result;
    let kpis = &snapshot.kpis;

    let kpi_rows = vec![
        KpiRow {
            label: "Revenue".into(),
            value: format_currency(kpis.revenue, false),
        },
        KpiRow {
            label: "Revenue YoY".into(),
            value: format_percent(kpis.revenue_yoy, 1),
        },
        KpiRow {
            label: "Net Income".into(),
            value: format_currency(kpis.net_income, false),
        },
        KpiRow {
            label: "Net Income YoY".into(),
            value: format_percent(kpis.net_income_yoy, 1),
        },
        KpiRow {
            label: "Gross Margin".into(),
            value: format_percent(kpis.gross_margin_pct, 1),
        },
        KpiRow {
            label: "Food Cost".into(),
            value: format_percent(kpis.food_cost_pct, 1),
        },
        KpiRow {
            label: "Labor Cost".into(),
            value: format_percent(kpis.labor_cost_pct, 1),
        },
        KpiRow {
            label: "Prime Cost".into(),
            value: format_percent(kpis.prime_cost_pct, 1),
        },
    ];

    let break_even = snapshot
        .break_even
        .levels
        .iter()
        .map(|level| match level.target {
            BreakEvenTarget::Reachable {
                target_revenue,
                gap,
            } => BreakEvenRow {
                label: level.basis.to_string(),
                target_revenue: Some(target_revenue),
                gap: Some(gap),
                reachable: true,
            },
            BreakEvenTarget::Unreachable => BreakEvenRow {
                label: level.basis.to_string(),
                target_revenue: None,
                gap: None,
                reachable: false,
            },
        })
        .collect();

    let action_items = snapshot
        .roadmap
        .iter()
        .enumerate()
        .map(|(idx, opportunity)| ActionItem {
            rank: idx + 1,
            expense: opportunity.account.clone(),
            current_spend: round_currency(opportunity.current),
            target_spend: opportunity.target,
            annual_savings: round_currency(opportunity.savings),
        })
        .collect();

    Ok(Report {
        title: format!("{} — Financial Summary {}", snapshot.business_name, snapshot.year),
        generated_on: chrono::Local::now().date_naive(),
        snapshot: SnapshotSection {
            business_name: snapshot.business_name.clone(),
            fiscal_year: snapshot.year,
            revenue: round_currency(kpis.revenue),
            net_income: round_currency(kpis.net_income),
            health_score: snapshot.health.total_score,
            health_max: snapshot.health.max_total,
            overall_status: snapshot.health.overall_status.to_string(),
        },
        kpis: kpi_rows,
        break_even,
        action_items,
    })
}

/// Serialize the report body and write it atomically. On failure no file
/// is produced.
pub fn write_report(report: &Report, path: &Path) -> RestoMetricsResult<()> {
    let bytes = serde_json::to_vec_pretty(report)?;
    write_atomic(path, &bytes)
}
