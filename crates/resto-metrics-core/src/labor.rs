//! Staffing and labor statistics.
//!
//! Headcount, hours, FTE, hour-based tiering, minimum-wage analysis, and
//! the blended hourly rate for one year's roster, plus best-effort
//! multi-year retention matched by exact employee name.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RestoMetricsError;
use crate::metrics::weighted_average;
use crate::statements::{StatementSet, WageRecord, FTE_HOURS};
use crate::types::{with_metadata, ComputationOutput, FiscalYear, Money, Rate, YEARS_TRACKED};
use crate::RestoMetricsResult;

const CORE_HOURS: Decimal = dec!(500);
const CASUAL_HOURS: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Staffing statistics
// ---------------------------------------------------------------------------

/// Hour-based commitment tier for hourly staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffTier {
    /// At least 500 hours in the year.
    Core,
    /// 100 to 499 hours.
    Casual,
    /// Under 100 hours.
    Trial,
}

/// Tier for a year's worked hours. Lower bounds are inclusive; the top
/// tier is unbounded.
pub fn tier_for_hours(hours: Decimal) -> StaffTier {
    if hours >= CORE_HOURS {
        StaffTier::Core
    } else if hours >= CASUAL_HOURS {
        StaffTier::Casual
    } else {
        StaffTier::Trial
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TierCounts {
    pub core: usize,
    pub casual: usize,
    pub trial: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffingStats {
    pub year: FiscalYear,
    pub headcount: usize,
    pub salaried_headcount: usize,
    pub hourly_headcount: usize,
    pub total_hours: Decimal,
    /// total_hours / 2080
    pub total_fte: Decimal,
    /// Tiering covers hourly (non-salaried) staff only.
    pub tiers: TierCounts,
    /// Names of hourly staff paid exactly the statutory minimum.
    pub at_minimum_wage: Vec<String>,
    pub above_minimum_wage: usize,
    /// Hours-weighted average hourly rate across non-salaried staff.
    pub average_hourly_rate: Rate,
    pub total_gross_pay: Money,
    pub total_employer_tax: Money,
}

/// Compute staffing statistics for one year's roster.
pub fn staffing_stats(
    set: &StatementSet,
    year_idx: usize,
) -> RestoMetricsResult<ComputationOutput<StaffingStats>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let roster = set.roster(year_idx)?;
    let year = set.years[year_idx];
    let minimum_wage = set.minimum_wage[year_idx];
    validate_roster(roster, minimum_wage, year)?;

    let headcount = roster.len();
    let salaried_headcount = roster.iter().filter(|w| w.is_salaried()).count();
    let hourly_headcount = headcount - salaried_headcount;

    let total_hours: Decimal = roster.iter().map(|w| w.hours).sum();
    let total_fte = total_hours / FTE_HOURS;

    let mut tiers = TierCounts::default();
    let mut at_minimum_wage = Vec::new();
    let mut above_minimum_wage = 0usize;
    let mut rate_pairs: Vec<(Decimal, Decimal)> = Vec::with_capacity(hourly_headcount);

    for worker in roster {
        let Some(rate) = worker.hourly_rate else {
            continue;
        };
        match tier_for_hours(worker.hours) {
            StaffTier::Core => tiers.core += 1,
            StaffTier::Casual => tiers.casual += 1,
            StaffTier::Trial => tiers.trial += 1,
        }
        if rate == minimum_wage {
            at_minimum_wage.push(worker.name.clone());
        } else if rate > minimum_wage {
            above_minimum_wage += 1;
        } else {
            warnings.push(format!(
                "'{}' is paid {rate}/h, below the {year} statutory minimum of {minimum_wage}/h.",
                worker.name
            ));
        }
        rate_pairs.push((rate, worker.hours));
    }

    let average_hourly_rate = weighted_average(&rate_pairs);

    let total_gross_pay: Money = roster.iter().map(|w| w.gross_pay).sum();
    let total_employer_tax: Money = roster.iter().map(|w| w.employer_tax).sum();

    let output = StaffingStats {
        year,
        headcount,
        salaried_headcount,
        hourly_headcount,
        total_hours,
        total_fte,
        tiers,
        at_minimum_wage,
        above_minimum_wage,
        average_hourly_rate,
        total_gross_pay,
        total_employer_tax,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Staffing Statistics (headcount / FTE / tiers / wage floor)",
        &year,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_roster(
    roster: &[WageRecord],
    minimum_wage: Rate,
    year: FiscalYear,
) -> RestoMetricsResult<()> {
    if minimum_wage <= Decimal::ZERO {
        return Err(RestoMetricsError::InvalidInput {
            field: "minimum_wage".into(),
            reason: format!("{year} minimum wage must be positive"),
        });
    }
    for worker in roster {
        if worker.hours < Decimal::ZERO {
            return Err(RestoMetricsError::InvalidInput {
                field: "hours".into(),
                reason: format!("'{}' has negative hours in {year}", worker.name),
            });
        }
        if let Some(rate) = worker.hourly_rate {
            if rate <= Decimal::ZERO {
                return Err(RestoMetricsError::InvalidInput {
                    field: "hourly_rate".into(),
                    reason: format!("'{}' has a non-positive hourly rate in {year}", worker.name),
                });
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Retention
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearPairRetention {
    pub from_year: FiscalYear,
    pub to_year: FiscalYear,
    pub retained: usize,
    pub departed: Vec<String>,
    pub hired: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionAnalysis {
    /// Employees present in every tracked year.
    pub retained_all_years: Vec<String>,
    pub year_over_year: Vec<YearPairRetention>,
}

/// Best-effort multi-year retention. Employees are matched across rosters
/// by exact name string; there is no stable identifier in the source data,
/// so a renamed or re-spelled employee breaks continuity.
pub fn retention_analysis(
    set: &StatementSet,
) -> RestoMetricsResult<ComputationOutput<RetentionAnalysis>> {
    let start = Instant::now();
    let warnings = vec![
        "Retention matches employees by exact name; a rename or typo breaks continuity."
            .to_string(),
    ];

    let names: Vec<Vec<&str>> = set
        .rosters
        .iter()
        .map(|roster| roster.iter().map(|w| w.name.as_str()).collect())
        .collect();

    let retained_all_years: Vec<String> = names[0]
        .iter()
        .filter(|name| names[1..].iter().all(|year| year.contains(*name)))
        .map(|name| name.to_string())
        .collect();

    let mut year_over_year = Vec::with_capacity(YEARS_TRACKED - 1);
    for idx in 1..YEARS_TRACKED {
        let prior = &names[idx - 1];
        let current = &names[idx];
        let retained = current.iter().filter(|n| prior.contains(*n)).count();
        let departed = prior
            .iter()
            .filter(|n| !current.contains(*n))
            .map(|n| n.to_string())
            .collect();
        let hired = current
            .iter()
            .filter(|n| !prior.contains(*n))
            .map(|n| n.to_string())
            .collect();
        year_over_year.push(YearPairRetention {
            from_year: set.years[idx - 1],
            to_year: set.years[idx],
            retained,
            departed,
            hired,
        });
    }

    let output = RetentionAnalysis {
        retained_all_years,
        year_over_year,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Multi-Year Retention (name-matched, best effort)",
        &set.years,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
