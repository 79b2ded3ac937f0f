//! Trend projection.
//!
//! Two years of projection from three years of history, with a midline and
//! explicit lower/upper bounds. The projection policy is swappable so
//! consumers never bake in one extrapolation method. Historical points
//! never carry bounds; projected points always do.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RestoMetricsError;
use crate::metrics::round_currency;
use crate::types::{FiscalYear, Money, Rate, YEARS_TRACKED};
use crate::RestoMetricsResult;

/// How many years forward every projection runs.
pub const PROJECTED_YEARS: usize = 2;

const TWO: Decimal = dec!(2);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One historical observation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObservedPoint {
    pub year: FiscalYear,
    pub value: Money,
}

/// One projected year with its uncertainty band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub year: FiscalYear,
    pub mid: Money,
    pub lower: Money,
    pub upper: Money,
}

/// Extrapolation policy. The band is a fraction of the midline, e.g. 0.10
/// for a ±10% envelope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ProjectionPolicy {
    /// Continue the average year-over-year dollar slope.
    LinearTrend { band: Rate },
    /// Compound the historical growth rate. Requires a positive starting
    /// value; undefined for series that start at or below zero.
    Cagr { band: Rate },
}

impl Default for ProjectionPolicy {
    fn default() -> Self {
        ProjectionPolicy::LinearTrend { band: dec!(0.10) }
    }
}

/// A row in the combined actual/projected table. Actual and projected are
/// mutually exclusive; only projected rows carry bounds. Use the
/// constructors — they are what make the invalid states unrepresentable at
/// the call sites.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub year: FiscalYear,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<Money>,
}

impl ForecastPoint {
    pub fn from_actual(year: FiscalYear, value: Money) -> Self {
        ForecastPoint {
            year,
            actual: Some(value),
            projected: None,
            lower: None,
            upper: None,
        }
    }

    pub fn from_projection(p: &ProjectedPoint) -> Self {
        ForecastPoint {
            year: p.year,
            actual: None,
            projected: Some(p.mid),
            lower: Some(p.lower),
            upper: Some(p.upper),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project two years forward from three historical points.
pub fn project(
    history: &[ObservedPoint; YEARS_TRACKED],
    policy: ProjectionPolicy,
) -> RestoMetricsResult<[ProjectedPoint; PROJECTED_YEARS]> {
    validate_history(history)?;
    validate_band(policy)?;

    let last = history[YEARS_TRACKED - 1];

    let mids: [Money; PROJECTED_YEARS] = match policy {
        ProjectionPolicy::LinearTrend { .. } => {
            // Average yearly dollar change across the window.
            let slope = (last.value - history[0].value) / TWO;
            [last.value + slope, last.value + slope * TWO]
        }
        ProjectionPolicy::Cagr { .. } => {
            let first = history[0].value;
            if first <= Decimal::ZERO || last.value <= Decimal::ZERO {
                return Err(RestoMetricsError::InsufficientData(
                    "CAGR projection requires positive first and last values".into(),
                ));
            }
            let growth = (last.value / first)
                .sqrt()
                .ok_or_else(|| RestoMetricsError::DivisionByZero {
                    context: "CAGR growth root".into(),
                })?;
            [last.value * growth, last.value * growth * growth]
        }
    };

    let band = match policy {
        ProjectionPolicy::LinearTrend { band } | ProjectionPolicy::Cagr { band } => band,
    };

    let mut points = [ProjectedPoint {
        year: 0,
        mid: Decimal::ZERO,
        lower: Decimal::ZERO,
        upper: Decimal::ZERO,
    }; PROJECTED_YEARS];

    for (offset, mid) in mids.into_iter().enumerate() {
        let a = mid * (Decimal::ONE - band);
        let b = mid * (Decimal::ONE + band);
        points[offset] = ProjectedPoint {
            year: last.year + 1 + offset as FiscalYear,
            mid: round_currency(mid),
            // A negative midline flips the raw band; order the bounds.
            lower: round_currency(a.min(b)),
            upper: round_currency(a.max(b)),
        };
    }

    Ok(points)
}

/// The combined table: three actual rows followed by two projected rows.
pub fn forecast_series(
    history: &[ObservedPoint; YEARS_TRACKED],
    policy: ProjectionPolicy,
) -> RestoMetricsResult<Vec<ForecastPoint>> {
    let projected = project(history, policy)?;
    let mut series: Vec<ForecastPoint> = history
        .iter()
        .map(|p| ForecastPoint::from_actual(p.year, p.value))
        .collect();
    series.extend(projected.iter().map(ForecastPoint::from_projection));
    Ok(series)
}

fn validate_history(history: &[ObservedPoint; YEARS_TRACKED]) -> RestoMetricsResult<()> {
    for pair in history.windows(2) {
        if pair[1].year != pair[0].year + 1 {
            return Err(RestoMetricsError::InvalidInput {
                field: "history".into(),
                reason: format!(
                    "historical years must be consecutive, got {} then {}",
                    pair[0].year, pair[1].year
                ),
            });
        }
    }
    Ok(())
}

fn validate_band(policy: ProjectionPolicy) -> RestoMetricsResult<()> {
    let band = match policy {
        ProjectionPolicy::LinearTrend { band } | ProjectionPolicy::Cagr { band } => band,
    };
    if band < Decimal::ZERO || band >= Decimal::ONE {
        return Err(RestoMetricsError::InvalidInput {
            field: "band".into(),
            reason: format!("uncertainty band must be in [0, 1), got {band}"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
