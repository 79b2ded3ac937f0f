use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RestoMetricsError;
use crate::types::Rate;
use crate::RestoMetricsResult;

const HUNDRED: Decimal = dec!(100);

/// Typed industry benchmark attached to a line item.
///
/// Source data carries these as strings ("30-35%", "~5%", "100%", "N/A").
/// They are parsed once when the fixture is constructed; everything
/// downstream consumes the structured form. Only `Range` is comparable for
/// savings detection — `NotApplicable` and `FixedPercent` both mark a line
/// that is not a controllable expense in the lo-hi sense ("100%" and "~5%"
/// are informational sentinels in the source data).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Benchmark {
    NotApplicable,
    /// A single informational percentage, stored as a fraction (0.05 = 5%).
    FixedPercent(Rate),
    /// An acceptable lo-hi band, stored as fractions (0.30-0.35 = 30-35%).
    Range { lo: Rate, hi: Rate },
}

impl Benchmark {
    /// Parse a raw benchmark string from the source data.
    pub fn parse(raw: &str) -> RestoMetricsResult<Benchmark> {
        let s = raw.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("n/a") {
            return Ok(Benchmark::NotApplicable);
        }

        let body = s
            .strip_suffix('%')
            .ok_or_else(|| RestoMetricsError::InvalidInput {
                field: "benchmark".into(),
                reason: format!("'{raw}' is not 'N/A' and does not end in '%'"),
            })?;

        if let Some((lo_s, hi_s)) = body.split_once('-') {
            let lo = parse_pct(lo_s, raw)?;
            let hi = parse_pct(hi_s, raw)?;
            if lo > hi {
                return Err(RestoMetricsError::InvalidInput {
                    field: "benchmark".into(),
                    reason: format!("'{raw}' has lo > hi"),
                });
            }
            return Ok(Benchmark::Range { lo, hi });
        }

        let body = body.strip_prefix('~').unwrap_or(body);
        Ok(Benchmark::FixedPercent(parse_pct(body, raw)?))
    }

    /// The maximum acceptable percent-of-revenue, as a fraction, when this
    /// benchmark is comparable. `None` means the line is excluded from
    /// savings detection entirely.
    pub fn ceiling(&self) -> Option<Rate> {
        match self {
            Benchmark::Range { hi, .. } => Some(*hi),
            _ => None,
        }
    }
}

fn parse_pct(s: &str, raw: &str) -> RestoMetricsResult<Rate> {
    let value: Decimal = s
        .trim()
        .parse()
        .map_err(|_| RestoMetricsError::InvalidInput {
            field: "benchmark".into(),
            reason: format!("'{raw}' contains a non-numeric percentage"),
        })?;
    if value < Decimal::ZERO {
        return Err(RestoMetricsError::InvalidInput {
            field: "benchmark".into(),
            reason: format!("'{raw}' contains a negative percentage"),
        });
    }
    Ok(value / HUNDRED)
}

impl std::fmt::Display for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Benchmark::NotApplicable => write!(f, "N/A"),
            Benchmark::FixedPercent(p) => write!(f, "{}%", (p * HUNDRED).normalize()),
            Benchmark::Range { lo, hi } => write!(
                f,
                "{}-{}%",
                (lo * HUNDRED).normalize(),
                (hi * HUNDRED).normalize()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_range() {
        let b = Benchmark::parse("30-35%").unwrap();
        assert_eq!(
            b,
            Benchmark::Range {
                lo: dec!(0.30),
                hi: dec!(0.35)
            }
        );
        assert_eq!(b.ceiling(), Some(dec!(0.35)));
    }

    #[test]
    fn test_parse_fractional_range() {
        let b = Benchmark::parse("2.5-3.5%").unwrap();
        assert_eq!(
            b,
            Benchmark::Range {
                lo: dec!(0.025),
                hi: dec!(0.035)
            }
        );
    }

    #[test]
    fn test_parse_approximate_percent() {
        let b = Benchmark::parse("~5%").unwrap();
        assert_eq!(b, Benchmark::FixedPercent(dec!(0.05)));
        assert_eq!(b.ceiling(), None, "approximate percents are not comparable");
    }

    #[test]
    fn test_parse_full_percent_sentinel() {
        let b = Benchmark::parse("100%").unwrap();
        assert_eq!(b, Benchmark::FixedPercent(dec!(1.00)));
        assert_eq!(b.ceiling(), None, "100% marks a pass-through line");
    }

    #[test]
    fn test_parse_not_applicable() {
        assert_eq!(Benchmark::parse("N/A").unwrap(), Benchmark::NotApplicable);
        assert_eq!(Benchmark::parse("n/a").unwrap(), Benchmark::NotApplicable);
        assert_eq!(Benchmark::parse("").unwrap(), Benchmark::NotApplicable);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Benchmark::parse("thirty percent").is_err());
        assert!(Benchmark::parse("30-35").is_err());
        assert!(Benchmark::parse("35-30%").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(Benchmark::parse("8-12%").unwrap().to_string(), "8-12%");
        assert_eq!(Benchmark::NotApplicable.to_string(), "N/A");
    }
}
