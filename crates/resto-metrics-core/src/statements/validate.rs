use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RestoMetricsError;
use crate::statements::model::{LineCategory, StatementSet};
use crate::types::{with_metadata, ComputationOutput, FiscalYear, Money, YEARS_TRACKED};
use crate::RestoMetricsResult;

/// Accounting identities must hold to within floating-point cent rounding.
const CENT_TOLERANCE: Decimal = dec!(0.01);

/// Wage rosters reconcile against the payroll expense line within this
/// tolerance. The payroll line includes WSIB premiums and group benefits
/// that are not itemized per employee in the rosters.
const PAYROLL_TOLERANCE: Decimal = dec!(2500);

/// One identity that was checked and held.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityCheck {
    pub identity: String,
    pub year: FiscalYear,
    pub delta: Money,
}

/// Every identity the fixture was checked against. Produced only when all
/// of them hold — a violation is an error, not a report entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub checks: Vec<IdentityCheck>,
}

/// Assert the accounting identities, the balance-sheet identity, subtotal
/// consistency, and payroll reconciliation across all three years.
///
/// The fixture is trusted data, so a failure here is a data-entry or
/// transcription error; the engine refuses to compute over a set that does
/// not hold together.
pub fn validate_statements(
    set: &StatementSet,
) -> RestoMetricsResult<ComputationOutput<ValidationReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let mut checks: Vec<IdentityCheck> = Vec::new();

    for year_idx in 0..YEARS_TRACKED {
        let yr = &set.annual[year_idx];

        check_identity(
            &mut checks,
            "gross_profit = revenue - total_cogs",
            yr.year,
            yr.gross_profit - (yr.revenue - yr.total_cogs),
        )?;
        check_identity(
            &mut checks,
            "net_ordinary_income = gross_profit - total_expenses",
            yr.year,
            yr.net_ordinary_income - (yr.gross_profit - yr.total_expenses),
        )?;
        check_identity(
            &mut checks,
            "net_income = net_ordinary_income + other_income - other_expense",
            yr.year,
            yr.net_income - (yr.net_ordinary_income + yr.other_income - yr.other_expense),
        )?;

        let assets = set.section_total(LineCategory::CurrentAsset, year_idx)
            + set.section_total(LineCategory::FixedAsset, year_idx);
        let liabilities = set.section_total(LineCategory::Liability, year_idx);
        let equity = set.section_total(LineCategory::Equity, year_idx);
        check_identity(
            &mut checks,
            "assets = liabilities + equity",
            yr.year,
            assets - (liabilities + equity),
        )?;
        check_identity(
            &mut checks,
            "balance sheet assets = YearRecord.total_assets",
            yr.year,
            assets - yr.total_assets,
        )?;
    }

    check_subtotals(set, &mut checks)?;
    check_payroll_reconciliation(set, &mut checks, &mut warnings)?;

    let output = ValidationReport { checks };
    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Statement Fixture Validation",
        &set.business_name,
        warnings,
        elapsed,
        output,
    ))
}

fn check_identity(
    checks: &mut Vec<IdentityCheck>,
    identity: &str,
    year: FiscalYear,
    delta: Money,
) -> RestoMetricsResult<()> {
    if delta.abs() > CENT_TOLERANCE {
        return Err(RestoMetricsError::IdentityViolation {
            identity: identity.to_string(),
            year,
            delta,
        });
    }
    checks.push(IdentityCheck {
        identity: identity.to_string(),
        year,
        delta,
    });
    Ok(())
}

/// Subtotal rows must equal the exact sum of their child rows for every
/// year — no tolerance, these come from the same ledger.
fn check_subtotals(set: &StatementSet, checks: &mut Vec<IdentityCheck>) -> RestoMetricsResult<()> {
    let all_items = set.pnl.iter().chain(set.balance.iter());
    for subtotal in all_items.clone().filter(|item| item.is_subtotal) {
        for year_idx in 0..YEARS_TRACKED {
            let child_sum: Money = all_items
                .clone()
                .filter(|item| item.parent.as_deref() == Some(subtotal.account.as_str()))
                .map(|item| item.values[year_idx])
                .sum();
            let delta = subtotal.values[year_idx] - child_sum;
            if !delta.is_zero() {
                return Err(RestoMetricsError::IdentityViolation {
                    identity: format!("subtotal '{}' = sum of children", subtotal.account),
                    year: set.years[year_idx],
                    delta,
                });
            }
            checks.push(IdentityCheck {
                identity: format!("subtotal '{}' = sum of children", subtotal.account),
                year: set.years[year_idx],
                delta,
            });
        }
    }
    Ok(())
}

fn check_payroll_reconciliation(
    set: &StatementSet,
    checks: &mut Vec<IdentityCheck>,
    warnings: &mut Vec<String>,
) -> RestoMetricsResult<()> {
    for year_idx in 0..YEARS_TRACKED {
        let yr = &set.annual[year_idx];
        let roster_total: Money = set.rosters[year_idx]
            .iter()
            .map(|w| w.gross_pay + w.employer_tax)
            .sum();
        let delta = yr.payroll - roster_total;
        if delta.abs() > PAYROLL_TOLERANCE {
            return Err(RestoMetricsError::ReconciliationFailure {
                context: format!("{} wage roster vs payroll expense", yr.year),
                delta,
            });
        }
        if !delta.is_zero() {
            warnings.push(format!(
                "{}: wage roster totals differ from the payroll expense line by {} \
                 (WSIB and benefits are not itemized per employee).",
                yr.year, delta
            ));
        }
        checks.push(IdentityCheck {
            identity: "wage rosters reconcile to payroll expense".to_string(),
            year: yr.year,
            delta,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::model::{AccountNames, LineItem, WageRecord, YearRecord};
    use rust_decimal_macros::dec;

    fn consistent_year(year: FiscalYear) -> YearRecord {
        YearRecord {
            year,
            revenue: dec!(1000),
            total_cogs: dec!(400),
            gross_profit: dec!(600),
            total_expenses: dec!(500),
            payroll: dec!(300),
            net_ordinary_income: dec!(100),
            other_income: dec!(20),
            other_expense: dec!(5),
            net_income: dec!(115),
            total_assets: dec!(250),
        }
    }

    fn balanced_sheet() -> Vec<LineItem> {
        vec![
            LineItem::plain(
                "Business Chequing",
                [dec!(250), dec!(250), dec!(250)],
                LineCategory::CurrentAsset,
            ),
            LineItem::plain(
                "Long-Term Loan",
                [dec!(100), dec!(100), dec!(100)],
                LineCategory::Liability,
            ),
            LineItem::plain(
                "Retained Earnings",
                [dec!(150), dec!(150), dec!(150)],
                LineCategory::Equity,
            ),
        ]
    }

    fn sample_set() -> StatementSet {
        StatementSet {
            business_name: "Test Kitchen".into(),
            years: [2023, 2024, 2025],
            annual: [
                consistent_year(2023),
                consistent_year(2024),
                consistent_year(2025),
            ],
            pnl: vec![
                LineItem::plain(
                    "Food Purchases",
                    [dec!(250), dec!(250), dec!(250)],
                    LineCategory::Cost,
                )
                .under("Total Cost of Goods Sold"),
                LineItem::plain(
                    "Beverage & Alcohol",
                    [dec!(150), dec!(150), dec!(150)],
                    LineCategory::Cost,
                )
                .under("Total Cost of Goods Sold"),
                LineItem::plain(
                    "Total Cost of Goods Sold",
                    [dec!(400), dec!(400), dec!(400)],
                    LineCategory::Cost,
                )
                .subtotal(),
            ],
            balance: balanced_sheet(),
            rosters: [
                vec![sample_wage(dec!(300))],
                vec![sample_wage(dec!(300))],
                vec![sample_wage(dec!(300))],
            ],
            minimum_wage: [dec!(16.55), dec!(17.20), dec!(17.20)],
            accounts: AccountNames::default(),
        }
    }

    fn sample_wage(gross: Money) -> WageRecord {
        WageRecord {
            name: "Solo Worker".into(),
            role: "Cook".into(),
            hourly_rate: Some(dec!(20)),
            hours: dec!(15),
            gross_pay: gross,
            employer_tax: Decimal::ZERO,
        }
    }

    #[test]
    fn test_consistent_set_validates() {
        let report = validate_statements(&sample_set()).unwrap();
        assert!(!report.result.checks.is_empty());
        assert!(
            report.warnings.is_empty(),
            "exact reconciliation should produce no warnings"
        );
    }

    #[test]
    fn test_broken_gross_profit_identity_is_an_error() {
        let mut set = sample_set();
        set.annual[1].gross_profit = dec!(601);
        let err = validate_statements(&set).unwrap_err();
        assert!(matches!(
            err,
            RestoMetricsError::IdentityViolation { year: 2024, .. }
        ));
    }

    #[test]
    fn test_cent_rounding_is_tolerated() {
        let mut set = sample_set();
        set.annual[1].gross_profit = dec!(600.01);
        assert!(validate_statements(&set).is_ok());
    }

    #[test]
    fn test_broken_subtotal_is_an_error() {
        let mut set = sample_set();
        set.pnl[0].values[2] = dec!(251);
        let err = validate_statements(&set).unwrap_err();
        assert!(matches!(
            err,
            RestoMetricsError::IdentityViolation { year: 2025, .. }
        ));
    }

    #[test]
    fn test_unbalanced_sheet_is_an_error() {
        let mut set = sample_set();
        set.balance[1].values[0] = dec!(120);
        assert!(validate_statements(&set).is_err());
    }

    #[test]
    fn test_payroll_reconciliation_tolerance() {
        let mut set = sample_set();
        // Within tolerance: warning, not error
        set.rosters[2][0].gross_pay = dec!(298);
        let report = validate_statements(&set).unwrap();
        assert_eq!(report.warnings.len(), 1);

        // Beyond tolerance: error
        set.rosters[2][0].gross_pay = dec!(290) - PAYROLL_TOLERANCE;
        let err = validate_statements(&set).unwrap_err();
        assert!(matches!(
            err,
            RestoMetricsError::ReconciliationFailure { .. }
        ));
    }
}
