use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RestoMetricsError;
use crate::statements::benchmark::Benchmark;
use crate::types::{FiscalYear, Money, Rate, YEARS_TRACKED};
use crate::RestoMetricsResult;

/// Annual full-time hour baseline for this business's posted operating
/// hours. FTE = hours worked / 2080.
pub const FTE_HOURS: Decimal = dec!(2080);

// ---------------------------------------------------------------------------
// Yearly summary record
// ---------------------------------------------------------------------------

/// One fiscal year of P&L headline figures, as posted by the bookkeeper.
///
/// `gross_profit`, `net_ordinary_income`, and `net_income` are stored, not
/// recomputed — the accounting identities tying them to the other fields
/// are asserted by [`crate::statements::validate_statements`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: FiscalYear,
    /// Food sales
    pub revenue: Money,
    pub total_cogs: Money,
    /// = revenue - total_cogs
    pub gross_profit: Money,
    /// Total operating expenses, payroll included
    pub total_expenses: Money,
    /// Payroll expense component of total_expenses
    pub payroll: Money,
    /// = gross_profit - total_expenses
    pub net_ordinary_income: Money,
    /// Tips received, wage subsidies
    pub other_income: Money,
    pub other_expense: Money,
    /// = net_ordinary_income + other_income - other_expense
    pub net_income: Money,
    pub total_assets: Money,
}

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

/// Statement section a line item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCategory {
    Revenue,
    Cost,
    CurrentAsset,
    FixedAsset,
    Liability,
    Equity,
}

/// A single P&L or balance-sheet row with one value per tracked year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub account: String,
    pub values: [Money; YEARS_TRACKED],
    pub category: LineCategory,
    pub benchmark: Benchmark,
    /// Subtotal/bold row; its value must equal the sum of its children.
    pub is_subtotal: bool,
    /// Account name of the subtotal this row is indented under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Negative values carry normal accounting meaning (contra-accounts
    /// such as accumulated depreciation or dividends paid).
    pub contra: bool,
}

impl LineItem {
    /// A plain row with no benchmark and no structure flags.
    pub fn plain(account: &str, values: [Money; YEARS_TRACKED], category: LineCategory) -> Self {
        LineItem {
            account: account.to_string(),
            values,
            category,
            benchmark: Benchmark::NotApplicable,
            is_subtotal: false,
            parent: None,
            contra: false,
        }
    }

    pub fn with_benchmark(mut self, benchmark: Benchmark) -> Self {
        self.benchmark = benchmark;
        self
    }

    pub fn under(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn subtotal(mut self) -> Self {
        self.is_subtotal = true;
        self
    }

    pub fn contra(mut self) -> Self {
        self.contra = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Wage records
// ---------------------------------------------------------------------------

/// One employee's payroll summary for one fiscal year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageRecord {
    pub name: String,
    pub role: String,
    /// `None` means salaried.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Rate>,
    pub hours: Decimal,
    pub gross_pay: Money,
    pub employer_tax: Money,
}

impl WageRecord {
    pub fn is_salaried(&self) -> bool {
        self.hourly_rate.is_none()
    }

    /// Full-time equivalent: hours worked / 2080.
    pub fn fte(&self) -> Decimal {
        self.hours / FTE_HOURS
    }
}

// ---------------------------------------------------------------------------
// Named accounts
// ---------------------------------------------------------------------------

/// The account names the analyses look up by name. Lookups against these
/// fail loudly if the fixture does not carry the account — a silently-wrong
/// financial figure is worse than a crash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountNames {
    pub payment_processing: String,
    pub tips_paid: String,
    pub tips_received: String,
    pub ending_cash: String,
    pub depreciation: String,
    pub long_term_loan: String,
    pub dividends_paid: String,
    /// Current-liability accounts whose year-over-year deltas make up the
    /// working-capital leg of the cash-flow bridge.
    pub working_capital_accounts: Vec<String>,
    /// Role string identifying the owner's wage record.
    pub owner_role: String,
}

impl Default for AccountNames {
    fn default() -> Self {
        AccountNames {
            payment_processing: "Payment Processing Fees".into(),
            tips_paid: "Tips Paid".into(),
            tips_received: "Tips Received".into(),
            ending_cash: "Business Chequing".into(),
            depreciation: "Depreciation".into(),
            long_term_loan: "Long-Term Loan".into(),
            dividends_paid: "Dividends Paid".into(),
            working_capital_accounts: vec![
                "Accounts Payable".into(),
                "GST/HST Payable".into(),
                "Income Tax Payable".into(),
                "Payroll Liabilities".into(),
                "Shareholder Distributions".into(),
            ],
            owner_role: "Owner".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// The three-year bundle
// ---------------------------------------------------------------------------

/// The full immutable dataset: three years of statements, line-item tables,
/// and wage rosters. Index 0 is the earliest year, index 2 the latest.
///
/// Nothing here is mutated after construction; every analysis takes the set
/// by reference and recomputes from scratch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementSet {
    pub business_name: String,
    pub years: [FiscalYear; YEARS_TRACKED],
    pub annual: [YearRecord; YEARS_TRACKED],
    pub pnl: Vec<LineItem>,
    pub balance: Vec<LineItem>,
    pub rosters: [Vec<WageRecord>; YEARS_TRACKED],
    /// Statutory minimum hourly wage per tracked year.
    pub minimum_wage: [Rate; YEARS_TRACKED],
    pub accounts: AccountNames,
}

impl StatementSet {
    /// Bounds-checked access to a yearly record.
    pub fn year_record(&self, year_idx: usize) -> RestoMetricsResult<&YearRecord> {
        self.annual
            .get(year_idx)
            .ok_or_else(|| RestoMetricsError::InvalidInput {
                field: "year_idx".into(),
                reason: format!("index {year_idx} out of range (0..{YEARS_TRACKED})"),
            })
    }

    pub fn roster(&self, year_idx: usize) -> RestoMetricsResult<&[WageRecord]> {
        self.rosters
            .get(year_idx)
            .map(|r| r.as_slice())
            .ok_or_else(|| RestoMetricsError::InvalidInput {
                field: "year_idx".into(),
                reason: format!("index {year_idx} out of range (0..{YEARS_TRACKED})"),
            })
    }

    /// Look up a line item by account name across both statements.
    /// A missing account is a data error and fails loudly.
    pub fn line_item(&self, account: &str) -> RestoMetricsResult<&LineItem> {
        self.pnl
            .iter()
            .chain(self.balance.iter())
            .find(|item| item.account == account)
            .ok_or_else(|| RestoMetricsError::LineItemNotFound {
                account: account.to_string(),
            })
    }

    /// A named account's value for one year.
    pub fn value_for(&self, account: &str, year_idx: usize) -> RestoMetricsResult<Money> {
        let item = self.line_item(account)?;
        item.values
            .get(year_idx)
            .copied()
            .ok_or_else(|| RestoMetricsError::InvalidInput {
                field: "year_idx".into(),
                reason: format!("index {year_idx} out of range (0..{YEARS_TRACKED})"),
            })
    }

    /// The owner's wage record for one year, matched by role.
    pub fn owner_record(&self, year_idx: usize) -> RestoMetricsResult<&WageRecord> {
        let roster = self.roster(year_idx)?;
        roster
            .iter()
            .find(|w| w.role == self.accounts.owner_role)
            .ok_or_else(|| RestoMetricsError::EmployeeNotFound {
                role: self.accounts.owner_role.clone(),
                year: self.years[year_idx],
            })
    }

    /// Sum of a balance-sheet section for one year.
    pub fn section_total(&self, category: LineCategory, year_idx: usize) -> Money {
        self.balance
            .iter()
            .filter(|item| item.category == category && !item.is_subtotal)
            .map(|item| item.values[year_idx])
            .sum()
    }
}
