//! Shared integration fixture: three consistent fiscal years for a small
//! restaurant. Every accounting identity, subtotal, the balance-sheet
//! identity, and the cash-flow bridge reconciliation hold by construction;
//! the engine tests assert all of them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use resto_metrics_core::statements::{
    AccountNames, Benchmark, LineCategory, LineItem, StatementSet, WageRecord, YearRecord,
};
use resto_metrics_core::types::Money;

const COGS_SUBTOTAL: &str = "Total Cost of Goods Sold";
const OPEX_SUBTOTAL: &str = "Total Operating Expenses";

fn pnl_line(account: &str, values: [Money; 3], benchmark: &str, parent: &str) -> LineItem {
    LineItem::plain(account, values, LineCategory::Cost)
        .with_benchmark(Benchmark::parse(benchmark).unwrap())
        .under(parent)
}

fn wage(
    name: &str,
    role: &str,
    rate: Option<Decimal>,
    hours: Decimal,
    gross: Money,
    tax: Money,
) -> WageRecord {
    WageRecord {
        name: name.into(),
        role: role.into(),
        hourly_rate: rate,
        hours,
        gross_pay: gross,
        employer_tax: tax,
    }
}

/// The full three-year dataset (2023-2025).
pub fn dataset() -> StatementSet {
    let annual = [
        YearRecord {
            year: 2023,
            revenue: dec!(287_450),
            total_cogs: dec!(68_988),
            gross_profit: dec!(218_462),
            total_expenses: dec!(268_240),
            payroll: dec!(139_402),
            net_ordinary_income: dec!(-49_778),
            other_income: dec!(37_900),
            other_expense: dec!(950),
            net_income: dec!(-12_828),
            total_assets: dec!(85_500),
        },
        YearRecord {
            year: 2024,
            revenue: dec!(301_820),
            total_cogs: dec!(71_530),
            gross_profit: dec!(230_290),
            total_expenses: dec!(281_959),
            payroll: dec!(146_210),
            net_ordinary_income: dec!(-51_669),
            other_income: dec!(40_120),
            other_expense: dec!(1_050),
            net_income: dec!(-12_599),
            total_assets: dec!(81_901),
        },
        YearRecord {
            year: 2025,
            revenue: dec!(319_177),
            total_cogs: dec!(74_148),
            gross_profit: dec!(245_029),
            total_expenses: dec!(296_613),
            payroll: dec!(155_137),
            net_ordinary_income: dec!(-51_584),
            other_income: dec!(42_000),
            other_expense: dec!(1_200),
            net_income: dec!(-10_784),
            total_assets: dec!(79_117),
        },
    ];

    let pnl = vec![
        LineItem::plain(
            "Food Sales",
            [dec!(287_450), dec!(301_820), dec!(319_177)],
            LineCategory::Revenue,
        ),
        pnl_line(
            "Food Purchases",
            [dec!(54_600), dec!(56_700), dec!(58_900)],
            "N/A",
            COGS_SUBTOTAL,
        ),
        pnl_line(
            "Beverage & Alcohol",
            [dec!(8_988), dec!(9_230), dec!(9_448)],
            "N/A",
            COGS_SUBTOTAL,
        ),
        pnl_line(
            "Packaging & Takeout Supplies",
            [dec!(5_400), dec!(5_600), dec!(5_800)],
            "N/A",
            COGS_SUBTOTAL,
        ),
        LineItem::plain(
            COGS_SUBTOTAL,
            [dec!(68_988), dec!(71_530), dec!(74_148)],
            LineCategory::Cost,
        )
        .with_benchmark(Benchmark::parse("28-32%").unwrap())
        .subtotal(),
        pnl_line(
            "Payroll & Wages",
            [dec!(139_402), dec!(146_210), dec!(155_137)],
            "30-34%",
            OPEX_SUBTOTAL,
        ),
        pnl_line(
            "Payment Processing Fees",
            [dec!(8_624), dec!(9_055), dec!(9_575)],
            "~3%",
            OPEX_SUBTOTAL,
        ),
        pnl_line(
            "Tips Paid",
            [dec!(34_100), dec!(36_300), dec!(38_500)],
            "100%",
            OPEX_SUBTOTAL,
        ),
        pnl_line(
            "Rent",
            [dec!(45_000), dec!(46_500), dec!(48_000)],
            "8-12%",
            OPEX_SUBTOTAL,
        ),
        pnl_line(
            "Utilities",
            [dec!(10_420), dec!(10_870), dec!(11_240)],
            "2.5-3.5%",
            OPEX_SUBTOTAL,
        ),
        pnl_line(
            "Insurance",
            [dec!(6_380), dec!(6_600), dec!(6_850)],
            "1.5-2.5%",
            OPEX_SUBTOTAL,
        ),
        pnl_line(
            "Marketing",
            [dec!(3_850), dec!(5_100), dec!(4_620)],
            "3-6%",
            OPEX_SUBTOTAL,
        ),
        pnl_line(
            "Repairs & Maintenance",
            [dec!(5_120), dec!(4_890), dec!(5_310)],
            "1-2%",
            OPEX_SUBTOTAL,
        ),
        pnl_line(
            "Kitchen Supplies",
            [dec!(6_940), dec!(7_410), dec!(7_980)],
            "2-3%",
            OPEX_SUBTOTAL,
        ),
        pnl_line(
            "Professional Fees",
            [dec!(3_760), dec!(3_980), dec!(4_150)],
            "N/A",
            OPEX_SUBTOTAL,
        ),
        pnl_line(
            "Depreciation",
            [dec!(4_500), dec!(4_200), dec!(3_900)],
            "N/A",
            OPEX_SUBTOTAL,
        ),
        pnl_line(
            "Office & Misc",
            [dec!(144), dec!(844), dec!(1_351)],
            "N/A",
            OPEX_SUBTOTAL,
        ),
        LineItem::plain(
            OPEX_SUBTOTAL,
            [dec!(268_240), dec!(281_959), dec!(296_613)],
            LineCategory::Cost,
        )
        .subtotal(),
        LineItem::plain(
            "Tips Received",
            [dec!(34_100), dec!(36_300), dec!(38_500)],
            LineCategory::Revenue,
        ),
        LineItem::plain(
            "Wage Subsidy",
            [dec!(3_800), dec!(3_820), dec!(3_500)],
            LineCategory::Revenue,
        ),
        LineItem::plain(
            "Interest & Bank Charges",
            [dec!(950), dec!(1_050), dec!(1_200)],
            LineCategory::Cost,
        ),
    ];

    let balance = vec![
        LineItem::plain(
            "Business Chequing",
            [dec!(18_400), dec!(19_001), dec!(20_117)],
            LineCategory::CurrentAsset,
        ),
        LineItem::plain(
            "Inventory",
            [dec!(6_500), dec!(6_500), dec!(6_500)],
            LineCategory::CurrentAsset,
        ),
        LineItem::plain(
            "Prepaid Expenses",
            [dec!(2_100), dec!(2_100), dec!(2_100)],
            LineCategory::CurrentAsset,
        ),
        LineItem::plain(
            "Kitchen Equipment",
            [dec!(52_000), dec!(52_000), dec!(52_000)],
            LineCategory::FixedAsset,
        ),
        LineItem::plain(
            "Leasehold Improvements",
            [dec!(38_000), dec!(38_000), dec!(38_000)],
            LineCategory::FixedAsset,
        ),
        LineItem::plain(
            "Accumulated Depreciation",
            [dec!(-31_500), dec!(-35_700), dec!(-39_600)],
            LineCategory::FixedAsset,
        )
        .contra(),
        LineItem::plain(
            "Accounts Payable",
            [dec!(7_200), dec!(8_100), dec!(8_850)],
            LineCategory::Liability,
        ),
        LineItem::plain(
            "GST/HST Payable",
            [dec!(3_850), dec!(4_300), dec!(4_720)],
            LineCategory::Liability,
        ),
        LineItem::plain(
            "Income Tax Payable",
            [dec!(0), dec!(0), dec!(0)],
            LineCategory::Liability,
        ),
        LineItem::plain(
            "Payroll Liabilities",
            [dec!(4_930), dec!(5_480), dec!(6_010)],
            LineCategory::Liability,
        ),
        LineItem::plain(
            "Shareholder Distributions",
            [dec!(2_400), dec!(3_000), dec!(3_600)],
            LineCategory::Liability,
        ),
        LineItem::plain(
            "Long-Term Loan",
            [dec!(60_000), dec!(66_500), dec!(72_200)],
            LineCategory::Liability,
        ),
        LineItem::plain(
            "Owner's Capital",
            [dec!(45_000), dec!(45_000), dec!(45_000)],
            LineCategory::Equity,
        ),
        LineItem::plain(
            "Dividends Paid",
            [dec!(-6_000), dec!(-6_000), dec!(-6_000)],
            LineCategory::Equity,
        )
        .contra(),
        LineItem::plain(
            "Retained Earnings",
            [dec!(-31_880), dec!(-44_479), dec!(-55_263)],
            LineCategory::Equity,
        ),
    ];

    let rosters = [
        vec![
            wage("Marco Beltran", "Owner", None, dec!(2350), dec!(28_500), dec!(2_340)),
            wage("Priya Sharma", "Head Chef", None, dec!(2150), dec!(37_500), dec!(3_100)),
            wage(
                "Dana Whitfield",
                "Line Cook",
                Some(dec!(18.00)),
                dec!(1480),
                dec!(26_640.00),
                dec!(2_197.80),
            ),
            wage(
                "Leo Tran",
                "Server",
                Some(dec!(16.55)),
                dec!(1105),
                dec!(18_287.75),
                dec!(1_508.74),
            ),
            wage(
                "Tom Yardley",
                "Dishwasher",
                Some(dec!(16.55)),
                dec!(890),
                dec!(14_729.50),
                dec!(1_215.18),
            ),
            wage(
                "Grace Okafor",
                "Server",
                Some(dec!(16.80)),
                dec!(240),
                dec!(4_032.00),
                dec!(332.64),
            ),
        ],
        vec![
            wage("Marco Beltran", "Owner", None, dec!(2280), dec!(30_000), dec!(2_460)),
            wage("Priya Sharma", "Head Chef", None, dec!(2190), dec!(42_000), dec!(3_470)),
            wage(
                "Dana Whitfield",
                "Line Cook",
                Some(dec!(18.75)),
                dec!(1512),
                dec!(28_350.00),
                dec!(2_338.88),
            ),
            wage(
                "Leo Tran",
                "Server",
                Some(dec!(17.20)),
                dec!(1020),
                dec!(17_544.00),
                dec!(1_447.38),
            ),
            wage(
                "Sofia Marini",
                "Server",
                Some(dec!(17.20)),
                dec!(385),
                dec!(6_622.00),
                dec!(546.32),
            ),
            wage(
                "Nadia Rahman",
                "Server",
                Some(dec!(17.50)),
                dec!(610),
                dec!(10_675.00),
                dec!(880.69),
            ),
        ],
        vec![
            wage("Marco Beltran", "Owner", None, dec!(2300), dec!(36_000), dec!(2_950)),
            wage("Priya Sharma", "Head Chef", None, dec!(2210), dec!(48_750), dec!(4_020)),
            wage(
                "Dana Whitfield",
                "Line Cook",
                Some(dec!(19.50)),
                dec!(1454.8),
                dec!(28_368.60),
                dec!(2_340.41),
            ),
            wage(
                "Leo Tran",
                "Server",
                Some(dec!(17.20)),
                dec!(812.5),
                dec!(13_975.00),
                dec!(1_152.94),
            ),
            wage(
                "Sofia Marini",
                "Server",
                Some(dec!(17.20)),
                dec!(436.0),
                dec!(7_499.20),
                dec!(618.68),
            ),
            wage(
                "Jake Osei",
                "Dishwasher",
                Some(dec!(17.80)),
                dec!(297.5),
                dec!(5_295.50),
                dec!(436.88),
            ),
            wage(
                "Emma Liu",
                "Server",
                Some(dec!(18.00)),
                dec!(84.0),
                dec!(1_512.00),
                dec!(124.74),
            ),
        ],
    ];

    StatementSet {
        business_name: "Beltran's Trattoria".into(),
        years: [2023, 2024, 2025],
        annual,
        pnl,
        balance,
        rosters,
        minimum_wage: [dec!(16.55), dec!(17.20), dec!(17.20)],
        accounts: AccountNames::default(),
    }
}
