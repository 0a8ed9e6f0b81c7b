//! Ratio derivation and red-flag rule evaluation.
//!
//! Division is deliberately unguarded: a zero or near-zero denominator
//! propagates as inf/NaN through the series and into rule evaluation
//! instead of failing the ticker. NaN compares false against everything,
//! so degenerate periods simply never trigger a trend rule.

use crate::core::resolver;
use crate::domain::model::{RatioSeries, RedFlag, StatementSet, TickerReport};
use crate::utils::error::Result;

const WORKING_CAPITAL: &str = "Working Capital";
const CURRENT_LIABILITIES: &str = "Current Liabilities";
const TOTAL_LIABILITIES: &str = "Total Liabilities Net Minority Interest";
const STOCKHOLDERS_EQUITY: &str = "Stockholders Equity";
const TOTAL_REVENUE: &str = "Total Revenue";
const NET_INCOME: &str = "Net Income";
const OPERATING_CASH_FLOW: &str = "Operating Cash Flow";

/// Resolve the required line items, derive the four ratio series and
/// evaluate the red-flag rules. Any resolution failure aborts the ticker
/// with no partial report.
pub fn build_report(statements: &StatementSet) -> Result<TickerReport> {
    let balance = &statements.balance;

    let working_capital = &resolver::resolve(balance, WORKING_CAPITAL)?.values;
    let current_liabilities = &resolver::resolve(balance, CURRENT_LIABILITIES)?.values;
    let total_liabilities = resolver::resolve(balance, TOTAL_LIABILITIES)?.values.clone();
    let stockholders_equity = resolver::resolve(balance, STOCKHOLDERS_EQUITY)?.values.clone();

    let total_revenue = resolver::resolve(&statements.income, TOTAL_REVENUE)?.values.clone();
    let net_income = resolver::resolve(&statements.income, NET_INCOME)?.values.clone();
    let op_cf = resolver::resolve(&statements.cash_flow, OPERATING_CASH_FLOW)?.values.clone();

    // Source statements expose Working Capital rather than Current Assets.
    let current_assets = add(working_capital, current_liabilities);

    let ratios = RatioSeries {
        current_ratio: div(&current_assets, current_liabilities),
        debt_equity: div(&total_liabilities, &stockholders_equity),
        net_profit_margin: div(&net_income, &total_revenue),
        op_cf_net_income: div(&op_cf, &net_income),
    };

    let flags = evaluate_flags(&ratios);

    Ok(TickerReport {
        ticker: statements.ticker.clone(),
        periods: statements.income.periods.clone(),
        total_revenue,
        net_income,
        total_liabilities,
        stockholders_equity,
        ratios,
        flags,
    })
}

/// The five heuristic rules, in fixed evaluation order. Rules are
/// independent except the margin pair: a negative margin in any period
/// suppresses the shrinking-margin comparison entirely.
pub fn evaluate_flags(ratios: &RatioSeries) -> Vec<RedFlag> {
    let mut flags = Vec::new();

    if trend_declined(&ratios.current_ratio) {
        flags.push(RedFlag::DecliningLiquidity);
    }

    if trend_rose(&ratios.debt_equity) {
        flags.push(RedFlag::RisingLeverage);
    }

    if ratios.net_profit_margin.iter().any(|m| *m < 0.0) {
        flags.push(RedFlag::NegativeProfitMargin);
    } else if trend_declined(&ratios.net_profit_margin) {
        flags.push(RedFlag::ShrinkingProfitMargin);
    }

    let below_one = ratios
        .op_cf_net_income
        .iter()
        .filter(|v| **v < 1.0)
        .count();
    if below_one >= 2 {
        flags.push(RedFlag::EarningsQuality);
    }

    flags
}

fn trend_declined(series: &[f64]) -> bool {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) => last < first,
        _ => false,
    }
}

fn trend_rose(series: &[f64]) -> bool {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) => last > first,
        _ => false,
    }
}

fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b.iter()).map(|(x, y)| x + y).collect()
}

fn div(num: &[f64], den: &[f64]) -> Vec<f64> {
    num.iter().zip(den.iter()).map(|(n, d)| n / d).collect()
}
