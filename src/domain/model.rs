use serde::{Deserialize, Serialize};
use std::fmt;

/// One ticker and the spreadsheet it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerSource {
    pub ticker: String,
    pub source: String,
}

impl fmt::Display for TickerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.ticker, self.source)
    }
}

/// A single named row of financial data within one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub label: String,
    pub values: Vec<f64>,
}

/// One statement sheet normalized to ordered line-item rows.
///
/// Row order and period order are preserved exactly as read from the source;
/// period order doubles as the trend ordering for flag evaluation, so no
/// date parsing or re-sorting happens anywhere downstream.
#[derive(Debug, Clone, Default)]
pub struct FinancialTable {
    pub periods: Vec<String>,
    pub rows: Vec<LineItem>,
}

impl FinancialTable {
    pub fn new(periods: Vec<String>) -> Self {
        Self {
            periods,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, label: String, values: Vec<f64>) {
        self.rows.push(LineItem { label, values });
    }

    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// All row labels in table order, used for diagnostics when resolution fails.
    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.label.clone()).collect()
    }
}

/// The three statements extracted from one ticker's workbook.
#[derive(Debug, Clone)]
pub struct StatementSet {
    pub ticker: String,
    pub income: FinancialTable,
    pub balance: FinancialTable,
    pub cash_flow: FinancialTable,
}

/// The four derived ratio series, one value per period, never rounded.
/// Rounding happens only at the console renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioSeries {
    pub current_ratio: Vec<f64>,
    pub debt_equity: Vec<f64>,
    pub net_profit_margin: Vec<f64>,
    pub op_cf_net_income: Vec<f64>,
}

impl RatioSeries {
    pub const NAMES: [&'static str; 4] = [
        "Current Ratio",
        "Debt/Equity",
        "Net Profit Margin",
        "Op CF / Net Income",
    ];

    /// Name/values pairs in fixed display order.
    pub fn series(&self) -> [(&'static str, &[f64]); 4] {
        [
            (Self::NAMES[0], self.current_ratio.as_slice()),
            (Self::NAMES[1], self.debt_equity.as_slice()),
            (Self::NAMES[2], self.net_profit_margin.as_slice()),
            (Self::NAMES[3], self.op_cf_net_income.as_slice()),
        ]
    }
}

/// A heuristic finding. Display text is fixed; one line per triggered rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedFlag {
    DecliningLiquidity,
    RisingLeverage,
    NegativeProfitMargin,
    ShrinkingProfitMargin,
    EarningsQuality,
}

impl fmt::Display for RedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RedFlag::DecliningLiquidity => "Declining liquidity (Current Ratio decreasing)",
            RedFlag::RisingLeverage => "Rising leverage (Debt/Equity increasing)",
            RedFlag::NegativeProfitMargin => "Negative profit margin in one or more periods",
            RedFlag::ShrinkingProfitMargin => "Shrinking net profit margin",
            RedFlag::EarningsQuality => {
                "Operating cash flow often below net income (earnings quality)"
            }
        };
        f.write_str(text)
    }
}

/// Everything the renderer needs for one ticker: the resolved line-item
/// series that feed the charts, the derived ratios and the triggered flags.
#[derive(Debug, Clone)]
pub struct TickerReport {
    pub ticker: String,
    pub periods: Vec<String>,
    pub total_revenue: Vec<f64>,
    pub net_income: Vec<f64>,
    pub total_liabilities: Vec<f64>,
    pub stockholders_equity: Vec<f64>,
    pub ratios: RatioSeries,
    pub flags: Vec<RedFlag>,
}
