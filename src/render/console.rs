//! Console rendering of the per-ticker report. Side effects only: the
//! ratio values arrive unrounded and are rounded here, at display time.

use crate::domain::model::{RatioSeries, TickerReport};
use std::path::PathBuf;

pub fn print_report(report: &TickerReport) {
    println!("\n=== {} Report ===", report.ticker);

    println!("\nKey Ratios (by period):");
    println!("{}", format_ratio_table(report));

    println!("\nPotential Red Flags:");
    for flag in &report.flags {
        println!("- {flag}");
    }
}

/// Confirmation line with the chart filenames, then the end-of-report marker.
pub fn print_footer(chart_paths: &[PathBuf]) {
    let names: Vec<&str> = chart_paths
        .iter()
        .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
        .collect();
    println!("Charts saved: {}", names.join(", "));
    println!("\n--- End of Report ---\n");
}

/// Four ratio rows, one column per period, values rounded to 2 decimals.
fn format_ratio_table(report: &TickerReport) -> String {
    let name_width = RatioSeries::NAMES
        .iter()
        .map(|name| name.len())
        .max()
        .unwrap_or(0)
        + 2;
    let col_width = report
        .periods
        .iter()
        .map(|period| period.len())
        .max()
        .unwrap_or(0)
        .max(8)
        + 2;

    let mut lines = Vec::with_capacity(5);

    let mut header = " ".repeat(name_width);
    for period in &report.periods {
        header.push_str(&format!("{period:>col_width$}"));
    }
    lines.push(header);

    for (name, series) in report.ratios.series() {
        let mut line = format!("{name:<name_width$}");
        for value in series {
            line.push_str(&format!("{value:>col_width$.2}"));
        }
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> TickerReport {
        TickerReport {
            ticker: "TEST".into(),
            periods: vec!["2021".into(), "2022".into(), "2023".into(), "2024".into()],
            total_revenue: vec![1.0; 4],
            net_income: vec![1.0; 4],
            total_liabilities: vec![1.0; 4],
            stockholders_equity: vec![1.0; 4],
            ratios: RatioSeries {
                current_ratio: vec![1.456, 1.2, 1.1, 1.0],
                debt_equity: vec![0.8, 0.9, 1.0, 1.1],
                net_profit_margin: vec![0.1, 0.1, 0.1, 0.1],
                op_cf_net_income: vec![1.5, 1.5, 1.5, 1.5],
            },
            flags: vec![],
        }
    }

    #[test]
    fn table_has_header_plus_four_ratio_rows() {
        let table = format_ratio_table(&report());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        for (name, line) in RatioSeries::NAMES.iter().zip(&lines[1..]) {
            assert!(line.starts_with(name), "row for {name}: {line}");
        }
    }

    #[test]
    fn values_are_rounded_to_two_decimals_for_display_only() {
        let table = format_ratio_table(&report());
        assert!(table.contains("1.46"));
        assert!(!table.contains("1.456"));
    }

    #[test]
    fn every_period_appears_in_the_header() {
        let report = report();
        let table = format_ratio_table(&report);
        let header = table.lines().next().unwrap();
        for period in &report.periods {
            assert!(header.contains(period.as_str()));
        }
    }
}
