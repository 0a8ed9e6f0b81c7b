use crate::core::ratios;
use crate::domain::model::{FinancialTable, StatementSet, TickerReport, TickerSource};
use crate::domain::ports::Pipeline;
use crate::render::{charts, console};
use crate::utils::error::{ReportError, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const SHEET_INCOME: &str = "Income Statement";
const SHEET_BALANCE: &str = "Balance Sheet";
const SHEET_CASH_FLOW: &str = "Cash Flow";

/// One ticker's report run: workbook in, console report and chart files out.
pub struct ReportPipeline {
    source: TickerSource,
    output_path: String,
}

impl ReportPipeline {
    pub fn new(source: TickerSource, output_path: String) -> Self {
        Self {
            source,
            output_path,
        }
    }

    fn read_sheet(
        &self,
        workbook: &mut Xlsx<BufReader<File>>,
        sheet_name: &str,
    ) -> Result<FinancialTable> {
        if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
            return Err(ReportError::MissingSheet {
                sheet: sheet_name.to_string(),
                workbook: self.source.source.clone(),
            });
        }

        let range = workbook.worksheet_range(sheet_name)?;
        let mut rows = range.rows();

        let header = rows.next().ok_or_else(|| ReportError::Validation {
            message: format!(
                "Sheet '{}' in '{}' is empty",
                sheet_name, self.source.source
            ),
        })?;
        // First header cell is the label-column title; the rest are periods.
        let periods: Vec<String> = header.iter().skip(1).map(cell_text).collect();

        let mut table = FinancialTable::new(periods);
        for row in rows {
            let label = row.first().map(cell_text).unwrap_or_default();
            if label.is_empty() {
                continue;
            }
            let mut values: Vec<f64> = row.iter().skip(1).map(cell_number).collect();
            values.resize(table.period_count(), f64::NAN);
            table.push_row(label, values);
        }

        tracing::debug!(
            "sheet '{}': {} rows x {} periods",
            sheet_name,
            table.rows.len(),
            table.period_count()
        );
        Ok(table)
    }
}

#[async_trait::async_trait]
impl Pipeline for ReportPipeline {
    async fn extract(&self) -> Result<StatementSet> {
        tracing::debug!("opening workbook: {}", self.source.source);
        let mut workbook: Xlsx<_> = open_workbook(&self.source.source)?;

        let income = self.read_sheet(&mut workbook, SHEET_INCOME)?;
        let balance = self.read_sheet(&mut workbook, SHEET_BALANCE)?;
        let cash_flow = self.read_sheet(&mut workbook, SHEET_CASH_FLOW)?;

        // Elementwise ratio math assumes one shared period ordering, so the
        // three sheets must agree on the period labels, not just the count.
        if income.periods != balance.periods || income.periods != cash_flow.periods {
            return Err(ReportError::Validation {
                message: format!(
                    "Period mismatch in '{}': income {:?}, balance {:?}, cash flow {:?}",
                    self.source.source, income.periods, balance.periods, cash_flow.periods
                ),
            });
        }

        Ok(StatementSet {
            ticker: self.source.ticker.clone(),
            income,
            balance,
            cash_flow,
        })
    }

    async fn transform(&self, statements: StatementSet) -> Result<TickerReport> {
        ratios::build_report(&statements)
    }

    async fn load(&self, report: TickerReport) -> Result<Vec<String>> {
        console::print_report(&report);

        let chart_paths = charts::write_charts(&report, Path::new(&self.output_path))?;
        console::print_footer(&chart_paths);

        Ok(chart_paths
            .iter()
            .map(|path| path.display().to_string())
            .collect())
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Non-numeric and empty cells become NaN so degenerate data propagates
/// through the ratio math instead of failing the ticker.
fn cell_number(cell: &Data) -> f64 {
    match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => s.trim().replace(',', "").parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_cells_parse_with_thousand_separators() {
        assert_eq!(cell_number(&Data::String("1,234.5".into())), 1234.5);
        assert_eq!(cell_number(&Data::Float(12.0)), 12.0);
        assert!(cell_number(&Data::String("n/a".into())).is_nan());
        assert!(cell_number(&Data::Empty).is_nan());
    }

    #[test]
    fn header_cells_are_trimmed() {
        assert_eq!(cell_text(&Data::String("  2024  ".into())), "2024");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
