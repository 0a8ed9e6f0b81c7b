//! Chart generation with plotters. Three PNGs per ticker, overwritten
//! unconditionally. Non-finite values (NaN/inf from unguarded ratio math)
//! are dropped from the drawn series but never fail the render.

use crate::domain::model::TickerReport;
use crate::utils::error::{ReportError, Result};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const MARKER_RADIUS: i32 = 3;

pub fn write_charts(report: &TickerReport, output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let revenue_path = output_dir.join(format!("{}_revenue_net_income.png", report.ticker));
    draw_line_chart(
        &revenue_path,
        &format!("{}: Revenue & Net Income Trend", report.ticker),
        "USD",
        (800, 400),
        &report.periods,
        &[
            ("Total Revenue", report.total_revenue.as_slice()),
            ("Net Income", report.net_income.as_slice()),
        ],
    )?;

    let ratios_path = output_dir.join(format!("{}_key_ratios.png", report.ticker));
    draw_line_chart(
        &ratios_path,
        &format!("{}: Key Ratios Trend", report.ticker),
        "Ratio",
        (800, 500),
        &report.periods,
        &report.ratios.series(),
    )?;

    let debt_equity_path = output_dir.join(format!("{}_debt_equity.png", report.ticker));
    draw_stacked_bars(&debt_equity_path, report)?;

    Ok(vec![revenue_path, ratios_path, debt_equity_path])
}

fn draw_line_chart(
    path: &PathBuf,
    title: &str,
    y_desc: &str,
    size: (u32, u32),
    periods: &[String],
    series: &[(&str, &[f64])],
) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let n = periods.len();
    let x_max = (n.saturating_sub(1) as f64).max(1.0);
    let (y_min, y_max) = value_bounds(series);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(n.min(12).max(2))
        .x_label_formatter(&|x| {
            periods
                .get(x.round() as usize)
                .cloned()
                .unwrap_or_default()
        })
        .x_desc("Period")
        .y_desc(y_desc)
        .draw()
        .map_err(chart_err)?;

    for (index, (name, values)) in series.iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        let points: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .filter(|(_, value)| value.is_finite())
            .map(|(x, value)| (x as f64, *value))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(chart_err)?
            .label(*name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });

        chart
            .draw_series(
                points
                    .iter()
                    .map(|point| Circle::new(*point, MARKER_RADIUS, color.filled())),
            )
            .map_err(chart_err)?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Liabilities as the base bar with equity stacked on top, one bar per period.
fn draw_stacked_bars(path: &PathBuf, report: &TickerReport) -> Result<()> {
    let root = BitMapBackend::new(path, (700, 400)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let n = report.periods.len();
    let (y_min, y_max) = stacked_bounds(report);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{}: Debt vs Equity", report.ticker),
            ("sans-serif", 22),
        )
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d((0..n).into_segmented(), y_min..y_max)
        .map_err(chart_err)?;

    let periods = &report.periods;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                periods.get(*i).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .x_desc("Period")
        .y_desc("USD")
        .draw()
        .map_err(chart_err)?;

    let liabilities_color = BLUE.mix(0.7);
    chart
        .draw_series((0..n).filter_map(|i| {
            let liabilities = report.total_liabilities.get(i).copied()?;
            liabilities.is_finite().then(|| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0.0),
                        (SegmentValue::Exact(i + 1), liabilities),
                    ],
                    liabilities_color.filled(),
                )
            })
        }))
        .map_err(chart_err)?
        .label("Total Liabilities")
        .legend(move |(x, y)| {
            Rectangle::new([(x, y - 5), (x + 12, y + 5)], liabilities_color.filled())
        });

    let equity_color = RED.mix(0.7);
    chart
        .draw_series((0..n).filter_map(|i| {
            let liabilities = report.total_liabilities.get(i).copied()?;
            let equity = report.stockholders_equity.get(i).copied()?;
            (liabilities.is_finite() && equity.is_finite()).then(|| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(i), liabilities),
                        (SegmentValue::Exact(i + 1), liabilities + equity),
                    ],
                    equity_color.filled(),
                )
            })
        }))
        .map_err(chart_err)?
        .label("Total Equity")
        .legend(move |(x, y)| {
            Rectangle::new([(x, y - 5), (x + 12, y + 5)], equity_color.filled())
        });

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Finite min/max over all series, padded 5%. Falls back to 0..1 when no
/// finite value exists so the backend always gets a non-degenerate range.
fn value_bounds(series: &[(&str, &[f64])]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (_, values) in series {
        for value in values.iter().filter(|value| value.is_finite()) {
            min = min.min(*value);
            max = max.max(*value);
        }
    }
    pad_bounds(min, max)
}

fn stacked_bounds(report: &TickerReport) -> (f64, f64) {
    let mut min = 0f64;
    let mut max = f64::NEG_INFINITY;
    for i in 0..report.periods.len() {
        let liabilities = report.total_liabilities.get(i).copied().unwrap_or(f64::NAN);
        let equity = report.stockholders_equity.get(i).copied().unwrap_or(f64::NAN);
        if liabilities.is_finite() {
            min = min.min(liabilities);
            max = max.max(liabilities);
            if equity.is_finite() {
                min = min.min(liabilities + equity);
                max = max.max(liabilities + equity);
            }
        }
    }
    pad_bounds(min, max)
}

fn pad_bounds(min: f64, max: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

fn chart_err<E: std::fmt::Display>(error: E) -> ReportError {
    ReportError::Chart {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_ignore_non_finite_values() {
        let values = [1.0, f64::INFINITY, f64::NAN, 3.0];
        let (min, max) = value_bounds(&[("s", &values[..])]);
        assert!(min < 1.0 && min > 0.8);
        assert!(max > 3.0 && max < 3.2);
    }

    #[test]
    fn bounds_fall_back_when_nothing_is_finite() {
        let values = [f64::NAN, f64::INFINITY];
        assert_eq!(value_bounds(&[("s", &values[..])]), (0.0, 1.0));
    }

    #[test]
    fn degenerate_bounds_are_widened() {
        let values = [2.0, 2.0];
        assert_eq!(value_bounds(&[("s", &values[..])]), (1.0, 3.0));
    }
}
