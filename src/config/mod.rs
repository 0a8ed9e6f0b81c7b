pub mod toml_config;

use crate::domain::model::TickerSource;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path, Validate,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "redflag-report")]
#[command(about = "Financial red-flag ratio reports from statement spreadsheets")]
pub struct CliConfig {
    /// TOML config file; when given it replaces the --ticker list below
    #[arg(long)]
    pub config: Option<String>,

    /// Ticker sources as SYMBOL=path/to/workbook.xlsx (repeatable)
    #[arg(
        long = "ticker",
        value_parser = parse_ticker_source,
        default_values_t = default_sources()
    )]
    pub tickers: Vec<TickerSource>,

    /// Directory the chart images are written to
    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// The original fixed ticker table, kept as overridable defaults.
fn default_sources() -> Vec<TickerSource> {
    vec![
        TickerSource {
            ticker: "SHOP".to_string(),
            source: "SHOP_financials.xlsx".to_string(),
        },
        TickerSource {
            ticker: "M".to_string(),
            source: "M_financials.xlsx".to_string(),
        },
    ]
}

fn parse_ticker_source(raw: &str) -> std::result::Result<TickerSource, String> {
    match raw.split_once('=') {
        Some((ticker, source)) if !ticker.trim().is_empty() && !source.trim().is_empty() => {
            Ok(TickerSource {
                ticker: ticker.trim().to_string(),
                source: source.trim().to_string(),
            })
        }
        _ => Err(format!(
            "expected SYMBOL=path/to/workbook.xlsx, got '{raw}'"
        )),
    }
}

impl ConfigProvider for CliConfig {
    fn tickers(&self) -> &[TickerSource] {
        &self.tickers
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;

        let sources: Vec<String> = self
            .tickers
            .iter()
            .map(|entry| entry.source.clone())
            .collect();
        validate_file_extensions("tickers", &sources, &["xlsx"])?;

        for entry in &self.tickers {
            validate_non_empty_string("ticker", &entry.ticker)?;
            validate_path("ticker source", &entry.source)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_source_pairs_parse() {
        let parsed = parse_ticker_source("SHOP=data/SHOP_financials.xlsx").unwrap();
        assert_eq!(parsed.ticker, "SHOP");
        assert_eq!(parsed.source, "data/SHOP_financials.xlsx");

        assert!(parse_ticker_source("SHOP").is_err());
        assert!(parse_ticker_source("=file.xlsx").is_err());
    }

    #[test]
    fn defaults_reproduce_the_fixed_ticker_table() {
        let sources = default_sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].ticker, "SHOP");
        assert_eq!(sources[1].ticker, "M");
    }

    #[test]
    fn validation_rejects_non_xlsx_sources() {
        let config = CliConfig {
            config: None,
            tickers: vec![TickerSource {
                ticker: "SHOP".into(),
                source: "SHOP_financials.csv".into(),
            }],
            output_path: ".".into(),
            verbose: false,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_config_validates() {
        let config = CliConfig {
            config: None,
            tickers: default_sources(),
            output_path: ".".into(),
            verbose: false,
        };
        assert!(config.validate().is_ok());
    }
}
