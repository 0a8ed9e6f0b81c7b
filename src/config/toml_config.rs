//! TOML config file support, for runs where the ticker list is long-lived
//! enough to deserve a file instead of repeated --ticker flags.
//!
//! ```toml
//! [report]
//! name = "quarterly screen"
//! output_path = "./charts"
//!
//! [[tickers]]
//! ticker = "SHOP"
//! source = "SHOP_financials.xlsx"
//! ```

use crate::domain::model::TickerSource;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub report: ReportSection,
    pub tickers: Vec<TickerSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    pub name: Option<String>,
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            name: None,
            output_path: default_output_path(),
        }
    }
}

fn default_output_path() -> String {
    ".".to_string()
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|error| ReportError::Config {
            message: format!("Cannot read config file '{}': {}", path.display(), error),
        })?;
        let config: TomlConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

impl ConfigProvider for TomlConfig {
    fn tickers(&self) -> &[TickerSource] {
        &self.tickers
    }

    fn output_path(&self) -> &str {
        &self.report.output_path
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if self.tickers.is_empty() {
            return Err(ReportError::Config {
                message: "Config file defines no [[tickers]] entries".to_string(),
            });
        }

        validate_path("report.output_path", &self.report.output_path)?;

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
    fn parses_a_complete_config() {
        let text = r#"
            [report]
            name = "quarterly screen"
            output_path = "./charts"

            [[tickers]]
            ticker = "SHOP"
            source = "SHOP_financials.xlsx"

            [[tickers]]
            ticker = "M"
            source = "M_financials.xlsx"
        "#;
        let config: TomlConfig = toml::from_str(text).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_path(), "./charts");
        assert_eq!(config.tickers().len(), 2);
        assert_eq!(config.tickers()[0].ticker, "SHOP");
    }

    #[test]
    fn report_section_is_optional() {
        let text = r#"
            [[tickers]]
            ticker = "SHOP"
            source = "SHOP_financials.xlsx"
        "#;
        let config: TomlConfig = toml::from_str(text).unwrap();
        assert_eq!(config.output_path(), ".");
    }

    #[test]
    fn empty_ticker_list_is_rejected() {
        let text = r#"
            tickers = []
        "#;
        let config: TomlConfig = toml::from_str(text).unwrap();
        assert!(config.validate().is_err());
    }
}
