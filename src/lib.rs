pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

pub use crate::config::{toml_config::TomlConfig, CliConfig};
pub use crate::core::{engine::ReportEngine, pipeline::ReportPipeline};
pub use crate::domain::model::{
    FinancialTable, LineItem, RatioSeries, RedFlag, StatementSet, TickerReport, TickerSource,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline};
pub use crate::utils::error::{ReportError, Result};
