pub mod engine;
pub mod pipeline;
pub mod ratios;
pub mod resolver;

pub use crate::domain::model::{
    FinancialTable, RatioSeries, RedFlag, StatementSet, TickerReport, TickerSource,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline};
pub use crate::utils::error::Result;
