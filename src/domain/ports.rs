use crate::domain::model::{StatementSet, TickerReport, TickerSource};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn tickers(&self) -> &[TickerSource];
    fn output_path(&self) -> &str;
}

/// One ticker's report run: load the workbook, derive ratios and flags,
/// render console output and chart files.
#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<StatementSet>;
    async fn transform(&self, statements: StatementSet) -> Result<TickerReport>;
    async fn load(&self, report: TickerReport) -> Result<Vec<String>>;
}
