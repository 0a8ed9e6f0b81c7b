use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Drives one ticker's pipeline through its three stages. Errors propagate
/// unchanged; there is no retry and no partial report.
pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<Vec<String>> {
        tracing::info!("Loading statements...");
        let statements = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} with {} periods",
            statements.ticker,
            statements.income.period_count()
        );

        tracing::info!("Deriving ratios and evaluating red flags...");
        let report = self.pipeline.transform(statements).await?;
        tracing::info!("{} red flag(s) triggered", report.flags.len());

        tracing::info!("Rendering report...");
        let charts = self.pipeline.load(report).await?;
        tracing::info!("Wrote {} chart(s)", charts.len());

        Ok(charts)
    }
}
