use clap::Parser;
use redflag_report::utils::{logger, validation::Validate};
use redflag_report::{CliConfig, ConfigProvider, ReportEngine, ReportPipeline, Result, TomlConfig};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!(
        "Starting redflag-report ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let outcome = match &config.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(file_config) => run(&file_config).await,
            Err(error) => Err(error),
        },
        None => match config.validate() {
            Ok(()) => run(&config).await,
            Err(error) => Err(error),
        },
    };

    match outcome {
        Ok(count) => {
            tracing::info!("All reports completed");
            println!("✅ {count} report(s) completed");
        }
        Err(error) => {
            tracing::error!("Report run failed: {}", error);
            eprintln!("❌ {error}");
            std::process::exit(1);
        }
    }
}

/// Sequential, one ticker at a time; the first error halts the whole run.
async fn run<C: ConfigProvider>(config: &C) -> Result<usize> {
    for source in config.tickers() {
        tracing::info!("Processing {} ({})", source.ticker, source.source);
        let pipeline = ReportPipeline::new(source.clone(), config.output_path().to_string());
        let engine = ReportEngine::new(pipeline);
        let charts = engine.run().await?;
        tracing::debug!("Charts written: {:?}", charts);
    }
    Ok(config.tickers().len())
}
