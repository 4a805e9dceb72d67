use anyhow::Context;
use clap::Parser;
use query_tour::config::toml_config::LogFormat;
use query_tour::core::ConfigProvider;
use query_tour::utils::logger;
use query_tour::{open_store, Catalog, CliConfig, Dispatcher};
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose, cli.log_format.unwrap_or(LogFormat::Compact));
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(config.verbose(), config.log_format());
    tracing::info!("Starting query-tour");
    tracing::debug!("Resolved config: {:?}", config);

    let store = open_store(&config).context("failed to set up the record store")?;
    let catalog = Catalog::new(
        &*store,
        Duration::from_millis(config.round_trip_latency_ms()),
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut dispatcher = Dispatcher::new(&catalog).with_prompt(config.prompt());
    dispatcher
        .run(stdin.lock(), stdout.lock())
        .context("console output failed")?;

    Ok(())
}
