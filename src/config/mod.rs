pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::toml_config::{LogFormat, StoreKind, TomlConfig};
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "query-tour")]
    #[command(about = "Interactive tour of query patterns over an in-memory or file-backed record store")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Record store backend (overrides config)
        #[arg(long, value_enum)]
        pub store: Option<StoreKind>,

        /// JSON snapshot file or CSV directory for file-backed stores
        #[arg(long)]
        pub data: Option<String>,

        /// Simulated latency per store round trip, in milliseconds
        #[arg(long)]
        pub latency_ms: Option<u64>,

        /// Log output format (overrides config)
        #[arg(long, value_enum)]
        pub log_format: Option<LogFormat>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Merge defaults, the optional TOML file and command-line overrides, then validate.
        pub fn resolve(&self) -> Result<TomlConfig> {
            let mut config = match &self.config {
                Some(path) => TomlConfig::from_file(path)?,
                None => TomlConfig::default(),
            };

            if let Some(kind) = self.store {
                config.store.kind = kind;
            }
            if let Some(data) = &self.data {
                config.store.path = Some(data.clone());
            }
            if let Some(latency) = self.latency_ms {
                config.store.round_trip_latency_ms = Some(latency);
            }
            if let Some(format) = self.log_format {
                config.logging.format = format;
            }
            if self.verbose {
                config.logging.verbose = Some(true);
            }

            config.validate()?;
            Ok(config)
        }
    }

}
