pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{open_store, CsvStore, JsonStore, MemoryStore};
pub use config::toml_config::TomlConfig;
pub use core::{
    catalog::Catalog,
    dispatcher::{Command, Dispatcher, DispatcherState, RunSummary},
    session::Session,
};
pub use utils::error::{QueryError, Result};
