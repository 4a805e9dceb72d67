// Adapters layer: concrete record stores behind the `RecordStore` port.

pub mod csv_store;
pub mod json_store;
pub mod memory;

use crate::config::toml_config::StoreKind;
use crate::domain::ports::{ConfigProvider, RecordStore};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;

pub use csv_store::CsvStore;
pub use json_store::JsonStore;
pub use memory::MemoryStore;

/// Build the record store selected by configuration.
pub fn open_store<C: ConfigProvider>(config: &C) -> Result<Box<dyn RecordStore>> {
    let path = config.data_path().map(str::to_string);
    let store: Box<dyn RecordStore> = match config.store_kind() {
        StoreKind::Memory => Box::new(MemoryStore::sample()),
        StoreKind::Json => Box::new(JsonStore::new(validate_required_field("store.path", &path)?)),
        StoreKind::Csv => Box::new(CsvStore::new(validate_required_field("store.path", &path)?)),
    };
    tracing::info!("📦 Using record store {}", store.describe());
    Ok(store)
}
