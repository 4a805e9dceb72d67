use crate::domain::model::{Category, Customer, Dataset, Order, Product};
use crate::domain::ports::RecordStore;
use crate::utils::error::{QueryError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Record store reading a JSON `Dataset` snapshot on every round trip.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write a snapshot that a `JsonStore` can serve.
    pub fn write_dataset(path: impl AsRef<Path>, dataset: &Dataset) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(dataset)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn read_dataset(&self) -> Result<Dataset> {
        self.ping()?;
        let data = fs::read(&self.path)?;
        tracing::debug!("Read {} bytes from {}", data.len(), self.path.display());
        Ok(serde_json::from_slice(&data)?)
    }
}

impl RecordStore for JsonStore {
    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }

    fn ping(&self) -> Result<()> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(QueryError::unavailable(
                self.describe(),
                "snapshot file not found",
            ))
        }
    }

    fn load_products(&self) -> Result<Vec<Product>> {
        Ok(self.read_dataset()?.products)
    }

    fn load_categories(&self) -> Result<Vec<Category>> {
        Ok(self.read_dataset()?.categories)
    }

    fn load_customers(&self) -> Result<Vec<Customer>> {
        Ok(self.read_dataset()?.customers)
    }

    fn load_orders(&self) -> Result<Vec<Order>> {
        Ok(self.read_dataset()?.orders)
    }
}
