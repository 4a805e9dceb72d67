use crate::domain::model::{Category, Customer, Dataset, Order, Product};
use crate::domain::ports::RecordStore;
use crate::utils::error::{QueryError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const CATEGORIES_FILE: &str = "categories.csv";
const PRODUCTS_FILE: &str = "products.csv";
const CUSTOMERS_FILE: &str = "customers.csv";
const ORDERS_FILE: &str = "orders.csv";

/// Record store reading one CSV file per collection from a directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write every collection of `dataset` as `<collection>.csv` under `dir`.
    pub fn write_dataset(dir: impl AsRef<Path>, dataset: &Dataset) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        write_rows(&dir.join(CATEGORIES_FILE), &dataset.categories)?;
        write_rows(&dir.join(PRODUCTS_FILE), &dataset.products)?;
        write_rows(&dir.join(CUSTOMERS_FILE), &dataset.customers)?;
        write_rows(&dir.join(ORDERS_FILE), &dataset.orders)?;
        Ok(())
    }

    fn read_rows<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        self.ping()?;
        let path = self.dir.join(file_name);
        if !path.is_file() {
            return Err(QueryError::unavailable(
                self.describe(),
                format!("missing {}", file_name),
            ));
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let rows = reader.deserialize().collect::<std::result::Result<Vec<T>, _>>()?;
        tracing::debug!("Read {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

impl RecordStore for CsvStore {
    fn describe(&self) -> String {
        format!("csv:{}", self.dir.display())
    }

    fn ping(&self) -> Result<()> {
        if self.dir.is_dir() {
            Ok(())
        } else {
            Err(QueryError::unavailable(self.describe(), "directory not found"))
        }
    }

    fn load_products(&self) -> Result<Vec<Product>> {
        self.read_rows(PRODUCTS_FILE)
    }

    fn load_categories(&self) -> Result<Vec<Category>> {
        self.read_rows(CATEGORIES_FILE)
    }

    fn load_customers(&self) -> Result<Vec<Customer>> {
        self.read_rows(CUSTOMERS_FILE)
    }

    fn load_orders(&self) -> Result<Vec<Order>> {
        self.read_rows(ORDERS_FILE)
    }
}
