use crate::domain::model::{Category, Customer, Order, Product};
use crate::utils::error::Result;

/// External record store holding the four entity collections.
///
/// Every `load_*` call is one round trip to the store.
pub trait RecordStore {
    /// Human readable name used in logs and errors, e.g. `json:./northwind.json`.
    fn describe(&self) -> String;

    /// Fails with `DataSourceUnavailable` when the store cannot be reached.
    fn ping(&self) -> Result<()>;

    fn load_products(&self) -> Result<Vec<Product>>;
    fn load_categories(&self) -> Result<Vec<Category>>;
    fn load_customers(&self) -> Result<Vec<Customer>>;
    fn load_orders(&self) -> Result<Vec<Order>>;
}

/// An entity collection that can be fetched from a `RecordStore`.
pub trait Entity: Sized {
    const COLLECTION: &'static str;

    fn load(store: &dyn RecordStore) -> Result<Vec<Self>>;
}

impl Entity for Product {
    const COLLECTION: &'static str = "products";

    fn load(store: &dyn RecordStore) -> Result<Vec<Self>> {
        store.load_products()
    }
}

impl Entity for Category {
    const COLLECTION: &'static str = "categories";

    fn load(store: &dyn RecordStore) -> Result<Vec<Self>> {
        store.load_categories()
    }
}

impl Entity for Customer {
    const COLLECTION: &'static str = "customers";

    fn load(store: &dyn RecordStore) -> Result<Vec<Self>> {
        store.load_customers()
    }
}

impl Entity for Order {
    const COLLECTION: &'static str = "orders";

    fn load(store: &dyn RecordStore) -> Result<Vec<Self>> {
        store.load_orders()
    }
}

pub trait ConfigProvider {
    fn store_kind(&self) -> crate::config::toml_config::StoreKind;
    fn data_path(&self) -> Option<&str>;
    fn round_trip_latency_ms(&self) -> u64;
    fn prompt(&self) -> &str;
}
