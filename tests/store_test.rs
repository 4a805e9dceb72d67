use query_tour::adapters::memory::sample_dataset;
use query_tour::config::toml_config::{StoreKind, TomlConfig};
use query_tour::core::RecordStore;
use query_tour::{open_store, Catalog, CsvStore, JsonStore, MemoryStore, QueryError, Session};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_json_store_serves_written_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("snapshots").join("northwind.json");
    let dataset = sample_dataset();

    JsonStore::write_dataset(&path, &dataset).unwrap();
    let store = JsonStore::new(&path);

    assert!(store.ping().is_ok());
    assert_eq!(store.load_categories().unwrap(), dataset.categories);
    assert_eq!(store.load_products().unwrap(), dataset.products);
    assert_eq!(store.load_customers().unwrap(), dataset.customers);
    assert_eq!(store.load_orders().unwrap(), dataset.orders);
}

#[test]
fn test_csv_store_serves_written_directory() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = sample_dataset();

    CsvStore::write_dataset(temp_dir.path(), &dataset).unwrap();
    let store = CsvStore::new(temp_dir.path());

    assert!(temp_dir.path().join("orders.csv").is_file());
    assert_eq!(store.load_categories().unwrap(), dataset.categories);
    assert_eq!(store.load_products().unwrap(), dataset.products);
    assert_eq!(store.load_customers().unwrap(), dataset.customers);

    let orders = store.load_orders().unwrap();
    assert_eq!(orders, dataset.orders);
    assert!(orders.iter().any(|o| o.order_date.is_none()));
}

#[test]
fn test_missing_sources_are_unavailable() {
    let temp_dir = TempDir::new().unwrap();

    let json = JsonStore::new(temp_dir.path().join("absent.json"));
    assert!(matches!(
        Session::open(&json, Duration::ZERO),
        Err(QueryError::DataSourceUnavailable { .. })
    ));

    let csv = CsvStore::new(temp_dir.path().join("absent"));
    assert!(matches!(
        csv.load_products(),
        Err(QueryError::DataSourceUnavailable { .. })
    ));

    // Directory exists but one collection file is missing
    let csv = CsvStore::new(temp_dir.path());
    match csv.load_orders() {
        Err(QueryError::DataSourceUnavailable { reason, .. }) => {
            assert!(reason.contains("orders.csv"))
        }
        other => panic!("expected DataSourceUnavailable, got {:?}", other),
    }
}

#[test]
fn test_corrupt_snapshot_is_a_serialization_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = JsonStore::new(&path);
    assert!(matches!(
        store.load_products(),
        Err(QueryError::SerializationError(_))
    ));
}

#[test]
fn test_catalog_results_do_not_depend_on_the_store() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = sample_dataset();
    JsonStore::write_dataset(temp_dir.path().join("data.json"), &dataset).unwrap();
    CsvStore::write_dataset(temp_dir.path().join("csv"), &dataset).unwrap();

    let memory = MemoryStore::new(dataset);
    let json = JsonStore::new(temp_dir.path().join("data.json"));
    let csv = CsvStore::new(temp_dir.path().join("csv"));

    let expected = Catalog::new(&memory, Duration::ZERO).set_letters().unwrap();
    assert_eq!(
        Catalog::new(&json, Duration::ZERO).set_letters().unwrap(),
        expected
    );
    assert_eq!(
        Catalog::new(&csv, Duration::ZERO).set_letters().unwrap(),
        expected
    );

    let timing = Catalog::new(&csv, Duration::ZERO).load_timing().unwrap();
    assert_eq!(timing.eager.round_trips, 1);
}

#[test]
fn test_open_store_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    JsonStore::write_dataset(&path, &sample_dataset()).unwrap();

    let toml_content = format!(
        r#"
[store]
kind = "json"
path = "{}"
"#,
        path.display()
    );
    let config = TomlConfig::from_toml_str(&toml_content).unwrap();
    assert_eq!(config.store.kind, StoreKind::Json);

    let store = open_store(&config).unwrap();
    assert!(store.describe().starts_with("json:"));
    assert_eq!(store.load_customers().unwrap().len(), 7);

    let memory = open_store(&TomlConfig::default()).unwrap();
    assert_eq!(memory.describe(), "memory");
}
