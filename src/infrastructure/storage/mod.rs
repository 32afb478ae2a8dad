// src/infrastructure/storage/mod.rs
// Whole-value JSON file store and the repository implementations over it

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::catalog::{self, CatalogEnvironment};
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::models::{Order, Product};
use crate::domain::repository::{AdminSessionRepository, CatalogRepository, OrderRepository};

/// Storage key for the catalog snapshot.
pub const PRODUCTS_KEY: &str = "products";

/// Storage key for the order ledger.
pub const ORDERS_KEY: &str = "orders";

/// Storage key for the admin flag.
pub const ADMIN_SESSION_KEY: &str = "admin_authenticated";

/// One pretty-printed JSON document per fixed key under a data directory.
///
/// Documents are read and written whole-value with no merging and no
/// version check; the last writer wins. This is the durable per-client
/// store behind every repository in the crate.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    /// Read and parse a key's document. An absent file yields `None`; a
    /// malformed document is logged and also yields `None` so callers fall
    /// back to their defaults instead of crashing.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let raw = match self.read_raw(key)? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("Malformed data under '{}', treating as absent: {}", key, e);
                Ok(None)
            }
        }
    }

    /// Read a key's document as-is.
    pub fn read_raw(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// Overwrite a key's document, creating the data directory on demand.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| StoreError::Write {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        let contents = serde_json::to_string_pretty(value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        fs::write(self.path_for(key), contents).map_err(|e| StoreError::Write {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Remove a key's document if present.
    pub fn remove(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Write {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// Catalog snapshot persistence. Seeds the store from the environment's
/// static list the first time it is read.
pub struct FileCatalogRepository {
    store: JsonFileStore,
    environment: CatalogEnvironment,
}

impl FileCatalogRepository {
    pub fn new(store: JsonFileStore, environment: CatalogEnvironment) -> Self {
        Self { store, environment }
    }
}

#[async_trait]
impl CatalogRepository for FileCatalogRepository {
    async fn load(&self) -> StoreResult<Vec<Product>> {
        if let Some(snapshot) = self.store.read::<Vec<Product>>(PRODUCTS_KEY)? {
            return Ok(snapshot);
        }

        let seed = catalog::seed_products(self.environment);
        log::info!("No persisted catalog found, seeding {} products", seed.len());
        self.store.write(PRODUCTS_KEY, &seed)?;
        Ok(seed)
    }

    async fn save(&self, snapshot: &[Product]) -> StoreResult<()> {
        self.store.write(PRODUCTS_KEY, &snapshot)
    }

    async fn export_raw(&self) -> StoreResult<String> {
        if let Some(raw) = self.store.read_raw(PRODUCTS_KEY)? {
            return Ok(raw);
        }

        // First use: seed the store, then hand out exactly what was written.
        let seed = self.load().await?;
        match self.store.read_raw(PRODUCTS_KEY)? {
            Some(raw) => Ok(raw),
            None => serde_json::to_string_pretty(&seed).map_err(|e| StoreError::Read {
                key: PRODUCTS_KEY.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// Order ledger persistence: a single JSON array, rewritten on each append.
pub struct FileOrderRepository {
    store: JsonFileStore,
}

impl FileOrderRepository {
    pub fn new(store: JsonFileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrderRepository for FileOrderRepository {
    async fn append(&self, order: Order) -> StoreResult<()> {
        let mut orders = self
            .store
            .read::<Vec<Order>>(ORDERS_KEY)?
            .unwrap_or_default();
        orders.push(order);
        self.store.write(ORDERS_KEY, &orders)
    }

    async fn list_all(&self) -> StoreResult<Vec<Order>> {
        Ok(self
            .store
            .read::<Vec<Order>>(ORDERS_KEY)?
            .unwrap_or_default())
    }
}

/// The admin flag, persisted under its own key. A client-readable boolean,
/// not a security boundary.
pub struct FileAdminSessionRepository {
    store: JsonFileStore,
}

impl FileAdminSessionRepository {
    pub fn new(store: JsonFileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AdminSessionRepository for FileAdminSessionRepository {
    async fn is_authenticated(&self) -> StoreResult<bool> {
        Ok(self
            .store
            .read::<bool>(ADMIN_SESSION_KEY)?
            .unwrap_or(false))
    }

    async fn set_authenticated(&self) -> StoreResult<()> {
        self.store.write(ADMIN_SESSION_KEY, &true)
    }

    async fn clear(&self) -> StoreResult<()> {
        self.store.remove(ADMIN_SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CustomerDetails;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn order(id: &str) -> Order {
        Order {
            id: id.to_string(),
            date: Utc::now(),
            items: Vec::new(),
            customer_details: CustomerDetails {
                name: "Ana".to_string(),
                phone: "555-0134".to_string(),
                address: "Av. Juárez 12".to_string(),
            },
            total_amount: dec!(0),
        }
    }

    #[test]
    fn read_returns_none_for_absent_key() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let value: Option<Vec<Product>> = store.read(PRODUCTS_KEY).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let seed = catalog::seed_products(CatalogEnvironment::Production);

        store.write(PRODUCTS_KEY, &seed).unwrap();
        let read: Vec<Product> = store.read(PRODUCTS_KEY).unwrap().unwrap();
        assert_eq!(read, seed);
    }

    #[test]
    fn malformed_document_is_treated_as_absent() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        fs::create_dir_all(dir.path()).unwrap();
        fs::write(dir.path().join("products.json"), "{not json at all").unwrap();

        let value: Option<Vec<Product>> = store.read(PRODUCTS_KEY).unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn catalog_seeds_on_first_load_and_persists() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let repository =
            FileCatalogRepository::new(store.clone(), CatalogEnvironment::Production);

        let loaded = repository.load().await.unwrap();
        assert_eq!(loaded, catalog::seed_products(CatalogEnvironment::Production));

        // the seed is now the persisted snapshot
        let persisted: Vec<Product> = store.read(PRODUCTS_KEY).unwrap().unwrap();
        assert_eq!(persisted, loaded);
    }

    #[tokio::test]
    async fn malformed_catalog_falls_back_to_the_seed_list() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("products.json"), "[{\"id\": 42}]").unwrap();

        let repository = FileCatalogRepository::new(
            JsonFileStore::new(dir.path()),
            CatalogEnvironment::Production,
        );
        let loaded = repository.load().await.unwrap();
        assert_eq!(loaded, catalog::seed_products(CatalogEnvironment::Production));
    }

    #[tokio::test]
    async fn export_is_byte_identical_to_the_persisted_snapshot() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let repository =
            FileCatalogRepository::new(store.clone(), CatalogEnvironment::Production);

        let snapshot = catalog::with_stock_level(
            &repository.load().await.unwrap(),
            "platano",
            3,
        );
        repository.save(&snapshot).await.unwrap();

        let exported = repository.export_raw().await.unwrap();
        let on_disk = fs::read_to_string(dir.path().join("products.json")).unwrap();
        assert_eq!(exported, on_disk);
    }

    #[tokio::test]
    async fn ledger_appends_in_insertion_order() {
        let dir = tempdir().unwrap();
        let repository = FileOrderRepository::new(JsonFileStore::new(dir.path()));

        assert!(repository.list_all().await.unwrap().is_empty());

        repository.append(order("1")).await.unwrap();
        repository.append(order("2")).await.unwrap();
        repository.append(order("3")).await.unwrap();

        let ids: Vec<String> = repository
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn admin_flag_defaults_to_false_and_clears() {
        let dir = tempdir().unwrap();
        let repository = FileAdminSessionRepository::new(JsonFileStore::new(dir.path()));

        assert!(!repository.is_authenticated().await.unwrap());

        repository.set_authenticated().await.unwrap();
        assert!(repository.is_authenticated().await.unwrap());

        repository.clear().await.unwrap();
        assert!(!repository.is_authenticated().await.unwrap());

        // clearing twice is fine
        repository.clear().await.unwrap();
    }
}
