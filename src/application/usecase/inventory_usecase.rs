// src/application/usecase/inventory_usecase.rs
// Inventory use case: the admin-facing stock mutation and export path

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::catalog;
use crate::domain::errors::AppResult;
use crate::domain::models::Product;
use crate::domain::repository::CatalogRepository;

/// Inventory management use case
#[async_trait]
pub trait InventoryUseCase {
    /// The current catalog snapshot.
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    /// Set one product's stock level. The new snapshot is persisted through
    /// the catalog store before it is returned.
    async fn set_stock(&self, product_id: &str, new_stock: u32) -> AppResult<Vec<Product>>;

    /// The persisted snapshot's exact bytes, for download.
    async fn export_inventory(&self) -> AppResult<String>;
}

pub struct InventoryManager {
    catalog_repository: Arc<Mutex<dyn CatalogRepository + Send + Sync>>,
}

impl InventoryManager {
    pub fn new(catalog_repository: Arc<Mutex<dyn CatalogRepository + Send + Sync>>) -> Self {
        Self { catalog_repository }
    }
}

#[async_trait]
impl InventoryUseCase for InventoryManager {
    async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(self.catalog_repository.lock().await.load().await?)
    }

    async fn set_stock(&self, product_id: &str, new_stock: u32) -> AppResult<Vec<Product>> {
        // One lock acquisition covers the whole read-modify-write
        let repository = self.catalog_repository.lock().await;
        let snapshot = repository.load().await?;

        if catalog::find(&snapshot, product_id).is_none() {
            log::warn!("set_stock: product '{}' is not in the catalog", product_id);
        }

        let updated = catalog::with_stock_level(&snapshot, product_id, new_stock);
        repository.save(&updated).await?;
        Ok(updated)
    }

    async fn export_inventory(&self) -> AppResult<String> {
        Ok(self.catalog_repository.lock().await.export_raw().await?)
    }
}
