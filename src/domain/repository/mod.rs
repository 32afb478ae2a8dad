// src/domain/repository/mod.rs
// Repository interfaces for persisted storefront state

use async_trait::async_trait;

use crate::domain::errors::StoreResult;
use crate::domain::models::{Order, Product};

/// Repository interface for the catalog snapshot.
///
/// The snapshot is read and written whole-value: `save` overwrites the
/// persisted state unconditionally, last writer wins.
#[async_trait]
pub trait CatalogRepository {
    /// The persisted snapshot, or the environment's seed list when nothing
    /// is persisted yet (the seed is persisted as the initial snapshot).
    async fn load(&self) -> StoreResult<Vec<Product>>;

    /// Overwrite the persisted snapshot.
    async fn save(&self, snapshot: &[Product]) -> StoreResult<()>;

    /// The persisted snapshot's exact bytes, for the inventory export.
    /// Seeds the store first if nothing is persisted.
    async fn export_raw(&self) -> StoreResult<String>;
}

/// Repository interface for the append-only order ledger.
#[async_trait]
pub trait OrderRepository {
    /// Append one order: read the full sequence, push, write back.
    async fn append(&self, order: Order) -> StoreResult<()>;

    /// All orders in insertion order, oldest first.
    async fn list_all(&self) -> StoreResult<Vec<Order>>;
}

/// Repository interface for the client-readable admin flag. Not a security
/// boundary.
#[async_trait]
pub trait AdminSessionRepository {
    async fn is_authenticated(&self) -> StoreResult<bool>;

    async fn set_authenticated(&self) -> StoreResult<()>;

    /// Remove the flag entirely (logout).
    async fn clear(&self) -> StoreResult<()>;
}
