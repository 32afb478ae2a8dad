// src/application/usecase/admin_usecase.rs
// Admin panel use case: the client-readable auth flag and the orders view

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::errors::{AppError, AppResult};
use crate::domain::models::Order;
use crate::domain::repository::{AdminSessionRepository, OrderRepository};

/// Admin panel use case. The flag is a convenience gate for the admin
/// surface, mirroring the storefront's client-side check; it is explicitly
/// not a security boundary.
#[async_trait]
pub trait AdminUseCase {
    async fn login(&self) -> AppResult<()>;

    async fn logout(&self) -> AppResult<()>;

    async fn is_authenticated(&self) -> AppResult<bool>;

    /// Errors with [`AppError::NotAuthenticated`] unless the flag is set.
    async fn require_authenticated(&self) -> AppResult<()>;

    /// The order ledger in insertion order, oldest first.
    async fn list_orders(&self) -> AppResult<Vec<Order>>;
}

pub struct AdminManager {
    admin_repository: Arc<Mutex<dyn AdminSessionRepository + Send + Sync>>,
    order_repository: Arc<Mutex<dyn OrderRepository + Send + Sync>>,
}

impl AdminManager {
    pub fn new(
        admin_repository: Arc<Mutex<dyn AdminSessionRepository + Send + Sync>>,
        order_repository: Arc<Mutex<dyn OrderRepository + Send + Sync>>,
    ) -> Self {
        Self {
            admin_repository,
            order_repository,
        }
    }
}

#[async_trait]
impl AdminUseCase for AdminManager {
    async fn login(&self) -> AppResult<()> {
        self.admin_repository.lock().await.set_authenticated().await?;
        log::info!("Admin session started");
        Ok(())
    }

    async fn logout(&self) -> AppResult<()> {
        self.admin_repository.lock().await.clear().await?;
        log::info!("Admin session ended");
        Ok(())
    }

    async fn is_authenticated(&self) -> AppResult<bool> {
        Ok(self.admin_repository.lock().await.is_authenticated().await?)
    }

    async fn require_authenticated(&self) -> AppResult<()> {
        if self.is_authenticated().await? {
            Ok(())
        } else {
            Err(AppError::NotAuthenticated)
        }
    }

    async fn list_orders(&self) -> AppResult<Vec<Order>> {
        Ok(self.order_repository.lock().await.list_all().await?)
    }
}
