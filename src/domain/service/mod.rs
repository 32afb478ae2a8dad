// src/domain/service/mod.rs
// Domain service interfaces

use async_trait::async_trait;

use crate::domain::errors::NotifierResult;
use crate::domain::models::Order;

/// Best-effort delivery of an order summary to the bakery operator.
///
/// Callers never block order completion on this: the checkout use case
/// invokes it on a detached task and only logs failures.
#[async_trait]
pub trait OrderNotificationService {
    async fn notify_order(&self, order: &Order) -> NotifierResult<()>;
}
