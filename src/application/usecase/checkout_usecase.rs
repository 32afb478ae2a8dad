// src/application/usecase/checkout_usecase.rs
// Checkout use case: the side-effecting half of order capture

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::domain::catalog;
use crate::domain::checkout::{CheckoutSession, CheckoutStep};
use crate::domain::errors::{AppResult, CheckoutError};
use crate::domain::models::{Order, OrderItem, Product};
use crate::domain::repository::{CatalogRepository, OrderRepository};
use crate::domain::service::OrderNotificationService;

/// Order submission use case
#[async_trait]
pub trait CheckoutUseCase {
    /// The catalog snapshot the customer is ordering against.
    async fn current_catalog(&self) -> AppResult<Vec<Product>>;

    /// Submit a session that is at the details step with complete customer
    /// details: resolve prices, append to the ledger, decrement stock
    /// (floored at zero), hand the order to the notifier on a detached
    /// task, and reset the session. On rejection the session is unchanged.
    async fn submit(&self, session: &mut CheckoutSession) -> AppResult<Order>;

    /// Wait for detached notification deliveries to settle. Used at
    /// shutdown; never called on the submission path.
    async fn drain_notifications(&self);
}

pub struct CheckoutManager {
    catalog_repository: Arc<Mutex<dyn CatalogRepository + Send + Sync>>,
    order_repository: Arc<Mutex<dyn OrderRepository + Send + Sync>>,
    notifier: Arc<dyn OrderNotificationService + Send + Sync>,
    notification_tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl CheckoutManager {
    pub fn new(
        catalog_repository: Arc<Mutex<dyn CatalogRepository + Send + Sync>>,
        order_repository: Arc<Mutex<dyn OrderRepository + Send + Sync>>,
        notifier: Arc<dyn OrderNotificationService + Send + Sync>,
    ) -> Self {
        Self {
            catalog_repository,
            order_repository,
            notifier,
            notification_tasks: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CheckoutUseCase for CheckoutManager {
    async fn current_catalog(&self) -> AppResult<Vec<Product>> {
        Ok(self.catalog_repository.lock().await.load().await?)
    }

    async fn submit(&self, session: &mut CheckoutSession) -> AppResult<Order> {
        if session.step() != CheckoutStep::EnteringDetails {
            return Err(CheckoutError::WrongStep.into());
        }
        if !session.details_complete() {
            return Err(CheckoutError::MissingCustomerDetails.into());
        }

        let included: Vec<(String, u32)> = session
            .countable_selections()
            .into_iter()
            .map(|(product_id, quantity)| (product_id.to_string(), quantity))
            .collect();
        if included.is_empty() {
            return Err(CheckoutError::EmptySelection.into());
        }

        // Resolve names and prices against the current snapshot before any
        // side effect; a stale id rejects the whole submission.
        let snapshot = self.current_catalog().await?;
        let mut items = Vec::with_capacity(included.len());
        let mut total_amount = Decimal::ZERO;
        for (product_id, quantity) in &included {
            let product = catalog::find(&snapshot, product_id)
                .ok_or_else(|| CheckoutError::UnknownProduct(product_id.clone()))?;
            let item = OrderItem {
                id: product.id.clone(),
                name: product.name.clone(),
                quantity: *quantity,
                price: product.price,
            };
            total_amount += item.subtotal();
            items.push(item);
        }

        let order = Order {
            id: Utc::now().timestamp_millis().to_string(),
            date: Utc::now(),
            items,
            customer_details: session.customer().clone(),
            total_amount,
        };

        self.order_repository
            .lock()
            .await
            .append(order.clone())
            .await?;

        // One stock update per included item, each persisted through the
        // catalog store
        for (product_id, quantity) in &included {
            let repository = self.catalog_repository.lock().await;
            let current = repository.load().await?;

            if let Some(product) = catalog::find(&current, product_id) {
                if product.stock < *quantity {
                    log::warn!(
                        "Order {} takes {} of '{}' with only {} in stock; flooring at zero",
                        order.id,
                        quantity,
                        product_id,
                        product.stock
                    );
                }
            }

            let updated = catalog::with_stock_decremented(&current, product_id, *quantity);
            repository.save(&updated).await?;
        }

        // Fire and forget: order completion never waits on the notifier
        let notifier = Arc::clone(&self.notifier);
        let notified = order.clone();
        let task = tokio::spawn(async move {
            if let Err(e) = notifier.notify_order(&notified).await {
                log::error!("Notification for order {} failed: {}", notified.id, e);
            }
        });
        self.notification_tasks.lock().await.push(task);

        session.reset();
        log::info!("Order {} recorded, total ${}", order.id, order.total_amount);
        Ok(order)
    }

    async fn drain_notifications(&self) {
        let tasks: Vec<JoinHandle<()>> = self.notification_tasks.lock().await.drain(..).collect();
        for task in tasks {
            let _ = task.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecase::testing::{
        product, InMemoryCatalogRepository, InMemoryOrderRepository, RecordingNotifier,
    };
    use crate::domain::errors::AppError;
    use rust_decimal_macros::dec;

    struct Fixture {
        manager: CheckoutManager,
        orders: Arc<Mutex<dyn OrderRepository + Send + Sync>>,
        notifier: Arc<RecordingNotifier>,
    }

    fn fixture(products: Vec<Product>) -> Fixture {
        fixture_with_notifier(products, Arc::new(RecordingNotifier::new(false)))
    }

    fn fixture_with_notifier(products: Vec<Product>, notifier: Arc<RecordingNotifier>) -> Fixture {
        let catalog: Arc<Mutex<dyn CatalogRepository + Send + Sync>> =
            Arc::new(Mutex::new(InMemoryCatalogRepository::new(products)));
        let orders: Arc<Mutex<dyn OrderRepository + Send + Sync>> =
            Arc::new(Mutex::new(InMemoryOrderRepository::new()));
        let manager = CheckoutManager::new(catalog, Arc::clone(&orders), notifier.clone());
        Fixture {
            manager,
            orders,
            notifier,
        }
    }

    fn session_for(product_id: &str, quantity: i64) -> CheckoutSession {
        let mut session = CheckoutSession::new();
        session.select(product_id);
        session.set_quantity(product_id, quantity);
        assert!(session.continue_to_details());
        session.set_customer_name("Ana");
        session.set_customer_phone("555-0134");
        session.set_customer_address("Av. Juárez 12");
        session
    }

    #[tokio::test]
    async fn submission_records_the_order_and_decrements_stock() {
        let fixture = fixture(vec![product("a", 5, dec!(10))]);
        let mut session = session_for("a", 3);

        let displayed = session.total(&fixture.manager.current_catalog().await.unwrap());
        assert_eq!(displayed, dec!(30));

        let order = fixture.manager.submit(&mut session).await.unwrap();

        // recomputed total agrees with the displayed one
        assert_eq!(order.total_amount, displayed);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].id, "a");
        assert_eq!(order.items[0].quantity, 3);
        assert_eq!(order.items[0].price, dec!(10));

        let ledger = fixture.orders.lock().await.list_all().await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].id, order.id);

        let snapshot = fixture.manager.current_catalog().await.unwrap();
        assert_eq!(catalog::find(&snapshot, "a").unwrap().stock, 2);

        // terminal state resets the machine
        assert_eq!(session.step(), CheckoutStep::SelectingItems);
        assert!(session.selections().is_empty());
    }

    #[tokio::test]
    async fn over_ordering_proceeds_and_floors_stock_at_zero() {
        let fixture = fixture(vec![product("a", 5, dec!(10))]);
        let mut session = session_for("a", 10);

        let order = fixture.manager.submit(&mut session).await.unwrap();
        assert_eq!(order.total_amount, dec!(100));

        let snapshot = fixture.manager.current_catalog().await.unwrap();
        assert_eq!(catalog::find(&snapshot, "a").unwrap().stock, 0);
    }

    #[tokio::test]
    async fn unset_quantities_are_excluded_from_the_submitted_order() {
        let fixture = fixture(vec![product("a", 5, dec!(10)), product("b", 5, dec!(20))]);
        let mut session = CheckoutSession::new();
        session.select("a");
        session.set_quantity("a", 2);
        session.select("b");
        session.clear_quantity("b");
        assert!(session.continue_to_details());
        session.set_customer_name("Ana");
        session.set_customer_phone("555-0134");
        session.set_customer_address("Av. Juárez 12");

        let order = fixture.manager.submit(&mut session).await.unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].id, "a");
        assert_eq!(order.total_amount, dec!(20));

        // the untouched product keeps its stock
        let snapshot = fixture.manager.current_catalog().await.unwrap();
        assert_eq!(catalog::find(&snapshot, "b").unwrap().stock, 5);
    }

    #[tokio::test]
    async fn submission_outside_the_details_step_is_rejected() {
        let fixture = fixture(vec![product("a", 5, dec!(10))]);
        let mut session = CheckoutSession::new();
        session.select("a");

        let err = fixture.manager.submit(&mut session).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Checkout(CheckoutError::WrongStep)
        ));
        assert!(fixture.orders.lock().await.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn incomplete_details_reject_and_preserve_the_session() {
        let fixture = fixture(vec![product("a", 5, dec!(10))]);
        let mut session = CheckoutSession::new();
        session.select("a");
        session.set_quantity("a", 2);
        assert!(session.continue_to_details());
        session.set_customer_name("Ana");

        let err = fixture.manager.submit(&mut session).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Checkout(CheckoutError::MissingCustomerDetails)
        ));

        // in-progress data stays for another attempt
        assert_eq!(session.step(), CheckoutStep::EnteringDetails);
        assert_eq!(session.countable_selections(), vec![("a", 2)]);
        assert_eq!(session.customer().name, "Ana");
    }

    #[tokio::test]
    async fn stale_product_id_rejects_before_any_side_effect() {
        let fixture = fixture(vec![product("a", 5, dec!(10))]);
        let mut session = session_for("a", 2);
        session.back();
        session.select("retired");
        session.set_quantity("retired", 1);
        assert!(session.continue_to_details());

        let err = fixture.manager.submit(&mut session).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Checkout(CheckoutError::UnknownProduct(ref id)) if id == "retired"
        ));

        assert!(fixture.orders.lock().await.list_all().await.unwrap().is_empty());
        let snapshot = fixture.manager.current_catalog().await.unwrap();
        assert_eq!(catalog::find(&snapshot, "a").unwrap().stock, 5);
        assert_eq!(session.step(), CheckoutStep::EnteringDetails);
    }

    #[tokio::test]
    async fn the_notifier_receives_the_submitted_order() {
        let fixture = fixture(vec![product("a", 5, dec!(10))]);
        let mut session = session_for("a", 1);

        let order = fixture.manager.submit(&mut session).await.unwrap();
        fixture.manager.drain_notifications().await;

        let notified = fixture.notifier.notified();
        assert_eq!(notified.len(), 1);
        assert_eq!(notified[0].id, order.id);
        assert_eq!(notified[0].total_amount, dec!(10));
    }

    #[tokio::test]
    async fn notification_failure_does_not_fail_the_order() {
        let fixture = fixture_with_notifier(
            vec![product("a", 5, dec!(10))],
            Arc::new(RecordingNotifier::new(true)),
        );
        let mut session = session_for("a", 1);

        let order = fixture.manager.submit(&mut session).await.unwrap();
        fixture.manager.drain_notifications().await;

        let ledger = fixture.orders.lock().await.list_all().await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].id, order.id);
    }
}
