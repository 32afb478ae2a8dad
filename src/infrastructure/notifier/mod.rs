// src/infrastructure/notifier/mod.rs
// Order notification through a Resend-style email API

use std::sync::Arc;

use async_trait::async_trait;
use hyper::client::HttpConnector;
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Body, Client, Method, Request};
use hyper_tls::HttpsConnector;
use serde_json::json;

use crate::config::NotifierConfig;
use crate::domain::errors::{NotifierError, NotifierResult};
use crate::domain::models::Order;
use crate::domain::service::OrderNotificationService;

/// The plain-text order summary mailed to the bakery operator.
pub fn render_order_email(order: &Order) -> String {
    let items_list = order
        .items
        .iter()
        .map(|item| format!("- {} ({}x) - ${:.2}", item.name, item.quantity, item.subtotal()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Nuevo Pedido de Healthy Breads\n\n\
         Cliente:\n\
         - Nombre: {}\n\
         - Teléfono: {}\n\
         - Dirección: {}\n\n\
         Productos:\n\
         {}\n\n\
         Total: ${:.2}\n",
        order.customer_details.name,
        order.customer_details.phone,
        order.customer_details.address,
        items_list,
        order.total_amount,
    )
}

/// Delivers the order summary with an authenticated HTTPS POST carrying a
/// `{from, to, subject, text}` payload.
pub struct EmailNotifier {
    client: Client<HttpsConnector<HttpConnector>>,
    api_url: String,
    api_key: String,
    notification_email: String,
    sender_email: String,
}

impl EmailNotifier {
    pub fn new(
        api_url: String,
        api_key: String,
        notification_email: String,
        sender_email: String,
    ) -> Self {
        let https = HttpsConnector::new();
        let client = Client::builder().build::<_, Body>(https);

        Self {
            client,
            api_url,
            api_key,
            notification_email,
            sender_email,
        }
    }
}

#[async_trait]
impl OrderNotificationService for EmailNotifier {
    async fn notify_order(&self, order: &Order) -> NotifierResult<()> {
        let payload = json!({
            "from": self.sender_email,
            "to": [self.notification_email],
            "subject": format!("Nuevo Pedido de {}", order.customer_details.name),
            "text": render_order_email(order),
        });

        let request = Request::builder()
            .method(Method::POST)
            .uri(self.api_url.as_str())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .map_err(|e| NotifierError::Request(e.to_string()))?;

        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| NotifierError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifierError::Status(response.status().as_u16()));
        }

        log::info!("Notification for order {} delivered", order.id);
        Ok(())
    }
}

/// Fallback when no API key is configured: the summary is logged and the
/// call succeeds, so checkout behaves the same with or without email.
pub struct DisabledNotifier;

#[async_trait]
impl OrderNotificationService for DisabledNotifier {
    async fn notify_order(&self, order: &Order) -> NotifierResult<()> {
        log::info!(
            "Email notifications disabled; summary for order {}:\n{}",
            order.id,
            render_order_email(order)
        );
        Ok(())
    }
}

/// Pick the notifier implementation for the current configuration.
pub fn notifier_from_config(
    config: &NotifierConfig,
) -> Arc<dyn OrderNotificationService + Send + Sync> {
    match &config.api_key {
        Some(api_key) => Arc::new(EmailNotifier::new(
            config.api_url.clone(),
            api_key.clone(),
            config.notification_email.clone(),
            config.sender_email.clone(),
        )),
        None => {
            log::warn!("RESEND_API_KEY not set; order notifications are disabled");
            Arc::new(DisabledNotifier)
        }
    }
}
