// src/domain/models.rs
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product in the bakery catalog.
///
/// `stock` is unsigned so a persisted snapshot can never hold a negative
/// stock level. Products are seeded at startup and mutated only through the
/// stock operations in [`crate::domain::catalog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable catalog key, unique within a snapshot
    pub id: String,

    pub name: String,

    pub description: String,

    /// Unit price, non-negative
    pub price: Decimal,

    /// Units currently available
    pub stock: u32,

    /// Image reference (URL)
    pub image: String,
}

/// A customer's in-progress choice of one product, prior to submission.
///
/// The quantity is a tri-state: no entry means the product is not selected,
/// `None` means the quantity field was emptied but the product is still
/// selected, and `Some(n)` is an entered count. Entries with `None` or
/// `Some(0)` are excluded from totals and from submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub product_id: String,
    pub quantity: Option<u32>,
}

impl SelectionEntry {
    /// The quantity that counts toward totals and submission, if any.
    pub fn countable_quantity(&self) -> Option<u32> {
        match self.quantity {
            Some(quantity) if quantity > 0 => Some(quantity),
            _ => None,
        }
    }
}

/// Delivery details entered by the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl CustomerDetails {
    /// All three fields are required before an order can be submitted.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.phone.trim().is_empty()
            && !self.address.trim().is_empty()
    }
}

/// One line of a completed order, with the name and unit price the product
/// had at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl OrderItem {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A completed order. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Millisecond-timestamp-derived id
    pub id: String,

    pub date: DateTime<Utc>,

    pub items: Vec<OrderItem>,

    #[serde(rename = "customerDetails")]
    pub customer_details: CustomerDetails,

    #[serde(rename = "totalAmount")]
    pub total_amount: Decimal,
}
