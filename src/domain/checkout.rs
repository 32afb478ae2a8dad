// src/domain/checkout.rs
// Order capture state machine: SelectingItems -> EnteringDetails -> submit

use rust_decimal::Decimal;

use crate::domain::catalog;
use crate::domain::models::{CustomerDetails, Product, SelectionEntry};

/// The step the checkout flow is currently at.
///
/// Submission is terminal: a successful submit resets the session to a
/// fresh `SelectingItems`, so there is no persistent `Submitted` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    SelectingItems,
    EnteringDetails,
}

/// A customer's in-progress order: selected items plus delivery details.
///
/// All operations here are pure state transitions; the side effects of
/// submission (price resolution, ledger append, stock decrement,
/// notification) live in the checkout use case.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    step: CheckoutStep,
    selections: Vec<SelectionEntry>,
    customer: CustomerDetails,
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::SelectingItems,
            selections: Vec::new(),
            customer: CustomerDetails::default(),
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn selections(&self) -> &[SelectionEntry] {
        &self.selections
    }

    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    pub fn is_selected(&self, product_id: &str) -> bool {
        self.selections
            .iter()
            .any(|entry| entry.product_id == product_id)
    }

    /// Select a product. New selections start with quantity 1.
    pub fn select(&mut self, product_id: &str) {
        if !self.is_selected(product_id) {
            self.selections.push(SelectionEntry {
                product_id: product_id.to_string(),
                quantity: Some(1),
            });
        }
    }

    /// Deselect a product, removing its entry entirely.
    pub fn deselect(&mut self, product_id: &str) {
        self.selections.retain(|entry| entry.product_id != product_id);
    }

    /// Set the quantity for a selected product. Negative input clamps to
    /// zero; unselected products are ignored.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) {
        if let Some(entry) = self
            .selections
            .iter_mut()
            .find(|entry| entry.product_id == product_id)
        {
            entry.quantity = Some(quantity.max(0) as u32);
        }
    }

    /// Mark a selected product's quantity as entered-but-unset. Distinct
    /// from zero: both are excluded from totals, but the UI can tell an
    /// emptied field apart from an explicit 0.
    pub fn clear_quantity(&mut self, product_id: &str) {
        if let Some(entry) = self
            .selections
            .iter_mut()
            .find(|entry| entry.product_id == product_id)
        {
            entry.quantity = None;
        }
    }

    /// Selection entries that count toward the total and the submitted
    /// order, in selection order.
    pub fn countable_selections(&self) -> Vec<(&str, u32)> {
        self.selections
            .iter()
            .filter_map(|entry| {
                entry
                    .countable_quantity()
                    .map(|quantity| (entry.product_id.as_str(), quantity))
            })
            .collect()
    }

    /// The displayed total against a catalog snapshot. A selected id that
    /// is missing from the snapshot contributes nothing.
    pub fn total(&self, snapshot: &[Product]) -> Decimal {
        self.countable_selections()
            .iter()
            .map(|(product_id, quantity)| {
                let price = catalog::find(snapshot, product_id)
                    .map(|product| product.price)
                    .unwrap_or_default();
                price * Decimal::from(*quantity)
            })
            .sum()
    }

    /// Move to the delivery details step. Guarded: without at least one
    /// entry with a positive quantity this is a no-op and returns false.
    pub fn continue_to_details(&mut self) -> bool {
        if self.step != CheckoutStep::SelectingItems {
            return false;
        }
        if self.countable_selections().is_empty() {
            return false;
        }
        self.step = CheckoutStep::EnteringDetails;
        true
    }

    /// Return to item selection. Unconditional; selections and entered
    /// details are preserved.
    pub fn back(&mut self) {
        self.step = CheckoutStep::SelectingItems;
    }

    pub fn set_customer_name(&mut self, name: &str) {
        self.customer.name = name.to_string();
    }

    pub fn set_customer_phone(&mut self, phone: &str) {
        self.customer.phone = phone.to_string();
    }

    pub fn set_customer_address(&mut self, address: &str) {
        self.customer.address = address.to_string();
    }

    pub fn details_complete(&self) -> bool {
        self.customer.is_complete()
    }

    /// Reset to a fresh session after a successful submission.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}
