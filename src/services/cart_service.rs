use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{CartItem, Product};

pub const CHECKOUT_MESSAGE: &str = "Checkout functionality is simulated.";

/// In-memory cart. Not persisted.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<CartItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub message: String,
    pub total: f64,
    pub item_count: u64,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Increment the entry for `product`, or append it with quantity 1.
    pub fn add(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.id() == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            }),
        }
        tracing::debug!(product_id = %product.id, "added to cart");
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|item| item.id() != id);
    }

    /// Apply `delta` to the entry's quantity, flooring at zero. Zero removes the entry.
    pub fn adjust_quantity(&mut self, id: &str, delta: i64) {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            return;
        };
        let next = i64::from(self.items[index].quantity)
            .saturating_add(delta)
            .max(0);
        if next == 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
    }

    pub fn total(&self) -> f64 {
        cart_total(&self.items)
    }

    pub fn item_count(&self) -> u64 {
        cart_item_count(&self.items)
    }

    /// Summarize the cart for the simulated checkout. The cart is left as is.
    pub fn checkout(&self) -> CheckoutSummary {
        CheckoutSummary {
            message: CHECKOUT_MESSAGE.to_string(),
            total: self.total(),
            item_count: self.item_count(),
        }
    }
}

pub fn cart_total(items: &[CartItem]) -> f64 {
    items.iter().map(CartItem::subtotal).sum()
}

pub fn cart_item_count(items: &[CartItem]) -> u64 {
    items
        .iter()
        .fold(0u64, |count, item| count.saturating_add(u64::from(item.quantity)))
}
