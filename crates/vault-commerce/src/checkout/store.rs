//! Persisted order history.

use vault_store::ListSlot;

use crate::checkout::{NewOrder, Order};
use crate::error::CommerceError;
use crate::ids::OrderId;

/// Append-only order list kept in one storage slot.
#[derive(Debug, Clone)]
pub struct OrderStore {
    slot: ListSlot<Order>,
    brand_tag: String,
}

impl OrderStore {
    /// Create a store whose generated ids start with `brand_tag`.
    pub fn new(slot: ListSlot<Order>, brand_tag: impl Into<String>) -> Self {
        Self {
            slot,
            brand_tag: brand_tag.into(),
        }
    }

    /// Assign an id and timestamp, append, and return the stored order.
    pub async fn create_order(&self, new: NewOrder) -> Order {
        let order = Order::from_new(OrderId::generate(&self.brand_tag), new);
        let stored = order.clone();
        self.slot.update(move |orders| orders.push(stored)).await;

        tracing::info!(order_id = %order.id, total = %order.total, "Order created");
        order
    }

    /// Find an order by id.
    pub fn get_order_by_id(&self, id: &str) -> Result<Order, CommerceError> {
        self.slot
            .read()
            .into_iter()
            .find(|order| order.id.as_str() == id)
            .ok_or_else(|| CommerceError::OrderNotFound(id.to_string()))
    }

    /// Every stored order, oldest first.
    pub fn get_all_orders(&self) -> Vec<Order> {
        self.slot.read()
    }
}
