//! Driving port for placing and removing orders.

use async_trait::async_trait;

use crate::domain::{CustomerRef, Error, FoodItemId, Order, OrderId};

/// Order placement input shared by every entry shape.
///
/// Carries no total; the price resolver computes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrderRequest {
    pub customer: CustomerRef,
    pub address: String,
    /// Line items in order; repeats buy the item again.
    pub item_ids: Vec<FoodItemId>,
}

/// Write-side order use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Resolve, price and persist an order.
    async fn place_order(&self, request: PlaceOrderRequest) -> Result<Order, Error>;

    /// Delete an order and its line items.
    async fn delete_order(&self, id: OrderId) -> Result<(), Error>;
}
