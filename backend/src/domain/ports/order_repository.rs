//! Port for order persistence.

use async_trait::async_trait;

use crate::domain::{NewOrder, Order, OrderId, OrderScope};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order repository adapters.
    pub enum OrderRepositoryError {
        /// Repository connection could not be established or timed out.
        Connection { message: String } =>
            "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "order repository query failed: {message}",
        /// A referenced user or food item no longer exists.
        Constraint { message: String } =>
            "order repository constraint violated: {message}",
    }
}

/// Port for storing orders with their line items.
///
/// Line items keep request order and may repeat a food item.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert the order row and one association row per line in a single
    /// transaction, returning the stored order with items loaded.
    async fn create_with_items(&self, order: &NewOrder) -> Result<Order, OrderRepositoryError>;

    /// Orders in the scope, ordered by id, items loaded.
    async fn list(&self, scope: OrderScope) -> Result<Vec<Order>, OrderRepositoryError>;

    /// Delete the association rows and the order row together.
    ///
    /// Returns `false` when no such order exists.
    async fn delete_with_items(&self, id: OrderId) -> Result<bool, OrderRepositoryError>;
}
