//! Driving port for reading orders.

use async_trait::async_trait;

use crate::domain::{CustomerProfile, Email, Error, Order, OrderScope};

/// Read-side order use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// Orders in scope with their items.
    async fn list_orders(&self, scope: OrderScope) -> Result<Vec<Order>, Error>;

    /// A user looked up by e-mail, with their order history.
    async fn customer_profile(&self, email: &Email) -> Result<CustomerProfile, Error>;
}
