//! Driving port for reading carts.

use async_trait::async_trait;

use crate::domain::{CustomerRef, Error, FoodItem};

/// Read-side cart use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartQuery: Send + Sync {
    /// Items in the customer's cart; empty when never set.
    async fn cart(&self, customer: &CustomerRef) -> Result<Vec<FoodItem>, Error>;
}
