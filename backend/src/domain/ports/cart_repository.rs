//! Port for per-user cart storage.

use async_trait::async_trait;

use crate::domain::{FoodItem, FoodItemId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by cart repository adapters.
    pub enum CartRepositoryError {
        /// Repository connection could not be established or timed out.
        Connection { message: String } =>
            "cart repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "cart repository query failed: {message}",
        /// A referenced food item vanished before the write committed.
        Constraint { message: String } =>
            "cart repository constraint violated: {message}",
    }
}

/// Port for the user-to-food-item cart relation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Current cart contents ordered by food item id; empty if never set.
    async fn find(&self, user_id: UserId) -> Result<Vec<FoodItem>, CartRepositoryError>;

    /// Delete every entry for the user and insert `items` in one transaction.
    ///
    /// `items` is already de-duplicated. Returns the stored cart.
    async fn replace(
        &self,
        user_id: UserId,
        items: &[FoodItemId],
    ) -> Result<Vec<FoodItem>, CartRepositoryError>;
}
