//! Port for catalog persistence.
//!
//! Adapters store food items and own the association tables that reference
//! them, so deleting an item can clear order lines and cart entries in the
//! same transaction as the row delete.

use async_trait::async_trait;

use crate::domain::{CatalogFilter, CatalogPage, FoodItem, FoodItemId, NewFoodItem};

use super::define_port_error;

define_port_error! {
    /// Errors raised by food item repository adapters.
    pub enum FoodItemRepositoryError {
        /// Repository connection could not be established or timed out.
        Connection { message: String } =>
            "food item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "food item repository query failed: {message}",
        /// A database constraint rejected the mutation.
        Constraint { message: String } =>
            "food item repository constraint violated: {message}",
    }
}

/// Association rows removed while deleting a food item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearedAssociations {
    /// Order lines that referenced the item.
    pub order_lines: u64,
    /// Cart entries that referenced the item.
    pub cart_entries: u64,
}

/// Port for reading and writing the catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FoodItemRepository: Send + Sync {
    /// Filtered page ordered by id, with the count of all matches.
    ///
    /// An inverted price range yields an empty page.
    async fn list(&self, filter: &CatalogFilter) -> Result<CatalogPage, FoodItemRepositoryError>;

    /// Single item lookup.
    async fn find_by_id(&self, id: FoodItemId)
    -> Result<Option<FoodItem>, FoodItemRepositoryError>;

    /// Bulk lookup; missing ids are simply absent from the result.
    async fn find_by_ids(
        &self,
        ids: &[FoodItemId],
    ) -> Result<Vec<FoodItem>, FoodItemRepositoryError>;

    /// Insert a validated item and return it with its new id.
    async fn create(&self, item: &NewFoodItem) -> Result<FoodItem, FoodItemRepositoryError>;

    /// Clear every association row for `id`, then delete the item, atomically.
    ///
    /// Returns `None` without changing anything when the item does not exist.
    async fn delete_with_associations(
        &self,
        id: FoodItemId,
    ) -> Result<Option<ClearedAssociations>, FoodItemRepositoryError>;
}
