//! Driving port for catalog mutations.

use async_trait::async_trait;

use crate::domain::{DeletionReport, Error, FoodItem, FoodItemDraft, FoodItemId};

/// Write-side catalog use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogCommand: Send + Sync {
    /// Validate and store a new item.
    async fn create_item(&self, draft: FoodItemDraft) -> Result<FoodItem, Error>;

    /// Remove an item together with every order line and cart entry
    /// referencing it.
    async fn delete_item(&self, id: FoodItemId) -> Result<DeletionReport, Error>;
}
