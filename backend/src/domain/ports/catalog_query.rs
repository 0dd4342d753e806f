//! Driving port for catalog browsing.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{CatalogFilter, Error, FoodItem, FoodItemId};

/// Read-side catalog use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// Filtered, paginated listing.
    async fn list_items(&self, filter: CatalogFilter) -> Result<Page<FoodItem>, Error>;

    /// Single item or `not_found`.
    async fn get_item(&self, id: FoodItemId) -> Result<FoodItem, Error>;
}
