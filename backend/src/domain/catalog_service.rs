//! Catalog domain service.
//!
//! Implements the catalog driving ports over a [`FoodItemRepository`]. Deletes
//! go through the [`DeletionCoordinator`] so association rows never dangle.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use serde_json::json;

use crate::domain::port_error_mapping::{FOOD_ITEM_NOT_FOUND, map_food_item_error};
use crate::domain::ports::{CatalogCommand, CatalogQuery, FoodItemRepository};
use crate::domain::{
    CatalogFilter, DeletionCoordinator, DeletionReport, Error, FoodItem, FoodItemDraft,
    FoodItemId, FoodItemValidationError, NewFoodItem,
};

/// Catalog service implementing [`CatalogQuery`] and [`CatalogCommand`].
pub struct CatalogService<R> {
    catalog: Arc<R>,
    deletion: DeletionCoordinator<R>,
}

impl<R> CatalogService<R> {
    /// Create a service over the given repository.
    pub fn new(catalog: Arc<R>) -> Self {
        Self {
            deletion: DeletionCoordinator::new(Arc::clone(&catalog)),
            catalog,
        }
    }
}

fn map_validation_error(error: FoodItemValidationError) -> Error {
    let field = match error {
        FoodItemValidationError::EmptyName => "name",
        FoodItemValidationError::NegativePrice { .. }
        | FoodItemValidationError::PriceTooLarge { .. } => "price",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": "invalid_food_item",
    }))
}

#[async_trait]
impl<R> CatalogQuery for CatalogService<R>
where
    R: FoodItemRepository,
{
    async fn list_items(&self, filter: CatalogFilter) -> Result<Page<FoodItem>, Error> {
        if filter.is_empty_range() {
            return Ok(Page::new(Vec::new(), filter.page, 0));
        }
        let page = self
            .catalog
            .list(&filter)
            .await
            .map_err(map_food_item_error)?;
        Ok(Page::new(page.items, filter.page, page.total))
    }

    async fn get_item(&self, id: FoodItemId) -> Result<FoodItem, Error> {
        self.catalog
            .find_by_id(id)
            .await
            .map_err(map_food_item_error)?
            .ok_or_else(|| Error::not_found(FOOD_ITEM_NOT_FOUND))
    }
}

#[async_trait]
impl<R> CatalogCommand for CatalogService<R>
where
    R: FoodItemRepository,
{
    async fn create_item(&self, draft: FoodItemDraft) -> Result<FoodItem, Error> {
        let item = NewFoodItem::try_from(draft).map_err(map_validation_error)?;
        self.catalog
            .create(&item)
            .await
            .map_err(map_food_item_error)
    }

    async fn delete_item(&self, id: FoodItemId) -> Result<DeletionReport, Error> {
        self.deletion.delete_food_item(id).await
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
