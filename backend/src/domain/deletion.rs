//! Transactional deletion of catalog items and orders.
//!
//! A food item delete walks `Requested -> AssociationsCleared -> RowDeleted`,
//! or `Requested -> Aborted` when the item does not exist. The repository runs
//! the association clear and the row delete in one transaction, so a failure
//! at either step leaves the catalog untouched. Callers only ever see
//! [`DELETION_CONFLICT`]; the underlying cause goes to the log.

use std::fmt;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::port_error_mapping::{
    CATALOG_UNAVAILABLE, FOOD_ITEM_NOT_FOUND, ORDER_NOT_FOUND, ORDER_STORE_UNAVAILABLE,
};
use crate::domain::ports::{
    ClearedAssociations, FoodItemRepository, FoodItemRepositoryError, OrderRepository,
    OrderRepositoryError,
};
use crate::domain::{Error, FoodItemId, OrderId};

/// Message returned for any deletion that the store refused.
pub const DELETION_CONFLICT: &str = "deletion failed due to constraints";

/// Progress of a food item deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionStage {
    Requested,
    AssociationsCleared,
    RowDeleted,
    Aborted,
}

impl fmt::Display for DeletionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Requested => "requested",
            Self::AssociationsCleared => "associations_cleared",
            Self::RowDeleted => "row_deleted",
            Self::Aborted => "aborted",
        })
    }
}

/// Outcome of a completed food item deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionReport {
    pub id: FoodItemId,
    pub stage: DeletionStage,
    pub cleared: ClearedAssociations,
}

/// Coordinates deletes that must clear association rows first.
///
/// The same coordinator type serves both repositories; the available methods
/// depend on which port `R` implements.
#[derive(Clone)]
pub struct DeletionCoordinator<R> {
    repository: Arc<R>,
}

impl<R> DeletionCoordinator<R> {
    /// Create a coordinator over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> DeletionCoordinator<R>
where
    R: FoodItemRepository,
{
    /// Delete a food item with its order lines and cart entries.
    pub async fn delete_food_item(&self, id: FoodItemId) -> Result<DeletionReport, Error> {
        info!(food_item_id = %id, stage = %DeletionStage::Requested, "food item deletion");

        match self.repository.delete_with_associations(id).await {
            Ok(Some(cleared)) => {
                info!(
                    food_item_id = %id,
                    stage = %DeletionStage::AssociationsCleared,
                    order_lines = cleared.order_lines,
                    cart_entries = cleared.cart_entries,
                    "food item deletion"
                );
                info!(food_item_id = %id, stage = %DeletionStage::RowDeleted, "food item deletion");
                Ok(DeletionReport {
                    id,
                    stage: DeletionStage::RowDeleted,
                    cleared,
                })
            }
            Ok(None) => {
                info!(food_item_id = %id, stage = %DeletionStage::Aborted, "food item not found");
                Err(Error::not_found(FOOD_ITEM_NOT_FOUND))
            }
            Err(FoodItemRepositoryError::Connection { message }) => {
                warn!(food_item_id = %id, cause = %message, "food item deletion unavailable");
                Err(Error::service_unavailable(CATALOG_UNAVAILABLE))
            }
            Err(
                FoodItemRepositoryError::Query { message }
                | FoodItemRepositoryError::Constraint { message },
            ) => {
                error!(food_item_id = %id, cause = %message, "food item deletion rolled back");
                Err(Error::conflict(DELETION_CONFLICT))
            }
        }
    }
}

impl<R> DeletionCoordinator<R>
where
    R: OrderRepository,
{
    /// Delete an order and its line items. Food items are never touched.
    pub async fn delete_order(&self, id: OrderId) -> Result<(), Error> {
        match self.repository.delete_with_items(id).await {
            Ok(true) => {
                info!(order_id = %id, "order deleted");
                Ok(())
            }
            Ok(false) => Err(Error::not_found(ORDER_NOT_FOUND)),
            Err(OrderRepositoryError::Connection { message }) => {
                warn!(order_id = %id, cause = %message, "order deletion unavailable");
                Err(Error::service_unavailable(ORDER_STORE_UNAVAILABLE))
            }
            Err(OrderRepositoryError::Query { message }) => {
                Err(Error::internal(format!("order deletion failed: {message}")))
            }
            Err(OrderRepositoryError::Constraint { message }) => {
                error!(order_id = %id, cause = %message, "order deletion rolled back");
                Err(Error::conflict(DELETION_CONFLICT))
            }
        }
    }
}
