//! Cart domain service.
//!
//! Carts are replace-only sets. Every id is checked against the catalog before
//! the repository swaps the stored set in one transaction. Concurrent
//! replacements for one user are last-write-wins.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::customer_lookup::resolve_customer;
use crate::domain::port_error_mapping::map_cart_error;
use crate::domain::ports::{
    CartCommand, CartQuery, CartRepository, FoodItemRepository, UserDirectory,
};
use crate::domain::pricing::distinct_ids;
use crate::domain::{CustomerRef, Error, FoodItem, FoodItemId, PriceResolver};

/// Cart service implementing [`CartQuery`] and [`CartCommand`].
pub struct CartService<C, R, D> {
    carts: Arc<C>,
    resolver: PriceResolver<R>,
    users: Arc<D>,
}

impl<C, R, D> CartService<C, R, D> {
    /// Create a service from its repositories.
    pub fn new(carts: Arc<C>, catalog: Arc<R>, users: Arc<D>) -> Self {
        Self {
            carts,
            resolver: PriceResolver::new(catalog),
            users,
        }
    }
}

#[async_trait]
impl<C, R, D> CartQuery for CartService<C, R, D>
where
    C: CartRepository,
    R: FoodItemRepository,
    D: UserDirectory,
{
    async fn cart(&self, customer: &CustomerRef) -> Result<Vec<FoodItem>, Error> {
        let user = resolve_customer(self.users.as_ref(), customer).await?;
        self.carts.find(user.id).await.map_err(map_cart_error)
    }
}

#[async_trait]
impl<C, R, D> CartCommand for CartService<C, R, D>
where
    C: CartRepository,
    R: FoodItemRepository,
    D: UserDirectory,
{
    async fn replace_cart(
        &self,
        customer: &CustomerRef,
        items: Vec<FoodItemId>,
    ) -> Result<Vec<FoodItem>, Error> {
        let user = resolve_customer(self.users.as_ref(), customer).await?;
        let items = distinct_ids(&items);
        self.resolver.verify(&items).await?;

        let stored = self
            .carts
            .replace(user.id, &items)
            .await
            .map_err(map_cart_error)?;
        info!(user_id = %user.id, items = stored.len(), "cart replaced");
        Ok(stored)
    }
}

#[cfg(test)]
#[path = "cart_service_tests.rs"]
mod tests;
