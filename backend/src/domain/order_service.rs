//! Order domain service.
//!
//! Orders are materialised from item ids alone. The customer is resolved
//! through the user directory, every line is priced by the [`PriceResolver`],
//! and the order row plus its line items are written in one transaction.
//! Client supplied totals never reach this layer.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::customer_lookup::resolve_customer;
use crate::domain::port_error_mapping::{USER_NOT_FOUND, map_directory_error, map_order_error};
use crate::domain::ports::{
    FoodItemRepository, OrderCommand, OrderNotifier, OrderQuery, OrderRepository,
    PlaceOrderRequest, UserDirectory,
};
use crate::domain::{
    CustomerProfile, DeletionCoordinator, Email, Error, NewOrder, Order, OrderId, OrderScope,
    PriceResolver,
};

/// Order service implementing [`OrderQuery`] and [`OrderCommand`].
pub struct OrderService<O, R, D, N> {
    orders: Arc<O>,
    resolver: PriceResolver<R>,
    users: Arc<D>,
    notifier: Arc<N>,
    deletion: DeletionCoordinator<O>,
}

impl<O, R, D, N> OrderService<O, R, D, N> {
    /// Create a service from its collaborators.
    pub fn new(orders: Arc<O>, catalog: Arc<R>, users: Arc<D>, notifier: Arc<N>) -> Self {
        Self {
            deletion: DeletionCoordinator::new(Arc::clone(&orders)),
            orders,
            resolver: PriceResolver::new(catalog),
            users,
            notifier,
        }
    }
}

fn validated_address(raw: &str) -> Result<String, Error> {
    let address = raw.trim();
    if address.is_empty() {
        return Err(
            Error::invalid_request("delivery address must not be empty").with_details(json!({
                "field": "address",
                "code": "empty_address",
            })),
        );
    }
    Ok(address.to_owned())
}

#[async_trait]
impl<O, R, D, N> OrderCommand for OrderService<O, R, D, N>
where
    O: OrderRepository,
    R: FoodItemRepository,
    D: UserDirectory,
    N: OrderNotifier,
{
    async fn place_order(&self, request: PlaceOrderRequest) -> Result<Order, Error> {
        let address = validated_address(&request.address)?;
        let user = resolve_customer(self.users.as_ref(), &request.customer).await?;
        let selection = self.resolver.resolve(&request.item_ids).await?;

        let new_order = NewOrder {
            user_id: user.id,
            customer: user.email.to_string(),
            address,
            total: selection.total,
            item_ids: request.item_ids,
        };
        let order = self
            .orders
            .create_with_items(&new_order)
            .await
            .map_err(map_order_error)?;

        if let Err(err) = self.notifier.order_placed(&order, &user).await {
            warn!(order_id = %order.id, error = %err, "order notification failed");
        }
        info!(
            order_id = %order.id,
            user_id = %order.user_id,
            lines = order.food_items.len(),
            total = %order.total,
            "order placed"
        );
        Ok(order)
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), Error> {
        self.deletion.delete_order(id).await
    }
}

#[async_trait]
impl<O, R, D, N> OrderQuery for OrderService<O, R, D, N>
where
    O: OrderRepository,
    R: FoodItemRepository,
    D: UserDirectory,
    N: OrderNotifier,
{
    async fn list_orders(&self, scope: OrderScope) -> Result<Vec<Order>, Error> {
        self.orders.list(scope).await.map_err(map_order_error)
    }

    async fn customer_profile(&self, email: &Email) -> Result<CustomerProfile, Error> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;
        let orders = self
            .orders
            .list(OrderScope::ForUser(user.id))
            .await
            .map_err(map_order_error)?;
        Ok(CustomerProfile { user, orders })
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
