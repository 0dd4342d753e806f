//! Order confirmation notifier that records placements in the log.
//!
//! Delivery channels such as e-mail are not wired here; this adapter emits a
//! structured event that downstream log shippers can route.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{OrderNotifier, OrderNotifierError};
use crate::domain::{Order, User};

/// Notifier publishing one `info` event per placed order.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingOrderNotifier;

#[async_trait]
impl OrderNotifier for TracingOrderNotifier {
    async fn order_placed(
        &self,
        order: &Order,
        customer: &User,
    ) -> Result<(), OrderNotifierError> {
        info!(
            target: "food_backend::notifications",
            order_id = %order.id,
            customer = %customer.email,
            customer_name = %customer.name,
            total = %order.total,
            lines = order.food_items.len(),
            "order confirmation queued"
        );
        Ok(())
    }
}
