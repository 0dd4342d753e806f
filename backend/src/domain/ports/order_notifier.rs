//! Port for order confirmation side effects.

use async_trait::async_trait;

use crate::domain::{Order, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised while dispatching an order notification.
    pub enum OrderNotifierError {
        /// The notification could not be handed off.
        Delivery { message: String } =>
            "order notification failed: {message}",
    }
}

/// Receives placed orders after they are committed.
///
/// Failures never undo the order; callers log them and move on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    /// Announce a newly placed order for `customer`.
    async fn order_placed(&self, order: &Order, customer: &User)
    -> Result<(), OrderNotifierError>;
}

/// Notifier that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpOrderNotifier;

#[async_trait]
impl OrderNotifier for NoOpOrderNotifier {
    async fn order_placed(
        &self,
        _order: &Order,
        _customer: &User,
    ) -> Result<(), OrderNotifierError> {
        Ok(())
    }
}
