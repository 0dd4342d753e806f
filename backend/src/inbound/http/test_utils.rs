//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    MockCartCommand, MockCartQuery, MockCatalogCommand, MockCatalogQuery, MockOrderCommand,
    MockOrderQuery, MockSupportCommand, MockSupportQuery, MockUserCommand, MockUserQuery,
};
use crate::inbound::http::state::HttpState;

/// Mock doubles for every driving port; configure the ones a test touches.
///
/// Untouched mocks have no expectations, so any unexpected call panics.
#[derive(Default)]
pub struct MockPorts {
    pub catalog: MockCatalogQuery,
    pub catalog_commands: MockCatalogCommand,
    pub carts: MockCartQuery,
    pub cart_commands: MockCartCommand,
    pub orders: MockOrderQuery,
    pub order_commands: MockOrderCommand,
    pub users: MockUserQuery,
    pub user_commands: MockUserCommand,
    pub support: MockSupportQuery,
    pub support_commands: MockSupportCommand,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            catalog: Arc::new(self.catalog),
            catalog_commands: Arc::new(self.catalog_commands),
            carts: Arc::new(self.carts),
            cart_commands: Arc::new(self.cart_commands),
            orders: Arc::new(self.orders),
            order_commands: Arc::new(self.order_commands),
            users: Arc::new(self.users),
            user_commands: Arc::new(self.user_commands),
            support: Arc::new(self.support),
            support_commands: Arc::new(self.support_commands),
        }
    }
}
