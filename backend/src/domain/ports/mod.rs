//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`UserDirectory`], [`OrderNotifier`]) are
//! implemented by outbound adapters. Driving ports (`*Query`, `*Command`) are
//! implemented by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod cart_command;
mod cart_query;
mod cart_repository;
mod catalog_command;
mod catalog_query;
mod food_item_repository;
mod order_command;
mod order_notifier;
mod order_query;
mod order_repository;
mod support_command;
mod support_query;
mod support_repository;
mod user_command;
mod user_directory;
mod user_query;

#[cfg(test)]
pub use cart_command::MockCartCommand;
pub use cart_command::CartCommand;
#[cfg(test)]
pub use cart_query::MockCartQuery;
pub use cart_query::CartQuery;
#[cfg(test)]
pub use cart_repository::MockCartRepository;
pub use cart_repository::{CartRepository, CartRepositoryError};
#[cfg(test)]
pub use catalog_command::MockCatalogCommand;
pub use catalog_command::CatalogCommand;
#[cfg(test)]
pub use catalog_query::MockCatalogQuery;
pub use catalog_query::CatalogQuery;
#[cfg(test)]
pub use food_item_repository::MockFoodItemRepository;
pub use food_item_repository::{
    ClearedAssociations, FoodItemRepository, FoodItemRepositoryError,
};
#[cfg(test)]
pub use order_command::MockOrderCommand;
pub use order_command::{OrderCommand, PlaceOrderRequest};
#[cfg(test)]
pub use order_notifier::MockOrderNotifier;
pub use order_notifier::{NoOpOrderNotifier, OrderNotifier, OrderNotifierError};
#[cfg(test)]
pub use order_query::MockOrderQuery;
pub use order_query::OrderQuery;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{OrderRepository, OrderRepositoryError};
#[cfg(test)]
pub use support_command::MockSupportCommand;
pub use support_command::SupportCommand;
#[cfg(test)]
pub use support_query::MockSupportQuery;
pub use support_query::SupportQuery;
#[cfg(test)]
pub use support_repository::MockSupportMessageRepository;
pub use support_repository::{SupportMessageRepository, SupportRepositoryError};
#[cfg(test)]
pub use user_command::MockUserCommand;
pub use user_command::UserCommand;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserDirectoryError};
#[cfg(test)]
pub use user_query::MockUserQuery;
pub use user_query::UserQuery;
