//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed catalog, cart and order model and the
//! services that enforce its rules. Inbound adapters talk to the services
//! through the driving ports in [`ports`]; outbound adapters implement the
//! driven ports.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport agnostic failure payload.
//! - [`FoodItem`], [`Price`], [`Order`], [`User`]: core aggregates.
//! - [`SupportMessage`]: customer enquiries kept for staff.
//! - [`CatalogService`], [`CartService`], [`OrderService`], [`UserService`],
//!   [`SupportService`]: use case implementations.
//! - [`PriceResolver`] and [`DeletionCoordinator`]: the pricing and
//!   transactional delete rules shared by the services.

mod cart_service;
mod catalog_filter;
mod catalog_service;
mod customer_lookup;
mod deletion;
pub mod error;
mod food_item;
mod order;
mod order_service;
mod port_error_mapping;
pub mod ports;
mod pricing;
mod support;
mod support_service;
mod trace_id;
mod user;
mod user_service;

pub use self::cart_service::CartService;
pub use self::catalog_filter::{CatalogFilter, CatalogPage, RawCatalogFilter};
pub use self::catalog_service::CatalogService;
pub use self::deletion::{DELETION_CONFLICT, DeletionCoordinator, DeletionReport, DeletionStage};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::food_item::{
    FoodItem, FoodItemDraft, FoodItemId, FoodItemValidationError, MAX_ITEM_PRICE,
    MAX_ORDER_TOTAL, NewFoodItem, PRICE_SCALE, Price,
};
pub use self::order::{CustomerProfile, NewOrder, Order, OrderId, OrderScope};
pub use self::order_service::OrderService;
pub use self::pricing::{PriceResolver, PricedSelection, distinct_ids, price_selection};
pub use self::support::{
    NewSupportMessage, SupportMessage, SupportMessageDraft, SupportMessageId,
    SupportValidationError,
};
pub use self::support_service::SupportService;
pub use self::trace_id::TraceId;
pub use self::user::{
    CustomerRef, Email, NewUser, REGISTERED_ROLE, User, UserDraft, UserId, UserValidationError,
};
pub use self::user_service::UserService;
