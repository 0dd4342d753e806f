//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the driven ports backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Pricing and validation stay in the domain.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Bounded operations**: every repository call runs under the pool's query
//!   timeout; expiry surfaces as a connection error.
//! - **Explicit transactions**: order placement, cart replacement and both
//!   deletes each run in a single transaction.
//!
//! # Example
//!
//! ```ignore
//! use food_backend::outbound::persistence::{DbPool, DieselFoodItemRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/food")).await?;
//! let repo = DieselFoodItemRepository::new(pool);
//! ```

mod diesel_cart_repository;
mod diesel_error_mapping;
mod diesel_food_item_repository;
mod diesel_order_repository;
mod diesel_support_message_repository;
mod diesel_user_directory;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_cart_repository::DieselCartRepository;
pub use diesel_food_item_repository::DieselFoodItemRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_support_message_repository::DieselSupportMessageRepository;
pub use diesel_user_directory::DieselUserDirectory;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
