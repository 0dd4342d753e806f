//! Placed orders and their line items.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{FoodItem, FoodItemId, Price, User, UserId};

/// Server-assigned order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(i32);

impl OrderId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Persisted order with its items in placement order.
///
/// `food_items` may repeat an entry when the customer bought it more than
/// once; `total` is the sum over every line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub customer: String,
    pub address: String,
    pub total: Price,
    pub food_items: Vec<FoodItem>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Fully resolved order ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub customer: String,
    pub address: String,
    pub total: Price,
    /// Line items in request order, duplicates kept.
    pub item_ids: Vec<FoodItemId>,
}

/// Which orders a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderScope {
    /// Every order.
    #[default]
    All,
    /// Orders placed by one user.
    ForUser(UserId),
}

/// A user together with the orders they placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerProfile {
    pub user: User,
    pub orders: Vec<Order>,
}
