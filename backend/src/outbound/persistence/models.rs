//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live here so
//! every repository reads rows the same way.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::{
    Email, FoodItem, FoodItemId, NewFoodItem, NewSupportMessage, NewUser, Order, OrderId, Price,
    SupportMessage, SupportMessageId, User, UserId,
};

use super::schema::{
    food_items, order_food_items, orders, support_messages, user_cart_items, users,
};

/// Row struct for reading from the food_items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = food_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FoodItemRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub picture_url: String,
}

impl From<FoodItemRow> for FoodItem {
    fn from(row: FoodItemRow) -> Self {
        Self {
            id: FoodItemId::new(row.id),
            name: row.name,
            description: row.description,
            price: Price::from_stored(row.price),
            category: row.category,
            picture_url: row.picture_url,
        }
    }
}

/// Insertable struct for creating food items.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = food_items)]
pub(crate) struct NewFoodItemRow<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: Decimal,
    pub category: &'a str,
    pub picture_url: &'a str,
}

impl<'a> From<&'a NewFoodItem> for NewFoodItemRow<'a> {
    fn from(item: &'a NewFoodItem) -> Self {
        Self {
            name: item.name(),
            description: item.description(),
            price: item.price().amount(),
            category: item.category(),
            picture_url: item.picture_url(),
        }
    }
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
}

impl UserRow {
    /// Convert into a domain user, rejecting rows with a malformed e-mail.
    pub fn into_user(self) -> Result<User, String> {
        let email = Email::new(&self.email)
            .map_err(|err| format!("user {} has invalid stored e-mail: {err}", self.id))?;
        Ok(User {
            id: UserId::new(self.id),
            name: self.name,
            email,
            phone: self.phone,
            role: self.role,
        })
    }
}

/// Insertable struct for registering users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub role: &'a str,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            name: &user.name,
            email: user.email.as_ref(),
            phone: &user.phone,
            role: &user.role,
        }
    }
}

/// Row struct for reading from the orders table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: i32,
    pub user_id: i32,
    pub customer: String,
    pub address: String,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl OrderRow {
    /// Attach loaded line items to the order header.
    pub fn into_order(self, food_items: Vec<FoodItem>) -> Order {
        Order {
            id: OrderId::new(self.id),
            customer: self.customer,
            address: self.address,
            total: Price::from_stored(self.total),
            food_items,
            user_id: UserId::new(self.user_id),
            created_at: self.created_at,
        }
    }
}

/// Insertable struct for creating order headers.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow<'a> {
    pub user_id: i32,
    pub customer: &'a str,
    pub address: &'a str,
    pub total: Decimal,
}

/// Insertable order line.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = order_food_items)]
pub(crate) struct NewOrderLineRow {
    pub order_id: i32,
    pub position: i32,
    pub food_item_id: i32,
}

/// Insertable cart entry.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = user_cart_items)]
pub(crate) struct NewCartItemRow {
    pub user_id: i32,
    pub food_item_id: i32,
}

/// Row struct for reading from the support_messages table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = support_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SupportMessageRow {
    pub id: i32,
    pub email: String,
    pub message: String,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl SupportMessageRow {
    /// Convert into a domain message, rejecting rows with a malformed sender.
    pub fn into_message(self) -> Result<SupportMessage, String> {
        let email = Email::new(&self.email).map_err(|err| {
            format!("support message {} has invalid stored e-mail: {err}", self.id)
        })?;
        Ok(SupportMessage {
            id: SupportMessageId::new(self.id),
            email,
            message: self.message,
            attachments: self.attachments,
            created_at: self.created_at,
        })
    }
}

/// Insertable support message.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = support_messages)]
pub(crate) struct NewSupportMessageRow<'a> {
    pub email: &'a str,
    pub message: &'a str,
    pub attachments: &'a [String],
}

impl<'a> From<&'a NewSupportMessage> for NewSupportMessageRow<'a> {
    fn from(message: &'a NewSupportMessage) -> Self {
        Self {
            email: message.email.as_ref(),
            message: &message.message,
            attachments: &message.attachments,
        }
    }
}
