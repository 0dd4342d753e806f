//! In-process adapter implementing every driven port.
//!
//! Used when no database URL is configured and by the behaviour tests. It
//! keeps the same referential rules as the PostgreSQL schema: lines and cart
//! entries must point at existing rows, deleting a food item clears its
//! associations under the same lock as the row removal, and e-mail addresses
//! are unique.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::ports::{
    CartRepository, CartRepositoryError, ClearedAssociations, FoodItemRepository,
    FoodItemRepositoryError, OrderRepository, OrderRepositoryError, SupportMessageRepository,
    SupportRepositoryError, UserDirectory, UserDirectoryError,
};
use crate::domain::{
    CatalogFilter, CatalogPage, Email, FoodItem, FoodItemId, NewFoodItem, NewOrder,
    NewSupportMessage, NewUser, Order, OrderId, OrderScope, Price, SupportMessage,
    SupportMessageId, User, UserId,
};

#[derive(Debug, Clone)]
struct StoredOrder {
    user_id: UserId,
    customer: String,
    address: String,
    total: Price,
    lines: Vec<FoodItemId>,
    created_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, User>,
    items: BTreeMap<FoodItemId, FoodItem>,
    orders: BTreeMap<OrderId, StoredOrder>,
    carts: BTreeMap<UserId, BTreeSet<FoodItemId>>,
    support: Vec<SupportMessage>,
    next_user: i32,
    next_item: i32,
    next_order: i32,
    next_message: i32,
}

impl State {
    fn materialise(&self, id: OrderId, stored: &StoredOrder) -> Order {
        Order {
            id,
            customer: stored.customer.clone(),
            address: stored.address.clone(),
            total: stored.total,
            food_items: stored
                .lines
                .iter()
                .filter_map(|item| self.items.get(item).cloned())
                .collect(),
            user_id: stored.user_id,
            created_at: stored.created_at,
        }
    }

    fn first_unknown_item(&self, ids: &[FoodItemId]) -> Option<FoodItemId> {
        ids.iter().copied().find(|id| !self.items.contains_key(id))
    }

    fn insert_user(&mut self, user: NewUser) -> Result<User, UserDirectoryError> {
        if self.users.values().any(|known| known.email == user.email) {
            return Err(UserDirectoryError::constraint(format!(
                "users_email_lower_key ({})",
                user.email
            )));
        }
        self.next_user += 1;
        let stored = user.into_user(UserId::new(self.next_user));
        self.users.insert(stored.id, stored.clone());
        Ok(stored)
    }
}

/// Mutex-guarded store backing the catalog, carts, orders and users.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user with an explicit role, as the startup seed does.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Constraint`] when the e-mail is taken.
    pub async fn seed_user(
        &self,
        name: impl Into<String>,
        email: Email,
        phone: impl Into<String>,
        role: impl Into<String>,
    ) -> Result<User, UserDirectoryError> {
        self.state.lock().await.insert_user(NewUser {
            name: name.into(),
            email,
            phone: phone.into(),
            role: role.into(),
        })
    }
}

#[async_trait]
impl FoodItemRepository for InMemoryStore {
    async fn list(&self, filter: &CatalogFilter) -> Result<CatalogPage, FoodItemRepositoryError> {
        let state = self.state.lock().await;
        let matching: Vec<&FoodItem> = state
            .items
            .values()
            .filter(|item| filter.matches(item))
            .collect();
        let offset = usize::try_from(filter.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.page.limit()).unwrap_or(usize::MAX);
        let items = matching
            .iter()
            .skip(offset)
            .take(limit)
            .map(|item| (*item).clone())
            .collect();
        Ok(CatalogPage {
            items,
            total: u64::try_from(matching.len()).unwrap_or(u64::MAX),
        })
    }

    async fn find_by_id(&self, id: FoodItemId) -> Result<Option<FoodItem>, FoodItemRepositoryError> {
        Ok(self.state.lock().await.items.get(&id).cloned())
    }

    async fn find_by_ids(
        &self,
        ids: &[FoodItemId],
    ) -> Result<Vec<FoodItem>, FoodItemRepositoryError> {
        let state = self.state.lock().await;
        let wanted: BTreeSet<FoodItemId> = ids.iter().copied().collect();
        Ok(wanted
            .iter()
            .filter_map(|id| state.items.get(id).cloned())
            .collect())
    }

    async fn create(&self, item: &NewFoodItem) -> Result<FoodItem, FoodItemRepositoryError> {
        let mut state = self.state.lock().await;
        state.next_item += 1;
        let stored = item.clone().into_food_item(FoodItemId::new(state.next_item));
        state.items.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_with_associations(
        &self,
        id: FoodItemId,
    ) -> Result<Option<ClearedAssociations>, FoodItemRepositoryError> {
        let mut state = self.state.lock().await;
        if !state.items.contains_key(&id) {
            return Ok(None);
        }

        let mut cleared = ClearedAssociations::default();
        for order in state.orders.values_mut() {
            let before = order.lines.len();
            order.lines.retain(|line| *line != id);
            cleared.order_lines += u64::try_from(before - order.lines.len()).unwrap_or(0);
        }
        for cart in state.carts.values_mut() {
            if cart.remove(&id) {
                cleared.cart_entries += 1;
            }
        }
        state.items.remove(&id);
        Ok(Some(cleared))
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn create_with_items(&self, order: &NewOrder) -> Result<Order, OrderRepositoryError> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&order.user_id) {
            return Err(OrderRepositoryError::constraint("orders_user_id_fkey"));
        }
        if let Some(unknown) = state.first_unknown_item(&order.item_ids) {
            return Err(OrderRepositoryError::constraint(format!(
                "order_food_items_food_item_id_fkey ({unknown})"
            )));
        }

        state.next_order += 1;
        let id = OrderId::new(state.next_order);
        let stored = StoredOrder {
            user_id: order.user_id,
            customer: order.customer.clone(),
            address: order.address.clone(),
            total: order.total,
            lines: order.item_ids.clone(),
            created_at: Utc::now(),
        };
        let created = state.materialise(id, &stored);
        state.orders.insert(id, stored);
        Ok(created)
    }

    async fn list(&self, scope: OrderScope) -> Result<Vec<Order>, OrderRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .orders
            .iter()
            .filter(|(_, stored)| match scope {
                OrderScope::All => true,
                OrderScope::ForUser(user) => stored.user_id == user,
            })
            .map(|(id, stored)| state.materialise(*id, stored))
            .collect())
    }

    async fn delete_with_items(&self, id: OrderId) -> Result<bool, OrderRepositoryError> {
        Ok(self.state.lock().await.orders.remove(&id).is_some())
    }
}

#[async_trait]
impl CartRepository for InMemoryStore {
    async fn find(&self, user_id: UserId) -> Result<Vec<FoodItem>, CartRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .carts
            .get(&user_id)
            .map(|cart| {
                cart.iter()
                    .filter_map(|id| state.items.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn replace(
        &self,
        user_id: UserId,
        items: &[FoodItemId],
    ) -> Result<Vec<FoodItem>, CartRepositoryError> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&user_id) {
            return Err(CartRepositoryError::constraint("user_cart_items_user_id_fkey"));
        }
        if let Some(unknown) = state.first_unknown_item(items) {
            return Err(CartRepositoryError::constraint(format!(
                "user_cart_items_food_item_id_fkey ({unknown})"
            )));
        }

        let cart: BTreeSet<FoodItemId> = items.iter().copied().collect();
        let stored = cart
            .iter()
            .filter_map(|id| state.items.get(id).cloned())
            .collect();
        state.carts.insert(user_id, cart);
        Ok(stored)
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserDirectoryError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|user| user.email == *email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, UserDirectoryError> {
        Ok(self.state.lock().await.users.values().cloned().collect())
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, UserDirectoryError> {
        self.state.lock().await.insert_user(user.clone())
    }
}

#[async_trait]
impl SupportMessageRepository for InMemoryStore {
    async fn create(
        &self,
        message: &NewSupportMessage,
    ) -> Result<SupportMessage, SupportRepositoryError> {
        let mut state = self.state.lock().await;
        state.next_message += 1;
        let stored = message
            .clone()
            .into_message(SupportMessageId::new(state.next_message), Utc::now());
        state.support.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<SupportMessage>, SupportRepositoryError> {
        Ok(self.state.lock().await.support.clone())
    }
}
