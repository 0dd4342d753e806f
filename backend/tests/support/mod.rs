//! Shared fixtures for behaviour tests.
//!
//! The root module builds services over the in-memory store. The submodules
//! provision embedded PostgreSQL for the Diesel repository suites.

#![allow(dead_code, reason = "each test binary uses a different subset")]

pub mod cluster_skip;
pub mod embedded_postgres;
pub mod pg_embed;

use std::sync::Arc;

use food_backend::domain::ports::{CatalogCommand, NoOpOrderNotifier};
use food_backend::domain::{
    CartService, CatalogService, Email, FoodItem, FoodItemDraft, OrderService, SupportService,
    User, UserService,
};
use food_backend::inbound::http::state::HttpState;
use food_backend::outbound::memory::InMemoryStore;
use rust_decimal::Decimal;

pub type Catalog = CatalogService<InMemoryStore>;
pub type Carts = CartService<InMemoryStore, InMemoryStore, InMemoryStore>;
pub type Orders = OrderService<InMemoryStore, InMemoryStore, InMemoryStore, NoOpOrderNotifier>;

/// Services sharing one store, plus the store itself for direct inspection.
pub struct World {
    pub store: Arc<InMemoryStore>,
    pub catalog: Catalog,
    pub carts: Carts,
    pub orders: Orders,
}

impl World {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            catalog: CatalogService::new(Arc::clone(&store)),
            carts: CartService::new(Arc::clone(&store), Arc::clone(&store), Arc::clone(&store)),
            orders: OrderService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::new(NoOpOrderNotifier),
            ),
            store,
        }
    }

    pub async fn customer(&self, email: &str) -> User {
        self.store
            .seed_user(
                "Ada Lovelace",
                Email::new(email).expect("valid email"),
                "555-0100",
                "customer",
            )
            .await
            .expect("seeded user")
    }

    pub async fn item(&self, name: &str, category: &str, cents: i64) -> FoodItem {
        self.catalog
            .create_item(FoodItemDraft {
                name: name.to_owned(),
                description: format!("{name} from the kitchen"),
                price: Decimal::new(cents, 2),
                category: category.to_owned(),
                picture_url: format!("/img/{}.png", name.to_lowercase()),
            })
            .await
            .expect("item created")
    }
}

/// HTTP state over a fresh store, returned with the store for seeding.
pub fn http_state() -> (Arc<InMemoryStore>, HttpState) {
    let store = Arc::new(InMemoryStore::new());
    let state = HttpState::from_services(
        CatalogService::new(Arc::clone(&store)),
        CartService::new(Arc::clone(&store), Arc::clone(&store), Arc::clone(&store)),
        OrderService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::new(NoOpOrderNotifier),
        ),
        UserService::new(Arc::clone(&store)),
        SupportService::new(Arc::clone(&store)),
    );
    (store, state)
}
