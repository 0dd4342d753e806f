//! Builders wiring domain services to either PostgreSQL or the in-memory store.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use food_backend::domain::ports::{
    CartRepository, FoodItemRepository, OrderNotifier, OrderRepository, SupportMessageRepository,
    UserDirectory,
};
use food_backend::domain::{
    CartService, CatalogService, OrderService, SupportService, UserService,
};
use food_backend::inbound::http::state::HttpState;
use food_backend::outbound::memory::InMemoryStore;
use food_backend::outbound::notification::TracingOrderNotifier;
use food_backend::outbound::persistence::{
    DbPool, DieselCartRepository, DieselFoodItemRepository, DieselOrderRepository,
    DieselSupportMessageRepository, DieselUserDirectory,
};

use super::ServerConfig;

/// Driven port implementations shared by every service.
struct Adapters<F, O, C, U, S> {
    catalog: Arc<F>,
    orders: Arc<O>,
    carts: Arc<C>,
    users: Arc<U>,
    support: Arc<S>,
}

type DieselAdapters = Adapters<
    DieselFoodItemRepository,
    DieselOrderRepository,
    DieselCartRepository,
    DieselUserDirectory,
    DieselSupportMessageRepository,
>;

type MemoryAdapters =
    Adapters<InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore>;

fn diesel_adapters(pool: &DbPool) -> DieselAdapters {
    Adapters {
        catalog: Arc::new(DieselFoodItemRepository::new(pool.clone())),
        orders: Arc::new(DieselOrderRepository::new(pool.clone())),
        carts: Arc::new(DieselCartRepository::new(pool.clone())),
        users: Arc::new(DieselUserDirectory::new(pool.clone())),
        support: Arc::new(DieselSupportMessageRepository::new(pool.clone())),
    }
}

fn memory_adapters() -> MemoryAdapters {
    let store = Arc::new(InMemoryStore::new());
    Adapters {
        catalog: Arc::clone(&store),
        orders: Arc::clone(&store),
        carts: Arc::clone(&store),
        users: Arc::clone(&store),
        support: store,
    }
}

fn state_from<F, O, C, U, S, N>(adapters: Adapters<F, O, C, U, S>, notifier: Arc<N>) -> HttpState
where
    F: FoodItemRepository + 'static,
    O: OrderRepository + 'static,
    C: CartRepository + 'static,
    U: UserDirectory + 'static,
    S: SupportMessageRepository + 'static,
    N: OrderNotifier + 'static,
{
    let Adapters {
        catalog,
        orders,
        carts,
        users,
        support,
    } = adapters;
    HttpState::from_services(
        CatalogService::new(Arc::clone(&catalog)),
        CartService::new(carts, Arc::clone(&catalog), Arc::clone(&users)),
        OrderService::new(orders, catalog, Arc::clone(&users), notifier),
        UserService::new(users),
        SupportService::new(support),
    )
}

/// Build the HTTP state for the configured backend.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let notifier = Arc::new(TracingOrderNotifier);
    let state = match &config.db_pool {
        Some(pool) => state_from(diesel_adapters(pool), notifier),
        None => {
            warn!("no database configured; serving from an empty in-memory store");
            state_from(memory_adapters(), notifier)
        }
    };
    web::Data::new(state)
}
