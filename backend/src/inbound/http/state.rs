//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CartCommand, CartQuery, CatalogCommand, CatalogQuery, OrderCommand, OrderQuery,
    SupportCommand, SupportQuery, UserCommand, UserQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalog: Arc<dyn CatalogQuery>,
    pub catalog_commands: Arc<dyn CatalogCommand>,
    pub carts: Arc<dyn CartQuery>,
    pub cart_commands: Arc<dyn CartCommand>,
    pub orders: Arc<dyn OrderQuery>,
    pub order_commands: Arc<dyn OrderCommand>,
    pub users: Arc<dyn UserQuery>,
    pub user_commands: Arc<dyn UserCommand>,
    pub support: Arc<dyn SupportQuery>,
    pub support_commands: Arc<dyn SupportCommand>,
}

impl HttpState {
    /// Build state from services implementing both sides of each use case.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use food_backend::domain::ports::NoOpOrderNotifier;
    /// use food_backend::domain::{
    ///     CartService, CatalogService, OrderService, SupportService, UserService,
    /// };
    /// use food_backend::inbound::http::state::HttpState;
    /// use food_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_services(
    ///     CatalogService::new(Arc::clone(&store)),
    ///     CartService::new(Arc::clone(&store), Arc::clone(&store), Arc::clone(&store)),
    ///     OrderService::new(
    ///         Arc::clone(&store),
    ///         Arc::clone(&store),
    ///         Arc::clone(&store),
    ///         Arc::new(NoOpOrderNotifier),
    ///     ),
    ///     UserService::new(Arc::clone(&store)),
    ///     SupportService::new(Arc::clone(&store)),
    /// );
    /// let _catalog = state.catalog.clone();
    /// ```
    pub fn from_services<C, K, O, U, S>(
        catalog: C,
        carts: K,
        orders: O,
        users: U,
        support: S,
    ) -> Self
    where
        C: CatalogQuery + CatalogCommand + 'static,
        K: CartQuery + CartCommand + 'static,
        O: OrderQuery + OrderCommand + 'static,
        U: UserQuery + UserCommand + 'static,
        S: SupportQuery + SupportCommand + 'static,
    {
        let catalog = Arc::new(catalog);
        let carts = Arc::new(carts);
        let orders = Arc::new(orders);
        let users = Arc::new(users);
        let support = Arc::new(support);
        Self {
            catalog: catalog.clone(),
            catalog_commands: catalog,
            carts: carts.clone(),
            cart_commands: carts,
            orders: orders.clone(),
            order_commands: orders,
            users: users.clone(),
            user_commands: users,
            support: support.clone(),
            support_commands: support,
        }
    }
}
