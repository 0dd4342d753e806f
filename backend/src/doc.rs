//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (menu, cart,
//!   orders, users, support, health)
//! - **Schemas**: request and response DTOs plus the domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::cart::{CartEntry, ReplaceCartRequest};
use crate::inbound::http::menu::{
    CreateFoodItemRequest, DeletionResponse, FoodItemResponse, MenuPageResponse,
};
use crate::inbound::http::orders::{
    CreateOrderRequest, CustomerField, LegacyOrderRequest, OrderDeletedResponse, OrderResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::support::{SupportMessageRequest, SupportMessageResponse};
use crate::inbound::http::users::{CustomerProfileResponse, RegisterUserRequest, UserResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Food delivery backend API",
        description = "Menu browsing, carts, order placement, users and support.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::menu::list_menu,
        crate::inbound::http::menu::get_menu_item,
        crate::inbound::http::menu::create_menu_item,
        crate::inbound::http::menu::delete_menu_item,
        crate::inbound::http::cart::get_cart,
        crate::inbound::http::cart::replace_cart,
        crate::inbound::http::orders::place_legacy_order,
        crate::inbound::http::orders::place_order,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::delete_order,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::user_by_email,
        crate::inbound::http::support::submit_support_message,
        crate::inbound::http::support::list_support_messages,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        FoodItemResponse,
        MenuPageResponse,
        CreateFoodItemRequest,
        DeletionResponse,
        CartEntry,
        ReplaceCartRequest,
        CustomerField,
        LegacyOrderRequest,
        CreateOrderRequest,
        OrderResponse,
        OrderDeletedResponse,
        CustomerProfileResponse,
        UserResponse,
        RegisterUserRequest,
        SupportMessageRequest,
        SupportMessageResponse,
    )),
    tags(
        (name = "menu", description = "Catalog browsing and maintenance"),
        (name = "cart", description = "Per-user carts"),
        (name = "orders", description = "Order placement and removal"),
        (name = "users", description = "User directory and customer profiles"),
        (name = "support", description = "Customer support inbox"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
