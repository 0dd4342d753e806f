//! HTTP inbound adapter exposing REST endpoints.

pub mod cart;
pub mod error;
pub mod health;
pub mod menu;
pub mod orders;
pub mod schemas;
pub mod state;
pub mod support;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every API handler under the versioned scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use food_backend::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(menu::list_menu)
        .service(menu::get_menu_item)
        .service(menu::create_menu_item)
        .service(menu::delete_menu_item)
        .service(cart::get_cart)
        .service(cart::replace_cart)
        .service(orders::place_legacy_order)
        .service(orders::place_order)
        .service(orders::list_orders)
        .service(orders::delete_order)
        .service(users::list_users)
        .service(users::register_user)
        .service(users::user_by_email)
        .service(support::submit_support_message)
        .service(support::list_support_messages);
}
