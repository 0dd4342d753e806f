//! Cart API handlers.
//!
//! ```text
//! GET  /api/v1/user/cart?email=ada@example.com
//! POST /api/v1/user/cart {"email":"ada@example.com","cart":[{"id":1},{"id":4}]}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::inbound::http::schemas::ErrorSchema;
use crate::domain::{CustomerRef, Error, FoodItem};
use crate::inbound::http::ApiResult;
use crate::inbound::http::menu::FoodItemResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, food_item_ids, parse_email, require};

const EMAIL: FieldName = FieldName::new("email");

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CartQueryParams {
    /// Owner of the cart.
    pub email: Option<String>,
}

/// Cart line as sent by clients. Fields other than `id` are ignored.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartEntry {
    #[schema(example = 1)]
    pub id: i64,
}

/// Body for `POST /api/v1/user/cart`; replaces the whole cart.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ReplaceCartRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub cart: Option<Vec<CartEntry>>,
}

fn cart_response(items: Vec<FoodItem>) -> Vec<FoodItemResponse> {
    items.into_iter().map(FoodItemResponse::from).collect()
}

fn customer(email: Option<String>) -> Result<CustomerRef, Error> {
    let raw = require(email, EMAIL)?;
    parse_email(&raw, EMAIL).map(CustomerRef::Email)
}

#[utoipa::path(
    get,
    path = "/api/v1/user/cart",
    params(CartQueryParams),
    responses(
        (status = 200, description = "Stored cart", body = [FoodItemResponse]),
        (status = 400, description = "Missing or invalid e-mail", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "getCart"
)]
#[get("/user/cart")]
pub async fn get_cart(
    state: web::Data<HttpState>,
    query: web::Query<CartQueryParams>,
) -> ApiResult<web::Json<Vec<FoodItemResponse>>> {
    let customer = customer(query.into_inner().email)?;
    let items = state.carts.cart(&customer).await?;
    Ok(web::Json(cart_response(items)))
}

/// Replace the user's cart. Repeated ids are stored once; any unknown id
/// rejects the request and leaves the stored cart as it was.
#[utoipa::path(
    post,
    path = "/api/v1/user/cart",
    request_body = ReplaceCartRequest,
    responses(
        (status = 200, description = "Cart after replacement", body = [FoodItemResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User or food item not found", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "replaceCart"
)]
#[post("/user/cart")]
pub async fn replace_cart(
    state: web::Data<HttpState>,
    payload: web::Json<ReplaceCartRequest>,
) -> ApiResult<web::Json<Vec<FoodItemResponse>>> {
    let ReplaceCartRequest { email, cart } = payload.into_inner();
    let customer = customer(email)?;
    let raw_ids: Vec<i64> = require(cart, FieldName::new("cart"))?
        .into_iter()
        .map(|entry| entry.id)
        .collect();
    let ids = food_item_ids(&raw_ids, FieldName::new("cart"))?;
    let items = state.cart_commands.replace_cart(&customer, ids).await?;
    Ok(web::Json(cart_response(items)))
}
