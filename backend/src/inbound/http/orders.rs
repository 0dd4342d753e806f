//! Order API handlers.
//!
//! Two placement shapes share one pricing path: the legacy `POST /order`
//! carries whole food item objects, `POST /orders` carries bare ids. Both
//! ignore any client-supplied total.
//!
//! ```text
//! POST   /api/v1/order  {"customer":"ada@example.com","address":"1 Dock St","food_items":[{"id":1}]}
//! POST   /api/v1/orders {"customer":"ada@example.com","address":"1 Dock St","food_items":[1,2,2]}
//! GET    /api/v1/orders?userId=3
//! DELETE /api/v1/orders/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::inbound::http::schemas::ErrorSchema;
use crate::domain::ports::PlaceOrderRequest;
use crate::domain::{Error, Order, OrderScope};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cart::CartEntry;
use crate::inbound::http::menu::FoodItemResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, food_item_ids, parse_customer_ref, parse_order_id, parse_user_id, require,
};

const CUSTOMER: FieldName = FieldName::new("customer");
const ADDRESS: FieldName = FieldName::new("address");
const FOOD_ITEMS: FieldName = FieldName::new("food_items");

/// Customer reference: an e-mail address or a numeric user id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CustomerField {
    Id(i64),
    Text(String),
}

impl CustomerField {
    fn into_text(self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Text(text) => text,
        }
    }
}

/// Legacy placement body with inline food item objects; only `id` is read.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct LegacyOrderRequest {
    pub customer: Option<CustomerField>,
    #[schema(example = "1 Dock Street")]
    pub address: Option<String>,
    pub food_items: Option<Vec<CartEntry>>,
}

/// Placement body with bare food item ids. Repeated ids buy the item again.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer: Option<CustomerField>,
    #[schema(example = "1 Dock Street")]
    pub address: Option<String>,
    /// Accepted for compatibility and ignored; the server prices the order.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub total: Option<Decimal>,
    #[schema(example = json!([1, 2, 2]))]
    pub food_items: Option<Vec<i64>>,
}

/// Stored order as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    #[schema(example = "ada@example.com")]
    pub customer: String,
    pub address: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 20.0)]
    pub total: Decimal,
    /// Line items in placement order, repeats included.
    pub food_items: Vec<FoodItemResponse>,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        Self {
            id: value.id.get(),
            customer: value.customer,
            address: value.address,
            total: value.total.amount(),
            food_items: value
                .food_items
                .into_iter()
                .map(FoodItemResponse::from)
                .collect(),
            user_id: value.user_id.get(),
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderDeletedResponse {
    pub id: i32,
    #[schema(example = "order deleted")]
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct OrdersQuery {
    /// Restrict the listing to one user.
    pub user_id: Option<String>,
}

fn placement(
    customer: Option<CustomerField>,
    address: Option<String>,
    raw_ids: &[i64],
) -> Result<PlaceOrderRequest, Error> {
    let customer = require(customer, CUSTOMER)?.into_text();
    Ok(PlaceOrderRequest {
        customer: parse_customer_ref(&customer, CUSTOMER)?,
        address: require(address, ADDRESS)?,
        item_ids: food_item_ids(raw_ids, FOOD_ITEMS)?,
    })
}

impl TryFrom<LegacyOrderRequest> for PlaceOrderRequest {
    type Error = Error;

    fn try_from(value: LegacyOrderRequest) -> Result<Self, Self::Error> {
        let raw_ids: Vec<i64> = require(value.food_items, FOOD_ITEMS)?
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        placement(value.customer, value.address, &raw_ids)
    }
}

impl TryFrom<CreateOrderRequest> for PlaceOrderRequest {
    type Error = Error;

    fn try_from(value: CreateOrderRequest) -> Result<Self, Self::Error> {
        let raw_ids = require(value.food_items, FOOD_ITEMS)?;
        placement(value.customer, value.address, &raw_ids)
    }
}

async fn place(state: &HttpState, request: PlaceOrderRequest) -> ApiResult<HttpResponse> {
    let order = state.order_commands.place_order(request).await?;
    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

#[utoipa::path(
    post,
    path = "/api/v1/order",
    request_body = LegacyOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User or food item not found", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "placeLegacyOrder"
)]
#[post("/order")]
pub async fn place_legacy_order(
    state: web::Data<HttpState>,
    payload: web::Json<LegacyOrderRequest>,
) -> ApiResult<HttpResponse> {
    let request = PlaceOrderRequest::try_from(payload.into_inner())?;
    place(&state, request).await
}

#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User or food item not found", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "placeOrder"
)]
#[post("/orders")]
pub async fn place_order(
    state: web::Data<HttpState>,
    payload: web::Json<CreateOrderRequest>,
) -> ApiResult<HttpResponse> {
    let request = PlaceOrderRequest::try_from(payload.into_inner())?;
    place(&state, request).await
}

#[utoipa::path(
    get,
    path = "/api/v1/orders",
    params(OrdersQuery),
    responses(
        (status = 200, description = "Orders ordered by id", body = [OrderResponse]),
        (status = 400, description = "Invalid userId", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "listOrders"
)]
#[get("/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    query: web::Query<OrdersQuery>,
) -> ApiResult<web::Json<Vec<OrderResponse>>> {
    let scope = match query.into_inner().user_id.as_deref().map(str::trim) {
        None | Some("") => OrderScope::All,
        Some(raw) => OrderScope::ForUser(parse_user_id(raw, FieldName::new("userId"))?),
    };
    let orders = state.orders.list_orders(scope).await?;
    Ok(web::Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// Delete an order and its line items; catalog entries are untouched.
#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}",
    params(("id" = i32, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Deleted", body = OrderDeletedResponse),
        (status = 400, description = "Identifier is not a positive integer", body = ErrorSchema),
        (status = 404, description = "Order not found", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "deleteOrder"
)]
#[delete("/orders/{id}")]
pub async fn delete_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<OrderDeletedResponse>> {
    let id = parse_order_id(&path, FieldName::new("id"))?;
    state.order_commands.delete_order(id).await?;
    Ok(web::Json(OrderDeletedResponse {
        id: id.get(),
        message: "order deleted".to_owned(),
    }))
}

#[cfg(test)]
#[path = "orders_tests.rs"]
mod tests;
