//! Menu API handlers.
//!
//! ```text
//! GET    /api/v1/menu?category=pizza&minPrice=5&maxPrice=12&search=cheese&page=1&limit=10
//! GET    /api/v1/menu/{id}
//! POST   /api/v1/menu {"name":"Margherita","price":9.5,"category":"pizza"}
//! DELETE /api/v1/menu/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use pagination::Page;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::inbound::http::schemas::ErrorSchema;
use crate::domain::{
    CatalogFilter, DeletionReport, Error, FoodItem, FoodItemDraft, RawCatalogFilter,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_food_item_id, require};

/// Catalog entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodItemResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Margherita")]
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 9.5)]
    pub price: Decimal,
    #[schema(example = "pizza")]
    pub category: String,
    pub picture_url: String,
}

impl From<FoodItem> for FoodItemResponse {
    fn from(value: FoodItem) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            description: value.description,
            price: value.price.amount(),
            category: value.category,
            picture_url: value.picture_url,
        }
    }
}

/// Listing filters; every value is optional and blank values are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct MenuQuery {
    /// Exact category match.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<String>,
    /// Inclusive upper price bound.
    pub max_price: Option<String>,
    /// Case-insensitive substring of the name or description.
    pub search: Option<String>,
    /// One-based page number, default 1.
    pub page: Option<String>,
    /// Page size, default 10.
    pub limit: Option<String>,
}

impl From<MenuQuery> for RawCatalogFilter {
    fn from(value: MenuQuery) -> Self {
        Self {
            category: value.category,
            min_price: value.min_price,
            max_price: value.max_price,
            search: value.search,
            page: value.page,
            limit: value.limit,
        }
    }
}

/// Paginated listing envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuPageResponse {
    pub data: Vec<FoodItemResponse>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub limit: u32,
    /// Matches before pagination.
    #[schema(example = 25)]
    pub total: u64,
}

impl From<Page<FoodItem>> for MenuPageResponse {
    fn from(value: Page<FoodItem>) -> Self {
        let Page {
            data,
            page,
            limit,
            total,
        } = value.map(FoodItemResponse::from);
        Self {
            data,
            page,
            limit,
            total,
        }
    }
}

/// Body for `POST /api/v1/menu`. Any `id` sent by the client is ignored.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateFoodItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 9.5)]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub picture_url: Option<String>,
}

impl TryFrom<CreateFoodItemRequest> for FoodItemDraft {
    type Error = Error;

    fn try_from(value: CreateFoodItemRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: require(value.name, FieldName::new("name"))?,
            price: require(value.price, FieldName::new("price"))?,
            description: value.description.unwrap_or_default(),
            category: value.category.unwrap_or_default(),
            picture_url: value.picture_url.unwrap_or_default(),
        })
    }
}

/// Result of `DELETE /api/v1/menu/{id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletionResponse {
    pub id: i32,
    #[schema(example = "row_deleted")]
    pub stage: String,
    /// Order lines removed together with the item.
    pub cleared_order_lines: u64,
    /// Cart entries removed together with the item.
    pub cleared_cart_entries: u64,
}

impl From<DeletionReport> for DeletionResponse {
    fn from(value: DeletionReport) -> Self {
        Self {
            id: value.id.get(),
            stage: value.stage.to_string(),
            cleared_order_lines: value.cleared.order_lines,
            cleared_cart_entries: value.cleared.cart_entries,
        }
    }
}

/// List catalog entries matching every supplied filter.
#[utoipa::path(
    get,
    path = "/api/v1/menu",
    params(MenuQuery),
    responses(
        (status = 200, description = "Matching items", body = MenuPageResponse),
        (status = 400, description = "Malformed filter value", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "listMenu"
)]
#[get("/menu")]
pub async fn list_menu(
    state: web::Data<HttpState>,
    query: web::Query<MenuQuery>,
) -> ApiResult<web::Json<MenuPageResponse>> {
    let filter = CatalogFilter::try_from(RawCatalogFilter::from(query.into_inner()))?;
    let page = state.catalog.list_items(filter).await?;
    Ok(web::Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/menu/{id}",
    params(("id" = i32, Path, description = "Food item identifier")),
    responses(
        (status = 200, description = "Food item", body = FoodItemResponse),
        (status = 400, description = "Identifier is not a positive integer", body = ErrorSchema),
        (status = 404, description = "Food item not found", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "getMenuItem"
)]
#[get("/menu/{id}")]
pub async fn get_menu_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<FoodItemResponse>> {
    let id = parse_food_item_id(&path, FieldName::new("id"))?;
    let item = state.catalog.get_item(id).await?;
    Ok(web::Json(item.into()))
}

/// Add a catalog entry. Name and price are required; the price must be
/// non-negative and is stored with two decimals.
#[utoipa::path(
    post,
    path = "/api/v1/menu",
    request_body = CreateFoodItemRequest,
    responses(
        (status = 201, description = "Created", body = FoodItemResponse),
        (status = 400, description = "Invalid food item", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "createMenuItem"
)]
#[post("/menu")]
pub async fn create_menu_item(
    state: web::Data<HttpState>,
    payload: web::Json<CreateFoodItemRequest>,
) -> ApiResult<HttpResponse> {
    let draft = FoodItemDraft::try_from(payload.into_inner())?;
    let item = state.catalog_commands.create_item(draft).await?;
    Ok(HttpResponse::Created().json(FoodItemResponse::from(item)))
}

/// Remove an entry together with its order lines and cart entries.
#[utoipa::path(
    delete,
    path = "/api/v1/menu/{id}",
    params(("id" = i32, Path, description = "Food item identifier")),
    responses(
        (status = 200, description = "Deleted", body = DeletionResponse),
        (status = 404, description = "Food item not found", body = ErrorSchema),
        (status = 409, description = "Deletion failed due to constraints", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "deleteMenuItem"
)]
#[delete("/menu/{id}")]
pub async fn delete_menu_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletionResponse>> {
    let id = parse_food_item_id(&path, FieldName::new("id"))?;
    let report = state.catalog_commands.delete_item(id).await?;
    Ok(web::Json(report.into()))
}

#[cfg(test)]
#[path = "menu_tests.rs"]
mod tests;
