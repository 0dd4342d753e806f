//! User directory handlers.
//!
//! ```text
//! GET  /api/v1/users
//! POST /api/v1/users {"name":"Ada Lovelace","email":"ada@example.com","phone":"555-0100"}
//! GET  /api/v1/users/by-email?email=ada@example.com
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::inbound::http::schemas::ErrorSchema;
use crate::domain::{CustomerProfile, Error, User, UserDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::orders::OrderResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_email, require};

/// Directory entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub phone: String,
    #[schema(example = "customer")]
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name,
            email: user.email.to_string(),
            phone: user.phone,
            role: user.role,
        }
    }
}

/// Body for `POST /api/v1/users`. The role is always assigned by the server.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl TryFrom<RegisterUserRequest> for UserDraft {
    type Error = Error;

    fn try_from(value: RegisterUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: require(value.name, FieldName::new("name"))?,
            email: require(value.email, FieldName::new("email"))?,
            phone: value.phone.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProfileQuery {
    pub email: Option<String>,
}

/// A user together with every order they placed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerProfileResponse {
    pub id: i32,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub phone: String,
    #[schema(example = "customer")]
    pub role: String,
    pub orders: Vec<OrderResponse>,
}

impl From<CustomerProfile> for CustomerProfileResponse {
    fn from(value: CustomerProfile) -> Self {
        let CustomerProfile { user, orders } = value;
        let UserResponse {
            id,
            name,
            email,
            phone,
            role,
        } = user.into();
        Self {
            id,
            name,
            email,
            phone,
            role,
            orders: orders.into_iter().map(OrderResponse::from).collect(),
        }
    }
}

/// Every registered user ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Registered users", body = [UserResponse]),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getAllUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Register a user with the default role.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Registered", body = UserResponse),
        (status = 400, description = "Missing name or invalid e-mail", body = ErrorSchema),
        (status = 409, description = "E-mail already registered", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state.user_commands.register_user(draft).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/by-email",
    params(ProfileQuery),
    responses(
        (status = 200, description = "User with orders", body = CustomerProfileResponse),
        (status = 400, description = "Missing or invalid e-mail", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUserByEmail"
)]
#[get("/users/by-email")]
pub async fn user_by_email(
    state: web::Data<HttpState>,
    query: web::Query<ProfileQuery>,
) -> ApiResult<web::Json<CustomerProfileResponse>> {
    let field = FieldName::new("email");
    let raw = require(query.into_inner().email, field)?;
    let email = parse_email(&raw, field)?;
    let profile = state.orders.customer_profile(&email).await?;
    Ok(web::Json(profile.into()))
}
