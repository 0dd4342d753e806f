//! Support inbox handlers.
//!
//! ```text
//! POST /api/v1/support {"email":"ada@example.com","message":"Cold soup","attachments":["soup.jpg"]}
//! GET  /api/v1/support/messages
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::inbound::http::schemas::ErrorSchema;
use crate::domain::{Error, SupportMessage, SupportMessageDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

/// Body for `POST /api/v1/support`. Attachments are file names only.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct SupportMessageRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "My soup arrived cold.")]
    pub message: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl TryFrom<SupportMessageRequest> for SupportMessageDraft {
    type Error = Error;

    fn try_from(value: SupportMessageRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            email: require(value.email, FieldName::new("email"))?,
            message: require(value.message, FieldName::new("message"))?,
            attachments: value.attachments,
        })
    }
}

/// Stored support message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SupportMessageResponse {
    pub id: i32,
    pub email: String,
    pub message: String,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<SupportMessage> for SupportMessageResponse {
    fn from(value: SupportMessage) -> Self {
        Self {
            id: value.id.get(),
            email: value.email.to_string(),
            message: value.message,
            attachments: value.attachments,
            created_at: value.created_at,
        }
    }
}

/// Store a customer enquiry for staff.
#[utoipa::path(
    post,
    path = "/api/v1/support",
    request_body = SupportMessageRequest,
    responses(
        (status = 201, description = "Stored", body = SupportMessageResponse),
        (status = 400, description = "Missing e-mail or message", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["support"],
    operation_id = "sendSupportMessage"
)]
#[post("/support")]
pub async fn submit_support_message(
    state: web::Data<HttpState>,
    payload: web::Json<SupportMessageRequest>,
) -> ApiResult<HttpResponse> {
    let draft = SupportMessageDraft::try_from(payload.into_inner())?;
    let stored = state.support_commands.submit_message(draft).await?;
    Ok(HttpResponse::Created().json(SupportMessageResponse::from(stored)))
}

#[utoipa::path(
    get,
    path = "/api/v1/support/messages",
    responses(
        (status = 200, description = "Stored messages", body = [SupportMessageResponse]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["support"],
    operation_id = "getSupportMessages"
)]
#[get("/support/messages")]
pub async fn list_support_messages(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<SupportMessageResponse>>> {
    let messages = state.support.list_messages().await?;
    Ok(web::Json(
        messages
            .into_iter()
            .map(SupportMessageResponse::from)
            .collect(),
    ))
}
