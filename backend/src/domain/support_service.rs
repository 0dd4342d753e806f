//! Support inbox service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::port_error_mapping::map_support_error;
use crate::domain::ports::{SupportCommand, SupportMessageRepository, SupportQuery};
use crate::domain::{
    Error, NewSupportMessage, SupportMessage, SupportMessageDraft, SupportValidationError,
};

/// Support service implementing [`SupportQuery`] and [`SupportCommand`].
pub struct SupportService<S> {
    messages: Arc<S>,
}

impl<S> SupportService<S> {
    /// Create a service over the given message store.
    pub fn new(messages: Arc<S>) -> Self {
        Self { messages }
    }
}

fn map_validation_error(error: SupportValidationError) -> Error {
    let (field, index) = match error {
        SupportValidationError::Email(_) => ("email", None),
        SupportValidationError::EmptyMessage => ("message", None),
        SupportValidationError::BlankAttachment { index } => ("attachments", Some(index)),
    };
    let mut details = json!({
        "field": field,
        "code": "invalid_support_message",
    });
    if let Some(index) = index {
        details["index"] = json!(index);
    }
    Error::invalid_request(error.to_string()).with_details(details)
}

#[async_trait]
impl<S> SupportCommand for SupportService<S>
where
    S: SupportMessageRepository,
{
    async fn submit_message(&self, draft: SupportMessageDraft) -> Result<SupportMessage, Error> {
        let message = NewSupportMessage::try_from(draft).map_err(map_validation_error)?;
        let stored = self
            .messages
            .create(&message)
            .await
            .map_err(map_support_error)?;
        info!(
            message_id = %stored.id,
            attachments = stored.attachments.len(),
            "support message stored"
        );
        Ok(stored)
    }
}

#[async_trait]
impl<S> SupportQuery for SupportService<S>
where
    S: SupportMessageRepository,
{
    async fn list_messages(&self) -> Result<Vec<SupportMessage>, Error> {
        self.messages.list().await.map_err(map_support_error)
    }
}
