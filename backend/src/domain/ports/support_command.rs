//! Driving port for submitting support messages.

use async_trait::async_trait;

use crate::domain::{Error, SupportMessage, SupportMessageDraft};

/// Write-side support use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupportCommand: Send + Sync {
    /// Validate and store a message from a customer.
    async fn submit_message(&self, draft: SupportMessageDraft) -> Result<SupportMessage, Error>;
}
