//! Driving port for reading support messages.

use async_trait::async_trait;

use crate::domain::{Error, SupportMessage};

/// Read-side support use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupportQuery: Send + Sync {
    /// Every stored message ordered by id.
    async fn list_messages(&self) -> Result<Vec<SupportMessage>, Error>;
}
