//! Driving port for registering users.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft};

/// Write-side user use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Validate and store a new user; a known e-mail is a conflict.
    async fn register_user(&self, draft: UserDraft) -> Result<User, Error>;
}
