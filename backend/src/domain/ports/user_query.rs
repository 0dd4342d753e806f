//! Driving port for reading the user directory.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Read-side user use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Every registered user ordered by id.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
