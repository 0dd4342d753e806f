//! Port for stored support messages.

use async_trait::async_trait;

use crate::domain::{NewSupportMessage, SupportMessage};

use super::define_port_error;

define_port_error! {
    /// Errors raised by support message adapters.
    pub enum SupportRepositoryError {
        /// Repository connection could not be established or timed out.
        Connection { message: String } =>
            "support repository connection failed: {message}",
        /// Query or insert failed during execution.
        Query { message: String } =>
            "support repository query failed: {message}",
    }
}

/// Append-only store of support messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupportMessageRepository: Send + Sync {
    /// Persist a message, stamping its id and creation time.
    async fn create(
        &self,
        message: &NewSupportMessage,
    ) -> Result<SupportMessage, SupportRepositoryError>;

    /// Every message ordered by id.
    async fn list(&self) -> Result<Vec<SupportMessage>, SupportRepositoryError>;
}
