//! Port for the user directory: lookups, listing and registration.

use async_trait::async_trait;

use crate::domain::{Email, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory connection could not be established or timed out.
        Connection { message: String } =>
            "user directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } =>
            "user directory query failed: {message}",
        /// The e-mail address is already registered.
        Constraint { message: String } =>
            "user directory constraint violated: {message}",
    }
}

/// Port over stored user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look a user up by e-mail, ignoring the case of the stored address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserDirectoryError>;

    /// Look a user up by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserDirectoryError>;

    /// Every user ordered by id.
    async fn list_users(&self) -> Result<Vec<User>, UserDirectoryError>;

    /// Store a new user; an address already present in any case is a
    /// [`UserDirectoryError::Constraint`].
    async fn create_user(&self, user: &NewUser) -> Result<User, UserDirectoryError>;
}
