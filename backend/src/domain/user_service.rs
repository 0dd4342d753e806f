//! User directory service.
//!
//! Lists and registers users. Registration validates the draft, assigns the
//! default role and lets the directory enforce e-mail uniqueness.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::port_error_mapping::map_directory_error;
use crate::domain::ports::{UserCommand, UserDirectory, UserQuery};
use crate::domain::{Error, NewUser, User, UserDraft, UserValidationError};

/// User service implementing [`UserQuery`] and [`UserCommand`].
pub struct UserService<D> {
    users: Arc<D>,
}

impl<D> UserService<D> {
    /// Create a service over the given directory.
    pub fn new(users: Arc<D>) -> Self {
        Self { users }
    }
}

fn map_validation_error(error: UserValidationError) -> Error {
    let field = match error {
        UserValidationError::EmptyName => "name",
        UserValidationError::EmptyEmail
        | UserValidationError::InvalidEmail
        | UserValidationError::InvalidCustomerReference => "email",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": "invalid_user",
    }))
}

#[async_trait]
impl<D> UserQuery for UserService<D>
where
    D: UserDirectory,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list_users().await.map_err(map_directory_error)
    }
}

#[async_trait]
impl<D> UserCommand for UserService<D>
where
    D: UserDirectory,
{
    async fn register_user(&self, draft: UserDraft) -> Result<User, Error> {
        let user = NewUser::try_from(draft).map_err(map_validation_error)?;
        let stored = self
            .users
            .create_user(&user)
            .await
            .map_err(map_directory_error)?;
        info!(user_id = %stored.id, "user registered");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockUserDirectory, UserDirectoryError};
    use crate::domain::{ErrorCode, REGISTERED_ROLE, UserId};
    use rstest::rstest;

    fn draft(name: &str, email: &str) -> UserDraft {
        UserDraft {
            name: name.to_owned(),
            email: email.to_owned(),
            phone: String::new(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn registration_stores_the_normalised_user() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_create_user()
            .withf(|user| user.email.as_ref() == "ada@example.com" && user.role == REGISTERED_ROLE)
            .times(1)
            .returning(|user| Ok(user.clone().into_user(UserId::new(7))));
        let service = UserService::new(Arc::new(directory));

        let user = service
            .register_user(draft("Ada", "Ada@Example.com"))
            .await
            .expect("registered");
        assert_eq!(user.id, UserId::new(7));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_create_user()
            .returning(|_| Err(UserDirectoryError::constraint("users_email_lower_key")));
        let service = UserService::new(Arc::new(directory));

        let err = service
            .register_user(draft("Ada", "ada@example.com"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), "user already exists");
    }

    #[rstest]
    #[case(draft(" ", "ada@example.com"), "name")]
    #[case(draft("Ada", "ada"), "email")]
    #[tokio::test]
    async fn invalid_drafts_never_reach_the_directory(
        #[case] draft: UserDraft,
        #[case] field: &str,
    ) {
        let service = UserService::new(Arc::new(MockUserDirectory::new()));
        let err = service.register_user(draft).await.expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().expect("details")["field"], field);
    }

    #[rstest]
    #[tokio::test]
    async fn listing_surfaces_outages_as_unavailable() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_list_users()
            .returning(|| Err(UserDirectoryError::connection("pool timeout")));
        let service = UserService::new(Arc::new(directory));

        let err = service.list_users().await.expect_err("outage");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
