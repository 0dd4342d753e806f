//! PostgreSQL-backed `UserDirectory` adapter.
//!
//! Stored addresses may carry any case, so e-mail lookups compare
//! `lower(email)` against the normalised key. The `users_email_lower_key`
//! index serves the lookup and rejects case-only duplicates on insert.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{Email, NewUser, User, UserId};

use super::diesel_error_mapping::{Failure, PersistenceError, classify};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

diesel::define_sql_function! {
    /// SQL `lower(text)`.
    fn lower(value: Text) -> Text;
}

/// Diesel-backed implementation of the `UserDirectory` port.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: PersistenceError) -> UserDirectoryError {
    match classify(error) {
        Failure::Connection(message) => UserDirectoryError::connection(message),
        Failure::Query(message) => UserDirectoryError::query(message),
        Failure::Constraint(message) => UserDirectoryError::constraint(message),
    }
}

fn into_user(row: Option<UserRow>) -> Result<Option<User>, PersistenceError> {
    row.map(UserRow::into_user)
        .transpose()
        .map_err(PersistenceError::InvalidRow)
}

fn by_email(email: &Email) -> users::BoxedQuery<'_, Pg> {
    users::table
        .filter(lower(users::email).eq(email.as_ref()))
        .into_boxed()
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserDirectoryError> {
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                let row: Option<UserRow> = by_email(email)
                    .select(UserRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()?;
                into_user(row)
            })
            .await
            .map_err(map_error)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserDirectoryError> {
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                let row: Option<UserRow> = users::table
                    .find(id.get())
                    .select(UserRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()?;
                into_user(row)
            })
            .await
            .map_err(map_error)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserDirectoryError> {
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                let rows: Vec<UserRow> = users::table
                    .order_by(users::id)
                    .select(UserRow::as_select())
                    .load(&mut conn)
                    .await?;
                rows.into_iter()
                    .map(|row| row.into_user().map_err(PersistenceError::InvalidRow))
                    .collect()
            })
            .await
            .map_err(map_error)
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, UserDirectoryError> {
        let new_row = NewUserRow::from(user);
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                let row: UserRow = diesel::insert_into(users::table)
                    .values(&new_row)
                    .returning(UserRow::as_returning())
                    .get_result(&mut conn)
                    .await?;
                row.into_user().map_err(PersistenceError::InvalidRow)
            })
            .await
            .map_err(map_error)
    }
}
