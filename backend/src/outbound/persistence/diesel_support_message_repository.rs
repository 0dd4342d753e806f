//! PostgreSQL-backed `SupportMessageRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SupportMessageRepository, SupportRepositoryError};
use crate::domain::{NewSupportMessage, SupportMessage};

use super::diesel_error_mapping::{Failure, PersistenceError, classify};
use super::models::{NewSupportMessageRow, SupportMessageRow};
use super::pool::DbPool;
use super::schema::support_messages;

/// Diesel-backed implementation of the `SupportMessageRepository` port.
#[derive(Clone)]
pub struct DieselSupportMessageRepository {
    pool: DbPool,
}

impl DieselSupportMessageRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: PersistenceError) -> SupportRepositoryError {
    match classify(error) {
        Failure::Connection(message) => SupportRepositoryError::connection(message),
        Failure::Query(message) | Failure::Constraint(message) => {
            SupportRepositoryError::query(message)
        }
    }
}

fn into_message(row: SupportMessageRow) -> Result<SupportMessage, PersistenceError> {
    row.into_message().map_err(PersistenceError::InvalidRow)
}

#[async_trait]
impl SupportMessageRepository for DieselSupportMessageRepository {
    async fn create(
        &self,
        message: &NewSupportMessage,
    ) -> Result<SupportMessage, SupportRepositoryError> {
        let new_row = NewSupportMessageRow::from(message);
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                let row: SupportMessageRow = diesel::insert_into(support_messages::table)
                    .values(&new_row)
                    .returning(SupportMessageRow::as_returning())
                    .get_result(&mut conn)
                    .await?;
                into_message(row)
            })
            .await
            .map_err(map_error)
    }

    async fn list(&self) -> Result<Vec<SupportMessage>, SupportRepositoryError> {
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                let rows: Vec<SupportMessageRow> = support_messages::table
                    .order_by(support_messages::id)
                    .select(SupportMessageRow::as_select())
                    .load(&mut conn)
                    .await?;
                rows.into_iter().map(into_message).collect()
            })
            .await
            .map_err(map_error)
    }
}
