//! PostgreSQL-backed `CartRepository` implementation using Diesel ORM.
//!
//! Replacement deletes every cart row for the user and inserts the new set in
//! one transaction, so readers see either the old cart or the new one.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{CartRepository, CartRepositoryError};
use crate::domain::{FoodItem, FoodItemId, UserId};

use super::diesel_error_mapping::{Failure, PersistenceError, classify};
use super::models::{FoodItemRow, NewCartItemRow};
use super::pool::DbPool;
use super::schema::{food_items, user_cart_items};

/// Diesel-backed implementation of the `CartRepository` port.
#[derive(Clone)]
pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: PersistenceError) -> CartRepositoryError {
    match classify(error) {
        Failure::Connection(message) => CartRepositoryError::connection(message),
        Failure::Query(message) => CartRepositoryError::query(message),
        Failure::Constraint(message) => CartRepositoryError::constraint(message),
    }
}

async fn load_cart(
    conn: &mut AsyncPgConnection,
    user_id: i32,
) -> Result<Vec<FoodItem>, PersistenceError> {
    let rows: Vec<FoodItemRow> = user_cart_items::table
        .inner_join(food_items::table)
        .filter(user_cart_items::user_id.eq(user_id))
        .order_by(food_items::id)
        .select(FoodItemRow::as_select())
        .load(conn)
        .await?;
    Ok(rows.into_iter().map(FoodItem::from).collect())
}

#[async_trait]
impl CartRepository for DieselCartRepository {
    async fn find(&self, user_id: UserId) -> Result<Vec<FoodItem>, CartRepositoryError> {
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                load_cart(&mut conn, user_id.get()).await
            })
            .await
            .map_err(map_error)
    }

    async fn replace(
        &self,
        user_id: UserId,
        items: &[FoodItemId],
    ) -> Result<Vec<FoodItem>, CartRepositoryError> {
        let user = user_id.get();
        let new_rows: Vec<NewCartItemRow> = items
            .iter()
            .map(|item| NewCartItemRow {
                user_id: user,
                food_item_id: item.get(),
            })
            .collect();
        let rows = &new_rows;

        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                conn.transaction::<_, PersistenceError, _>(|conn| {
                    async move {
                        diesel::delete(
                            user_cart_items::table.filter(user_cart_items::user_id.eq(user)),
                        )
                        .execute(conn)
                        .await?;
                        if !rows.is_empty() {
                            diesel::insert_into(user_cart_items::table)
                                .values(rows)
                                .on_conflict_do_nothing()
                                .execute(conn)
                                .await?;
                        }
                        load_cart(conn, user).await
                    }
                    .scope_boxed()
                })
                .await
            })
            .await
            .map_err(map_error)
    }
}
