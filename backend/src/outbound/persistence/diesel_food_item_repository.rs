//! PostgreSQL-backed `FoodItemRepository` implementation using Diesel ORM.
//!
//! Listing builds one boxed, filtered query and runs it twice: once for the
//! unpaginated count and once for the requested page ordered by id. Deletion
//! clears order lines and cart entries before removing the item row, all in
//! one transaction.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{ClearedAssociations, FoodItemRepository, FoodItemRepositoryError};
use crate::domain::{CatalogFilter, CatalogPage, FoodItem, FoodItemId, NewFoodItem};

use super::diesel_error_mapping::{Failure, PersistenceError, classify};
use super::models::{FoodItemRow, NewFoodItemRow};
use super::pool::DbPool;
use super::schema::{food_items, order_food_items, user_cart_items};

/// Diesel-backed implementation of the `FoodItemRepository` port.
#[derive(Clone)]
pub struct DieselFoodItemRepository {
    pool: DbPool,
}

impl DieselFoodItemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: PersistenceError) -> FoodItemRepositoryError {
    match classify(error) {
        Failure::Connection(message) => FoodItemRepositoryError::connection(message),
        Failure::Query(message) => FoodItemRepositoryError::query(message),
        Failure::Constraint(message) => FoodItemRepositoryError::constraint(message),
    }
}

/// Apply every present filter clause; absent clauses match everything.
fn filtered_items(filter: &CatalogFilter) -> food_items::BoxedQuery<'_, Pg> {
    let mut query = food_items::table.into_boxed();
    if let Some(category) = filter.category.as_deref() {
        query = query.filter(food_items::category.eq(category));
    }
    if let Some(min) = filter.min_price {
        query = query.filter(food_items::price.ge(min.amount()));
    }
    if let Some(max) = filter.max_price {
        query = query.filter(food_items::price.le(max.amount()));
    }
    if let Some(pattern) = filter.search_pattern() {
        query = query.filter(
            food_items::name
                .ilike(pattern.clone())
                .or(food_items::description.ilike(pattern)),
        );
    }
    query
}

fn count_to_u64(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}

#[async_trait]
impl FoodItemRepository for DieselFoodItemRepository {
    async fn list(&self, filter: &CatalogFilter) -> Result<CatalogPage, FoodItemRepositoryError> {
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                let total: i64 = filtered_items(filter)
                    .count()
                    .get_result(&mut conn)
                    .await?;
                let rows: Vec<FoodItemRow> = filtered_items(filter)
                    .select(FoodItemRow::as_select())
                    .order_by(food_items::id)
                    .limit(i64::from(filter.page.limit()))
                    .offset(i64::try_from(filter.page.offset()).unwrap_or(i64::MAX))
                    .load(&mut conn)
                    .await?;
                Ok::<_, PersistenceError>(CatalogPage {
                    items: rows.into_iter().map(FoodItem::from).collect(),
                    total: u64::try_from(total).unwrap_or_default(),
                })
            })
            .await
            .map_err(map_error)
    }

    async fn find_by_id(&self, id: FoodItemId) -> Result<Option<FoodItem>, FoodItemRepositoryError> {
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                let row: Option<FoodItemRow> = food_items::table
                    .find(id.get())
                    .select(FoodItemRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()?;
                Ok::<_, PersistenceError>(row.map(FoodItem::from))
            })
            .await
            .map_err(map_error)
    }

    async fn find_by_ids(
        &self,
        ids: &[FoodItemId],
    ) -> Result<Vec<FoodItem>, FoodItemRepositoryError> {
        let raw: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                let rows: Vec<FoodItemRow> = food_items::table
                    .filter(food_items::id.eq_any(raw))
                    .select(FoodItemRow::as_select())
                    .order_by(food_items::id)
                    .load(&mut conn)
                    .await?;
                Ok::<_, PersistenceError>(rows.into_iter().map(FoodItem::from).collect())
            })
            .await
            .map_err(map_error)
    }

    async fn create(&self, item: &NewFoodItem) -> Result<FoodItem, FoodItemRepositoryError> {
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                let row: FoodItemRow = diesel::insert_into(food_items::table)
                    .values(NewFoodItemRow::from(item))
                    .returning(FoodItemRow::as_returning())
                    .get_result(&mut conn)
                    .await?;
                Ok::<_, PersistenceError>(FoodItem::from(row))
            })
            .await
            .map_err(map_error)
    }

    async fn delete_with_associations(
        &self,
        id: FoodItemId,
    ) -> Result<Option<ClearedAssociations>, FoodItemRepositoryError> {
        let raw = id.get();
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                conn.transaction::<_, PersistenceError, _>(|conn| {
                    async move {
                        let locked: Option<i32> = food_items::table
                            .find(raw)
                            .select(food_items::id)
                            .for_update()
                            .first(conn)
                            .await
                            .optional()?;
                        if locked.is_none() {
                            return Ok(None);
                        }

                        let order_lines = diesel::delete(
                            order_food_items::table
                                .filter(order_food_items::food_item_id.eq(raw)),
                        )
                        .execute(conn)
                        .await?;
                        let cart_entries = diesel::delete(
                            user_cart_items::table.filter(user_cart_items::food_item_id.eq(raw)),
                        )
                        .execute(conn)
                        .await?;
                        diesel::delete(food_items::table.find(raw))
                            .execute(conn)
                            .await?;

                        Ok(Some(ClearedAssociations {
                            order_lines: count_to_u64(order_lines),
                            cart_entries: count_to_u64(cart_entries),
                        }))
                    }
                    .scope_boxed()
                })
                .await
            })
            .await
            .map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::persistence::pool::PoolError;
    use rstest::rstest;

    #[rstest]
    fn pool_failure_maps_to_connection_error() {
        let err = map_error(PersistenceError::from(PoolError::checkout("refused")));
        assert!(matches!(err, FoodItemRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn missing_row_maps_to_query_error() {
        let err = map_error(PersistenceError::from(diesel::result::Error::NotFound));
        assert!(matches!(err, FoodItemRepositoryError::Query { .. }));
    }

    #[rstest]
    fn sql_for_combined_filter_mentions_every_clause() {
        let filter = CatalogFilter {
            category: Some("soup".to_owned()),
            search: Some("miso".to_owned()),
            ..CatalogFilter::default()
        };
        let sql = diesel::debug_query::<Pg, _>(&filtered_items(&filter)).to_string();

        assert!(sql.contains("\"category\" = $1"), "{sql}");
        assert!(sql.contains("ILIKE"), "{sql}");
    }
}
