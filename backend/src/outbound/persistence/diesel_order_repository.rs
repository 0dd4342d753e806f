//! PostgreSQL-backed `OrderRepository` implementation using Diesel ORM.
//!
//! An order is one `orders` row plus one `order_food_items` row per line.
//! Lines carry a `position` so repeated items survive and reads return them in
//! placement order.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{OrderRepository, OrderRepositoryError};
use crate::domain::{FoodItem, NewOrder, Order, OrderId, OrderScope};

use super::diesel_error_mapping::{Failure, PersistenceError, classify};
use super::models::{FoodItemRow, NewOrderLineRow, NewOrderRow, OrderRow};
use super::pool::DbPool;
use super::schema::{food_items, order_food_items, orders};

/// Diesel-backed implementation of the `OrderRepository` port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: PersistenceError) -> OrderRepositoryError {
    match classify(error) {
        Failure::Connection(message) => OrderRepositoryError::connection(message),
        Failure::Query(message) => OrderRepositoryError::query(message),
        Failure::Constraint(message) => OrderRepositoryError::constraint(message),
    }
}

fn line_rows(order_id: i32, order: &NewOrder) -> Result<Vec<NewOrderLineRow>, PersistenceError> {
    order
        .item_ids
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let position = i32::try_from(index)
                .map_err(|_| PersistenceError::InvalidRow("too many order lines".to_owned()))?;
            Ok(NewOrderLineRow {
                order_id,
                position,
                food_item_id: item.get(),
            })
        })
        .collect()
}

/// Load the lines of every listed order, keyed by order id, in position order.
async fn load_lines(
    conn: &mut AsyncPgConnection,
    order_ids: Vec<i32>,
) -> Result<HashMap<i32, Vec<FoodItem>>, PersistenceError> {
    let rows: Vec<(i32, FoodItemRow)> = order_food_items::table
        .inner_join(food_items::table)
        .filter(order_food_items::order_id.eq_any(order_ids))
        .order_by((order_food_items::order_id, order_food_items::position))
        .select((order_food_items::order_id, FoodItemRow::as_select()))
        .load(conn)
        .await?;

    let mut lines: HashMap<i32, Vec<FoodItem>> = HashMap::new();
    for (order_id, row) in rows {
        lines.entry(order_id).or_default().push(FoodItem::from(row));
    }
    Ok(lines)
}

fn assemble(rows: Vec<OrderRow>, mut lines: HashMap<i32, Vec<FoodItem>>) -> Vec<Order> {
    rows.into_iter()
        .map(|row| {
            let items = lines.remove(&row.id).unwrap_or_default();
            row.into_order(items)
        })
        .collect()
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn create_with_items(&self, order: &NewOrder) -> Result<Order, OrderRepositoryError> {
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                conn.transaction::<_, PersistenceError, _>(|conn| {
                    async move {
                        let header: OrderRow = diesel::insert_into(orders::table)
                            .values(NewOrderRow {
                                user_id: order.user_id.get(),
                                customer: &order.customer,
                                address: &order.address,
                                total: order.total.amount(),
                            })
                            .returning(OrderRow::as_returning())
                            .get_result(conn)
                            .await?;

                        let lines = line_rows(header.id, order)?;
                        if !lines.is_empty() {
                            diesel::insert_into(order_food_items::table)
                                .values(&lines)
                                .execute(conn)
                                .await?;
                        }

                        let mut loaded = load_lines(conn, vec![header.id]).await?;
                        let items = loaded.remove(&header.id).unwrap_or_default();
                        Ok(header.into_order(items))
                    }
                    .scope_boxed()
                })
                .await
            })
            .await
            .map_err(map_error)
    }

    async fn list(&self, scope: OrderScope) -> Result<Vec<Order>, OrderRepositoryError> {
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                let mut query = orders::table.into_boxed();
                if let OrderScope::ForUser(user_id) = scope {
                    query = query.filter(orders::user_id.eq(user_id.get()));
                }
                let rows: Vec<OrderRow> = query
                    .select(OrderRow::as_select())
                    .order_by(orders::id)
                    .load(&mut conn)
                    .await?;

                let ids = rows.iter().map(|row| row.id).collect();
                let lines = load_lines(&mut conn, ids).await?;
                Ok::<_, PersistenceError>(assemble(rows, lines))
            })
            .await
            .map_err(map_error)
    }

    async fn delete_with_items(&self, id: OrderId) -> Result<bool, OrderRepositoryError> {
        let raw = id.get();
        self.pool
            .run(async {
                let mut conn = self.pool.get().await?;
                conn.transaction::<_, PersistenceError, _>(|conn| {
                    async move {
                        diesel::delete(
                            order_food_items::table.filter(order_food_items::order_id.eq(raw)),
                        )
                        .execute(conn)
                        .await?;
                        let deleted = diesel::delete(orders::table.find(raw))
                            .execute(conn)
                            .await?;
                        Ok(deleted > 0)
                    }
                    .scope_boxed()
                })
                .await
            })
            .await
            .map_err(map_error)
    }
}
