//! Migrated throwaway databases for the Diesel repository tests.
//!
//! Each [`PgDatabase`] owns its cluster, a uniquely named database with every
//! migration applied through [`run_migrations`], and a small pool. Raw SQL
//! goes through the `postgres` client so seeding and inspection never share
//! a transaction with the code under test.

use std::future::Future;

use food_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use pg_embedded_setup_unpriv::{TemporaryDatabase, TestCluster};
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

use super::pg_embed::test_cluster;

/// Render a `postgres` error with the SQLSTATE and server message.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// A migrated database plus the runtime that drives its pool.
pub struct PgDatabase {
    runtime: Runtime,
    pool: DbPool,
    url: String,
    _database: TemporaryDatabase,
    _cluster: TestCluster,
}

impl PgDatabase {
    /// Start a cluster, create a fresh database and apply every migration.
    pub fn provision() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = test_cluster()?;
        let name = format!("food_test_{}", Uuid::new_v4().simple());
        let database = cluster
            .temporary_database(name.as_str())
            .map_err(|err| format!("{err:?}"))?;
        let url = database.url().to_string();

        runtime
            .block_on(run_migrations(&url))
            .map_err(|err| err.to_string())?;
        let config = PoolConfig::new(&url)
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            pool,
            url,
            _database: database,
            _cluster: cluster,
        })
    }

    /// Insert two customers and a three-item menu with fixed identifiers.
    ///
    /// Users are 1 (Ada) and 2 (Grace). Items are 1 (Soup), 2 (Bread) and
    /// 3 (Stew). Sequences are advanced past the seeded rows.
    pub fn seed_menu(&self) {
        self.execute(
            "INSERT INTO users (id, name, email) VALUES \
                 (1, 'Ada', 'ada@example.com'), \
                 (2, 'Grace', 'grace@example.com'); \
             INSERT INTO food_items (id, name, price, category) VALUES \
                 (1, 'Soup', 4.50, 'starters'), \
                 (2, 'Bread', 2.00, 'sides'), \
                 (3, 'Stew', 9.25, 'mains'); \
             SELECT setval('users_id_seq', 2); \
             SELECT setval('food_items_id_seq', 3);",
        );
    }

    /// Pool for building repositories.
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Drive a repository call to completion.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn client(&self) -> Client {
        Client::connect(&self.url, NoTls)
            .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)))
    }

    /// Run one or more statements outside the repositories.
    pub fn execute(&self, sql: &str) {
        self.try_execute(sql)
            .unwrap_or_else(|err| panic!("{sql}: {err}"));
    }

    /// Like [`Self::execute`] but hands the server's refusal back.
    pub fn try_execute(&self, sql: &str) -> Result<(), String> {
        self.client()
            .batch_execute(sql)
            .map_err(|err| format_postgres_error(&err))
    }

    /// Run a query whose rows are two `INT4` columns.
    pub fn int_pairs(&self, sql: &str) -> Vec<(i32, i32)> {
        self.client()
            .query(sql, &[])
            .unwrap_or_else(|err| panic!("{sql}: {}", format_postgres_error(&err)))
            .iter()
            .map(|row| (row.get(0), row.get(1)))
            .collect()
    }

    /// Run a query returning one `BIGINT`, such as `count(*)`.
    pub fn count(&self, sql: &str) -> i64 {
        self.client()
            .query_one(sql, &[])
            .unwrap_or_else(|err| panic!("{sql}: {}", format_postgres_error(&err)))
            .get(0)
    }
}
