//! SQL execution against the WCA database.
//!
//! `QueryEngine` is the seam to whatever runs the SQL; `MySqlEngine` is the
//! production implementation over a small `sqlx` pool. Rows come back as
//! dynamically shaped [`Record`]s since the column set depends on the query.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column, Row, ValueRef};
use tracing::{error, info};

use crate::config::DatabaseConfig;
use crate::data::{CellValue, Record, ResultSet};
use crate::Result;

const MIN_CONNECTIONS: u32 = 1;
const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can run SQL and hand back rows.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Run `sql` and return every row.
    async fn fetch(&self, sql: &str) -> Result<ResultSet>;

    /// Release held resources. Default: nothing to release.
    async fn close(&self) {}
}

/// Run `sql`, converting any failure into the one-record error result set.
pub async fn execute_query(engine: &dyn QueryEngine, sql: &str) -> ResultSet {
    info!("Executing query: {}", sql);
    match engine.fetch(sql).await {
        Ok(rows) => {
            info!("Query returned {} results", rows.len());
            rows
        }
        Err(e) => {
            error!("Error executing query: {}", e);
            vec![Record::error(e.to_string())]
        }
    }
}

/// MySQL-backed engine.
///
/// The pool connects lazily, so constructing the engine never touches the
/// network; the first query opens the first connection.
#[derive(Debug, Clone)]
pub struct MySqlEngine {
    pool: MySqlPool,
}

impl MySqlEngine {
    /// Build an engine from connection settings. Must be called inside a
    /// tokio runtime.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        let pool = MySqlPoolOptions::new()
            .min_connections(MIN_CONNECTIONS)
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy_with(options);

        info!(
            "Database pool configured for {}@{}:{}/{}",
            config.user, config.host, config.port, config.name
        );
        Self { pool }
    }
}

#[async_trait]
impl QueryEngine for MySqlEngine {
    async fn fetch(&self, sql: &str) -> Result<ResultSet> {
        let rows = sqlx::raw_sql(sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(decode_row).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

fn decode_row(row: &MySqlRow) -> Record {
    row.columns()
        .iter()
        .map(|column| {
            let index = column.ordinal();
            (column.name().to_string(), decode_cell(row, index))
        })
        .collect()
}

/// Decode one column into the closed cell model.
///
/// Integers stay integers; every other non-null SQL type (decimals, floats,
/// dates, text, blobs) becomes text.
fn decode_cell(row: &MySqlRow, index: usize) -> CellValue {
    match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return CellValue::Null,
        Err(_) => return CellValue::Null,
        Ok(_) => {}
    }

    if let Ok(v) = row.try_get::<i64, _>(index) {
        return CellValue::Integer(v);
    }
    if let Ok(v) = row.try_get::<u64, _>(index) {
        return i64::try_from(v)
            .map(CellValue::Integer)
            .unwrap_or_else(|_| CellValue::Text(v.to_string()));
    }
    if let Ok(v) = row.try_get::<bool, _>(index) {
        return CellValue::Integer(i64::from(v));
    }
    if let Ok(v) = row.try_get::<f64, _>(index) {
        return CellValue::Text(v.to_string());
    }
    if let Ok(v) = row.try_get::<String, _>(index) {
        return CellValue::Text(v);
    }
    if let Ok(v) = row.try_get::<chrono::NaiveDateTime, _>(index) {
        return CellValue::Text(v.to_string());
    }
    if let Ok(v) = row.try_get::<chrono::NaiveDate, _>(index) {
        return CellValue::Text(v.to_string());
    }
    if let Ok(v) = row.try_get::<chrono::NaiveTime, _>(index) {
        return CellValue::Text(v.to_string());
    }
    // DECIMAL travels as text on the wire.
    if let Ok(v) = row.try_get_unchecked::<String, _>(index) {
        return CellValue::Text(v);
    }
    match row.try_get_unchecked::<Vec<u8>, _>(index) {
        Ok(bytes) => CellValue::Text(String::from_utf8_lossy(&bytes).into_owned()),
        Err(_) => CellValue::Null,
    }
}
