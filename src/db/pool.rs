use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::db::DbError;

/// Open a read-only connection pool over an existing SQLite database.
///
/// The database file must already exist. Handlers never hold a connection
/// beyond a single statement; each query checks one out of the pool.
#[instrument(skip(database_url))]
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, DbError> {
    debug!("Opening read-only pool with {} connections", max_connections);

    let options = SqliteConnectOptions::from_str(database_url)?
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}
