use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::config::Config;

/// Schema migrations embedded at compile time from `./migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Open the configured database, creating the file if needed, and bring the
/// schema up to date before the pool is handed out.
pub async fn init_db_pool() -> Result<SqlitePool, sqlx::Error> {
    let config = Config::get();
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    Ok(pool)
}
