use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use festival_backend::config::Config;
use festival_backend::db::pool::init_db_pool;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let config = Config::get();
    let pool = init_db_pool().await?;
    let app = festival_backend::app(pool.clone());

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
