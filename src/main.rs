use anyhow::Context;
use skillswap::{auth::HashCost, config::Config, db, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,skillswap=debug,tower_http=debug")),
        )
        .with_file(true)
        .with_line_number(true)
        .init();

    let db_pool = db::connect(&config)
        .await
        .with_context(|| format!("opening {}", config.database_url))?;
    tracing::info!(database_url = %config.database_url, "connected to the SQLite database");

    let app_state = AppState {
        db_pool: db_pool.clone(),
        hash_cost: HashCost(config.bcrypt_cost),
    };
    let app = skillswap::app(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "server is running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("ctrl-c received, shutting down"),
        Err(err) => {
            tracing::error!(%err, "could not listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    }
}
