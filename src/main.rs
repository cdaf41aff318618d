use anyhow::Context;

use order_api::{app, config, store::OrderStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_api=info,tower_http=info".into()),
        )
        .init();

    let config = config::config();

    let store = OrderStore::connect(&config.database.url, config.database.max_connections)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.url))?;

    let app = app(store);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("order API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}
