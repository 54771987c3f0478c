//! CivicConnect storefront backend

use anyhow::Result;
use civicconnect::config::ServerConfig;
use civicconnect::server::{self, AppState};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    if config.seed_db {
        server::seed::seed_catalog(&db).await?;
        tracing::info!("seeded starter catalog");
    }

    let nats = match &config.nats_url {
        Some(url) => match async_nats::connect(url.as_str()).await {
            Ok(client) => Some(client),
            Err(err) => {
                tracing::warn!(error = %err, "NATS unreachable, domain events disabled");
                None
            }
        },
        None => None,
    };

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState {
        db,
        nats,
        http: reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?,
        config: Arc::new(config),
    };
    let app = server::router(state);

    tracing::info!("CivicConnect backend listening on {addr}");
    axum::serve(tokio::net::TcpListener::bind(&addr).await?, app).await?;
    Ok(())
}
