//! Warden API server binary.
//!
//! Reads configuration from the environment (and `.env`), connects to
//! PostgreSQL, runs migrations and serves the REST API.

use std::sync::Arc;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use warden_core::store::{MemoryUserStore, PgUserStore, UserStore};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "warden_api_server", about = "Warden API server")]
struct Args {
    /// Port to listen on. Overrides `API_PORT`.
    #[arg(long)]
    port: Option<u16>,

    /// Maximum number of database connections in the pool.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
    max_connections: u32,

    /// Keep users in memory instead of PostgreSQL. Data is lost on exit.
    #[arg(long, default_value_t = false)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,warden_api=debug,warden_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = warden_api::config::ApiConfig::from_env()?;
    if let Some(port) = args.port {
        config.bind_addr = format!("0.0.0.0:{port}");
    }

    info!(
        bind_addr = %config.bind_addr,
        in_memory = args.in_memory,
        token_ttl_secs = config.auth.token_ttl().num_seconds(),
        bcrypt_cost = config.auth.bcrypt_cost(),
        "starting warden_api_server"
    );

    let store: Arc<dyn UserStore> = if args.in_memory {
        Arc::new(MemoryUserStore::new())
    } else {
        info!(max_connections = args.max_connections, "configuring connection pool");
        let pool = PgPoolOptions::new()
            .max_connections(args.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(&config.database_url)
            .await?;

        info!("running database migrations");
        warden_core::migrate::migrate(&pool).await?;

        Arc::new(PgUserStore::new(pool))
    };

    let state = warden_api::AppState::new(store, &config.auth)?;
    let app = warden_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
