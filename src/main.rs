// src/main.rs
mod routes;
mod handlers;
mod models;
mod database;
mod state;
mod store;
mod dtos;
mod error;
mod config;

use tracing_subscriber::EnvFilter;
use tokio::net::TcpListener;
use dotenvy::dotenv;

use crate::config::Config;
use crate::store::ProductStore;

#[tokio::main]
async fn main() {
    // Load environment variables before the log filter reads RUST_LOG
    dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();

    // Pick the product store
    let products = match &config.database_url {
        Some(database_url) => {
            let db_pool = match database::create_pool(database_url).await {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!(error=%e, "Failed to create database pool");
                    return;
                }
            };
            if let Err(e) = database::ensure_schema(&db_pool).await {
                tracing::error!(error=%e, "Failed to prepare products table");
                return;
            }
            ProductStore::postgres(db_pool)
        }
        None => {
            tracing::info!("DATABASE_URL not set, keeping products in memory");
            ProductStore::memory()
        }
    };

    // Create application state
    let app_state = state::AppState::new(products);

    let app = match routes::create_router(app_state) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error=%e, "Invalid route pattern");
            return;
        }
    };

    let addr = config.socket_addr();
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%addr, error=%e, "Failed to bind");
            return;
        }
    };
    tracing::info!("server running on port {}", config.port);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}
