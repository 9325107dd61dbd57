//! Main entry point for the account service backend.
//!
//! This file initializes the Axum web server, sets up the database connection,
//! and registers all API routes and middleware.
//! It orchestrates the application's startup and defines its overall structure.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod state;
mod utils;

use crate::api::common::ApiResponse;
use anyhow::Context;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use state::AppState;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    let state = AppState::new(db.pool().clone(), &config);

    let app = build_router(state);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Starting account service on port {}", config.server_port);
    axum::serve(listener, app).await?;

    db.close().await;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::auth_router())
        .merge(api::user::routes::user_router(state.verifier.clone()))
        .layer(Extension(state))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Account Service",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Hello World!",
    ))
}
