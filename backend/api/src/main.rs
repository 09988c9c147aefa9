//! Texora API — entry point.
//!
//! Boots the in-memory funding engine from the demo seed data and exposes
//! it over a small Axum REST API for the frontend. All state lives for the
//! process lifetime; there is no persistence.

mod api;
mod config;
mod errors;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use texora_protocol::{seed, Platform};

use api::ApiState;
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    // Load config from environment.
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;

    // Seed the in-memory store and start the engine.
    let platform = Platform::with_delays(seed::demo_store(), config.delays());
    let state = Arc::new(ApiState { platform });

    let app = Router::new()
        .route("/health", get(api::health))
        .route("/users", get(api::list_users))
        .route("/users/:id", get(api::get_user))
        .route("/users/:id/transactions", get(api::get_user_transactions))
        .route("/users/:id/investments", get(api::get_donor_investments))
        .route("/users/:id/payment-methods", get(api::get_payment_methods))
        .route("/projects", get(api::list_projects).post(api::create_project))
        .route("/projects/:id", get(api::get_project))
        .route(
            "/projects/:id/milestones/:mid/submit",
            post(api::submit_milestone),
        )
        .route(
            "/projects/:id/milestones/:mid/release",
            post(api::release_funds),
        )
        .route(
            "/projects/:id/milestones/:mid/reject",
            post(api::reject_milestone),
        )
        .route("/investments", post(api::create_investment))
        .route("/withdrawals", post(api::initiate_withdrawal))
        .route("/payment-methods", post(api::add_payment_method))
        .route(
            "/payment-methods/:id/default",
            post(api::set_default_payment_method),
        )
        .route(
            "/payment-methods/:id",
            delete(api::delete_payment_method),
        )
        .route("/connections", post(api::request_connection))
        .route(
            "/connections/:creator_id/:donor_id",
            get(api::get_connection_status),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.api_port);
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
