pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use error::ApiError;
use services::slots::{PerCoverRevenueModel, RevenueModel};
use store::ReservationStore;

// Shared state for the whole application. The store and revenue model
// are trait objects so tests can run the full router against in-memory
// substitutes.
pub struct AppState {
    pub store: Arc<dyn ReservationStore>,
    pub revenue: Arc<dyn RevenueModel>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(store: Arc<dyn ReservationStore>, config: config::Config) -> Arc<Self> {
        let revenue = Arc::new(PerCoverRevenueModel {
            avg_spend_per_cover: config.booking.avg_spend_per_cover,
        });
        Arc::new(Self { store, revenue, config })
    }
}

/// Builds the full application router: probes, the widget API under
/// `/api`, request tracing, permissive CORS, and a panic guard that
/// flattens anything escaping a handler into the INTERNAL_ERROR
/// envelope.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(|| async { "Reservation API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
}

fn handle_panic(_err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    ApiError::Internal.into_response()
}
