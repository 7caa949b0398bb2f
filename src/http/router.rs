//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Timetable CRUD
        .route("/timetable", get(handlers::list_timetable))
        .route("/timetable", post(handlers::create_entry))
        .route("/timetable/{id}", get(handlers::get_entry))
        .route("/timetable/{id}", put(handlers::update_entry))
        .route("/timetable/{id}", delete(handlers::delete_entry))
        // Directory
        .route("/classes", get(handlers::list_classes))
        .route("/classes", post(handlers::create_class))
        .route("/classes/{id}", get(handlers::get_class))
        .route("/teachers", get(handlers::list_teachers))
        .route("/teachers", post(handlers::create_teacher))
        .route("/teachers/{id}", get(handlers::get_teacher))
        .route("/subjects", get(handlers::list_subjects))
        .route("/subjects", post(handlers::create_subject))
        .route("/subjects/{id}", get(handlers::get_subject));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
