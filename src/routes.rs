// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{quiz, summary},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Every route requires a bearer token; admin routes also require the admin role.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool, Config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/", get(quiz::list_quizzes))
        .route("/{id}/start", post(quiz::start_attempt))
        .route("/{id}/submit", post(quiz::submit_attempt))
        .route("/{id}/attempt", get(quiz::attempt_state));

    let me_routes = Router::new()
        .route("/summary", get(summary::my_summary))
        .route("/scorecard", get(summary::my_scorecard));

    // Auth first, then Admin check
    let admin_routes = Router::new()
        .route("/summary", get(summary::admin_summary))
        .layer(middleware::from_fn(admin_middleware));

    let api = Router::new()
        .nest("/quizzes", quiz_routes)
        .nest("/me", me_routes)
        .nest("/admin", admin_routes)
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/api", api)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
