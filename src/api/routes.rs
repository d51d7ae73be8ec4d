//! Route table and shared application state.

use crate::{
    analytics::{Aggregator, AnalyticsStore},
    auth::{api as auth_api, auth_middleware, JwtHandler, UserStore},
    middleware::request_logging,
};
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use super::{analytics as analytics_api, seed, users};

/// Shared application state, constructed once at startup and injected
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub analytics: Arc<AnalyticsStore>,
    pub aggregator: Arc<Aggregator>,
    pub jwt: Arc<JwtHandler>,
}

impl AppState {
    pub fn new(
        users: Arc<UserStore>,
        analytics: Arc<AnalyticsStore>,
        jwt: Arc<JwtHandler>,
    ) -> Self {
        let aggregator = Arc::new(Aggregator::new(users.clone(), analytics.clone()));
        Self {
            users,
            analytics,
            aggregator,
            jwt,
        }
    }
}

/// Create the API router
///
/// Three layers of access: public (health, seed), credential exchange
/// (register/login), and token-protected. Admin-only handlers additionally
/// check the caller's role themselves.
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/api/auth/register", post(auth_api::register))
        .route("/api/auth/login", post(auth_api::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/users", get(users::list_users))
        .route(
            "/api/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api/analytics/metrics", get(analytics_api::get_metrics))
        .route("/api/analytics/charts", get(analytics_api::get_charts))
        .route("/api/analytics", post(analytics_api::record_sample))
        .route_layer(middleware::from_fn_with_state(
            state.jwt.clone(),
            auth_middleware,
        ))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/seed", get(seed::seed_database).post(seed::seed_database))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(auth_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    message: String,
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
    })
}
