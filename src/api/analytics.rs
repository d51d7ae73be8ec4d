//! Analytics endpoints
//! Mission: Expose dashboard metrics, chart data, and sample ingestion

use crate::{
    analytics::{AnalyticsRecord, ChartPoint, DashboardMetrics},
    api::{ApiError, AppState},
    auth::{
        authorize,
        models::{Claims, UserRole},
    },
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;

/// Dashboard metrics - GET /api/analytics/metrics (any valid token)
pub async fn get_metrics(
    State(state): State<AppState>,
) -> Result<Json<DashboardMetrics>, ApiError> {
    let metrics = state.aggregator.compute_metrics()?;
    Ok(Json(metrics))
}

/// Chart series - GET /api/analytics/charts (any valid token)
pub async fn get_charts(State(state): State<AppState>) -> Result<Json<Vec<ChartPoint>>, ApiError> {
    let series = state.aggregator.compute_chart_series()?;
    Ok(Json(series))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSampleRequest {
    pub active_users: i64,
    pub new_signups: i64,
    pub sales: i64,
    pub revenue: f64,
}

/// Append one analytics snapshot - POST /api/analytics (Admin only)
pub async fn record_sample(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<RecordSampleRequest>,
) -> Result<(StatusCode, Json<AnalyticsRecord>), ApiError> {
    authorize(&claims, UserRole::Admin)?;

    let record = state.analytics.record_sample(
        payload.active_users,
        payload.new_signups,
        payload.sales,
        payload.revenue,
    )?;

    Ok((StatusCode::CREATED, Json(record)))
}
