//! Analytics Module
//! Mission: Store business-metric snapshots and compute dashboard views

pub mod aggregator;
pub mod store;

pub use aggregator::{Aggregator, ChartPoint, DashboardMetrics};
pub use store::AnalyticsStore;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One time-stamped snapshot of aggregate business metrics
///
/// Immutable after insertion. Non-negativity of the counts is assumed but not
/// enforced by the schema.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRecord {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub active_users: i64,
    pub new_signups: i64,
    pub sales: i64,
    pub revenue: f64,
}
