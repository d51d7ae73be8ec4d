//! Dashboard Aggregator
//! Mission: Compute derived metrics and chart series from stored records
//!
//! Pure read path. The metric computation issues several independent store
//! reads with no snapshot isolation; concurrent writes may land between them
//! and the result is a best-effort point-in-time approximation.

use crate::{analytics::store::AnalyticsStore, auth::models::UserStatus, auth::UserStore};
use anyhow::Result;
use chrono::{Duration, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Trailing window for the new-signup count
const SIGNUP_WINDOW_DAYS: i64 = 30;

/// How many analytics snapshots feed the sales/revenue totals
const METRICS_RECORD_WINDOW: usize = 30;

/// How many snapshots feed the chart series
const CHART_POINTS: usize = 6;

/// Derived dashboard metrics
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_users: i64,
    pub active_users: i64,
    pub new_signups: i64,
    pub total_sales: i64,
    pub total_revenue: f64,
    pub growth_rate: f64,
}

/// One chart row, chronological order
#[derive(Debug, Serialize)]
pub struct ChartPoint {
    pub date: String, // short month label
    pub sales: i64,
    pub users: i64,
    pub revenue: f64,
}

/// Read-only aggregation over the account and analytics collections
pub struct Aggregator {
    users: Arc<UserStore>,
    analytics: Arc<AnalyticsStore>,
}

impl Aggregator {
    pub fn new(users: Arc<UserStore>, analytics: Arc<AnalyticsStore>) -> Self {
        Self { users, analytics }
    }

    /// Compute the dashboard metrics object
    pub fn compute_metrics(&self) -> Result<DashboardMetrics> {
        let total_users = self.users.count_users()?;
        let active_users = self.users.count_users_with_status(UserStatus::Active)?;

        let window_start = Utc::now() - Duration::days(SIGNUP_WINDOW_DAYS);
        let new_signups = self.users.count_users_joined_since(window_start)?;

        let recent = self.analytics.recent(METRICS_RECORD_WINDOW)?;
        let total_sales: i64 = recent.iter().map(|r| r.sales).sum();
        let total_revenue: f64 = recent.iter().map(|r| r.revenue).sum();

        // Guard the division; an empty store reports zero growth
        let growth_rate = if total_users > 0 {
            round_one_decimal(new_signups as f64 / total_users as f64 * 100.0)
        } else {
            0.0
        };

        Ok(DashboardMetrics {
            total_users,
            active_users,
            new_signups,
            total_sales,
            total_revenue,
            growth_rate,
        })
    }

    /// Compute the chart series: the six most recent snapshots, oldest first
    pub fn compute_chart_series(&self) -> Result<Vec<ChartPoint>> {
        let mut recent = self.analytics.recent(CHART_POINTS)?;
        recent.reverse();

        let points = recent
            .into_iter()
            .map(|r| ChartPoint {
                date: r.date.format("%b").to_string(),
                sales: r.sales,
                users: r.active_users,
                revenue: r.revenue,
            })
            .collect();

        Ok(points)
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
