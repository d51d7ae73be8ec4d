//! Demo data seeding
//! Mission: Bootstrap a credentialed admin plus sample dashboard data

use crate::{
    analytics::AnalyticsRecord,
    api::{ApiError, AppState},
    auth::models::{UserRole, UserStatus},
};
use anyhow::Context;
use axum::{extract::State, Json};
use chrono::{TimeZone, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

const ADMIN_EMAIL: &str = "admin@example.com";

#[derive(Serialize)]
pub struct SeedResponse {
    pub message: String,
}

/// Seed endpoint - GET/POST /api/seed
///
/// Idempotent: detects the seeded admin account and reports without writing.
pub async fn seed_database(State(state): State<AppState>) -> Result<Json<SeedResponse>, ApiError> {
    if state.users.get_user_by_email(ADMIN_EMAIL)?.is_some() {
        return Ok(Json(SeedResponse {
            message: "Database already seeded! Use admin@example.com / admin123 to login."
                .to_string(),
        }));
    }

    state.users.create_user(
        "Admin User",
        ADMIN_EMAIL,
        "admin123",
        UserRole::Admin,
        UserStatus::Active,
    )?;

    for i in 1..=10 {
        let status = if i % 3 == 0 {
            UserStatus::Inactive
        } else {
            UserStatus::Active
        };
        state.users.create_user(
            &format!("User {}", i),
            &format!("user{}@example.com", i),
            "user123",
            UserRole::User,
            status,
        )?;
    }

    let mut rng = rand::thread_rng();
    for month in 1..=6 {
        let date = Utc
            .with_ymd_and_hms(2024, month, 1, 0, 0, 0)
            .single()
            .context("Invalid seed date")?;

        let record = AnalyticsRecord {
            id: Uuid::new_v4(),
            date,
            active_users: rng.gen_range(200..400),
            new_signups: rng.gen_range(50..150),
            sales: rng.gen_range(3000..6000),
            revenue: rng.gen_range(30_000.0..60_000.0),
        };
        state.analytics.insert_record(&record)?;
    }

    info!("🌱 Database seeded: admin + 10 users + 6 analytics snapshots");

    Ok(Json(SeedResponse {
        message: "Database seeded successfully! Login with admin@example.com / admin123"
            .to_string(),
    }))
}
