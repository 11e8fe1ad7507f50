/// Health endpoints: a fast liveness probe with a database ping, and a
/// system metrics snapshot.
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;
use sqlx::PgPool;
use std::time::Instant;

use crate::response;

static STARTED: Lazy<Instant> = Lazy::new(Instant::now);

/// Pin the process start time; called once during startup.
pub fn init_uptime() {
    Lazy::force(&STARTED);
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub database: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStats {
    pub size: u32,
    pub idle: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    pub uptime_secs: u64,
    pub db_pool: PoolStats,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/v1/healthcheck
pub async fn health_check(pool: web::Data<PgPool>) -> HttpResponse {
    let database = match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::warn!("Health check database ping failed: {}", e);
            "unhealthy"
        }
    };

    let status = if database == "healthy" { "ok" } else { "degraded" };

    response::ok(
        HealthData {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs: STARTED.elapsed().as_secs(),
            database: database.to_string(),
        },
        "Health check is successful",
    )
}

/// GET /api/v1/healthcheck/system
pub async fn system_metrics(pool: web::Data<PgPool>) -> HttpResponse {
    response::ok(
        SystemMetrics {
            uptime_secs: STARTED.elapsed().as_secs(),
            db_pool: PoolStats {
                size: pool.size(),
                idle: pool.num_idle(),
            },
            timestamp: Utc::now(),
        },
        "System metrics retrieved successfully",
    )
}
