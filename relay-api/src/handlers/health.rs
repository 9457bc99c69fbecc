use actix_web::{get, web, HttpResponse, Result};
use chrono::Utc;
use shared_types::{HealthResponse, VersionResponse};
use tracing::error;

use crate::AppState;

/// Liveness plus a database round trip; 503 while storage is unreachable
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    let timestamp = Utc::now().to_rfc3339();

    match state.storage.ping().await {
        Ok(()) => Ok(HttpResponse::Ok().json(HealthResponse {
            status: "ok".to_string(),
            database: "ok".to_string(),
            timestamp,
        })),
        Err(e) => {
            error!(error = %e, "Health check: database ping failed");
            Ok(HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "degraded".to_string(),
                database: "unavailable".to_string(),
                timestamp,
            }))
        }
    }
}

#[get("/version")]
pub async fn version_info() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: "relay-api".to_string(),
    }))
}
