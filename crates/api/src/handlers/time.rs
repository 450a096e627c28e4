//! Handler for `GET /api/v1/time`, a liveness probe for the API prefix.

use axum::Json;
use chrono::Utc;
use duties_core::types::Timestamp;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeResponse {
    pub current_date: Timestamp,
}

/// GET /api/v1/time
pub async fn current_time() -> Json<TimeResponse> {
    Json(TimeResponse {
        current_date: Utc::now(),
    })
}
