//! Handlers for the `/duties` resource.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use duties_core::duty::{Duty, DutyInput};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::state::AppState;

/// GET /api/v1/duties?offset=&limit=
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<Json<Vec<Duty>>> {
    let Query(params) = params?;
    let (offset, limit) = params.parse()?;
    let duties = state.duties.get_duties(offset, limit).await?;
    Ok(Json(duties))
}

/// GET /api/v1/duties/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Duty>> {
    let duty = state.duties.get_duty(&id).await?;
    Ok(Json(duty))
}

/// PUT /api/v1/duties
///
/// Body: `{"name": "...", "id"?: "..."}`. The id is generated when omitted.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<DutyInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Duty>)> {
    let Json(input) = body?;
    let duty = state.duties.create_duty(input).await?;
    Ok((StatusCode::CREATED, Json(duty)))
}

/// POST /api/v1/duties/{id}
///
/// Body: `{"name": "..."}`. The id always comes from the path.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<DutyInput>, JsonRejection>,
) -> AppResult<Json<Duty>> {
    let Json(input) = body?;
    let duty = state
        .duties
        .update_duty(DutyInput {
            id: Some(id),
            name: input.name,
        })
        .await?;
    Ok(Json(duty))
}

/// DELETE /api/v1/duties/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.duties.delete_duty(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
