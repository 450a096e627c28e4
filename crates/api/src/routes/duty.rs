//! Route definitions for the `/duties` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::duty;
use crate::state::AppState;

/// Routes mounted at `BASE_DUTIES_ROUTE` (`/api/v1/duties`).
///
/// ```text
/// GET    /        -> list
/// PUT    /        -> create
/// GET    /{id}    -> get_by_id
/// POST   /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(duty::list).put(duty::create))
        .route(
            "/{id}",
            get(duty::get_by_id).post(duty::update).delete(duty::delete),
        )
}
