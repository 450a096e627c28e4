pub mod duty;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree apart from the duty resource, which the
/// app router mounts at `BASE_DUTIES_ROUTE`.
///
/// ```text
/// /time                 current server time
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/time", get(handlers::time::current_time))
}
