use std::sync::Arc;

use crate::services::DutyService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once by the composition root in `main.rs` (or by test setup) and
/// cheaply cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// Duty business logic over whichever store was wired in.
    pub duties: Arc<dyn DutyService>,
}
