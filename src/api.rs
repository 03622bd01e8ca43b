//! HTTP API endpoints.
//!
//! Read-only view of the session for operators and dashboards.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::state::{AppState, SessionSnapshot};

/// Current buzzer state, roster and moderator count.
///
/// GET /api/state
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.snapshot().await)
}
