//! Moderator command handlers
//!
//! Resolving a buzz and adjusting scores. Commands are accepted from any
//! connection; joining the moderator group only controls who receives
//! `buzzer-winner` notices.

use crate::protocol::ServerMessage;
use crate::state::AppState;
use std::sync::Arc;

pub async fn handle_register_moderator(
    state: &Arc<AppState>,
    connection_id: &str,
) -> Vec<ServerMessage> {
    state.apply(|s| s.register_moderator(connection_id)).await
}

/// Scores are whole numbers: round half away from zero, saturating at the i64 range
fn whole_points(points: f64) -> i64 {
    points.round() as i64
}

pub async fn handle_correct(state: &Arc<AppState>, points: f64) -> Vec<ServerMessage> {
    tracing::info!("Moderator marks answer correct: {} points", points);
    let points = whole_points(points);
    state.apply(|s| s.resolve_correct(points)).await
}

pub async fn handle_release_buzzer(state: &Arc<AppState>) -> Vec<ServerMessage> {
    tracing::info!("Moderator releases buzzer");
    state.apply(|s| s.resolve_wrong()).await
}

pub async fn handle_reset_buzzer(state: &Arc<AppState>) -> Vec<ServerMessage> {
    tracing::info!("Moderator resets buzzer");
    state.apply(|s| s.reset_buzzer()).await
}

pub async fn handle_add_point(state: &Arc<AppState>, name: String) -> Vec<ServerMessage> {
    tracing::info!("Adding 1 point for {}", name);
    state.apply(|s| s.add_point(&name)).await
}

pub async fn handle_subtract_point(state: &Arc<AppState>, name: String) -> Vec<ServerMessage> {
    tracing::info!("Subtracting 1 point from {}", name);
    state.apply(|s| s.subtract_point(&name)).await
}
