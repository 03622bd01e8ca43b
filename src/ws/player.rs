//! Player message handlers
//!
//! Registration, buzzing and the live answer field. All of them resolve the
//! player through the sending connection.

use crate::protocol::ServerMessage;
use crate::state::AppState;
use std::sync::Arc;

pub async fn handle_register_player(
    state: &Arc<AppState>,
    connection_id: &str,
    name: String,
) -> Vec<ServerMessage> {
    tracing::info!("Player registration from {}: {}", connection_id, name);
    state
        .apply(|s| s.register_player(connection_id, &name))
        .await
}

pub async fn handle_buzzer_pressed(
    state: &Arc<AppState>,
    connection_id: &str,
) -> Vec<ServerMessage> {
    tracing::debug!("Buzzer pressed by {}", connection_id);
    state.apply(|s| s.press_buzzer(connection_id)).await
}

pub async fn handle_player_typing(
    state: &Arc<AppState>,
    connection_id: &str,
    text: String,
) -> Vec<ServerMessage> {
    state.apply(|s| s.player_typing(connection_id, text)).await
}
