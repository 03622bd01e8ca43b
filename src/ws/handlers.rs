//! WebSocket message dispatch
//!
//! Entry point for handling client messages. Each message is dispatched to the
//! player or moderator handler module. The returned messages go to the sending
//! connection only; everything else travels over the broadcast channels.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use std::sync::Arc;

use super::{moderator, player};

/// Handle a client message and return the replies for the sender
pub async fn handle_message(
    msg: ClientMessage,
    connection_id: &str,
    state: &Arc<AppState>,
) -> Vec<ServerMessage> {
    match msg {
        // Player messages
        ClientMessage::RegisterPlayer { name } => {
            player::handle_register_player(state, connection_id, name).await
        }

        ClientMessage::BuzzerPressed => player::handle_buzzer_pressed(state, connection_id).await,

        ClientMessage::PlayerTyping { text } => {
            player::handle_player_typing(state, connection_id, text).await
        }

        // Moderator messages
        ClientMessage::RegisterModerator => {
            moderator::handle_register_moderator(state, connection_id).await
        }

        ClientMessage::ModeratorCorrect { points } => {
            moderator::handle_correct(state, points).await
        }

        ClientMessage::ModeratorReleaseBuzzer => moderator::handle_release_buzzer(state).await,

        ClientMessage::ResetBuzzer => moderator::handle_reset_buzzer(state).await,

        ClientMessage::AddPointToPlayer { name } => {
            moderator::handle_add_point(state, name).await
        }

        ClientMessage::SubtractPointFromPlayer { name } => {
            moderator::handle_subtract_point(state, name).await
        }
    }
}
