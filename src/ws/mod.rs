pub mod handlers;
pub mod moderator;
pub mod player;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Serialize and send one message. Returns false once the socket is gone.
async fn send_message(sender: &mut SplitSink<WebSocket, Message>, msg: &ServerMessage) -> bool {
    match serde_json::to_string(msg) {
        Ok(json) => sender.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            tracing::error!("Failed to serialize {:?}: {}", msg, e);
            true
        }
    }
}

/// Receive from an optional subscription; waits forever when there is none
async fn recv_optional(
    rx: &mut Option<broadcast::Receiver<ServerMessage>>,
) -> Result<ServerMessage, RecvError> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let connection_id = ulid::Ulid::new().to_string();

    tracing::info!("WebSocket connected: {}", connection_id);

    // Subscribe before anything can be missed
    let mut broadcast_rx = state.broadcast.subscribe();
    let mut moderator_rx: Option<broadcast::Receiver<ServerMessage>> = None;

    let welcome = ServerMessage::Welcome {
        connection_id: connection_id.clone(),
        server_now: chrono::Utc::now().to_rfc3339(),
    };
    if !send_message(&mut sender, &welcome).await {
        tracing::error!("Failed to send welcome message");
        state.apply(|s| s.disconnect(&connection_id)).await;
        return;
    }

    let mut pending = state.apply(|s| s.connect(&connection_id)).await;

    'conn: loop {
        for msg in pending.drain(..) {
            if !send_message(&mut sender, &msg).await {
                tracing::error!("Failed to send response");
                break 'conn;
            }
        }

        tokio::select! {
            // Handle general broadcasts (all clients)
            broadcast_msg = broadcast_rx.recv() => {
                match broadcast_msg {
                    Ok(msg) => pending.push(msg),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "{} lagged behind, skipped {} messages",
                            connection_id,
                            skipped
                        );
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            // Handle moderator broadcasts once this connection joined the group
            moderator_msg = recv_optional(&mut moderator_rx) => {
                match moderator_msg {
                    Ok(msg) => pending.push(msg),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "Moderator {} lagged behind, skipped {} messages",
                            connection_id,
                            skipped
                        );
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            // Handle client messages
            ws_msg = receiver.next() => {
                match ws_msg {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!("Received message from {}: {}", connection_id, text);

                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(client_msg) => {
                                // Join the moderator channel before the replay is produced
                                if matches!(client_msg, ClientMessage::RegisterModerator)
                                    && moderator_rx.is_none()
                                {
                                    moderator_rx = Some(state.moderator_broadcast.subscribe());
                                }
                                pending =
                                    handlers::handle_message(client_msg, &connection_id, &state)
                                        .await;
                            }
                            Err(e) => {
                                // No error frame: clients rely on invalid input being silently dropped
                                tracing::warn!("Failed to parse client message: {}", e);
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("WebSocket closed");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    state.apply(|s| s.disconnect(&connection_id)).await;
    tracing::info!("WebSocket connection closed: {}", connection_id);
}
