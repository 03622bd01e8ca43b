pub mod buzzer;
pub mod colors;
pub mod registry;
pub mod session;

use crate::config::ServerConfig;
use crate::protocol::ServerMessage;
use colors::ColorAllocator;
use serde::Serialize;
use session::{Outbound, Session};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use crate::types::*;

/// Shared application state
///
/// The session sits behind one mutex so each inbound event runs to completion
/// before the next one is applied. Broadcasts are sent while the lock is held,
/// which keeps their order identical to the order of events.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    /// Broadcast channel for every connected client
    pub broadcast: broadcast::Sender<ServerMessage>,
    /// Broadcast channel for the moderator group
    pub moderator_broadcast: broadcast::Sender<ServerMessage>,
}

/// Read-only view served by `GET /api/state`
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub buzzer: BuzzerState,
    pub players: Vec<PlayerView>,
    pub moderators: usize,
    pub colors_available: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_palette(DEFAULT_PALETTE.iter().copied(), 100)
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::with_palette(config.palette.iter().cloned(), config.broadcast_capacity)
    }

    pub fn with_palette<I, S>(palette: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Color>,
    {
        let (tx, _rx) = broadcast::channel(capacity);
        let (moderator_tx, _moderator_rx) = broadcast::channel(capacity);
        Self {
            session: Arc::new(Mutex::new(Session::new(ColorAllocator::new(palette)))),
            broadcast: tx,
            moderator_broadcast: moderator_tx,
        }
    }

    /// Send a message to all clients
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        // Ignore send errors (no receivers connected is fine)
        let _ = self.broadcast.send(msg);
    }

    /// Send a message to the moderator group
    pub fn broadcast_to_moderators(&self, msg: ServerMessage) {
        let _ = self.moderator_broadcast.send(msg);
    }

    /// Route broadcasts to their channels and hand back what goes to the sender only
    pub fn dispatch(&self, outbound: Vec<Outbound>) -> Vec<ServerMessage> {
        let mut direct = Vec::new();
        for out in outbound {
            match out {
                Outbound::All(msg) => self.broadcast_to_all(msg),
                Outbound::Moderators(msg) => self.broadcast_to_moderators(msg),
                Outbound::Direct(msg) => direct.push(msg),
            }
        }
        direct
    }

    /// Run `f` against the session and deliver whatever it produced
    pub async fn apply<F>(&self, f: F) -> Vec<ServerMessage>
    where
        F: FnOnce(&mut Session) -> Vec<Outbound>,
    {
        let mut session = self.session.lock().await;
        let outbound = f(&mut *session);
        self.dispatch(outbound)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.lock().await;
        SessionSnapshot {
            buzzer: session.buzzer_state().clone(),
            players: session.registry().snapshot(),
            moderators: session.moderator_count(),
            colors_available: session.colors().available().len(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
