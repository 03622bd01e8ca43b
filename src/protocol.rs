use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "t", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Join the moderator group and get the current state replayed
    RegisterModerator,
    RegisterPlayer {
        name: String,
    },
    /// Sender identity decides who buzzed
    BuzzerPressed,
    /// Any JSON number; fractional points are rounded when credited
    ModeratorCorrect {
        points: f64,
    },
    /// Wrong answer: everybody except the winner gets a point
    ModeratorReleaseBuzzer,
    ResetBuzzer,
    AddPointToPlayer {
        name: String,
    },
    SubtractPointFromPlayer {
        name: String,
    },
    PlayerTyping {
        text: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "t", rename_all = "kebab-case")]
pub enum ServerMessage {
    Welcome {
        connection_id: ConnectionId,
        server_now: String,
    },
    BuzzerLocked {
        winner: String,
    },
    BuzzerUnlocked,
    /// Moderator-only notice of who to credit
    BuzzerWinner {
        winner: String,
    },
    UpdatePlayers {
        players: Vec<PlayerView>,
    },
    UpdateText {
        name: String,
        text: String,
    },
    PlayCorrectSound,
    PlayWrongSound,
}
