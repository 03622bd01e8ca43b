use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type ConnectionId = String;
pub type Color = String;

/// Palette used when `BUZZER_PALETTE` is not set
pub const DEFAULT_PALETTE: &[&str] = &[
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#42d4f4", "#f032e6",
    "#bfef45", "#fabed4", "#469990", "#9a6324",
];

/// A registered participant, owned by the participant registry
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub connection: ConnectionId,
    pub name: String,
    pub score: i64,
    pub color: Color,
    /// Latest value of the live answer field
    pub text: String,
}

impl Participant {
    pub fn view(&self) -> PlayerView {
        PlayerView {
            name: self.name.clone(),
            score: self.score,
            color: self.color.clone(),
        }
    }
}

/// One entry of the `update-players` snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerView {
    pub name: String,
    pub score: i64,
    pub color: Color,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum BuzzerState {
    #[default]
    Unlocked,
    Locked {
        winner: String,
    },
}

impl BuzzerState {
    pub fn winner(&self) -> Option<&str> {
        match self {
            BuzzerState::Unlocked => None,
            BuzzerState::Locked { winner } => Some(winner),
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, BuzzerState::Locked { .. })
    }
}
