//! Session coordinator
//!
//! Applies every inbound event to the registry, color pool and buzzer, and
//! decides what gets sent to whom. Invalid events are silent no-ops: they are
//! logged here and produce no outbound messages.

use super::buzzer::Buzzer;
use super::colors::ColorAllocator;
use super::registry::ParticipantRegistry;
use crate::protocol::ServerMessage;
use crate::types::*;
use std::collections::HashSet;

/// A notification together with who should receive it
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Every connected client
    All(ServerMessage),
    /// Members of the moderator group
    Moderators(ServerMessage),
    /// Only the connection that triggered the event
    Direct(ServerMessage),
}

/// The one shared buzzer session
#[derive(Debug)]
pub struct Session {
    colors: ColorAllocator,
    registry: ParticipantRegistry,
    buzzer: Buzzer,
    moderators: HashSet<ConnectionId>,
}

impl Session {
    pub fn new(colors: ColorAllocator) -> Self {
        Self {
            colors,
            registry: ParticipantRegistry::new(),
            buzzer: Buzzer::new(),
            moderators: HashSet::new(),
        }
    }

    pub fn buzzer_state(&self) -> &BuzzerState {
        self.buzzer.state()
    }

    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    pub fn colors(&self) -> &ColorAllocator {
        &self.colors
    }

    pub fn is_moderator(&self, connection: &str) -> bool {
        self.moderators.contains(connection)
    }

    pub fn moderator_count(&self) -> usize {
        self.moderators.len()
    }

    fn players_update(&self) -> ServerMessage {
        ServerMessage::UpdatePlayers {
            players: self.registry.snapshot(),
        }
    }

    /// A new connection arrived. Late joiners learn about a held buzzer right away.
    pub fn connect(&self, connection: &str) -> Vec<Outbound> {
        match self.buzzer.winner() {
            Some(winner) => {
                tracing::debug!(
                    "Connection {} joined while {} holds the buzzer",
                    connection,
                    winner
                );
                vec![Outbound::Direct(ServerMessage::BuzzerLocked {
                    winner: winner.to_string(),
                })]
            }
            None => Vec::new(),
        }
    }

    /// Join the moderator group (idempotent) and replay the current state to this connection
    pub fn register_moderator(&mut self, connection: &str) -> Vec<Outbound> {
        if self.moderators.insert(connection.to_string()) {
            tracing::info!("Moderator joined: {}", connection);
        } else {
            tracing::debug!("Moderator {} registered again", connection);
        }

        let mut out = Vec::new();
        if let Some(winner) = self.buzzer.winner() {
            out.push(Outbound::Direct(ServerMessage::BuzzerWinner {
                winner: winner.to_string(),
            }));
        }
        out.push(Outbound::Direct(self.players_update()));
        out
    }

    pub fn register_player(&mut self, connection: &str, name: &str) -> Vec<Outbound> {
        match self.registry.register(connection, name, &mut self.colors) {
            Ok(participant) => {
                tracing::info!(
                    "Player registered: {} ({}) on {}",
                    participant.name,
                    participant.color,
                    connection
                );
                vec![Outbound::All(self.players_update())]
            }
            Err(e) => {
                tracing::info!("Ignoring registration from {}: {}", connection, e);
                Vec::new()
            }
        }
    }

    pub fn press_buzzer(&mut self, connection: &str) -> Vec<Outbound> {
        let Some(participant) = self.registry.get(connection) else {
            tracing::debug!("Ignoring buzzer press from unregistered {}", connection);
            return Vec::new();
        };
        let name = participant.name.clone();

        if !self.buzzer.press(&name) {
            tracing::debug!("Ignoring buzzer press from {}: already locked", name);
            return Vec::new();
        }

        tracing::info!("{} buzzed first", name);
        vec![
            Outbound::All(ServerMessage::BuzzerLocked {
                winner: name.clone(),
            }),
            Outbound::Moderators(ServerMessage::BuzzerWinner { winner: name }),
        ]
    }

    /// Credit the winner with `points` and unlock
    pub fn resolve_correct(&mut self, points: i64) -> Vec<Outbound> {
        let mut out = Vec::new();

        if let Some(winner) = self.buzzer.release() {
            match self.registry.find_by_name_mut(&winner) {
                Some(participant) => {
                    participant.score = participant.score.saturating_add(points);
                    tracing::info!(
                        "Correct answer: {} +{} (now {})",
                        winner,
                        points,
                        participant.score
                    );
                    out.push(Outbound::All(self.players_update()));
                }
                None => tracing::info!("Correct answer, but winner {} is gone", winner),
            }
        } else {
            tracing::debug!("Correct answer with nobody holding the buzzer");
        }

        out.push(Outbound::All(ServerMessage::PlayCorrectSound));
        out.push(Outbound::All(ServerMessage::BuzzerUnlocked));
        out
    }

    /// Wrong answer: every participant not named like the winner gets a point, then unlock
    pub fn resolve_wrong(&mut self) -> Vec<Outbound> {
        let mut out = Vec::new();

        if let Some(winner) = self.buzzer.release() {
            let mut credited = 0;
            for participant in self.registry.iter_mut().filter(|p| p.name != winner) {
                participant.score = participant.score.saturating_add(1);
                credited += 1;
            }
            tracing::info!(
                "Wrong answer from {}: {} other players get a point",
                winner,
                credited
            );
            out.push(Outbound::All(self.players_update()));
        } else {
            tracing::debug!("Buzzer released with nobody holding it");
        }

        out.push(Outbound::All(ServerMessage::PlayWrongSound));
        out.push(Outbound::All(ServerMessage::BuzzerUnlocked));
        out
    }

    /// Unlock without touching any score
    pub fn reset_buzzer(&mut self) -> Vec<Outbound> {
        if let Some(winner) = self.buzzer.release() {
            tracing::info!("Buzzer reset, discarding {}", winner);
        }
        vec![Outbound::All(ServerMessage::BuzzerUnlocked)]
    }

    pub fn add_point(&mut self, name: &str) -> Vec<Outbound> {
        let Some(participant) = self.registry.find_by_name_mut(name) else {
            tracing::debug!("Ignoring point for unknown player {}", name);
            return Vec::new();
        };
        participant.score = participant.score.saturating_add(1);
        tracing::info!("Point added for {} (now {})", name, participant.score);
        vec![Outbound::All(self.players_update())]
    }

    /// Take one point away; scores never drop below zero
    pub fn subtract_point(&mut self, name: &str) -> Vec<Outbound> {
        let Some(participant) = self.registry.find_by_name_mut(name) else {
            tracing::debug!("Ignoring subtraction for unknown player {}", name);
            return Vec::new();
        };
        if participant.score <= 0 {
            tracing::debug!("Ignoring subtraction for {}: score already 0", name);
            return Vec::new();
        }
        participant.score -= 1;
        tracing::info!("Point removed from {} (now {})", name, participant.score);
        vec![Outbound::All(self.players_update())]
    }

    pub fn player_typing(&mut self, connection: &str, text: String) -> Vec<Outbound> {
        let Some(participant) = self.registry.get_mut(connection) else {
            tracing::debug!("Ignoring typing from unregistered {}", connection);
            return Vec::new();
        };
        participant.text = text;
        vec![Outbound::All(ServerMessage::UpdateText {
            name: participant.name.clone(),
            text: participant.text.clone(),
        })]
    }

    /// Drop everything tied to `connection` and publish the new roster
    pub fn disconnect(&mut self, connection: &str) -> Vec<Outbound> {
        if self.moderators.remove(connection) {
            tracing::info!("Moderator left: {}", connection);
        }

        if let Some(participant) = self.registry.remove(connection) {
            tracing::info!("Player left: {} ({})", participant.name, connection);
            if let Err(e) = self.colors.release(participant.color) {
                tracing::error!("Failed to release color of {}: {}", participant.name, e);
            }
        }

        vec![Outbound::All(self.players_update())]
    }
}
