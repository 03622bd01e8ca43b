use super::colors::ColorAllocator;
use crate::error::RegistryError;
use crate::types::*;

/// Live participants in registration order.
///
/// Scoring lookups key off display name, which is not unique. `find_by_name`
/// always resolves to the earliest registration with that name.
#[derive(Debug, Default)]
pub struct ParticipantRegistry {
    participants: Vec<Participant>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `connection` under `name`, assigning it a color from `colors`.
    ///
    /// The name is stored exactly as sent; only a blank name is rejected.
    /// A connection that is already registered is overwritten in place: it keeps
    /// its position and color, takes the new name, and starts over at score 0
    /// with empty live text.
    pub fn register(
        &mut self,
        connection: &str,
        name: &str,
        colors: &mut ColorAllocator,
    ) -> Result<Participant, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        if let Some(existing) = self.get_mut(connection) {
            existing.name = name.to_string();
            existing.score = 0;
            existing.text.clear();
            return Ok(existing.clone());
        }

        let color = colors
            .allocate()
            .map_err(|_| RegistryError::PaletteExhausted(name.to_string()))?;

        let participant = Participant {
            connection: connection.to_string(),
            name: name.to_string(),
            score: 0,
            color,
            text: String::new(),
        };
        self.participants.push(participant.clone());
        Ok(participant)
    }

    pub fn get(&self, connection: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.connection == connection)
    }

    pub fn get_mut(&mut self, connection: &str) -> Option<&mut Participant> {
        self.participants
            .iter_mut()
            .find(|p| p.connection == connection)
    }

    /// First participant in registration order carrying `name`
    pub fn find_by_name(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.name == name)
    }

    /// Remove the record for `connection`; the caller owns releasing its color
    pub fn remove(&mut self, connection: &str) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| p.connection == connection)?;
        Some(self.participants.remove(index))
    }

    pub fn all(&self) -> &[Participant] {
        &self.participants
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Participant> {
        self.participants.iter_mut()
    }

    /// Full ordered snapshot for `update-players`
    pub fn snapshot(&self) -> Vec<PlayerView> {
        self.participants.iter().map(Participant::view).collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
