use crate::types::BuzzerState;

/// The single shared buzzer lock. First press wins, later presses are dropped.
#[derive(Debug, Default)]
pub struct Buzzer {
    state: BuzzerState,
}

impl Buzzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BuzzerState {
        &self.state
    }

    pub fn winner(&self) -> Option<&str> {
        self.state.winner()
    }

    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    /// Lock for `name`. Returns false (and changes nothing) if already locked.
    pub fn press(&mut self, name: &str) -> bool {
        if self.is_locked() {
            return false;
        }
        self.state = BuzzerState::Locked {
            winner: name.to_string(),
        };
        true
    }

    /// Unlock, handing back the winner that held the lock (if any)
    pub fn release(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            BuzzerState::Locked { winner } => Some(winner),
            BuzzerState::Unlocked => None,
        }
    }
}
