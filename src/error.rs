//! Error types
//!
//! None of these ever reach a client. Rejected events are logged and dropped.

use crate::types::Color;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("no colors left in the palette")]
    Exhausted,
    #[error("color {0} is already available")]
    AlreadyAvailable(Color),
    #[error("color {0} is not part of the palette")]
    NotInPalette(Color),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("cannot register {0}: color palette exhausted")]
    PaletteExhausted(String),
    #[error("display name must not be empty")]
    EmptyName,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("BUZZER_PALETTE must contain at least one color")]
    EmptyPalette,
}
