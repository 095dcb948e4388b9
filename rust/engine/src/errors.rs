use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// A draw was attempted on an empty shoe even though every draw batch is
    /// preceded by an availability check.
    #[error("Shoe is empty (invariant violation: draw without reshuffle check)")]
    EmptyShoe,
    #[error("Invalid card: {0}")]
    InvalidCard(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Player name cannot be empty")]
    EmptyName,
}
