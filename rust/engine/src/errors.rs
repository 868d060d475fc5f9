use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Hand evaluation needs {expected} cards, got {actual}")]
    InvalidHandSize { expected: &'static str, actual: usize },
    #[error("Deck exhausted: requested {requested}, remaining {remaining}")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("Invalid cards: {0}")]
    InvalidCards(String),
    #[error("Invalid action from player {player_id}: {reason}")]
    InvalidAction { player_id: usize, reason: String },
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("No decision is pending")]
    NoDecisionPending,
    #[error("Hand already in progress")]
    HandInProgress,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Not enough players with chips to start a hand")]
    NotEnoughPlayers,
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}
