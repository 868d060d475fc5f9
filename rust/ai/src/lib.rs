//! # riverstone-ai: reference decision providers
//!
//! Strategies that plug into the engine through
//! [`riverstone_engine::decision::DecisionProvider`]. The engine knows nothing
//! about this crate; callers build an opponent here and hand it to a table.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - A named decision provider
//! - [`baseline`] - Deterministic rule-based play from hand strength and pot odds
//! - [`equity`] - Monte Carlo equity against the live opponents
//! - [`create_ai`] - Factory for opponents by name
//!
//! ## Quick Start
//!
//! ```rust
//! use riverstone_ai::create_ai;
//! use riverstone_engine::engine::Table;
//! use riverstone_engine::game::TableConfig;
//!
//! let mut ai = create_ai("baseline", 42).unwrap();
//! let mut table = Table::new(TableConfig { seats: 4, ..Default::default() }).unwrap();
//! let summary = table.play_hand(ai.as_mut()).unwrap();
//! assert!(!summary.winners.is_empty());
//! ```
//!
//! ## AI Types
//!
//! - `"baseline"` - rule-based, no randomness
//! - `"equity"` - simulation-based, seeded

use riverstone_engine::decision::DecisionProvider;
use thiserror::Error;

pub mod baseline;
pub mod equity;

/// Every name [`create_ai`] accepts.
pub const AI_TYPES: [&str; 2] = ["baseline", "equity"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("Unknown AI type '{0}' (expected one of: baseline, equity)")]
    UnknownType(String),
}

/// A decision provider with a display name.
///
/// Anything implementing this can be passed wherever the engine expects a
/// `&mut dyn DecisionProvider`.
pub trait AIOpponent: DecisionProvider + Send {
    fn name(&self) -> &str;
}

/// Builds an opponent by type name. `seed` drives any randomness the
/// strategy uses, so equal seeds give equal play.
///
/// ```rust
/// use riverstone_ai::create_ai;
///
/// let ai = create_ai("baseline", 0).unwrap();
/// assert_eq!(ai.name(), "BaselineAI");
/// assert!(create_ai("telepath", 0).is_err());
/// ```
pub fn create_ai(ai_type: &str, seed: u64) -> Result<Box<dyn AIOpponent>, AiError> {
    match ai_type.to_ascii_lowercase().as_str() {
        "baseline" => Ok(Box::new(baseline::BaselineAI::new())),
        "equity" => Ok(Box::new(equity::EquityAI::new(seed))),
        other => Err(AiError::UnknownType(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_knows_every_listed_type() {
        for name in AI_TYPES {
            assert!(create_ai(name, 1).is_ok(), "{name}");
        }
        assert_eq!(
            create_ai("EQUITY", 1).map(|a| a.name().to_string()),
            Ok("EquityAI".to_string())
        );
    }

    #[test]
    fn unknown_type_is_an_error() {
        assert_eq!(
            create_ai("oracle", 1).err(),
            Some(AiError::UnknownType("oracle".into()))
        );
    }
}
