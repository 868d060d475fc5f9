//! # riverstone-engine: No-Limit Hold'em core
//!
//! A deterministic Texas Hold'em engine for a single table of 2 to 10 seats.
//! It advances hands through the betting streets, keeps exact chip accounting
//! including multi-way all-in side pots, and ranks hands exhaustively. Every
//! source of randomness is a seeded ChaCha RNG, so hands, shuffles and Monte
//! Carlo samples are reproducible.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text parsing
//! - [`deck`] - Seeded deck with dealing cursor and simulation decks
//! - [`hand`] - Five-card evaluation and best-of-seven selection
//! - [`equity`] - Monte Carlo and range-restricted equity estimation
//! - [`analysis`] - Cheap heuristics: tiers, draws, board texture, blockers
//! - [`player`] - Per-seat chip ledger
//! - [`pot`] - Side pot calculation and pot splitting
//! - [`rules`] - Valid action computation and decision validation
//! - [`game`] - Phases, table configuration and public snapshots
//! - [`engine`] - The [`engine::Table`] hand state machine
//! - [`decision`] - The decision provider contract and turn tickets
//! - [`remote`] - Channel-driven turns with timeouts
//! - [`events`] - Lifecycle events for observers
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use riverstone_engine::cards::parse_cards;
//! use riverstone_engine::hand::{best_hand, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let best = best_hand(&cards).unwrap();
//! assert_eq!(best.evaluation.category, Category::RoyalFlush);
//! ```
//!
//! ## Playing Hands
//!
//! The table asks an injected [`decision::DecisionProvider`] for every action:
//!
//! ```rust
//! use riverstone_engine::decision::Decision;
//! use riverstone_engine::engine::Table;
//! use riverstone_engine::game::{GameStateSnapshot, TableConfig};
//! use riverstone_engine::player::Player;
//! use riverstone_engine::rules::ValidActions;
//!
//! let mut table = Table::new(TableConfig::default()).unwrap();
//! let mut cautious = |_: &Player, _: &GameStateSnapshot, v: &ValidActions| {
//!     if v.can_check { Decision::check() } else { Decision::fold() }
//! };
//! let summary = table.play_game(&mut cautious, 20).unwrap();
//! assert_eq!(summary.chips.iter().sum::<u32>(), 6_000);
//! ```
//!
//! Callers that cannot block inside a callback use the step API instead:
//! [`engine::Table::start_hand`] returns a [`decision::TurnTicket`] and
//! [`engine::Table::submit`] resumes the hand with the answer.

pub mod analysis;
pub mod cards;
pub mod decision;
pub mod deck;
pub mod engine;
pub mod equity;
pub mod errors;
pub mod events;
pub mod game;
pub mod hand;
pub mod player;
pub mod pot;
pub mod remote;
pub mod rules;
