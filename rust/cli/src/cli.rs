//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "riverstone",
    version,
    about = "Riverstone No-Limit Hold'em tools"
)]
pub struct RiverstoneCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play AI-only games and report the outcome
    Sim {
        /// Maximum number of hands to play
        #[arg(long, default_value_t = 100)]
        hands: u64,
        /// Number of seats (2-10); defaults to the configured value
        #[arg(long)]
        seats: Option<usize>,
        /// Starting stack per seat
        #[arg(long)]
        stack: Option<u32>,
        /// Base RNG seed for the deck and the AIs
        #[arg(long)]
        seed: Option<u64>,
        /// Comma-separated AI types assigned to seats round-robin
        #[arg(long)]
        ai: Option<String>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rank the best five-card hand out of 5 to 7 cards
    Eval {
        /// Cards such as "As Kd Qh Jc Ts 2d 3c"
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Estimate all-in equity by Monte Carlo simulation
    Equity {
        /// Two hole cards, e.g. "As Ah"
        #[arg(long)]
        hole: String,
        /// Zero to five community cards
        #[arg(long, default_value = "")]
        board: String,
        #[arg(long, default_value_t = 1)]
        opponents: usize,
        #[arg(long, default_value_t = 10_000)]
        sims: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Only sample opponent hands at or above this pre-flop tier (1-8)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=8))]
        max_tier: Option<u8>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Sim { .. } => "sim",
            Commands::Eval { .. } => "eval",
            Commands::Equity { .. } => "equity",
            Commands::Cfg => "cfg",
        }
    }
}
