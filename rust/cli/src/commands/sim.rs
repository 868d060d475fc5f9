//! Simulation command: AI-only games at a single table.
//!
//! Every seat is driven by an AI from `riverstone-ai`. Types from `--ai` (or
//! the configured `ai`) are dealt out to seats round-robin, so
//! `--ai baseline,equity` alternates the two around the table. Each seat's
//! AI is seeded from the base seed and its seat index, so a seed reproduces
//! the whole game.

use crate::config::{self, Config};
use crate::error::CliError;
use riverstone_ai::create_ai;
use riverstone_engine::decision::{DecisionProvider, SeatProviders};
use riverstone_engine::engine::Table;
use serde::Serialize;
use std::io::Write;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct SimOptions {
    pub hands: u64,
    pub seats: Option<usize>,
    pub stack: Option<u32>,
    pub seed: Option<u64>,
    pub ai: Option<String>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SeatReport {
    seat: usize,
    name: String,
    ai: String,
    chips: u32,
}

#[derive(Debug, Serialize)]
struct SimReport {
    hands_played: u64,
    seed: u64,
    winner: Option<usize>,
    seats: Vec<SeatReport>,
}

/// Handle the sim command.
///
/// Configuration comes from [`config::load_with_sources`]; any flag in
/// `opts` overrides the resolved value.
pub fn handle_sim_command(opts: &SimOptions, out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    run_sim(resolved.config, opts, out)
}

fn run_sim(mut cfg: Config, opts: &SimOptions, out: &mut dyn Write) -> Result<(), CliError> {
    if opts.hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    if let Some(seats) = opts.seats {
        cfg.seats = seats;
    }
    if let Some(stack) = opts.stack {
        cfg.starting_stack = stack;
    }
    if let Some(ai) = &opts.ai {
        cfg.ai = ai.clone();
    }
    if opts.seed.is_some() {
        cfg.seed = opts.seed;
    }
    config::validate(&cfg)?;

    let seed = cfg.seed.unwrap_or_else(rand::random);
    let types = cfg.ai_types();
    let mut table = Table::new(cfg.table_config(seed))?;

    let mut providers = SeatProviders::new();
    let mut seat_types = Vec::with_capacity(cfg.seats);
    for seat in 0..cfg.seats {
        let ai_type = &types[seat % types.len()];
        let ai = create_ai(ai_type, seed.wrapping_add(seat as u64 + 1))?;
        seat_types.push(ai.name().to_string());
        let provider: Box<dyn DecisionProvider> = ai;
        providers = providers.seat(seat, provider);
    }

    info!(seed, seats = cfg.seats, hands = opts.hands, ai = %cfg.ai, "simulation started");
    let summary = table.play_game(&mut providers, opts.hands)?;
    info!(
        hands = summary.hands_played,
        winner = ?summary.winner,
        "simulation finished"
    );

    let report = SimReport {
        hands_played: summary.hands_played,
        seed,
        winner: summary.winner,
        seats: table
            .players()
            .iter()
            .zip(seat_types)
            .map(|(p, ai)| SeatReport {
                seat: p.id,
                name: p.name.clone(),
                ai,
                chips: p.chips(),
            })
            .collect(),
    };

    if opts.json {
        let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
        writeln!(out, "{}", json)?;
        return Ok(());
    }

    writeln!(out, "Simulated: {} hands (seed {})", report.hands_played, seed)?;
    match report.winner.and_then(|w| report.seats.get(w)) {
        Some(w) => writeln!(out, "Winner: {} ({})", w.name, w.ai)?,
        None => writeln!(out, "No winner after {} hands", report.hands_played)?,
    }
    for s in &report.seats {
        writeln!(out, "  {:<8} {:<11} {:>7} chips", s.name, s.ai, s.chips)?;
    }
    Ok(())
}
