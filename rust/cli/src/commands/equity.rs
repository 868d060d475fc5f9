//! Monte Carlo equity command.

use crate::error::CliError;
use crate::ui;
use riverstone_engine::cards::{Card, ensure_distinct, parse_cards};
use riverstone_engine::equity::EquityEstimator;
use std::io::Write;
use tracing::info;

#[derive(Debug, Clone)]
pub struct EquityOptions {
    pub hole: String,
    pub board: String,
    pub opponents: usize,
    pub sims: u32,
    pub seed: u64,
    pub max_tier: Option<u8>,
}

/// Handle the equity command.
///
/// With `max_tier` set, opponents are drawn from that pre-flop range; if the
/// range is too narrow to sample, the unrestricted estimate is reported with
/// a warning.
pub fn handle_equity_command(
    opts: &EquityOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let hole = parse_hole(&opts.hole)?;
    let board = parse_cards(&opts.board)?;
    if board.len() > 5 {
        return Err(CliError::InvalidInput(format!(
            "board has {} cards, at most 5 allowed",
            board.len()
        )));
    }
    let mut all = hole.to_vec();
    all.extend_from_slice(&board);
    ensure_distinct(&all)?;
    if opts.opponents == 0 || opts.opponents > 9 {
        return Err(CliError::InvalidInput(format!(
            "opponents must be between 1 and 9, got {}",
            opts.opponents
        )));
    }
    if opts.sims == 0 {
        return Err(CliError::InvalidInput("sims must be >= 1".into()));
    }

    let mut estimator = EquityEstimator::new(opts.seed);
    let result = match opts.max_tier {
        Some(tier) => estimator.estimate_with_ranges(hole, &board, opts.opponents, tier, opts.sims)?,
        None => estimator.estimate(hole, &board, opts.opponents, opts.sims)?,
    };
    info!(
        seed = opts.seed,
        samples = result.samples,
        equity = result.equity,
        "equity estimated"
    );
    if result.fell_back {
        ui::display_warning(
            err,
            "opponent range too narrow to sample; showing unrestricted equity",
        )?;
    }

    writeln!(out, "Equity: {}", ui::percent(result.equity))?;
    writeln!(
        out,
        "Wins: {}  Ties: {}  Losses: {}  Samples: {}",
        result.wins, result.ties, result.losses, result.samples
    )?;
    Ok(())
}

fn parse_hole(raw: &str) -> Result<[Card; 2], CliError> {
    match parse_cards(raw)?.as_slice() {
        &[a, b] => Ok([a, b]),
        other => Err(CliError::InvalidInput(format!(
            "hole needs exactly 2 cards, got {}",
            other.len()
        ))),
    }
}
