//! # Riverstone CLI Library
//!
//! Command-line driver for the Riverstone Hold'em engine. It is a thin layer:
//! argument parsing, layered configuration and output formatting, with all
//! game logic in `riverstone-engine` and all strategy in `riverstone-ai`.
//!
//! ## Example Usage
//!
//! ```
//! use std::io;
//! let args = vec!["riverstone", "eval", "Ah Kh Qh Jh Th"];
//! let mut out = Vec::new();
//! let code = riverstone_cli::run(args, &mut out, &mut io::stderr());
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Royal Flush"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Play AI-only games and report final stacks
//! - `eval`: Rank the best five-card hand out of 5 to 7 cards
//! - `equity`: Monte Carlo equity of a hand against random or ranged opponents
//! - `cfg`: Display the resolved configuration and its sources

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{Commands, RiverstoneCli};
use commands::{
    EquityOptions, SimOptions, handle_cfg_command, handle_equity_command, handle_eval_command,
    handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["sim", "eval", "equity", "cfg"];

/// Main entry point for the CLI application.
///
/// Parses `args` (program name first) and runs the subcommand, writing
/// results to `out` and diagnostics to `err`.
///
/// # Returns
///
/// [`exit_code::SUCCESS`] on success (including `--help`), otherwise
/// [`exit_code::ERROR`].
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match RiverstoneCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let name = cli.cmd.name();
    let result = match cli.cmd {
        Commands::Sim {
            hands,
            seats,
            stack,
            seed,
            ai,
            json,
        } => handle_sim_command(
            &SimOptions {
                hands,
                seats,
                stack,
                seed,
                ai,
                json,
            },
            out,
        ),
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Equity {
            hole,
            board,
            opponents,
            sims,
            seed,
            max_tier,
        } => handle_equity_command(
            &EquityOptions {
                hole,
                board,
                opponents,
                sims,
                seed: seed.unwrap_or_else(rand::random),
                max_tier,
            },
            out,
            err,
        ),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(command = name, error = %e, "command failed");
            // a closed stderr leaves nothing else to report to
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let _ = write_usage(&e, err);
    exit_code::ERROR
}

fn write_usage(e: &clap::Error, err: &mut dyn Write) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err)?;
    writeln!(err, "Riverstone Hold'em CLI")?;
    writeln!(err, "Usage: riverstone <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: riverstone --help")
}
