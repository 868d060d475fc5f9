//! Command handler modules for the Riverstone CLI.
//!
//! Each command lives in its own file and follows the same pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in, so tests capture them
//! - Errors propagated via `CliError`

pub mod cfg;
pub mod equity;
pub mod eval;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use equity::{EquityOptions, handle_equity_command};
pub use eval::handle_eval_command;
pub use sim::{SimOptions, handle_sim_command};
