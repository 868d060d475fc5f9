//! Hand evaluation command.

use crate::error::CliError;
use riverstone_engine::cards::{ensure_distinct, parse_cards};
use riverstone_engine::hand::best_hand;
use std::io::Write;

/// Handle the eval command: print the best five-card hand out of the input.
///
/// Card tokens may be passed separately or in one quoted argument, separated
/// by spaces or commas.
pub fn handle_eval_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(&cards.join(" "))?;
    ensure_distinct(&cards)?;
    let best = best_hand(&cards)?;

    let shown: Vec<String> = best.cards.iter().map(ToString::to_string).collect();
    writeln!(out, "Best hand: {}", best.evaluation.category.name())?;
    writeln!(out, "Cards: {}", shown.join(" "))?;
    writeln!(out, "Score: {}", best.evaluation.score)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(args: &[&str]) -> Result<String, CliError> {
        let owned: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        handle_eval_command(&owned, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn reports_category_and_cards() {
        let text = eval(&["Ks Kh Kd Kc 2h"]).unwrap();
        assert!(text.starts_with("Best hand: Four of a Kind\n"));
        assert!(text.contains("Cards: "));
    }

    #[test]
    fn picks_from_seven_cards() {
        let text = eval(&["2c", "3d", "Ah", "Kh", "Qh", "Jh", "Th"]).unwrap();
        assert!(text.contains("Royal Flush"));
        assert!(!text.contains("2c"));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(eval(&["As Kd Qh"]), Err(CliError::InvalidInput(_))));
        assert!(matches!(eval(&["As As Kd Qh Jc"]), Err(CliError::InvalidInput(_))));
        assert!(matches!(eval(&["As Xx Kd Qh Jc"]), Err(CliError::InvalidInput(_))));
    }
}
