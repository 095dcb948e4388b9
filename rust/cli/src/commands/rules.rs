use crate::error::CliError;
use std::io::Write;

/// Rules text for a match of `rounds` rounds.
pub fn rules_text(rounds: u32) -> String {
    format!(
        "Simplified Blackjack Rules\n\n\
         - You and Dealer get 2 cards.\n\
         - You can Hit or Stand.\n\
         - If you go over 21: Bust.\n\
         - Dealer hits until reaching 17, then stands.\n\
         - Game ends after {} rounds.\n\n\
         Card values:\n\
         2-10 = face value\n\
         J/Q/K = 10\n\
         A = 1 or 11 (best for total <= 21)",
        rounds
    )
}

pub fn handle_rules_command(rounds: u32, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "{}", rules_text(rounds))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_mention_round_count() {
        let mut out = Vec::new();
        handle_rules_command(10, &mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with("Simplified Blackjack Rules\n\n"));
        assert!(s.contains("- Game ends after 10 rounds.\n"));
        assert!(s.ends_with("A = 1 or 11 (best for total <= 21)\n"));
    }
}
