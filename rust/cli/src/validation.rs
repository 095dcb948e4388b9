//! Input parsing for the interactive play loop.
//!
//! Turns a line typed by the user into a [`ParseResult`]: a table command,
//! a request to quit, or an error message to show before prompting again.

/// Commands accepted at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Hit,
    Stand,
    /// Abandon the match and go back to the menu
    Menu,
    /// Start a new match with the same name
    Restart,
}

#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid command parsed from input
    Command(PlayerCommand),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input into a table command (case-insensitive).
///
/// - "h" or "hit" → Hit
/// - "s" or "stand" → Stand
/// - "m" or "menu" → Menu
/// - "r" or "restart" → Restart
/// - "q" or "quit" → Quit
///
/// # Example
///
/// ```rust
/// # use blackjack_cli::validation::{parse_player_command, ParseResult, PlayerCommand};
/// assert_eq!(parse_player_command("HIT"), ParseResult::Command(PlayerCommand::Hit));
/// assert_eq!(parse_player_command("q"), ParseResult::Quit);
///
/// match parse_player_command("split") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_player_command(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "" => ParseResult::Invalid("Empty input".to_string()),
        "h" | "hit" => ParseResult::Command(PlayerCommand::Hit),
        "s" | "stand" => ParseResult::Command(PlayerCommand::Stand),
        "m" | "menu" => ParseResult::Command(PlayerCommand::Menu),
        "r" | "restart" => ParseResult::Command(PlayerCommand::Restart),
        "q" | "quit" => ParseResult::Quit,
        other => ParseResult::Invalid(format!(
            "Unrecognized command: {}. Use hit, stand, menu, restart or quit",
            other
        )),
    }
}

/// Validates a player name entered at the menu prompt.
///
/// Surrounding double quotes are dropped, so `"q"` names a player `q`
/// instead of quitting.
pub fn validate_name(input: &str) -> Result<String, String> {
    let name = input.trim();
    let name = name
        .strip_prefix('"')
        .and_then(|n| n.strip_suffix('"'))
        .unwrap_or(name)
        .trim();
    if name.is_empty() {
        Err("Player name cannot be empty".to_string())
    } else {
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_forms() {
        for (input, cmd) in [
            ("h", PlayerCommand::Hit),
            ("hit", PlayerCommand::Hit),
            ("s", PlayerCommand::Stand),
            ("Stand", PlayerCommand::Stand),
            ("m", PlayerCommand::Menu),
            ("menu", PlayerCommand::Menu),
            ("r", PlayerCommand::Restart),
            (" restart ", PlayerCommand::Restart),
        ] {
            assert_eq!(parse_player_command(input), ParseResult::Command(cmd), "{input}");
        }
        assert_eq!(parse_player_command("QUIT"), ParseResult::Quit);
    }

    #[test]
    fn empty_input_is_invalid() {
        assert_eq!(
            parse_player_command("   "),
            ParseResult::Invalid("Empty input".to_string())
        );
    }

    #[test]
    fn unknown_command_is_invalid() {
        assert!(matches!(
            parse_player_command("double"),
            ParseResult::Invalid(msg) if msg.contains("double")
        ));
    }

    #[test]
    fn names_are_trimmed_and_required() {
        assert_eq!(validate_name("  Ada "), Ok("Ada".to_string()));
        assert!(validate_name("  ").is_err());
        assert_eq!(validate_name("\"Q\""), Ok("Q".to_string()));
        assert!(validate_name("\" \"").is_err());
    }
}
