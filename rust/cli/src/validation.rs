//! Input parsing and validation for interactive commands.
//!
//! Play input is parsed into a [`ParseResult`]; values passed on the command
//! line are checked by the `parse_*` value parsers used in [`crate::cli`].

use gamemory_engine::cards::CardId;
use gamemory_engine::config::MAX_GRID_DIMENSION;

/// Result of parsing one line typed during `play`.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Flip the card with this id
    Flip(CardId),
    /// Deal a new board with the same settings
    Reset,
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input into a flip or a session command.
///
/// Accepts (case-insensitive):
/// - a card id such as `5`
/// - a grid position `row,col` (or `row col`), zero-based
/// - `r` or `reset`
/// - `q` or `quit`
///
/// # Example
///
/// ```rust
/// # use gamemory_cli::validation::{parse_play_input, ParseResult};
/// use gamemory_engine::cards::CardId;
/// use gamemory_engine::config::MAX_GRID_DIMENSION;
///
/// assert_eq!(parse_play_input("5", 4, 4), ParseResult::Flip(CardId(5)));
/// assert_eq!(parse_play_input("1,2", 4, 4), ParseResult::Flip(CardId(6)));
/// assert_eq!(parse_play_input("q", 4, 4), ParseResult::Quit);
///
/// match parse_play_input("9,9", 4, 4) {
///     ParseResult::Invalid(msg) => assert!(msg.contains("outside")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_play_input(input: &str, rows: usize, cols: usize) -> ParseResult {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }

    match input.as_str() {
        "q" | "quit" => return ParseResult::Quit,
        "r" | "reset" => return ParseResult::Reset,
        _ => {}
    }

    let parts: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    match parts.as_slice() {
        [id] => match id.parse::<usize>() {
            Ok(id) if id < rows * cols => ParseResult::Flip(CardId(id)),
            Ok(id) => ParseResult::Invalid(format!(
                "Card {} is outside the {}x{} board (ids 0-{})",
                id,
                rows,
                cols,
                (rows * cols).saturating_sub(1)
            )),
            Err(_) => unrecognized(&input),
        },
        [row, col] => match (row.parse::<usize>(), col.parse::<usize>()) {
            (Ok(r), Ok(c)) if r < rows && c < cols => ParseResult::Flip(CardId(r * cols + c)),
            (Ok(r), Ok(c)) => ParseResult::Invalid(format!(
                "Position {},{} is outside the {}x{} board",
                r, c, rows, cols
            )),
            _ => unrecognized(&input),
        },
        _ => unrecognized(&input),
    }
}

fn unrecognized(input: &str) -> ParseResult {
    ParseResult::Invalid(format!(
        "Unrecognized input '{}'. Enter a card id, row,col, r (new game) or q",
        input
    ))
}

/// Value parser for `sim --memory`: a probability in `0.0..=1.0`.
pub fn parse_memory(s: &str) -> Result<f64, String> {
    let p: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("memory must be between 0 and 1, got {}", p))
    }
}

/// Value parser for `--rows` / `--cols`.
pub fn parse_dimension(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(n) => check_dimension(n),
        Err(_) => Err(format!("'{}' is not a whole number", s)),
    }
}

/// Row/column bound shared by flags, env and the config file.
pub fn check_dimension(n: usize) -> Result<usize, String> {
    match n {
        0 => Err("must be at least 1".to_string()),
        n if n > MAX_GRID_DIMENSION => Err(format!(
            "{} is larger than the supported {}",
            n, MAX_GRID_DIMENSION
        )),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_positions() {
        assert_eq!(parse_play_input("0", 4, 4), ParseResult::Flip(CardId(0)));
        assert_eq!(parse_play_input(" 15 ", 4, 4), ParseResult::Flip(CardId(15)));
        assert_eq!(parse_play_input("3,3", 4, 4), ParseResult::Flip(CardId(15)));
        assert_eq!(parse_play_input("1 0", 2, 3), ParseResult::Flip(CardId(3)));
        assert_eq!(parse_play_input("1, 2", 2, 3), ParseResult::Flip(CardId(5)));
    }

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(parse_play_input("Q", 4, 4), ParseResult::Quit);
        assert_eq!(parse_play_input("quit", 4, 4), ParseResult::Quit);
        assert_eq!(parse_play_input("R", 4, 4), ParseResult::Reset);
        assert_eq!(parse_play_input("reset", 4, 4), ParseResult::Reset);
    }

    #[test]
    fn rejects_out_of_range_input() {
        assert!(matches!(
            parse_play_input("16", 4, 4),
            ParseResult::Invalid(msg) if msg.contains("ids 0-15")
        ));
        assert!(matches!(
            parse_play_input("0,4", 4, 4),
            ParseResult::Invalid(msg) if msg.contains("outside")
        ));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "flip", "1,2,3", "-1", "a,b"] {
            assert!(
                matches!(parse_play_input(bad, 4, 4), ParseResult::Invalid(_)),
                "{:?} should be invalid",
                bad
            );
        }
    }

    #[test]
    fn memory_must_be_a_probability() {
        assert_eq!(parse_memory("0.5"), Ok(0.5));
        assert_eq!(parse_memory("1"), Ok(1.0));
        assert!(parse_memory("1.5").is_err());
        assert!(parse_memory("-0.1").is_err());
        assert!(parse_memory("often").is_err());
    }

    #[test]
    fn dimensions_are_bounded() {
        assert_eq!(parse_dimension("4"), Ok(4));
        assert!(parse_dimension("0").is_err());
        assert!(parse_dimension("65").is_err());
        assert!(parse_dimension("x").is_err());
        assert_eq!(check_dimension(64), Ok(64));
        assert!(check_dimension(usize::MAX).unwrap_err().contains("supported 64"));
    }
}
