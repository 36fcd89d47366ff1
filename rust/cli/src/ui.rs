//! UI helper functions for terminal output formatting.

use gamemory_engine::cards::CardId;
use gamemory_engine::session::IgnoreReason;
use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Player-facing explanation for a flip the engine ignored.
pub fn describe_ignored(card: CardId, reason: IgnoreReason) -> String {
    match reason {
        IgnoreReason::Locked => "Wait for the current pair to be resolved".to_string(),
        IgnoreReason::InvalidCard => format!("There is no card {}", card),
        IgnoreReason::NotHidden => format!("Card {} is already face up", card),
        IgnoreReason::Completed => "All pairs are found; enter r for a new game".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_is_prefixed() {
        let mut err = Vec::new();
        display_warning(&mut err, "careful").unwrap();
        assert_eq!(String::from_utf8(err).unwrap(), "WARNING: careful\n");
    }

    #[test]
    fn ignored_flips_name_the_card() {
        let msg = describe_ignored(CardId(7), IgnoreReason::NotHidden);
        assert_eq!(msg, "Card 7 is already face up");
        assert!(describe_ignored(CardId(99), IgnoreReason::InvalidCard).contains("99"));
    }
}
