//! Board and card formatters for terminal display.
//!
//! Hidden cards show their id so the player can pick them; face-up cards show
//! a short label derived from the symbol key. Matched cards get a check mark,
//! or `*` where the terminal cannot render it.
//!
//! ## Example
//!
//! ```rust
//! use gamemory_cli::formatters::symbol_label;
//! use gamemory_engine::cards::SymbolKey;
//!
//! assert_eq!(symbol_label(&SymbolKey::from("images/card3.jpg")), "card3");
//! assert_eq!(symbol_label(&SymbolKey::from("pair-04")), "pair-04");
//! ```

use gamemory_engine::cards::{CardState, SymbolKey};
use gamemory_engine::engine::CardView;

/// Check if the terminal supports Unicode marks by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

fn matched_mark() -> &'static str {
    if supports_unicode() { "✓" } else { "*" }
}

/// Short display name for a symbol: the file stem for image paths, the key
/// itself otherwise.
pub fn symbol_label(symbol: &SymbolKey) -> String {
    let key = symbol.as_str();
    let name = key.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(key);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => name.to_string(),
    }
}

/// One cell of the text board.
pub fn format_card(view: &CardView) -> String {
    match (view.state, &view.symbol) {
        (CardState::Hidden, _) | (_, None) => format!("[{:>2}]", view.id.0),
        (CardState::Revealed, Some(symbol)) => symbol_label(symbol),
        (CardState::Matched, Some(symbol)) => {
            format!("{}{}", symbol_label(symbol), matched_mark())
        }
    }
}

/// Renders the board row by row with cells padded to a common width.
pub fn format_board(views: &[CardView], cols: usize) -> String {
    if views.is_empty() || cols == 0 {
        return String::new();
    }
    let cells: Vec<String> = views.iter().map(format_card).collect();
    let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    cells
        .chunks(cols)
        .map(|row| {
            row.iter()
                .map(|c| format!("{:<width$}", c, width = width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
