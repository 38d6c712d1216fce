//! Text rendering of the engine state for a terminal view.

use crate::catalog::ButtonCatalog;
use crate::engine::EngineState;

/// The lines a view shows after each press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayLines {
    /// History line above the main display.
    pub history: String,
    /// Main display: the live expression or the last result.
    pub main: String,
    /// Transient evaluation error, if the last `=` was rejected.
    pub error: Option<String>,
}

impl DisplayLines {
    /// Capture the display lines from an engine snapshot.
    pub fn from_state(state: &EngineState) -> Self {
        Self {
            history: state.history_text(),
            main: state.expression_text(),
            error: state.last_error().map(ToString::to_string),
        }
    }

    /// Render as text, one line per display, error last.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n{}", self.history, self.main);
        if let Some(error) = &self.error {
            out.push_str("\nerror: ");
            out.push_str(error);
        }
        out
    }
}

/// Render the keypad as `glyph  key  name` rows in display order.
pub fn render_keypad(catalog: &ButtonCatalog) -> String {
    let width = catalog
        .iter()
        .map(|b| b.key.chars().count())
        .max()
        .unwrap_or(0);

    catalog
        .iter()
        .map(|b| format!("{:<4} {:<width$}  {}", b.display, b.key, b.name))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InputEngine;

    #[test]
    fn test_lines_after_evaluation() {
        let mut engine = InputEngine::new();
        engine.handle_presses(["1", "2", "+", "3", "="]);
        let lines = DisplayLines::from_state(engine.snapshot());
        assert_eq!(lines.history, "12+3=15");
        assert_eq!(lines.main, "15");
        assert_eq!(lines.error, None);
        assert_eq!(lines.render(), "12+3=15\n15");
    }

    #[test]
    fn test_lines_show_error() {
        let mut engine = InputEngine::new();
        engine.handle_presses(["1", "/", "0", "="]);
        let lines = DisplayLines::from_state(engine.snapshot());
        assert_eq!(lines.main, "1/0");
        assert!(lines.render().contains("\nerror: "));
    }

    #[test]
    fn test_keypad_lists_glyphs() {
        let keypad = render_keypad(&ButtonCatalog::default());
        assert_eq!(keypad.lines().count(), 17);
        assert!(keypad.lines().any(|line| line.starts_with('×') && line.ends_with("multiply")));
    }
}
