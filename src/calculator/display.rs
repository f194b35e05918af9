//! What a front-end shows after each command.

use serde::Serialize;

/// Text shown in the error state.
pub const ERROR_SENTINEL: &str = "Error";

/// The two display regions of the calculator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Display {
    /// The current operand, grouped for display, or the error sentinel.
    pub current: String,
    /// The previous operand followed by the pending operator glyph.
    /// Empty when no operation is pending.
    pub previous: String,
    /// Whether the calculator is in the error state.
    pub is_error: bool,
    /// The current operand without separators, for the clipboard.
    /// None while in the error state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clipboard: Option<String>,
}

impl Display {
    /// Get the text to copy to clipboard, if there is a result to copy.
    pub fn text_for_clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }
}

impl std::fmt::Display for Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.previous.is_empty() {
            write!(f, "{}", self.current)
        } else {
            write!(f, "{}\n{}", self.previous, self.current)
        }
    }
}
