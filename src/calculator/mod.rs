//! Calculator core.
//!
//! This module provides:
//! - Text-encoded operands and the binary/unary operations on them
//! - The calculator state machine driven by discrete commands
//! - Display formatting with thousands separators
//! - Copying results to the clipboard

mod clipboard;
mod display;
mod error;
mod format;
mod operand;
mod operation;
mod state;

pub use clipboard::copy_to_clipboard;
pub use display::{Display, ERROR_SENTINEL};
pub use error::{CalcError, CalcResult};
pub use format::{format_operand, number_to_text};
pub use operand::Operand;
pub use operation::{BinaryOp, FACTORIAL_LIMIT, UnaryOp};
pub use state::{Calculator, Command, DEFAULT_ERROR_TIMEOUT, DEFAULT_SEPARATOR};
