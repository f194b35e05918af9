//! A keyboard-driven calculator.
//!
//! The [`calculator`] module holds the state machine. [`input`] maps key
//! presses to its commands, and [`repl`] is the terminal front-end.

pub mod calculator;
pub mod config;
pub mod input;
pub mod repl;

pub use calculator::{Calculator, Command, Display};
pub use config::Config;
