//! Keyboard input for the calculator.
//!
//! Maps key presses to calculator commands and splits key scripts such as
//! `12+3<Enter>` into individual keys.

use crate::calculator::{BinaryOp, Command, UnaryOp};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use tracing::debug;

/// Keys that have a name rather than a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamedKey {
    Enter,
    Escape,
    Backspace,
}

impl NamedKey {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "enter" | "return" => Some(Self::Enter),
            "escape" | "esc" => Some(Self::Escape),
            "backspace" | "bs" => Some(Self::Backspace),
            _ => None,
        }
    }
}

/// A single key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Named(NamedKey),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{}", c),
            Self::Named(named) => write!(f, "<{:?}>", named),
        }
    }
}

/// Key bindings as (keys, command) pairs, for help output. The first key
/// listed is bound to the command.
pub const KEY_BINDINGS: &[(&str, Command)] = &[
    ("0-9", Command::Digit(0)),
    (".", Command::Decimal),
    ("+", Command::Operation(BinaryOp::Add)),
    ("-", Command::Operation(BinaryOp::Subtract)),
    ("*", Command::Operation(BinaryOp::Multiply)),
    ("/", Command::Operation(BinaryOp::Divide)),
    ("p", Command::Operation(BinaryOp::Power)),
    ("<Enter> =", Command::Equals),
    ("<Escape>", Command::Clear),
    ("<Backspace>", Command::Delete),
    ("%", Command::Unary(UnaryOp::Percent)),
    ("s", Command::Unary(UnaryOp::Sqrt)),
    ("q", Command::Unary(UnaryOp::Square)),
    ("f", Command::Unary(UnaryOp::Factorial)),
    ("r", Command::Unary(UnaryOp::Reciprocal)),
];

lazy_static! {
    /// A named key in angle brackets, or any single non-space character.
    static ref KEY_TOKEN: Regex = Regex::new(r"<([A-Za-z]+)>|\S").unwrap();
}

/// Map a key press to a calculator command.
///
/// Returns `None` for keys with no binding.
pub fn command_for_key(key: Key) -> Option<Command> {
    let command = match key {
        Key::Named(NamedKey::Enter) => Command::Equals,
        Key::Named(NamedKey::Escape) => Command::Clear,
        Key::Named(NamedKey::Backspace) => Command::Delete,
        Key::Char(c) => match c {
            '0'..='9' => Command::Digit(c as u8 - b'0'),
            '.' => Command::Decimal,
            '+' => Command::Operation(BinaryOp::Add),
            '-' => Command::Operation(BinaryOp::Subtract),
            '*' => Command::Operation(BinaryOp::Multiply),
            '/' => Command::Operation(BinaryOp::Divide),
            'p' => Command::Operation(BinaryOp::Power),
            '=' => Command::Equals,
            '%' => Command::Unary(UnaryOp::Percent),
            's' => Command::Unary(UnaryOp::Sqrt),
            'q' => Command::Unary(UnaryOp::Square),
            'f' => Command::Unary(UnaryOp::Factorial),
            'r' => Command::Unary(UnaryOp::Reciprocal),
            _ => return None,
        },
    };

    Some(command)
}

/// Split a key script into keys.
///
/// Whitespace is ignored. `<Name>` is a named key; an unknown name is an
/// error. Every other character is one key.
pub fn parse_key_script(script: &str) -> Result<Vec<Key>, String> {
    KEY_TOKEN
        .captures_iter(script)
        .map(|caps| match caps.get(1) {
            Some(name) => NamedKey::from_name(name.as_str())
                .map(Key::Named)
                .ok_or_else(|| format!("Unknown key: <{}>", name.as_str())),
            // Group 0 always matches, and `\S` matches exactly one character
            None => Ok(Key::Char(caps[0].chars().next().unwrap_or(' '))),
        })
        .collect()
}

/// Parse a key script and map it to commands, dropping unbound keys.
pub fn commands_for_script(script: &str) -> Result<Vec<Command>, String> {
    let keys = parse_key_script(script)?;

    Ok(keys
        .into_iter()
        .filter_map(|key| {
            let command = command_for_key(key);
            if command.is_none() {
                debug!(%key, "ignoring unbound key");
            }
            command
        })
        .collect())
}
