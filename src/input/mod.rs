//! Keyboard input handling.

mod keys;

pub use keys::{
    KEY_BINDINGS, Key, NamedKey, command_for_key, commands_for_script, parse_key_script,
};
