//! Line-based terminal front-end.
//!
//! Each input line is a key script dispatched key by key, after which the
//! display is printed. Lines starting with `:` are front-end commands.

use crate::calculator::{Calculator, Command, copy_to_clipboard};
use crate::input::{KEY_BINDINGS, commands_for_script};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::warn;

/// Write the key bindings table.
pub fn write_bindings(out: &mut impl Write) -> Result<()> {
    for (keys, command) in KEY_BINDINGS {
        writeln!(out, "  {:<14}{}", keys, command.name())?;
    }
    writeln!(out, "  {:<14}{}", ":copy", "copy result to clipboard")?;
    writeln!(out, "  {:<14}{}", ":q", "quit")?;
    Ok(())
}

/// Run the REPL until `:q` or end of input.
pub fn run(
    calculator: &mut Calculator,
    input: impl BufRead,
    mut out: impl Write,
    prompt: bool,
) -> Result<()> {
    if prompt {
        writeln!(out, "{}", calculator.display())?;
        write!(out, "> ")?;
        out.flush()?;
    }

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let line = line.trim();

        match line {
            ":q" | ":quit" => break,
            ":keys" => write_bindings(&mut out)?,
            ":copy" => match calculator.display().text_for_clipboard() {
                Some(text) => {
                    if let Err(err) = copy_to_clipboard(text) {
                        warn!("{:#}", err);
                        writeln!(out, "error: {:#}", err)?;
                    } else {
                        writeln!(out, "copied {}", text)?;
                    }
                }
                None => writeln!(out, "nothing to copy")?,
            },
            script => {
                calculator.dispatch(Command::Tick(Instant::now()));
                match commands_for_script(script) {
                    Ok(commands) => {
                        let mut display = calculator.display();
                        for command in commands {
                            display = calculator.dispatch(command);
                        }
                        writeln!(out, "{}", display)?;
                    }
                    Err(err) => writeln!(out, "error: {}", err)?,
                }
            }
        }

        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(input: &str) -> String {
        let mut calc = Calculator::new();
        let mut out = Vec::new();
        run(&mut calc, input.as_bytes(), &mut out, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_lines_share_state() {
        let output = session("12+\n3=\n");
        assert_eq!(output, "12 +\n12\n15\n");
    }

    #[test]
    fn test_quit_stops_reading() {
        let output = session("1\n:q\n2\n");
        assert_eq!(output, "1\n");
    }

    #[test]
    fn test_bad_named_key_reported() {
        let output = session("1<Tab>\n");
        assert_eq!(output, "error: Unknown key: <Tab>\n");
    }

    #[test]
    fn test_error_then_new_input() {
        let output = session("5/0=\n7\n");
        assert_eq!(output, "Error\n7\n");
    }

    #[test]
    fn test_keys_lists_bindings() {
        let output = session(":keys\n");
        assert!(output.contains("factorial"));
        assert!(output.contains(":copy"));
    }
}
