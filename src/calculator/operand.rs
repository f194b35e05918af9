//! Text-encoded operands.

use std::fmt;

/// A number as the user typed it.
///
/// Holds at most one decimal point and no redundant leading zero. The text
/// may be empty or a lone `-` between edits, in which case it has no value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Operand(String);

impl Operand {
    /// The initial operand, `"0"`.
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    /// An empty operand, used when nothing is pending.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Build an operand from a computed value.
    pub fn from_value(value: f64) -> Self {
        Self(super::format::number_to_text(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the operand, returning `None` when it has no numeric value.
    pub fn value(&self) -> Option<f64> {
        self.0.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Append a digit (`'0'..='9'`) or the decimal point.
    ///
    /// Exponent text such as `1e+22` only comes from a computed result and
    /// cannot be extended, so typing over it starts a fresh operand. Input
    /// that would leave the operand without a finite value is rejected.
    ///
    /// Returns `false` if the input was rejected.
    pub fn push(&mut self, c: char) -> bool {
        let mut text = if self.is_exponent() {
            String::new()
        } else {
            self.0.clone()
        };

        match c {
            '.' => {
                if text.contains('.') {
                    return false;
                }
                if text.is_empty() {
                    text.push('0');
                }
                text.push('.');
            }
            '0'..='9' => {
                if text == "0" {
                    text.clear();
                }
                text.push(c);
            }
            _ => return false,
        }

        if !has_value(&text) {
            return false;
        }

        self.0 = text;
        true
    }

    /// Remove the last character, or reset to `"0"` if at most one remains.
    ///
    /// A dangling exponent marker (`1e+`, `5e-`) is removed along with the
    /// digit before it.
    pub fn pop(&mut self) {
        if self.0.chars().count() <= 1 {
            *self = Self::zero();
            return;
        }

        self.0.pop();
        while self.0.ends_with(&['e', '+'][..]) || self.0.ends_with("e-") {
            self.0.pop();
        }
    }

    fn is_exponent(&self) -> bool {
        self.0.contains('e')
    }
}

fn has_value(text: &str) -> bool {
    text.parse::<f64>().is_ok_and(f64::is_finite)
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
