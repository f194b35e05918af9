//! The calculator state machine.
//!
//! A [`Calculator`] holds two operands and a pending binary operation. Input
//! arrives as discrete [`Command`]s through [`Calculator::dispatch`], which
//! applies one operation at a time and returns the new [`Display`]. Chained
//! operators are evaluated strictly left to right: `2 + 3 × 4 =` is `20`.

use super::display::{Display, ERROR_SENTINEL};
use super::error::CalcError;
use super::format::format_operand;
use super::operand::Operand;
use super::operation::{BinaryOp, UnaryOp};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long the error display stays up before the calculator resets itself.
pub const DEFAULT_ERROR_TIMEOUT: Duration = Duration::from_millis(2000);

/// Default thousands separator.
pub const DEFAULT_SEPARATOR: &str = ",";

/// A single input to the calculator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// A digit key, `0..=9`.
    Digit(u8),
    /// The decimal point key.
    Decimal,
    /// A binary operator key.
    Operation(BinaryOp),
    /// Evaluate the pending operation.
    Equals,
    /// Reset everything.
    Clear,
    /// Remove the last typed character.
    Delete,
    /// Apply a unary operation to the current operand.
    Unary(UnaryOp),
    /// Time has passed; lets the error state expire.
    Tick(Instant),
}

impl Command {
    /// Action name, matching the button names accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Digit(_) => "digit",
            Self::Decimal => "decimal",
            Self::Operation(op) => op.name(),
            Self::Equals => "equals",
            Self::Clear => "clear",
            Self::Delete => "delete",
            Self::Unary(op) => op.name(),
            Self::Tick(_) => "tick",
        }
    }
}

impl FromStr for Command {
    type Err = String;

    /// Parse a button action name (`add`, `equals`, `sqrt`, ...) or a digit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" => return Ok(Self::Equals),
            "clear" => return Ok(Self::Clear),
            "delete" => return Ok(Self::Delete),
            "decimal" | "." => return Ok(Self::Decimal),
            _ => {}
        }

        if let Ok(op) = s.parse::<BinaryOp>() {
            return Ok(Self::Operation(op));
        }
        if let Ok(op) = s.parse::<UnaryOp>() {
            return Ok(Self::Unary(op));
        }

        match s.parse::<u8>() {
            Ok(d) if d <= 9 && s.len() == 1 => Ok(Self::Digit(d)),
            _ => Err(format!("Unknown calculator action: {}", s)),
        }
    }
}

#[derive(Clone, Debug)]
struct ErrorState {
    error: CalcError,
    since: Instant,
}

/// Calculator state: operands, pending operation and error status.
#[derive(Clone, Debug)]
pub struct Calculator {
    current: Operand,
    previous: Operand,
    operation: Option<BinaryOp>,
    /// Next digit starts a fresh operand.
    should_reset: bool,
    error: Option<ErrorState>,
    /// Time of the command being applied.
    clock: Instant,
    error_timeout: Duration,
    separator: String,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            current: Operand::zero(),
            previous: Operand::empty(),
            operation: None,
            should_reset: false,
            error: None,
            clock: Instant::now(),
            error_timeout: DEFAULT_ERROR_TIMEOUT,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Set how long the error state lasts before [`Calculator::tick`] clears it.
    pub fn with_error_timeout(mut self, timeout: Duration) -> Self {
        self.error_timeout = timeout;
        self
    }

    /// Set the thousands separator used for display. Empty disables grouping.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Apply a command at the current time and return the resulting display.
    ///
    /// Any command other than [`Command::Tick`] received in the error state
    /// clears the calculator before it is applied.
    pub fn dispatch(&mut self, command: Command) -> Display {
        let now = match command {
            Command::Tick(now) => now,
            _ => Instant::now(),
        };
        self.dispatch_at(command, now)
    }

    /// Apply a command received at `now`.
    pub fn dispatch_at(&mut self, command: Command, now: Instant) -> Display {
        debug!(?command, "dispatch");
        self.clock = now;

        if let Command::Tick(at) = command {
            self.tick(at);
            return self.display();
        }

        if self.is_error() {
            self.clear();
        }

        match command {
            Command::Digit(d) => {
                if let Some(c) = char::from_digit(u32::from(d), 10) {
                    self.append_digit(c);
                }
            }
            Command::Decimal => self.append_digit('.'),
            Command::Operation(op) => self.choose_operation(op),
            Command::Equals => self.compute(),
            Command::Clear => self.clear(),
            Command::Delete => self.delete(),
            Command::Unary(op) => self.apply_unary(op),
            Command::Tick(_) => {}
        }

        self.display()
    }

    /// Append a digit or decimal point to the current operand.
    pub fn append_digit(&mut self, c: char) {
        if self.is_error() {
            self.clear();
        }

        if self.should_reset {
            self.current = Operand::empty();
            self.should_reset = false;
        }

        if !self.current.push(c) {
            debug!(key = %c, operand = %self.current, "input rejected");
        }
    }

    /// Choose the pending binary operation.
    ///
    /// If an operation is already pending it is computed first, so operators
    /// chain left to right.
    pub fn choose_operation(&mut self, op: BinaryOp) {
        if self.current.is_empty() {
            return;
        }

        if !self.previous.is_empty() {
            self.compute();
            if self.is_error() {
                return;
            }
        }

        self.operation = Some(op);
        self.previous = self.current.clone();
        self.should_reset = true;
    }

    /// Evaluate `previous <op> current`.
    ///
    /// Does nothing when no operation is pending or either operand has no
    /// numeric value.
    pub fn compute(&mut self) {
        let Some(op) = self.operation else {
            return;
        };
        let (Some(lhs), Some(rhs)) = (self.previous.value(), self.current.value()) else {
            return;
        };

        match op.apply(lhs, rhs) {
            Ok(value) => {
                debug!(lhs, rhs, %op, value, "computed");
                self.current = Operand::from_value(value);
                self.operation = None;
                self.previous = Operand::empty();
                self.should_reset = true;
                self.error = None;
            }
            Err(err) => self.handle_error(err),
        }
    }

    /// Apply a unary operation to the current operand in place.
    pub fn apply_unary(&mut self, op: UnaryOp) {
        let Some(x) = self.current.value() else {
            return;
        };

        match op.apply(x) {
            Ok(value) => self.current = Operand::from_value(value),
            Err(err) => self.handle_error(err),
        }
    }

    /// Reset to the initial state and leave the error state.
    pub fn clear(&mut self) {
        self.current = Operand::zero();
        self.previous = Operand::empty();
        self.operation = None;
        self.should_reset = false;
        self.error = None;
    }

    /// Remove the last character of the current operand.
    pub fn delete(&mut self) {
        self.current.pop();
    }

    /// Enter the error state, discarding the operands.
    ///
    /// The error is stamped with the time of the command being applied.
    pub fn handle_error(&mut self, error: CalcError) {
        warn!(%error, "calculator error");
        self.current = Operand::zero();
        self.previous = Operand::empty();
        self.operation = None;
        self.error = Some(ErrorState {
            error,
            since: self.clock,
        });
    }

    /// Clear the error state once it has lasted for the error timeout.
    pub fn tick(&mut self, now: Instant) {
        let expired = self
            .error
            .as_ref()
            .is_some_and(|state| now.saturating_duration_since(state.since) >= self.error_timeout);

        if expired {
            info!("recovering from error");
            self.clear();
        }
    }

    /// Build the display for the current state.
    pub fn display(&self) -> Display {
        if self.is_error() {
            return Display {
                current: ERROR_SENTINEL.to_string(),
                previous: String::new(),
                is_error: true,
                clipboard: None,
            };
        }

        let previous = match self.operation {
            Some(op) if !self.previous.is_empty() => format!(
                "{} {}",
                format_operand(self.previous.as_str(), &self.separator),
                op.symbol()
            ),
            _ => String::new(),
        };

        Display {
            current: format_operand(self.current.as_str(), &self.separator),
            previous,
            is_error: false,
            clipboard: Some(self.current.as_str().to_string()),
        }
    }

    pub fn current(&self) -> &Operand {
        &self.current
    }

    pub fn operation(&self) -> Option<BinaryOp> {
        self.operation
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The error that put the calculator into the error state, if any.
    pub fn last_error(&self) -> Option<&CalcError> {
        self.error.as_ref().map(|state| &state.error)
    }
}
