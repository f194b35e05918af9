//! Property-based tests for command sequences through `dispatch`.

use proptest::prelude::*;
use zcalc::calculator::{BinaryOp, Operand, UnaryOp};
use zcalc::input::{command_for_key, parse_key_script};
use zcalc::{Calculator, Command};

// ===== Strategy definitions =====

fn binary_op_strategy() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Add),
        Just(BinaryOp::Subtract),
        Just(BinaryOp::Multiply),
        Just(BinaryOp::Divide),
        Just(BinaryOp::Power),
    ]
}

fn unary_op_strategy() -> impl Strategy<Value = UnaryOp> {
    prop_oneof![
        Just(UnaryOp::Percent),
        Just(UnaryOp::Sqrt),
        Just(UnaryOp::Square),
        Just(UnaryOp::Factorial),
        Just(UnaryOp::Reciprocal),
    ]
}

/// Any command except `Tick`, weighted towards digit entry.
fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        6 => (0u8..=9u8).prop_map(Command::Digit),
        2 => Just(Command::Decimal),
        2 => binary_op_strategy().prop_map(Command::Operation),
        2 => unary_op_strategy().prop_map(Command::Unary),
        1 => Just(Command::Equals),
        1 => Just(Command::Delete),
        1 => Just(Command::Clear),
    ]
}

/// An operand is valid when it has at most one decimal point and a finite
/// value, or is empty, or is the lone sign left by deleting from `-5`.
fn operand_is_valid(operand: &Operand) -> bool {
    let text = operand.as_str();
    text.matches('.').count() <= 1
        && (operand.value().is_some() || operand.is_empty() || text == "-")
}

// ===== Property tests for Calculator =====

proptest! {
    /// Every reachable state keeps the current operand valid.
    #[test]
    fn prop_operand_always_valid(commands in prop::collection::vec(command_strategy(), 0..60)) {
        let mut calc = Calculator::new();
        for command in commands {
            let display = calc.dispatch(command);
            prop_assert_eq!(display.is_error, calc.is_error());
            if !calc.is_error() {
                prop_assert!(
                    operand_is_valid(calc.current()),
                    "invalid operand {:?} after {:?}",
                    calc.current().as_str(),
                    command
                );
            }
        }
    }

    /// Digit and decimal keys alone never produce a second decimal point.
    #[test]
    fn prop_digit_entry_single_decimal_point(script in "[0-9.]{0,40}") {
        let mut calc = Calculator::new();
        for key in parse_key_script(&script).unwrap() {
            if let Some(command) = command_for_key(key) {
                calc.dispatch(command);
            }
        }
        prop_assert!(calc.current().as_str().matches('.').count() <= 1);
        prop_assert!(calc.current().value().is_some());
    }

    /// Clear always returns to the initial display.
    #[test]
    fn prop_clear_resets(commands in prop::collection::vec(command_strategy(), 0..40)) {
        let mut calc = Calculator::new();
        for command in commands {
            calc.dispatch(command);
        }
        let display = calc.dispatch(Command::Clear);
        prop_assert_eq!(display.current, "0");
        prop_assert_eq!(display.previous, "");
        prop_assert!(!display.is_error);
    }

    /// Typing after any unary result leaves an operand with a value.
    #[test]
    fn prop_typing_after_unary_result(
        digits in prop::collection::vec(0u8..=9u8, 1..15),
        op in unary_op_strategy(),
        next in prop_oneof![(0u8..=9u8).prop_map(Command::Digit), Just(Command::Decimal)],
    ) {
        let mut calc = Calculator::new();
        for d in digits {
            calc.dispatch(Command::Digit(d));
        }
        calc.dispatch(Command::Unary(op));
        prop_assume!(!calc.is_error());

        calc.dispatch(next);
        prop_assert!(calc.current().value().is_some(), "{:?}", calc.current().as_str());
    }
}
