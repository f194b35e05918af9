//! Binary and unary calculator operations.

use super::error::{CalcError, CalcResult};
use std::fmt;
use std::str::FromStr;

/// Largest integer whose factorial still fits in an `f64`.
pub const FACTORIAL_LIMIT: f64 = 170.0;

/// An operation waiting for its right-hand operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    /// Glyph shown next to the previous operand.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "^",
        }
    }

    /// Button action name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
        }
    }

    /// Apply the operation to `lhs` and `rhs`.
    ///
    /// Division by zero and non-finite results are errors rather than
    /// infinities or NaN.
    pub fn apply(self, lhs: f64, rhs: f64) -> CalcResult<f64> {
        let value = match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                lhs / rhs
            }
            Self::Power => lhs.powf(rhs),
        };

        finite(value)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BinaryOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "subtract" => Ok(Self::Subtract),
            "multiply" => Ok(Self::Multiply),
            "divide" => Ok(Self::Divide),
            "power" => Ok(Self::Power),
            other => Err(format!("Unknown binary operation: {}", other)),
        }
    }
}

/// An operation applied in place to the current operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Percent,
    Sqrt,
    Square,
    Factorial,
    Reciprocal,
}

impl UnaryOp {
    /// Button action name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Percent => "percent",
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Factorial => "factorial",
            Self::Reciprocal => "reciprocal",
        }
    }

    pub fn apply(self, x: f64) -> CalcResult<f64> {
        match self {
            Self::Percent => finite(x / 100.0),
            Self::Sqrt => {
                if x < 0.0 {
                    return Err(CalcError::InvalidInput("square root of a negative number"));
                }
                Ok(x.sqrt())
            }
            Self::Square => finite(x * x),
            Self::Factorial => factorial(x),
            Self::Reciprocal => {
                if x == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                finite(1.0 / x)
            }
        }
    }
}

impl FromStr for UnaryOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percent" => Ok(Self::Percent),
            "sqrt" => Ok(Self::Sqrt),
            "square" => Ok(Self::Square),
            "factorial" => Ok(Self::Factorial),
            "reciprocal" => Ok(Self::Reciprocal),
            other => Err(format!("Unknown unary operation: {}", other)),
        }
    }
}

fn factorial(x: f64) -> CalcResult<f64> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(CalcError::InvalidInput(
            "factorial needs a non-negative integer",
        ));
    }
    if x > FACTORIAL_LIMIT {
        return Err(CalcError::InvalidInput("number too large for factorial"));
    }

    // x is a small non-negative integer here, so the cast is exact
    let n = x as u32;
    Ok((2..=n).fold(1.0, |acc, i| acc * f64::from(i)))
}

fn finite(value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput("result is not a finite number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_binary_ops() {
        assert_eq!(BinaryOp::Add.apply(2.0, 3.0), Ok(5.0));
        assert_eq!(BinaryOp::Subtract.apply(2.0, 3.0), Ok(-1.0));
        assert_eq!(BinaryOp::Multiply.apply(4.0, 2.5), Ok(10.0));
        assert_eq!(BinaryOp::Divide.apply(6.0, 2.0), Ok(3.0));
        assert_eq!(BinaryOp::Power.apply(2.0, 10.0), Ok(1024.0));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            BinaryOp::Divide.apply(5.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            UnaryOp::Reciprocal.apply(0.0),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_non_finite_results_rejected() {
        assert!(matches!(
            BinaryOp::Power.apply(10.0, 400.0),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(matches!(
            BinaryOp::Power.apply(-8.0, 0.5),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(matches!(
            UnaryOp::Square.apply(1e200),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(UnaryOp::Sqrt.apply(9.0), Ok(3.0));
        assert!(UnaryOp::Sqrt.apply(-4.0).is_err());
    }

    #[test]
    fn test_factorial() {
        assert_eq!(UnaryOp::Factorial.apply(0.0), Ok(1.0));
        assert_eq!(UnaryOp::Factorial.apply(5.0), Ok(120.0));
        assert!(UnaryOp::Factorial.apply(170.0).is_ok());
        assert!(UnaryOp::Factorial.apply(171.0).is_err());
        assert!(UnaryOp::Factorial.apply(-1.0).is_err());
        assert!(UnaryOp::Factorial.apply(3.5).is_err());
    }

    #[test]
    fn test_percent_and_reciprocal() {
        assert_eq!(UnaryOp::Percent.apply(50.0), Ok(0.5));
        assert_eq!(UnaryOp::Reciprocal.apply(4.0), Ok(0.25));
    }

    #[test]
    fn test_names_parse_back() {
        for op in [
            BinaryOp::Add,
            BinaryOp::Subtract,
            BinaryOp::Multiply,
            BinaryOp::Divide,
            BinaryOp::Power,
        ] {
            assert_eq!(op.name().parse::<BinaryOp>(), Ok(op));
        }
        assert!("modulo".parse::<BinaryOp>().is_err());
        assert_eq!("sqrt".parse::<UnaryOp>(), Ok(UnaryOp::Sqrt));
    }
}
