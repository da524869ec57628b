//! Sandboxed arithmetic expression evaluator
//!
//! Validates and evaluates arithmetic expression strings without any
//! generic code-evaluation facility. Supports `+ - * / ^ ( )`, decimal
//! literals, and the `e` constant (Euler's number). Used both by the
//! `/calculate` endpoint and as the body of the `calculator` tool.

mod error;
mod parser;

pub use error::{EvalError, EvalResult};

/// Characters an expression may contain
const ALLOWED_CHARS: &str = "0123456789+-*/.()^e ";

/// Validate and evaluate an arithmetic expression
///
/// Every character must be in the allowed set `{0-9 + - * / . ( ) ^ e space}`;
/// anything else fails with [`EvalError::InvalidCharacter`] before any
/// parsing happens. `e` and `^` are substituted exactly once each during
/// tokenization (Euler's number / power operator).
pub fn evaluate(expression: &str) -> EvalResult<f64> {
    for c in expression.chars() {
        if !ALLOWED_CHARS.contains(c) {
            return Err(EvalError::InvalidCharacter(c));
        }
    }
    parser::parse(expression)
}

/// Render an evaluation result the way the calculator reports it
///
/// Integral finite values print without a fractional part (`4094152`,
/// not `4094152.0`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}
