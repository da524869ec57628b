//! Arithmetic evaluation error definitions

use std::fmt;

/// Evaluation error types
///
/// Display messages are user-facing and mirror the errors returned by the
/// `/calculate` endpoint, so they are written in Chinese.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Character outside the allowed set
    InvalidCharacter(char),
    /// Malformed expression (unbalanced parens, trailing operators, ...)
    Syntax(String),
    /// Division by zero
    DivisionByZero,
}

impl std::error::Error for EvalError {}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter(c) => write!(f, "不允许的字符: {}", c),
            Self::Syntax(reason) => write!(f, "无效的表达式: {}", reason),
            Self::DivisionByZero => write!(f, "除数不能为零"),
        }
    }
}

/// Evaluation result type
pub type EvalResult<T> = Result<T, EvalError>;
