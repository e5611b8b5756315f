//! Failure taxonomy for constant evaluation.
//!
//! Operators on [`State`](crate::object::state::State) and
//! [`DartObject`](crate::object::DartObject) never report anything themselves;
//! they return an [`EvaluationFailure`] which the dispatcher turns into exactly
//! one diagnostic. An unknown payload (`Int(None)` etc.) is not a failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a constant-evaluation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Operand must be a `bool` (also raised for a non-`String` concatenation operand).
    NotBool,
    /// Operand must be a `bool`, `num`, `String` or `null`.
    NotBoolNumStringOrNull,
    /// Operand must be an `int` or `null`.
    NotInt,
    /// Operand must be a `num` or `null`.
    NotNum,
    /// Operator is not defined for this operand shape.
    InvalidConstant,
    /// Well typed, but the operation would throw when executed.
    ThrowsAtRuntime,
    /// `~/` with an integer zero divisor.
    IntegerDivideByZero,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::NotBool,
        ErrorKind::NotBoolNumStringOrNull,
        ErrorKind::NotInt,
        ErrorKind::NotNum,
        ErrorKind::InvalidConstant,
        ErrorKind::ThrowsAtRuntime,
        ErrorKind::IntegerDivideByZero,
    ];

    /// Analyzer error code reported for this kind.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::NotBool => "CONST_EVAL_TYPE_BOOL",
            ErrorKind::NotBoolNumStringOrNull => "CONST_EVAL_TYPE_BOOL_NUM_STRING",
            ErrorKind::NotInt => "CONST_EVAL_TYPE_INT",
            ErrorKind::NotNum => "CONST_EVAL_TYPE_NUM",
            ErrorKind::InvalidConstant => "INVALID_CONSTANT",
            ErrorKind::ThrowsAtRuntime => "CONST_EVAL_THROWS_EXCEPTION",
            ErrorKind::IntegerDivideByZero => "CONST_EVAL_THROWS_IDBZE",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Raised by an operator whose contract is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("constant evaluation failed: {kind}")]
pub struct EvaluationFailure {
    pub kind: ErrorKind,
}

impl EvaluationFailure {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }
}

impl From<ErrorKind> for EvaluationFailure {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result of every lattice and typed-object operator.
pub type EvalResult<T> = Result<T, EvaluationFailure>;

/// Shorthand for returning a failure of the given kind.
pub(crate) fn fail<T>(kind: ErrorKind) -> EvalResult<T> {
    Err(EvaluationFailure::new(kind))
}
