//! Compile-time constant evaluation for Dart.
//!
//! The evaluator computes the value of expressions restricted to the
//! compile-time-constant subset of Dart. It is organised in layers:
//!
//! - [`object::state::State`]: the value lattice (known, unknown-but-typed, untyped)
//! - [`object::DartObject`]: a state paired with its declared type
//! - [`error::EvaluationFailure`]: the single failure kind raised by operators
//! - [`compute::ConstantComputer`]: the operator dispatcher used by semantic
//!   analysis, which turns failures into diagnostics

// Prevent accidental debug output in library code.
#![deny(clippy::print_stderr)]

pub mod compute;
pub mod diagnostics;
pub mod error;
pub mod object;
pub mod span;
pub mod types;

pub use compute::{ConstantComputer, DeclaredVariables, DiagnosticSink};
pub use diagnostics::{ConstDiagnostic, DiagnosticsCollector};
pub use error::{ErrorKind, EvalResult, EvaluationFailure};
pub use object::state::{ExactValue, State};
pub use object::DartObject;
pub use span::Span;
pub use types::{CoreTypeProvider, DartType, ElementHandle, TypeProvider};
