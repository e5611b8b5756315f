//! Diagnostics produced by constant evaluation.
//!
//! The evaluator only selects an [`ErrorKind`]; this module owns the message
//! text and a default in-process sink.
//!
//! # Debug logging
//!
//! Set `DART_CONST_EVAL_DEBUG=1` to trace every failure the dispatcher turns
//! into a diagnostic (debug builds only).

use crate::compute::DiagnosticSink;
use crate::error::ErrorKind;
use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Check if debug logging is enabled via the `DART_CONST_EVAL_DEBUG` env var.
#[cfg(debug_assertions)]
pub(crate) fn debug_enabled() -> bool {
    use std::sync::OnceLock;
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var("DART_CONST_EVAL_DEBUG").is_ok())
}

/// Emit a debug line without relying on `eprintln!`.
#[cfg(debug_assertions)]
pub(crate) fn debug_log(args: std::fmt::Arguments<'_>) {
    use std::io::Write;
    let _ = writeln!(std::io::stderr(), "{args}");
}

/// User-facing message for an error kind.
pub fn message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NotBool => {
            "In constant expressions, operand(s) of this operator must be of type 'bool'"
        }
        ErrorKind::NotBoolNumStringOrNull => {
            "In constant expressions, operands of this operator must be of type 'bool', 'num', 'String' or 'null'"
        }
        ErrorKind::NotInt => {
            "In constant expressions, operand(s) of this operator must be of type 'int'"
        }
        ErrorKind::NotNum => {
            "In constant expressions, operand(s) of this operator must be of type 'num'"
        }
        ErrorKind::InvalidConstant => "Invalid constant value",
        ErrorKind::ThrowsAtRuntime => "Evaluation of this constant expression causes exception",
        ErrorKind::IntegerDivideByZero => {
            "Evaluation of this constant expression throws IntegerDivisionByZeroException"
        }
    }
}

/// A positioned constant-evaluation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstDiagnostic {
    pub kind: ErrorKind,
    pub span: Span,
    /// Optional expression text the error refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ConstDiagnostic {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            context: None,
        }
    }

    /// Attach the source text of the failing expression.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn message(&self) -> &'static str {
        message(self.kind)
    }
}

impl std::fmt::Display for ConstDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "error: {} at line {}, column {}",
            self.message(),
            self.span.start_line,
            self.span.start_column
        )?;
        if let Some(ctx) = &self.context {
            write!(f, " ({})", ctx)?;
        }
        write!(f, " [{}]", self.code())
    }
}

/// Sink that records diagnostics in memory.
///
/// Not thread-safe; use one collector per evaluation thread.
#[derive(Debug, Default)]
pub struct DiagnosticsCollector {
    diagnostics: RefCell<Vec<ConstDiagnostic>>,
}

impl DiagnosticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic to the collection.
    pub fn emit(&self, diagnostic: ConstDiagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Take all collected diagnostics, clearing the collection.
    pub fn take(&self) -> Vec<ConstDiagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }

    pub fn count(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Kinds of the collected diagnostics, in report order.
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.diagnostics.borrow().iter().map(|d| d.kind).collect()
    }

    /// Serialize the collected diagnostics as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&*self.diagnostics.borrow())
    }
}

impl DiagnosticSink for DiagnosticsCollector {
    fn report(&self, kind: ErrorKind, node: Span) {
        self.emit(ConstDiagnostic::new(kind, node));
    }
}
