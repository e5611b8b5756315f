//! Operator dispatch for semantic analysis.
//!
//! [`ConstantComputer`] is the only place where an [`EvaluationFailure`] turns
//! into a diagnostic. Every entry point takes the AST node being evaluated plus
//! operands that are `None` when their own evaluation already failed; in that
//! case nothing is reported again and the result is `None` as well.
//!
//! [`EvaluationFailure`]: crate::error::EvaluationFailure

mod declared;
mod literals;

pub use declared::DeclaredVariables;

use crate::error::{ErrorKind, EvalResult};
use crate::object::DartObject;
use crate::span::Span;
use crate::types::TypeProvider;

/// Receiver of evaluation errors, positioned at an AST node.
pub trait DiagnosticSink {
    fn report(&self, kind: ErrorKind, node: Span);
}

impl<F: Fn(ErrorKind, Span)> DiagnosticSink for F {
    fn report(&self, kind: ErrorKind, node: Span) {
        self(kind, node)
    }
}

static NO_DECLARED_VARIABLES: DeclaredVariables = DeclaredVariables::new();

/// Evaluates constant operators and reports their failures.
pub struct ConstantComputer<'a> {
    types: &'a dyn TypeProvider,
    sink: &'a dyn DiagnosticSink,
    declared: &'a DeclaredVariables,
}

impl std::fmt::Debug for ConstantComputer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstantComputer")
            .field("declared", self.declared)
            .finish_non_exhaustive()
    }
}

/// Generates dispatcher entry points that forward to the `DartObject` operator
/// of the same name.
macro_rules! entry_points {
    (binary: $($name:ident => $op:literal),* $(,)?) => {
        $(
            #[doc = concat!("`", $op, "`")]
            pub fn $name(
                &self,
                node: Span,
                left: Option<&DartObject>,
                right: Option<&DartObject>,
            ) -> Option<DartObject> {
                self.binary(node, $op, left, right, DartObject::$name)
            }
        )*
    };
    (unary: $($name:ident => $op:literal),* $(,)?) => {
        $(
            #[doc = concat!("`", $op, "`")]
            pub fn $name(&self, node: Span, operand: Option<&DartObject>) -> Option<DartObject> {
                self.unary(node, $op, operand, DartObject::$name)
            }
        )*
    };
}

impl<'a> ConstantComputer<'a> {
    pub fn new(types: &'a dyn TypeProvider, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            types,
            sink,
            declared: &NO_DECLARED_VARIABLES,
        }
    }

    /// Use `declared` for `fromEnvironment` lookups.
    pub fn with_declared_variables(mut self, declared: &'a DeclaredVariables) -> Self {
        self.declared = declared;
        self
    }

    pub fn types(&self) -> &'a dyn TypeProvider {
        self.types
    }

    /// Report a failure at `node`, or pass the value through.
    fn check(
        &self,
        node: Span,
        operator: &str,
        result: EvalResult<DartObject>,
    ) -> Option<DartObject> {
        match result {
            Ok(value) => Some(value),
            Err(failure) => {
                #[cfg(debug_assertions)]
                if crate::diagnostics::debug_enabled() {
                    crate::diagnostics::debug_log(format_args!(
                        "[const-eval] {} failed with {} at {}:{}",
                        operator, failure.kind, node.start_line, node.start_column
                    ));
                }
                #[cfg(not(debug_assertions))]
                let _ = operator;
                self.sink.report(failure.kind, node);
                None
            }
        }
    }

    fn binary(
        &self,
        node: Span,
        operator: &str,
        left: Option<&DartObject>,
        right: Option<&DartObject>,
        op: impl FnOnce(&DartObject, &dyn TypeProvider, &DartObject) -> EvalResult<DartObject>,
    ) -> Option<DartObject> {
        let (left, right) = (left?, right?);
        self.check(node, operator, op(left, self.types, right))
    }

    fn unary(
        &self,
        node: Span,
        operator: &str,
        operand: Option<&DartObject>,
        op: impl FnOnce(&DartObject, &dyn TypeProvider) -> EvalResult<DartObject>,
    ) -> Option<DartObject> {
        let operand = operand?;
        self.check(node, operator, op(operand, self.types))
    }

    entry_points!(binary:
        add => "+",
        minus => "-",
        times => "*",
        divide => "/",
        remainder => "%",
        integer_divide => "~/",
        bit_and => "&",
        bit_or => "|",
        bit_xor => "^",
        shift_left => "<<",
        shift_right => ">>",
        equal_equal => "==",
        not_equal => "!=",
        less_than => "<",
        less_than_or_equal => "<=",
        greater_than => ">",
        greater_than_or_equal => ">=",
        logical_and => "&&",
        logical_or => "||",
        concatenate => "adjacent strings",
    );

    entry_points!(unary:
        negated => "unary -",
        bit_not => "~",
        logical_not => "!",
        convert_to_bool => "bool conversion",
        perform_to_string => "toString()",
        string_length => "length",
    );
}
