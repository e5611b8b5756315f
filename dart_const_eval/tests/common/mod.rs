//! Shared helpers for integration tests
// Each integration test target uses a different subset of these helpers.
#![allow(dead_code)]

use dart_const_eval::*;

/// Minimal constant-expression tree, standing in for analyzer AST nodes.
#[derive(Debug, Clone)]
pub enum Expr {
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(&'static str),
    Null,
    /// A value whose type is known but whose value is not.
    Unknown(DartType),
    Binary(&'static str, Box<Expr>, Box<Expr>),
    Unary(&'static str, Box<Expr>),
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
    Interpolation(Vec<Expr>),
    Length(Box<Expr>),
}

pub fn bin(op: &'static str, left: Expr, right: Expr) -> Expr {
    Expr::Binary(op, Box::new(left), Box::new(right))
}

pub fn un(op: &'static str, operand: Expr) -> Expr {
    Expr::Unary(op, Box::new(operand))
}

/// Source-position for a node at nesting `depth`, so diagnostics can be told apart.
fn span_at(depth: usize) -> Span {
    Span::on_line(1, depth + 1, depth + 2)
}

/// Evaluate `expr` bottom-up, reporting into `computer`'s sink.
pub fn eval(computer: &ConstantComputer<'_>, expr: &Expr) -> Option<DartObject> {
    eval_at(computer, expr, 0)
}

fn eval_at(computer: &ConstantComputer<'_>, expr: &Expr, depth: usize) -> Option<DartObject> {
    let node = span_at(depth);
    match expr {
        Expr::Bool(v) => Some(computer.bool_literal(*v)),
        Expr::Int(v) => Some(computer.int_literal(*v)),
        Expr::Double(v) => Some(computer.double_literal(*v)),
        Expr::Str(v) => Some(computer.string_literal(*v)),
        Expr::Null => Some(computer.null_literal()),
        Expr::Unknown(ty) => Some(DartObject::unknown(ty.clone())),
        Expr::Binary(op, left, right) => {
            let l = eval_at(computer, left, depth + 1);
            let r = eval_at(computer, right, depth + 1);
            let (l, r) = (l.as_ref(), r.as_ref());
            match *op {
                "+" => computer.add(node, l, r),
                "-" => computer.minus(node, l, r),
                "*" => computer.times(node, l, r),
                "/" => computer.divide(node, l, r),
                "%" => computer.remainder(node, l, r),
                "~/" => computer.integer_divide(node, l, r),
                "&" => computer.bit_and(node, l, r),
                "|" => computer.bit_or(node, l, r),
                "^" => computer.bit_xor(node, l, r),
                "<<" => computer.shift_left(node, l, r),
                ">>" => computer.shift_right(node, l, r),
                "==" => computer.equal_equal(node, l, r),
                "!=" => computer.not_equal(node, l, r),
                "<" => computer.less_than(node, l, r),
                "<=" => computer.less_than_or_equal(node, l, r),
                ">" => computer.greater_than(node, l, r),
                ">=" => computer.greater_than_or_equal(node, l, r),
                "&&" => computer.logical_and(node, l, r),
                "||" => computer.logical_or(node, l, r),
                other => panic!("unsupported binary operator {other}"),
            }
        }
        Expr::Unary(op, operand) => {
            let v = eval_at(computer, operand, depth + 1);
            match *op {
                "-" => computer.negated(node, v.as_ref()),
                "~" => computer.bit_not(node, v.as_ref()),
                "!" => computer.logical_not(node, v.as_ref()),
                other => panic!("unsupported unary operator {other}"),
            }
        }
        Expr::Conditional(condition, then_expr, else_expr) => {
            let c = eval_at(computer, condition, depth + 1);
            let t = eval_at(computer, then_expr, depth + 1);
            let e = eval_at(computer, else_expr, depth + 1);
            computer.conditional(node, c.as_ref(), t.as_ref(), e.as_ref())
        }
        Expr::Interpolation(parts) => {
            let parts: Vec<_> = parts.iter().map(|p| eval_at(computer, p, depth + 1)).collect();
            computer.string_interpolation(node, &parts)
        }
        Expr::Length(operand) => {
            let v = eval_at(computer, operand, depth + 1);
            computer.string_length(node, v.as_ref())
        }
    }
}

/// Evaluate with a fresh collector and return the value plus reported kinds.
pub fn evaluate(expr: &Expr) -> (Option<DartObject>, Vec<ErrorKind>) {
    let types = CoreTypeProvider;
    let sink = DiagnosticsCollector::new();
    let computer = ConstantComputer::new(&types, &sink);
    let value = eval(&computer, expr);
    (value, sink.kinds())
}
