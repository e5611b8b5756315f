//! Arithmetic operators with int/double/num promotion.
//!
//! Promotion rules:
//! - `int op int` stays `int` (except `/` by zero, which is real division)
//! - a `double` on either side makes the result `double`
//! - an untyped operand (`num`/`dynamic`) degrades the result to the unknown
//!   variant of the other side's subtype, or to `Num`
//!
//! An unknown payload on either side yields the unknown result variant.

use super::State;
use crate::error::{fail, ErrorKind, EvalResult};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive, Zero};

/// Operand pair after numeric promotion.
enum Promoted<'a> {
    Ints(Option<&'a BigInt>, Option<&'a BigInt>),
    Doubles(Option<f64>, Option<f64>),
    /// At least one side is untyped; the degraded result is already decided.
    Untyped(State),
}

/// Unknown numeric result shaped after the typed side of a mixed operation.
fn unknown_num(other: &State) -> State {
    match other {
        State::Int(_) => State::Int(None),
        State::Double(_) => State::Double(None),
        _ => State::Num,
    }
}

fn int_to_double(value: Option<&BigInt>) -> Option<f64> {
    value.and_then(ToPrimitive::to_f64)
}

impl State {
    fn promote<'a>(&'a self, right: &'a State) -> EvalResult<Promoted<'a>> {
        self.assert_num_or_null()?;
        right.assert_num_or_null()?;
        let promoted = match (self, right) {
            (State::Null, _) | (_, State::Null) => return fail(ErrorKind::InvalidConstant),
            (State::Int(l), State::Int(r)) => Promoted::Ints(l.as_ref(), r.as_ref()),
            (State::Int(l), State::Double(r)) => Promoted::Doubles(int_to_double(l.as_ref()), *r),
            (State::Double(l), State::Int(r)) => Promoted::Doubles(*l, int_to_double(r.as_ref())),
            (State::Double(l), State::Double(r)) => Promoted::Doubles(*l, *r),
            (State::Num | State::Dynamic, other) | (other, State::Num | State::Dynamic) => {
                Promoted::Untyped(unknown_num(other))
            }
            _ => return fail(ErrorKind::InvalidConstant),
        };
        Ok(promoted)
    }

    fn arithmetic(
        &self,
        right: &State,
        int_op: impl FnOnce(&BigInt, &BigInt) -> BigInt,
        double_op: impl FnOnce(f64, f64) -> f64,
    ) -> EvalResult<State> {
        Ok(match self.promote(right)? {
            Promoted::Ints(Some(l), Some(r)) => State::Int(Some(int_op(l, r))),
            Promoted::Ints(..) => State::Int(None),
            Promoted::Doubles(Some(l), Some(r)) => State::Double(Some(double_op(l, r))),
            Promoted::Doubles(..) => State::Double(None),
            Promoted::Untyped(unknown) => unknown,
        })
    }

    /// `+`. A `String` on either side makes this a concatenation.
    pub fn add(&self, right: &State) -> EvalResult<State> {
        // Numeric receivers keep their own operand check, so `1 + "a"` is NotNum.
        let concatenation = matches!(self, State::StringVal(_))
            || (matches!(right, State::StringVal(_))
                && !matches!(self, State::Int(_) | State::Double(_)));
        if concatenation {
            return self.concatenate(right);
        }
        self.arithmetic(right, |l, r| l + r, |l, r| l + r)
    }

    /// `-`
    pub fn minus(&self, right: &State) -> EvalResult<State> {
        self.arithmetic(right, |l, r| l - r, |l, r| l - r)
    }

    /// `*`
    pub fn times(&self, right: &State) -> EvalResult<State> {
        self.arithmetic(right, |l, r| l * r, |l, r| l * r)
    }

    /// `/`. Integer operands divide with truncation, except for a zero
    /// divisor, which falls back to real division and yields a double.
    pub fn divide(&self, right: &State) -> EvalResult<State> {
        Ok(match self.promote(right)? {
            Promoted::Ints(l, Some(r)) if r.is_zero() => {
                State::Double(int_to_double(l).map(|l| l / 0.0))
            }
            Promoted::Ints(Some(l), Some(r)) => State::Int(Some(l / r)),
            Promoted::Ints(..) => State::Int(None),
            Promoted::Doubles(Some(l), Some(r)) => State::Double(Some(l / r)),
            Promoted::Doubles(..) => State::Double(None),
            Promoted::Untyped(unknown) => unknown,
        })
    }

    /// `%`. Truncated remainder; an integer zero divisor yields `NaN`.
    pub fn remainder(&self, right: &State) -> EvalResult<State> {
        Ok(match self.promote(right)? {
            Promoted::Ints(l, Some(r)) if r.is_zero() => State::Double(l.map(|_| f64::NAN)),
            Promoted::Ints(Some(l), Some(r)) => State::Int(Some(l % r)),
            Promoted::Ints(..) => State::Int(None),
            Promoted::Doubles(Some(l), Some(r)) => State::Double(Some(l % r)),
            Promoted::Doubles(..) => State::Double(None),
            Promoted::Untyped(unknown) => unknown,
        })
    }

    /// `~/`. Always produces an `int`.
    pub fn integer_divide(&self, right: &State) -> EvalResult<State> {
        Ok(match self.promote(right)? {
            Promoted::Ints(Some(l), Some(r)) => {
                if r.is_zero() {
                    return fail(ErrorKind::IntegerDivideByZero);
                }
                State::Int(Some(l / r))
            }
            Promoted::Doubles(Some(l), Some(r)) => {
                let quotient = (l / r).trunc();
                if !quotient.is_finite() {
                    return fail(ErrorKind::ThrowsAtRuntime);
                }
                match BigInt::from_f64(quotient) {
                    Some(q) => State::Int(Some(q)),
                    None => return fail(ErrorKind::ThrowsAtRuntime),
                }
            }
            Promoted::Ints(..) | Promoted::Doubles(..) | Promoted::Untyped(_) => State::Int(None),
        })
    }

    /// Unary `-`
    pub fn negated(&self) -> EvalResult<State> {
        self.assert_num_or_null()?;
        match self {
            State::Int(v) => Ok(State::Int(v.as_ref().map(|v| -v))),
            State::Double(v) => Ok(State::Double(v.map(|v| -v))),
            State::Num | State::Dynamic => Ok(State::Num),
            _ => fail(ErrorKind::InvalidConstant),
        }
    }
}
