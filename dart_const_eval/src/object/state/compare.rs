//! Equality and relational operators.

use super::State;
use crate::error::{fail, ErrorKind, EvalResult};
use crate::object::DartObject;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

#[derive(Clone, Copy)]
enum Relation {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Relation {
    fn ints(self, l: &BigInt, r: &BigInt) -> bool {
        match self {
            Relation::Less => l < r,
            Relation::LessOrEqual => l <= r,
            Relation::Greater => l > r,
            Relation::GreaterOrEqual => l >= r,
        }
    }

    fn doubles(self, l: f64, r: f64) -> bool {
        match self {
            Relation::Less => l < r,
            Relation::LessOrEqual => l <= r,
            Relation::Greater => l > r,
            Relation::GreaterOrEqual => l >= r,
        }
    }
}

/// `Some(a == b)` when both sides are known.
fn known_eq<T: PartialEq + ?Sized>(l: Option<&T>, r: Option<&T>) -> Option<bool> {
    Some(l? == r?)
}

fn as_double(value: &Option<BigInt>) -> Option<f64> {
    value.as_ref().and_then(ToPrimitive::to_f64)
}

/// Three-valued conjunction of element comparisons: any `false` wins over unknown.
fn all_equal(results: impl IntoIterator<Item = Option<bool>>) -> Option<bool> {
    let mut unknown = false;
    for result in results {
        match result {
            Some(false) => return Some(false),
            None => unknown = true,
            Some(true) => {}
        }
    }
    if unknown {
        None
    } else {
        Some(true)
    }
}

/// Whether `right` holds an entry equal to `key: value`.
///
/// A key that definitely matches decides by its value. Without a definite
/// match, any undecided key makes the entry unknown.
fn entry_equals(
    key: &DartObject,
    value: &DartObject,
    right: &[(DartObject, DartObject)],
) -> Option<bool> {
    let mut undecided = false;
    for (other_key, other_value) in right {
        match key.state().value_equals(other_key.state()) {
            Some(true) => return value.state().value_equals(other_value.state()),
            Some(false) => {}
            None => undecided = true,
        }
    }
    if undecided {
        None
    } else {
        Some(false)
    }
}

impl State {
    /// `==`
    ///
    /// Distinct concrete variants compare `false`. `dynamic` on either side,
    /// or `num` against a numeric, is unknown.
    pub fn equal_equal(&self, right: &State) -> EvalResult<State> {
        Ok(State::Bool(self.value_equals(right)))
    }

    fn value_equals(&self, right: &State) -> Option<bool> {
        match (self, right) {
            (State::Dynamic, _) | (_, State::Dynamic) => None,
            (State::Num, State::Int(_) | State::Double(_) | State::Num)
            | (State::Int(_) | State::Double(_), State::Num) => None,
            (State::Bool(l), State::Bool(r)) => known_eq(l.as_ref(), r.as_ref()),
            (State::Int(l), State::Int(r)) => known_eq(l.as_ref(), r.as_ref()),
            (State::Int(l), State::Double(r)) => known_eq(as_double(l).as_ref(), r.as_ref()),
            (State::Double(l), State::Int(r)) => known_eq(l.as_ref(), as_double(r).as_ref()),
            (State::Double(l), State::Double(r)) => known_eq(l.as_ref(), r.as_ref()),
            (State::StringVal(l), State::StringVal(r)) | (State::Symbol(l), State::Symbol(r)) => {
                known_eq(l.as_deref(), r.as_deref())
            }
            (State::TypeRef(l), State::TypeRef(r))
            | (State::FunctionRef(l), State::FunctionRef(r)) => known_eq(l.as_ref(), r.as_ref()),
            (State::Null, State::Null) => Some(true),
            (State::ListVal(l), State::ListVal(r)) => {
                if l.len() != r.len() {
                    return Some(false);
                }
                all_equal(
                    l.iter()
                        .zip(r)
                        .map(|(a, b)| a.state().value_equals(b.state())),
                )
            }
            (State::MapVal(l), State::MapVal(r)) => {
                if l.len() != r.len() {
                    return Some(false);
                }
                all_equal(l.iter().map(|(key, value)| entry_equals(key, value, r)))
            }
            (State::Generic(l), State::Generic(r)) => {
                if l.keys().ne(r.keys()) {
                    Some(false)
                } else {
                    all_equal(
                        l.values()
                            .zip(r.values())
                            .map(|(a, b)| a.state().value_equals(b.state())),
                    )
                }
            }
            _ => Some(false),
        }
    }

    /// `<`
    pub fn less_than(&self, right: &State) -> EvalResult<State> {
        self.relation(right, Relation::Less)
    }

    /// `<=`
    pub fn less_than_or_equal(&self, right: &State) -> EvalResult<State> {
        self.relation(right, Relation::LessOrEqual)
    }

    /// `>`
    pub fn greater_than(&self, right: &State) -> EvalResult<State> {
        self.relation(right, Relation::Greater)
    }

    /// `>=`
    pub fn greater_than_or_equal(&self, right: &State) -> EvalResult<State> {
        self.relation(right, Relation::GreaterOrEqual)
    }

    fn relation(&self, right: &State, relation: Relation) -> EvalResult<State> {
        self.assert_num_or_null()?;
        right.assert_num_or_null()?;
        let result = match (self, right) {
            (State::Null, _) | (_, State::Null) => return fail(ErrorKind::InvalidConstant),
            (State::Int(Some(l)), State::Int(Some(r))) => {
                return Ok(State::Bool(Some(relation.ints(l, r))))
            }
            (State::Int(l), State::Double(r)) => as_double(l).zip(*r),
            (State::Double(l), State::Int(r)) => l.zip(as_double(r)),
            (State::Double(l), State::Double(r)) => l.zip(*r),
            _ => return Ok(State::Bool(None)),
        }
        .map(|(l, r)| relation.doubles(l, r));
        Ok(State::Bool(result))
    }
}
