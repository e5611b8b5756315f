//! Value lattice for constant evaluation.
//!
//! A [`State`] is the run-time shape of a constant. Each variant carries an
//! optional payload:
//!
//! ```text
//! Dynamic / Num            untyped, nothing known
//!   ↑
//! Int(None), Bool(None)    typed, value not statically known
//!   ↑
//! Int(Some(3))             exact value
//! ```
//!
//! An absent payload is a valid lattice element, not an error. Operators are
//! implemented per concern in the submodules:
//! - `arith`: `+ - * / % ~/` and unary `-`
//! - `bits`: `& | ^ ~ << >>`
//! - `compare`: `== < <= > >=`
//! - `logic`: `&& || !` and boolean conversion
//! - `text`: concatenation, `toString`, `length`

mod arith;
mod bits;
mod compare;
mod logic;
mod text;

use crate::error::{fail, EvalResult, ErrorKind};
use crate::object::DartObject;
use crate::types::ElementHandle;
use num_bigint::BigInt;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

pub(crate) use text::format_double;

/// Run-time shape of a constant value.
#[derive(Debug, Clone)]
pub enum State {
    Bool(Option<bool>),
    Int(Option<BigInt>),
    Double(Option<f64>),
    /// Numeric value of unknown subtype. Never carries a value.
    Num,
    StringVal(Option<String>),
    Symbol(Option<String>),
    TypeRef(Option<ElementHandle>),
    FunctionRef(Option<ElementHandle>),
    ListVal(Vec<DartObject>),
    /// Entries in insertion order. Keys whose value is fully known are
    /// unique; entries with an unknown key are never merged.
    MapVal(Vec<(DartObject, DartObject)>),
    /// Instance of a user-defined class, recorded as its field map.
    Generic(BTreeMap<String, DartObject>),
    Null,
    /// No static type information.
    Dynamic,
}

/// Exact Rust-side value of a constant.
#[derive(Debug, Clone, PartialEq)]
pub enum ExactValue {
    Bool(bool),
    Int(BigInt),
    Double(f64),
    String(String),
    Symbol(String),
    Type(ElementHandle),
    Function(ElementHandle),
    List(Vec<ExactValue>),
    Map(Vec<(ExactValue, ExactValue)>),
    Null,
}

impl State {
    pub const TRUE: State = State::Bool(Some(true));
    pub const FALSE: State = State::Bool(Some(false));

    pub fn from_bool(value: bool) -> Self {
        State::Bool(Some(value))
    }

    pub fn from_int(value: impl Into<BigInt>) -> Self {
        State::Int(Some(value.into()))
    }

    pub fn from_double(value: f64) -> Self {
        State::Double(Some(value))
    }

    pub fn from_string(value: impl Into<String>) -> Self {
        State::StringVal(Some(value.into()))
    }

    /// Name of the variant, used in internal-consistency panics and `Display`.
    pub fn type_name(&self) -> &'static str {
        match self {
            State::Bool(_) => "bool",
            State::Int(_) => "int",
            State::Double(_) => "double",
            State::Num => "num",
            State::StringVal(_) => "String",
            State::Symbol(_) => "Symbol",
            State::TypeRef(_) => "Type",
            State::FunctionRef(_) => "Function",
            State::ListVal(_) => "List",
            State::MapVal(_) => "Map",
            State::Generic(_) => "user defined type",
            State::Null => "Null",
            State::Dynamic => "dynamic",
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, State::Bool(_))
    }

    pub fn is_bool_num_string_or_null(&self) -> bool {
        matches!(
            self,
            State::Bool(_)
                | State::Int(_)
                | State::Double(_)
                | State::Num
                | State::StringVal(_)
                | State::Null
                | State::Dynamic
        )
    }

    /// True for typed-but-unknown payloads and for the untyped variants.
    pub fn is_unknown(&self) -> bool {
        match self {
            State::Bool(v) => v.is_none(),
            State::Int(v) => v.is_none(),
            State::Double(v) => v.is_none(),
            State::StringVal(v) | State::Symbol(v) => v.is_none(),
            State::TypeRef(e) | State::FunctionRef(e) => e.is_none(),
            State::Num | State::Dynamic => true,
            State::ListVal(_) | State::MapVal(_) | State::Generic(_) | State::Null => false,
        }
    }

    /// No unknown payload anywhere, including inside collections and fields.
    pub(crate) fn is_fully_known(&self) -> bool {
        match self {
            State::ListVal(elements) => elements.iter().all(|e| e.state().is_fully_known()),
            State::MapVal(entries) => entries
                .iter()
                .all(|(k, v)| k.state().is_fully_known() && v.state().is_fully_known()),
            State::Generic(fields) => fields.values().all(|f| f.state().is_fully_known()),
            other => !other.is_unknown(),
        }
    }

    /// Whether the value can be represented exactly.
    ///
    /// Scalars are exact even when their payload is unknown; the untyped
    /// variants never are. Collections and instances are exact when all of
    /// their components are.
    pub fn has_exact_value(&self) -> bool {
        match self {
            State::Num | State::Dynamic => false,
            State::ListVal(elements) => elements.iter().all(DartObject::has_exact_value),
            State::MapVal(entries) => entries
                .iter()
                .all(|(k, v)| k.has_exact_value() && v.has_exact_value()),
            State::Generic(fields) => fields.values().all(DartObject::has_exact_value),
            _ => true,
        }
    }

    /// The exact value, or `None` when the value (or any part of it) is unknown.
    pub fn value(&self) -> Option<ExactValue> {
        match self {
            State::Bool(v) => v.map(ExactValue::Bool),
            State::Int(v) => v.clone().map(ExactValue::Int),
            State::Double(v) => v.map(ExactValue::Double),
            State::StringVal(v) => v.clone().map(ExactValue::String),
            State::Symbol(v) => v.clone().map(ExactValue::Symbol),
            State::TypeRef(e) => e.clone().map(ExactValue::Type),
            State::FunctionRef(e) => e.clone().map(ExactValue::Function),
            State::ListVal(elements) => elements
                .iter()
                .map(DartObject::value)
                .collect::<Option<Vec<_>>>()
                .map(ExactValue::List),
            State::MapVal(entries) => entries
                .iter()
                .map(|(k, v)| Some((k.value()?, v.value()?)))
                .collect::<Option<Vec<_>>>()
                .map(ExactValue::Map),
            State::Null => Some(ExactValue::Null),
            State::Num | State::Dynamic | State::Generic(_) => None,
        }
    }

    /// Field map of a user-defined instance.
    pub fn fields(&self) -> Option<&BTreeMap<String, DartObject>> {
        match self {
            State::Generic(fields) => Some(fields),
            _ => None,
        }
    }

    // ── assertion helpers ───────────────────────────────────────────────────

    pub(crate) fn assert_bool(&self) -> EvalResult<()> {
        match self {
            State::Bool(_) | State::Dynamic => Ok(()),
            _ => fail(ErrorKind::NotBool),
        }
    }

    pub(crate) fn assert_bool_num_string_or_null(&self) -> EvalResult<()> {
        if self.is_bool_num_string_or_null() {
            Ok(())
        } else {
            fail(ErrorKind::NotBoolNumStringOrNull)
        }
    }

    pub(crate) fn assert_int_or_null(&self) -> EvalResult<()> {
        match self {
            State::Int(_) | State::Num | State::Null | State::Dynamic => Ok(()),
            _ => fail(ErrorKind::NotInt),
        }
    }

    pub(crate) fn assert_num_or_null(&self) -> EvalResult<()> {
        match self {
            State::Double(_) | State::Int(_) | State::Num | State::Null | State::Dynamic => Ok(()),
            _ => fail(ErrorKind::NotNum),
        }
    }

    /// A string operand is required; reported under the bool error code.
    pub(crate) fn assert_string(&self) -> EvalResult<()> {
        match self {
            State::StringVal(_) | State::Dynamic => Ok(()),
            _ => fail(ErrorKind::NotBool),
        }
    }
}

// Doubles compare by bit pattern so that `State` can key a map. Map entries
// compare in order; Dart `==` on maps lives in `compare`.
impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (State::Bool(a), State::Bool(b)) => a == b,
            (State::Int(a), State::Int(b)) => a == b,
            (State::Double(a), State::Double(b)) => a.map(f64::to_bits) == b.map(f64::to_bits),
            (State::Num, State::Num) => true,
            (State::StringVal(a), State::StringVal(b)) => a == b,
            (State::Symbol(a), State::Symbol(b)) => a == b,
            (State::TypeRef(a), State::TypeRef(b)) => a == b,
            (State::FunctionRef(a), State::FunctionRef(b)) => a == b,
            (State::ListVal(a), State::ListVal(b)) => a == b,
            (State::MapVal(a), State::MapVal(b)) => a == b,
            (State::Generic(a), State::Generic(b)) => a == b,
            (State::Null, State::Null) => true,
            (State::Dynamic, State::Dynamic) => true,
            _ => false,
        }
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            State::Bool(v) => v.hash(state),
            State::Int(v) => v.hash(state),
            State::Double(v) => v.map(f64::to_bits).hash(state),
            State::StringVal(v) | State::Symbol(v) => v.hash(state),
            State::TypeRef(e) | State::FunctionRef(e) => e.hash(state),
            State::ListVal(elements) => elements.hash(state),
            State::MapVal(entries) => entries.hash(state),
            State::Generic(fields) => fields.hash(state),
            State::Num | State::Null | State::Dynamic => {}
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const UNKNOWN: &str = "-unknown-";
        match self {
            State::Bool(Some(v)) => write!(f, "{}", v),
            State::Int(Some(v)) => write!(f, "{}", v),
            State::Double(Some(v)) => f.write_str(&format_double(*v)),
            State::StringVal(Some(v)) => write!(f, "{:?}", v),
            State::Symbol(Some(v)) => write!(f, "#{}", v),
            State::TypeRef(Some(e)) | State::FunctionRef(Some(e)) => f.write_str(e.name()),
            State::ListVal(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element.state())?;
                }
                f.write_str("]")
            }
            State::MapVal(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k.state(), v.state())?;
                }
                f.write_str("}")
            }
            State::Generic(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} = {}", name, value.state())?;
                }
                f.write_str("}")
            }
            State::Null => f.write_str("null"),
            _ => f.write_str(UNKNOWN),
        }
    }
}

#[cfg(test)]
mod tests;
