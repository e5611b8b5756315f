//! Typed constant values.
//!
//! A [`DartObject`] pairs a declared type with a [`State`]. Operators delegate
//! to the state and then pick the result's declared type from the variant the
//! state produced, because promotion can change it (`int + double` is a
//! `double`).

pub mod state;

use crate::error::{fail, ErrorKind, EvalResult};
use crate::types::{names, DartType, ElementHandle, TypeProvider};
use num_bigint::BigInt;
use state::{ExactValue, State};
use std::collections::{BTreeMap, HashMap};

/// An evaluated constant: declared type plus lattice state.
///
/// Immutable once built. Two objects are equal when both the declared type
/// and the state are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DartObject {
    declared_type: DartType,
    state: State,
}

/// Result categories an operator may produce.
#[derive(Clone, Copy)]
enum Produces {
    Bool,
    Int,
    Number,
    NumberOrString,
    String,
}

impl Produces {
    fn label(self) -> &'static str {
        match self {
            Produces::Bool => "bool",
            Produces::Int => "int",
            Produces::Number => "num",
            Produces::NumberOrString => "num or String",
            Produces::String => "String",
        }
    }
}

impl DartObject {
    pub fn new(declared_type: DartType, state: State) -> Self {
        Self {
            declared_type,
            state,
        }
    }

    // ── constructors ────────────────────────────────────────────────────────

    pub fn bool(types: &dyn TypeProvider, value: Option<bool>) -> Self {
        Self::new(types.bool_type(), State::Bool(value))
    }

    pub fn int(types: &dyn TypeProvider, value: Option<BigInt>) -> Self {
        Self::new(types.int_type(), State::Int(value))
    }

    pub fn double(types: &dyn TypeProvider, value: Option<f64>) -> Self {
        Self::new(types.double_type(), State::Double(value))
    }

    pub fn num(types: &dyn TypeProvider) -> Self {
        Self::new(types.num_type(), State::Num)
    }

    pub fn string(types: &dyn TypeProvider, value: Option<String>) -> Self {
        Self::new(types.string_type(), State::StringVal(value))
    }

    pub fn symbol(types: &dyn TypeProvider, name: Option<String>) -> Self {
        Self::new(types.symbol_type(), State::Symbol(name))
    }

    pub fn type_ref(types: &dyn TypeProvider, element: Option<ElementHandle>) -> Self {
        Self::new(types.type_type(), State::TypeRef(element))
    }

    pub fn function_ref(declared_type: DartType, element: Option<ElementHandle>) -> Self {
        Self::new(declared_type, State::FunctionRef(element))
    }

    pub fn null(types: &dyn TypeProvider) -> Self {
        Self::new(types.null_type(), State::Null)
    }

    pub fn dynamic(types: &dyn TypeProvider) -> Self {
        Self::new(types.dynamic_type(), State::Dynamic)
    }

    pub fn list(list_type: DartType, elements: Vec<DartObject>) -> Self {
        Self::new(list_type, State::ListVal(elements))
    }

    /// Map with `entries` in order. A repeated key whose value is fully known
    /// keeps its first position and takes the last value; entries with an
    /// unknown key are kept as written, since their keys may differ.
    pub fn map(
        map_type: DartType,
        entries: impl IntoIterator<Item = (DartObject, DartObject)>,
    ) -> Self {
        let mut merged: Vec<(DartObject, DartObject)> = Vec::new();
        let mut positions: HashMap<DartObject, usize> = HashMap::new();
        for (key, value) in entries {
            if !key.state.is_fully_known() {
                merged.push((key, value));
                continue;
            }
            match positions.get(&key) {
                Some(&index) => merged[index].1 = value,
                None => {
                    positions.insert(key.clone(), merged.len());
                    merged.push((key, value));
                }
            }
        }
        Self::new(map_type, State::MapVal(merged))
    }

    /// Instance of a user-defined class.
    pub fn instance(class_type: DartType, fields: BTreeMap<String, DartObject>) -> Self {
        Self::new(class_type, State::Generic(fields))
    }

    /// A value of the given type whose value is not statically known.
    pub fn unknown(declared_type: DartType) -> Self {
        let state = match declared_type.name().as_ref() {
            names::BOOL => State::Bool(None),
            names::INT => State::Int(None),
            names::DOUBLE => State::Double(None),
            names::NUM => State::Num,
            names::STRING => State::StringVal(None),
            names::SYMBOL => State::Symbol(None),
            names::NULL => State::Null,
            _ => State::Dynamic,
        };
        Self::new(declared_type, state)
    }

    // ── queries ─────────────────────────────────────────────────────────────

    pub fn declared_type(&self) -> &DartType {
        &self.declared_type
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn into_state(self) -> State {
        self.state
    }

    pub fn bool_value(&self) -> Option<bool> {
        match self.state {
            State::Bool(v) => v,
            _ => None,
        }
    }

    pub fn int_value(&self) -> Option<&BigInt> {
        match &self.state {
            State::Int(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn double_value(&self) -> Option<f64> {
        match self.state {
            State::Double(v) => v,
            _ => None,
        }
    }

    pub fn string_value(&self) -> Option<&str> {
        match &self.state {
            State::StringVal(v) => v.as_deref(),
            _ => None,
        }
    }

    pub fn fields(&self) -> Option<&BTreeMap<String, DartObject>> {
        self.state.fields()
    }

    pub fn is_bool(&self) -> bool {
        self.state.is_bool()
    }

    pub fn is_true(&self) -> bool {
        self.bool_value() == Some(true)
    }

    pub fn is_false(&self) -> bool {
        self.bool_value() == Some(false)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.state, State::Null)
    }

    pub fn is_unknown(&self) -> bool {
        self.state.is_unknown()
    }

    pub fn is_bool_num_string_or_null(&self) -> bool {
        self.state.is_bool_num_string_or_null()
    }

    pub fn is_user_defined_object(&self) -> bool {
        matches!(self.state, State::Generic(_))
    }

    pub fn has_exact_value(&self) -> bool {
        self.state.has_exact_value()
    }

    pub fn value(&self) -> Option<ExactValue> {
        self.state.value()
    }

    // ── typed dispatch ──────────────────────────────────────────────────────

    /// Wraps an operator result with the declared type matching its variant.
    ///
    /// Panics if the variant is outside what the operator can produce; that
    /// is a bug in the lattice, not a user error.
    fn wrap(types: &dyn TypeProvider, produces: Produces, state: State) -> Self {
        let declared_type = match (&state, produces) {
            (State::Bool(_), Produces::Bool) => types.bool_type(),
            (State::Int(_), Produces::Int | Produces::Number | Produces::NumberOrString) => {
                types.int_type()
            }
            (State::Double(_), Produces::Number | Produces::NumberOrString) => types.double_type(),
            (State::Num, Produces::Number | Produces::NumberOrString) => types.num_type(),
            (State::StringVal(_), Produces::String | Produces::NumberOrString) => {
                types.string_type()
            }
            (other, produces) => unreachable!(
                "{} operator produced a {} state",
                produces.label(),
                other.type_name()
            ),
        };
        Self::new(declared_type, state)
    }

    /// `+`
    pub fn add(&self, types: &dyn TypeProvider, right: &DartObject) -> EvalResult<DartObject> {
        let state = self.state.add(&right.state)?;
        Ok(Self::wrap(types, Produces::NumberOrString, state))
    }

    /// `-`
    pub fn minus(&self, types: &dyn TypeProvider, right: &DartObject) -> EvalResult<DartObject> {
        let state = self.state.minus(&right.state)?;
        Ok(Self::wrap(types, Produces::Number, state))
    }

    /// `*`
    pub fn times(&self, types: &dyn TypeProvider, right: &DartObject) -> EvalResult<DartObject> {
        let state = self.state.times(&right.state)?;
        Ok(Self::wrap(types, Produces::Number, state))
    }

    /// `/`
    pub fn divide(&self, types: &dyn TypeProvider, right: &DartObject) -> EvalResult<DartObject> {
        let state = self.state.divide(&right.state)?;
        Ok(Self::wrap(types, Produces::Number, state))
    }

    /// `%`
    pub fn remainder(
        &self,
        types: &dyn TypeProvider,
        right: &DartObject,
    ) -> EvalResult<DartObject> {
        let state = self.state.remainder(&right.state)?;
        Ok(Self::wrap(types, Produces::Number, state))
    }

    /// `~/`
    pub fn integer_divide(
        &self,
        types: &dyn TypeProvider,
        right: &DartObject,
    ) -> EvalResult<DartObject> {
        let state = self.state.integer_divide(&right.state)?;
        Ok(Self::wrap(types, Produces::Int, state))
    }

    /// Unary `-`
    pub fn negated(&self, types: &dyn TypeProvider) -> EvalResult<DartObject> {
        let state = self.state.negated()?;
        Ok(Self::wrap(types, Produces::Number, state))
    }

    /// `&`
    pub fn bit_and(&self, types: &dyn TypeProvider, right: &DartObject) -> EvalResult<DartObject> {
        let state = self.state.bit_and(&right.state)?;
        Ok(Self::wrap(types, Produces::Int, state))
    }

    /// `|`
    pub fn bit_or(&self, types: &dyn TypeProvider, right: &DartObject) -> EvalResult<DartObject> {
        let state = self.state.bit_or(&right.state)?;
        Ok(Self::wrap(types, Produces::Int, state))
    }

    /// `^`
    pub fn bit_xor(&self, types: &dyn TypeProvider, right: &DartObject) -> EvalResult<DartObject> {
        let state = self.state.bit_xor(&right.state)?;
        Ok(Self::wrap(types, Produces::Int, state))
    }

    /// `~`
    pub fn bit_not(&self, types: &dyn TypeProvider) -> EvalResult<DartObject> {
        let state = self.state.bit_not()?;
        Ok(Self::wrap(types, Produces::Int, state))
    }

    /// `<<`
    pub fn shift_left(
        &self,
        types: &dyn TypeProvider,
        right: &DartObject,
    ) -> EvalResult<DartObject> {
        let state = self.state.shift_left(&right.state)?;
        Ok(Self::wrap(types, Produces::Int, state))
    }

    /// `>>`
    pub fn shift_right(
        &self,
        types: &dyn TypeProvider,
        right: &DartObject,
    ) -> EvalResult<DartObject> {
        let state = self.state.shift_right(&right.state)?;
        Ok(Self::wrap(types, Produces::Int, state))
    }

    /// `==`
    ///
    /// Operands of different declared types are only comparable when the left
    /// one is a core `bool`/`num`/`String`/`Null` type or `dynamic`.
    pub fn equal_equal(
        &self,
        types: &dyn TypeProvider,
        right: &DartObject,
    ) -> EvalResult<DartObject> {
        if self.declared_type != right.declared_type
            && !self.declared_type.is_bool_num_string_or_null_type()
            && !types.is_dynamic(&self.declared_type)
        {
            return fail(ErrorKind::NotBoolNumStringOrNull);
        }
        let state = self.state.equal_equal(&right.state)?;
        Ok(Self::wrap(types, Produces::Bool, state))
    }

    /// `!=`
    ///
    /// When the declared types differ and the left one is not `bool`,
    /// `double`, `int`, `num` or `String`, the operands are statically unequal.
    pub fn not_equal(
        &self,
        types: &dyn TypeProvider,
        right: &DartObject,
    ) -> EvalResult<DartObject> {
        if self.declared_type != right.declared_type
            && !matches!(
                self.declared_type.name().as_ref(),
                names::BOOL | names::DOUBLE | names::INT | names::NUM | names::STRING
            )
        {
            return Ok(Self::bool(types, Some(true)));
        }
        self.equal_equal(types, right)?.logical_not(types)
    }

    /// `<`
    pub fn less_than(
        &self,
        types: &dyn TypeProvider,
        right: &DartObject,
    ) -> EvalResult<DartObject> {
        let state = self.state.less_than(&right.state)?;
        Ok(Self::wrap(types, Produces::Bool, state))
    }

    /// `<=`
    pub fn less_than_or_equal(
        &self,
        types: &dyn TypeProvider,
        right: &DartObject,
    ) -> EvalResult<DartObject> {
        let state = self.state.less_than_or_equal(&right.state)?;
        Ok(Self::wrap(types, Produces::Bool, state))
    }

    /// `>`
    pub fn greater_than(
        &self,
        types: &dyn TypeProvider,
        right: &DartObject,
    ) -> EvalResult<DartObject> {
        let state = self.state.greater_than(&right.state)?;
        Ok(Self::wrap(types, Produces::Bool, state))
    }

    /// `>=`
    pub fn greater_than_or_equal(
        &self,
        types: &dyn TypeProvider,
        right: &DartObject,
    ) -> EvalResult<DartObject> {
        let state = self.state.greater_than_or_equal(&right.state)?;
        Ok(Self::wrap(types, Produces::Bool, state))
    }

    /// `&&`
    pub fn logical_and(
        &self,
        types: &dyn TypeProvider,
        right: &DartObject,
    ) -> EvalResult<DartObject> {
        let state = self.state.logical_and(&right.state)?;
        Ok(Self::wrap(types, Produces::Bool, state))
    }

    /// `||`
    pub fn logical_or(
        &self,
        types: &dyn TypeProvider,
        right: &DartObject,
    ) -> EvalResult<DartObject> {
        let state = self.state.logical_or(&right.state)?;
        Ok(Self::wrap(types, Produces::Bool, state))
    }

    /// `!`
    pub fn logical_not(&self, types: &dyn TypeProvider) -> EvalResult<DartObject> {
        let state = self.state.logical_not()?;
        Ok(Self::wrap(types, Produces::Bool, state))
    }

    pub fn convert_to_bool(&self, types: &dyn TypeProvider) -> EvalResult<DartObject> {
        if self.declared_type == types.bool_type() {
            return Ok(self.clone());
        }
        let state = self.state.convert_to_bool()?;
        Ok(Self::wrap(types, Produces::Bool, state))
    }

    /// `toString()`
    pub fn perform_to_string(&self, types: &dyn TypeProvider) -> EvalResult<DartObject> {
        if self.declared_type == types.string_type() {
            return Ok(self.clone());
        }
        let state = self.state.convert_to_string()?;
        Ok(Self::wrap(types, Produces::String, state))
    }

    /// Adjacent string literals.
    pub fn concatenate(
        &self,
        types: &dyn TypeProvider,
        right: &DartObject,
    ) -> EvalResult<DartObject> {
        let state = self.state.concatenate(&right.state)?;
        Ok(Self::wrap(types, Produces::String, state))
    }

    /// `.length` on a string.
    pub fn string_length(&self, types: &dyn TypeProvider) -> EvalResult<DartObject> {
        let state = self.state.string_length()?;
        Ok(Self::wrap(types, Produces::Int, state))
    }
}

impl std::fmt::Display for DartObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.declared_type, self.state)
    }
}
