//! Literals, collection literals, interpolation, conditionals and the
//! `fromEnvironment` / `Symbol` constructors.

use super::ConstantComputer;
use crate::error::EvalResult;
use crate::object::state::State;
use crate::object::DartObject;
use crate::span::Span;
use crate::types::DartType;
use num_bigint::BigInt;

impl ConstantComputer<'_> {
    pub fn bool_literal(&self, value: bool) -> DartObject {
        DartObject::bool(self.types, Some(value))
    }

    pub fn int_literal(&self, value: impl Into<BigInt>) -> DartObject {
        DartObject::int(self.types, Some(value.into()))
    }

    pub fn double_literal(&self, value: f64) -> DartObject {
        DartObject::double(self.types, Some(value))
    }

    pub fn string_literal(&self, value: impl Into<String>) -> DartObject {
        DartObject::string(self.types, Some(value.into()))
    }

    pub fn null_literal(&self) -> DartObject {
        DartObject::null(self.types)
    }

    /// `#name`
    pub fn symbol_literal(&self, name: impl Into<String>) -> DartObject {
        DartObject::symbol(self.types, Some(name.into()))
    }

    /// `const <E>[...]`. Absent if any element failed.
    pub fn list_literal(
        &self,
        element_type: DartType,
        elements: &[Option<DartObject>],
    ) -> Option<DartObject> {
        let elements = elements.iter().cloned().collect::<Option<Vec<_>>>()?;
        Some(DartObject::list(self.types.list_type(element_type), elements))
    }

    /// `const <K, V>{...}`. Absent if any key or value failed. Repeated keys
    /// merge as in [`DartObject::map`].
    pub fn map_literal(
        &self,
        key_type: DartType,
        value_type: DartType,
        entries: &[(Option<DartObject>, Option<DartObject>)],
    ) -> Option<DartObject> {
        let entries = entries
            .iter()
            .map(|(key, value)| Some((key.clone()?, value.clone()?)))
            .collect::<Option<Vec<_>>>()?;
        Some(DartObject::map(self.types.map_type(key_type, value_type), entries))
    }

    /// `"a${b}c"`: each part is converted with `toString()` and concatenated.
    pub fn string_interpolation(
        &self,
        node: Span,
        parts: &[Option<DartObject>],
    ) -> Option<DartObject> {
        let parts = parts.iter().map(Option::as_ref).collect::<Option<Vec<_>>>()?;
        let result = parts.into_iter().try_fold(
            DartObject::string(self.types, Some(String::new())),
            |acc, part| -> EvalResult<DartObject> {
                part.state().assert_bool_num_string_or_null()?;
                let text = part.perform_to_string(self.types)?;
                acc.concatenate(self.types, &text)
            },
        );
        self.check(node, "string interpolation", result)
    }

    /// `condition ? then : otherwise`
    ///
    /// An unknown condition yields an unknown value of the branches' common
    /// declared type, or `dynamic` when they differ.
    pub fn conditional(
        &self,
        node: Span,
        condition: Option<&DartObject>,
        then_value: Option<&DartObject>,
        else_value: Option<&DartObject>,
    ) -> Option<DartObject> {
        let condition = condition?;
        if let Err(failure) = condition.state().assert_bool() {
            return self.check(node, "conditional", Err(failure));
        }
        let (then_value, else_value) = (then_value?, else_value?);
        match condition.bool_value() {
            Some(true) => Some(then_value.clone()),
            Some(false) => Some(else_value.clone()),
            None if then_value.declared_type() == else_value.declared_type() => {
                Some(DartObject::unknown(then_value.declared_type().clone()))
            }
            None => Some(DartObject::dynamic(self.types)),
        }
    }

    /// `const Symbol(name)`
    pub fn symbol_from_string(&self, node: Span, name: Option<&DartObject>) -> Option<DartObject> {
        let name = name?;
        let result = name.state().assert_string().map(|()| match name.state() {
            State::StringVal(Some(text)) => DartObject::symbol(self.types, Some(text.clone())),
            _ => DartObject::symbol(self.types, None),
        });
        self.check(node, "Symbol", result)
    }

    /// `const bool.fromEnvironment(name, defaultValue: ...)`
    pub fn bool_from_environment(
        &self,
        node: Span,
        name: Option<&DartObject>,
        default_value: Option<&DartObject>,
    ) -> Option<DartObject> {
        self.from_environment(node, name, default_value, EnvKind::Bool)
    }

    /// `const int.fromEnvironment(name, defaultValue: ...)`
    pub fn int_from_environment(
        &self,
        node: Span,
        name: Option<&DartObject>,
        default_value: Option<&DartObject>,
    ) -> Option<DartObject> {
        self.from_environment(node, name, default_value, EnvKind::Int)
    }

    /// `const String.fromEnvironment(name, defaultValue: ...)`
    pub fn string_from_environment(
        &self,
        node: Span,
        name: Option<&DartObject>,
        default_value: Option<&DartObject>,
    ) -> Option<DartObject> {
        self.from_environment(node, name, default_value, EnvKind::String)
    }

    fn from_environment(
        &self,
        node: Span,
        name: Option<&DartObject>,
        default_value: Option<&DartObject>,
        kind: EnvKind,
    ) -> Option<DartObject> {
        let name = name?;
        if let Err(failure) = name.state().assert_string() {
            return self.check(node, kind.label(), Err(failure));
        }
        let Some(name) = name.string_value() else {
            return Some(kind.unknown(self));
        };
        let value = match kind {
            EnvKind::Bool => self.declared.bool_value(self.types, name),
            EnvKind::Int => self.declared.int_value(self.types, name),
            EnvKind::String => self.declared.string_value(self.types, name),
        };
        if value.is_null() || value.is_unknown() {
            if let Some(default_value) = default_value {
                return Some(default_value.clone());
            }
        }
        if value.is_null() {
            return Some(kind.builtin_default(self));
        }
        Some(value)
    }
}

#[derive(Clone, Copy)]
enum EnvKind {
    Bool,
    Int,
    String,
}

impl EnvKind {
    fn label(self) -> &'static str {
        match self {
            EnvKind::Bool => "bool.fromEnvironment",
            EnvKind::Int => "int.fromEnvironment",
            EnvKind::String => "String.fromEnvironment",
        }
    }

    fn unknown(self, computer: &ConstantComputer<'_>) -> DartObject {
        let types = computer.types;
        match self {
            EnvKind::Bool => DartObject::bool(types, None),
            EnvKind::Int => DartObject::int(types, None),
            EnvKind::String => DartObject::string(types, None),
        }
    }

    /// Value used when the declaration cannot be parsed and no default is given.
    fn builtin_default(self, computer: &ConstantComputer<'_>) -> DartObject {
        match self {
            EnvKind::Bool => DartObject::bool(computer.types, Some(false)),
            EnvKind::Int | EnvKind::String => DartObject::null(computer.types),
        }
    }
}
