//! Declared types of constant values.
//!
//! The evaluator never resolves types itself. A [`TypeProvider`] hands out the
//! canonical built-in handles and the evaluator only compares them by name.

mod display;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Names of the core library types the evaluator knows about.
pub mod names {
    pub const BOOL: &str = "bool";
    pub const INT: &str = "int";
    pub const DOUBLE: &str = "double";
    pub const NUM: &str = "num";
    pub const STRING: &str = "String";
    pub const NULL: &str = "Null";
    pub const DYNAMIC: &str = "dynamic";
    pub const SYMBOL: &str = "Symbol";
    pub const TYPE: &str = "Type";
    pub const FUNCTION: &str = "Function";
    pub const LIST: &str = "List";
    pub const MAP: &str = "Map";
    pub const OBJECT: &str = "Object";
}

/// A resolved declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DartType {
    /// No static type information.
    Dynamic,
    /// A class type, possibly parameterized (`List<int>`).
    Interface {
        name: Cow<'static, str>,
        type_arguments: Vec<DartType>,
    },
}

impl DartType {
    /// Non-generic interface type with a static name.
    pub const fn builtin(name: &'static str) -> Self {
        DartType::Interface {
            name: Cow::Borrowed(name),
            type_arguments: Vec::new(),
        }
    }

    /// Interface type for a user-defined class.
    pub fn interface(name: impl Into<String>) -> Self {
        DartType::Interface {
            name: Cow::Owned(name.into()),
            type_arguments: Vec::new(),
        }
    }

    pub fn with_type_arguments(self, arguments: Vec<DartType>) -> Self {
        match self {
            DartType::Dynamic => DartType::Dynamic,
            DartType::Interface { name, .. } => DartType::Interface {
                name,
                type_arguments: arguments,
            },
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, DartType::Dynamic)
    }

    pub fn type_arguments(&self) -> &[DartType] {
        match self {
            DartType::Dynamic => &[],
            DartType::Interface { type_arguments, .. } => type_arguments,
        }
    }

    /// Whether this is a core type whose instances may appear in `==` of a
    /// constant expression without a user-defined operator.
    pub fn is_bool_num_string_or_null_type(&self) -> bool {
        matches!(
            self.name().as_ref(),
            names::BOOL | names::DOUBLE | names::INT | names::NUM | names::STRING | names::NULL
        )
    }
}

/// Handle to a declaration referenced by a type literal or a function tear-off.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementHandle {
    name: String,
}

impl ElementHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Source of canonical built-in type handles.
///
/// Implementations must return the same handle for the lifetime of an
/// evaluation session and must not mutate while evaluation is running.
pub trait TypeProvider {
    fn bool_type(&self) -> DartType;
    fn int_type(&self) -> DartType;
    fn double_type(&self) -> DartType;
    fn num_type(&self) -> DartType;
    fn string_type(&self) -> DartType;
    fn null_type(&self) -> DartType;
    fn dynamic_type(&self) -> DartType;
    fn symbol_type(&self) -> DartType;
    fn type_type(&self) -> DartType;
    fn function_type(&self) -> DartType;
    fn object_type(&self) -> DartType;

    fn list_type(&self, element: DartType) -> DartType {
        DartType::builtin(names::LIST).with_type_arguments(vec![element])
    }

    fn map_type(&self, key: DartType, value: DartType) -> DartType {
        DartType::builtin(names::MAP).with_type_arguments(vec![key, value])
    }

    fn is_dynamic(&self, ty: &DartType) -> bool {
        ty.is_dynamic()
    }
}

/// [`TypeProvider`] backed by the `dart:core` names.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreTypeProvider;

impl TypeProvider for CoreTypeProvider {
    fn bool_type(&self) -> DartType {
        DartType::builtin(names::BOOL)
    }

    fn int_type(&self) -> DartType {
        DartType::builtin(names::INT)
    }

    fn double_type(&self) -> DartType {
        DartType::builtin(names::DOUBLE)
    }

    fn num_type(&self) -> DartType {
        DartType::builtin(names::NUM)
    }

    fn string_type(&self) -> DartType {
        DartType::builtin(names::STRING)
    }

    fn null_type(&self) -> DartType {
        DartType::builtin(names::NULL)
    }

    fn dynamic_type(&self) -> DartType {
        DartType::Dynamic
    }

    fn symbol_type(&self) -> DartType {
        DartType::builtin(names::SYMBOL)
    }

    fn type_type(&self) -> DartType {
        DartType::builtin(names::TYPE)
    }

    fn function_type(&self) -> DartType {
        DartType::builtin(names::FUNCTION)
    }

    fn object_type(&self) -> DartType {
        DartType::builtin(names::OBJECT)
    }
}
