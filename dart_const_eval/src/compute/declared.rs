//! Environment declarations (`-Dname=value`) for `fromEnvironment` constants.

use crate::object::DartObject;
use crate::types::TypeProvider;
use num_bigint::BigInt;
use num_traits::Num;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Variables declared on the command line or in an analysis options file.
///
/// Deserializes from a TOML document with a `[declared]` table:
///
/// ```toml
/// [declared]
/// "dart.vm.product" = "true"
/// "app.version" = "42"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredVariables {
    #[serde(default)]
    declared: BTreeMap<String, String>,
}

impl DeclaredVariables {
    pub const fn new() -> Self {
        Self {
            declared: BTreeMap::new(),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.declared.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.declared.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declared.keys().map(String::as_str)
    }

    /// Value of `bool.fromEnvironment(name)`.
    ///
    /// Undeclared names are an unknown `bool`; values other than `true` and
    /// `false` produce `null`.
    pub fn bool_value(&self, types: &dyn TypeProvider, name: &str) -> DartObject {
        match self.get(name) {
            None => DartObject::bool(types, None),
            Some("true") => DartObject::bool(types, Some(true)),
            Some("false") => DartObject::bool(types, Some(false)),
            Some(_) => DartObject::null(types),
        }
    }

    /// Value of `int.fromEnvironment(name)`.
    ///
    /// Undeclared names are an unknown `int`; unparsable values produce `null`.
    pub fn int_value(&self, types: &dyn TypeProvider, name: &str) -> DartObject {
        match self.get(name) {
            None => DartObject::int(types, None),
            Some(text) => match parse_int(text) {
                Some(value) => DartObject::int(types, Some(value)),
                None => DartObject::null(types),
            },
        }
    }

    /// Value of `String.fromEnvironment(name)`.
    pub fn string_value(&self, types: &dyn TypeProvider, name: &str) -> DartObject {
        DartObject::string(types, self.get(name).map(str::to_string))
    }
}

/// Parses an integer the way `int.parse` does: optional sign, decimal or
/// `0x` hexadecimal digits, surrounding whitespace ignored.
fn parse_int(text: &str) -> Option<BigInt> {
    let text = text.trim();
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (digits, radix) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (unsigned, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let value = BigInt::from_str_radix(digits, radix).ok()?;
    Some(if negative { -value } else { value })
}
