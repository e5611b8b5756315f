//! String operators and `toString` conversion.

use super::State;
use crate::error::{fail, ErrorKind, EvalResult};
use num_bigint::BigInt;

/// Formats a double the way Dart's `double.toString` does.
pub(crate) fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
        // Rust prints `1e21` / `1.5e-7`; Dart signs positive exponents.
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }
    let formatted = format!("{}", value);
    if formatted.contains('.') {
        formatted
    } else {
        format!("{}.0", formatted)
    }
}

impl State {
    /// String juxtaposition and `+` on strings.
    pub fn concatenate(&self, right: &State) -> EvalResult<State> {
        right.assert_string()?;
        match (self, right) {
            (State::StringVal(Some(l)), State::StringVal(Some(r))) => {
                Ok(State::StringVal(Some(format!("{}{}", l, r))))
            }
            (State::StringVal(_) | State::Dynamic, _) => Ok(State::StringVal(None)),
            _ => fail(ErrorKind::InvalidConstant),
        }
    }

    /// `String.length`, counted in UTF-16 code units.
    pub fn string_length(&self) -> EvalResult<State> {
        self.assert_string()?;
        match self {
            State::StringVal(v) => Ok(State::Int(
                v.as_ref()
                    .map(|s| BigInt::from(s.encode_utf16().count())),
            )),
            _ => Ok(State::Int(None)),
        }
    }

    /// `toString()`. Collections, instances and untyped values have no
    /// constant string form.
    pub fn convert_to_string(&self) -> EvalResult<State> {
        let text = match self {
            State::Bool(v) => v.map(|v| v.to_string()),
            State::Int(v) => v.as_ref().map(BigInt::to_string),
            State::Double(v) => v.map(format_double),
            State::StringVal(_) => return Ok(self.clone()),
            State::Symbol(name) => name.clone(),
            State::TypeRef(e) | State::FunctionRef(e) => e.as_ref().map(|e| e.name().to_string()),
            State::Null => Some("null".to_string()),
            State::Num
            | State::Dynamic
            | State::ListVal(_)
            | State::MapVal(_)
            | State::Generic(_) => None,
        };
        Ok(State::StringVal(text))
    }
}
