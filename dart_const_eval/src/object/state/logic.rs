//! Boolean operators.

use super::State;
use crate::error::{fail, ErrorKind, EvalResult};

impl State {
    /// `&&`. A known `false` on the left decides the result; the right
    /// operand is still type checked.
    pub fn logical_and(&self, right: &State) -> EvalResult<State> {
        self.assert_bool()?;
        right.assert_bool()?;
        match self {
            State::Bool(Some(false)) => Ok(State::FALSE),
            State::Bool(Some(true)) => right.convert_to_bool(),
            _ => Ok(State::Bool(None)),
        }
    }

    /// `||`. A known `true` on the left decides the result.
    pub fn logical_or(&self, right: &State) -> EvalResult<State> {
        self.assert_bool()?;
        right.assert_bool()?;
        match self {
            State::Bool(Some(true)) => Ok(State::TRUE),
            State::Bool(Some(false)) => right.convert_to_bool(),
            _ => Ok(State::Bool(None)),
        }
    }

    /// `!`
    pub fn logical_not(&self) -> EvalResult<State> {
        self.assert_bool()?;
        match self {
            State::Bool(v) => Ok(State::Bool(v.map(|v| !v))),
            _ => Ok(State::Bool(None)),
        }
    }

    /// Boolean conversion as used by conditions.
    ///
    /// Non-boolean values convert to `false`, except `null`, which would throw.
    pub fn convert_to_bool(&self) -> EvalResult<State> {
        match self {
            State::Bool(_) => Ok(self.clone()),
            State::Null => fail(ErrorKind::ThrowsAtRuntime),
            State::Dynamic => Ok(State::Bool(None)),
            _ => Ok(State::FALSE),
        }
    }
}
