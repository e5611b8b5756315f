//! Bitwise and shift operators. Defined on `int` only.

use super::State;
use crate::error::{fail, ErrorKind, EvalResult};
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

/// Shift amounts wider than this many bits are not computed.
///
/// The largest accepted amount, `2^31 - 1`, still lets `1 << amount` build a
/// 256 MiB integer; only the magnitude of the amount is bounded here.
const MAX_SHIFT_BITS: u64 = 31;

#[derive(Clone, Copy)]
enum Shift {
    Left,
    Right,
}

impl State {
    /// Both operands as known integers, `Ok(None)` if either is unknown.
    fn int_operands<'a>(
        &'a self,
        right: &'a State,
    ) -> EvalResult<Option<(&'a BigInt, &'a BigInt)>> {
        self.assert_int_or_null()?;
        right.assert_int_or_null()?;
        match (self, right) {
            (State::Null, _) | (_, State::Null) => fail(ErrorKind::InvalidConstant),
            (State::Int(Some(l)), State::Int(Some(r))) => Ok(Some((l, r))),
            _ => Ok(None),
        }
    }

    fn bitwise(
        &self,
        right: &State,
        op: impl FnOnce(&BigInt, &BigInt) -> BigInt,
    ) -> EvalResult<State> {
        Ok(State::Int(self.int_operands(right)?.map(|(l, r)| op(l, r))))
    }

    /// `&`
    pub fn bit_and(&self, right: &State) -> EvalResult<State> {
        self.bitwise(right, |l, r| l & r)
    }

    /// `|`
    pub fn bit_or(&self, right: &State) -> EvalResult<State> {
        self.bitwise(right, |l, r| l | r)
    }

    /// `^`
    pub fn bit_xor(&self, right: &State) -> EvalResult<State> {
        self.bitwise(right, |l, r| l ^ r)
    }

    /// `~`
    pub fn bit_not(&self) -> EvalResult<State> {
        self.assert_int_or_null()?;
        match self {
            State::Int(v) => Ok(State::Int(v.as_ref().map(|v| !v))),
            State::Num | State::Dynamic => Ok(State::Int(None)),
            _ => fail(ErrorKind::InvalidConstant),
        }
    }

    /// `<<`
    pub fn shift_left(&self, right: &State) -> EvalResult<State> {
        self.shift(right, Shift::Left)
    }

    /// `>>`, arithmetic (sign-extending).
    pub fn shift_right(&self, right: &State) -> EvalResult<State> {
        self.shift(right, Shift::Right)
    }

    fn shift(&self, right: &State, direction: Shift) -> EvalResult<State> {
        let Some((value, amount)) = self.int_operands(right)? else {
            return Ok(State::Int(None));
        };
        if amount.bits() > MAX_SHIFT_BITS {
            return Ok(State::Int(None));
        }
        if amount.sign() == Sign::Minus {
            return fail(ErrorKind::ThrowsAtRuntime);
        }
        let Some(amount) = amount.to_usize() else {
            return Ok(State::Int(None));
        };
        let shifted = match direction {
            Shift::Left => value << amount,
            Shift::Right => value >> amount,
        };
        Ok(State::Int(Some(shifted)))
    }
}
