use super::*;
use crate::error::ErrorKind;
use crate::object::DartObject;
use crate::types::DartType;
use pretty_assertions::assert_eq;

fn int(v: i64) -> State {
    State::from_int(v)
}

fn double(v: f64) -> State {
    State::from_double(v)
}

fn string(v: &str) -> State {
    State::from_string(v)
}

fn kind_of(result: EvalResult<State>) -> ErrorKind {
    match result {
        Err(failure) => failure.kind,
        Ok(state) => panic!("expected a failure, got {state:?}"),
    }
}

fn list(elements: Vec<State>) -> State {
    State::ListVal(
        elements
            .into_iter()
            .map(|s| DartObject::new(DartType::builtin(s.type_name()), s))
            .collect(),
    )
}

// ── arithmetic ──────────────────────────────────────────────────────────────

#[test]
fn test_add_int_int_is_exact() {
    let big = State::from_int(BigInt::from(i64::MAX));
    assert_eq!(
        big.add(&int(1)).unwrap(),
        State::Int(Some(BigInt::from(i64::MAX) + 1))
    );
    assert_eq!(int(1).add(&int(2)).unwrap(), int(3));
}

#[test]
fn test_add_promotes_to_double() {
    assert_eq!(int(3).add(&double(1.5)).unwrap(), double(4.5));
    assert_eq!(double(1.0).add(&int(2)).unwrap(), double(3.0));
    assert_eq!(State::Int(None).add(&double(1.5)).unwrap(), State::Double(None));
    assert_eq!(double(1.0).add(&State::Int(None)).unwrap(), State::Double(None));
}

#[test]
fn test_add_unknown_propagates() {
    assert_eq!(int(1).add(&State::Int(None)).unwrap(), State::Int(None));
    assert_eq!(State::Double(None).add(&double(2.0)).unwrap(), State::Double(None));
}

#[test]
fn test_add_untyped_degrades_to_other_side() {
    assert_eq!(State::Num.add(&int(1)).unwrap(), State::Int(None));
    assert_eq!(double(1.0).add(&State::Dynamic).unwrap(), State::Double(None));
    assert_eq!(State::Num.add(&State::Dynamic).unwrap(), State::Num);
}

#[test]
fn test_add_strings_concatenates() {
    assert_eq!(string("ab").add(&string("cd")).unwrap(), string("abcd"));
    assert_eq!(State::Dynamic.add(&string("x")).unwrap(), State::StringVal(None));
}

#[test]
fn test_add_string_and_int_fails() {
    assert_eq!(kind_of(string("a").add(&int(1))), ErrorKind::NotBool);
    assert_eq!(kind_of(int(1).add(&string("2"))), ErrorKind::NotNum);
}

#[test]
fn test_null_operand_is_invalid_constant() {
    assert_eq!(kind_of(State::Null.add(&int(1))), ErrorKind::InvalidConstant);
    assert_eq!(kind_of(int(1).times(&State::Null)), ErrorKind::InvalidConstant);
    assert_eq!(kind_of(State::Null.negated()), ErrorKind::InvalidConstant);
}

#[test]
fn test_non_numeric_operand_is_not_num() {
    assert_eq!(kind_of(State::TRUE.minus(&int(1))), ErrorKind::NotNum);
    assert_eq!(kind_of(string("4").minus(&int(3))), ErrorKind::NotNum);
    assert_eq!(kind_of(string("x").negated()), ErrorKind::NotNum);
}

#[test]
fn test_minus_and_times() {
    assert_eq!(int(4).minus(&int(3)).unwrap(), int(1));
    assert_eq!(double(4.0).minus(&int(3)).unwrap(), double(1.0));
    assert_eq!(int(2).times(&int(3)).unwrap(), int(6));
    assert_eq!(double(2.0).times(&State::Int(None)).unwrap(), State::Double(None));
}

#[test]
fn test_divide_int_truncates() {
    assert_eq!(int(6).divide(&int(2)).unwrap(), int(3));
    assert_eq!(int(7).divide(&int(2)).unwrap(), int(3));
    assert_eq!(int(-7).divide(&int(2)).unwrap(), int(-3));
    assert_eq!(double(6.0).divide(&int(2)).unwrap(), double(3.0));
}

#[test]
fn test_divide_by_int_zero_is_real_division() {
    assert_eq!(int(5).divide(&int(0)).unwrap(), double(f64::INFINITY));
    assert_eq!(int(-5).divide(&int(0)).unwrap(), double(f64::NEG_INFINITY));
    match int(0).divide(&int(0)).unwrap() {
        State::Double(Some(v)) => assert!(v.is_nan()),
        other => panic!("expected NaN, got {other:?}"),
    }
    assert_eq!(State::Int(None).divide(&int(0)).unwrap(), State::Double(None));
}

#[test]
fn test_divide_unknown() {
    assert_eq!(int(6).divide(&State::Int(None)).unwrap(), State::Int(None));
    assert_eq!(State::Int(None).divide(&double(2.0)).unwrap(), State::Double(None));
    assert_eq!(State::Num.divide(&double(2.0)).unwrap(), State::Double(None));
}

#[test]
fn test_remainder() {
    assert_eq!(int(7).remainder(&int(2)).unwrap(), int(1));
    assert_eq!(int(-7).remainder(&int(2)).unwrap(), int(-1));
    assert_eq!(double(7.0).remainder(&int(2)).unwrap(), double(1.0));
    assert_eq!(double(6.0).remainder(&State::Int(None)).unwrap(), State::Double(None));
    match int(7).remainder(&int(0)).unwrap() {
        State::Double(Some(v)) => assert!(v.is_nan()),
        other => panic!("expected NaN, got {other:?}"),
    }
}

#[test]
fn test_integer_divide() {
    assert_eq!(int(6).integer_divide(&int(2)).unwrap(), int(3));
    assert_eq!(double(6.0).integer_divide(&double(2.0)).unwrap(), int(3));
    assert_eq!(double(7.5).integer_divide(&int(2)).unwrap(), int(3));
    assert_eq!(double(-7.5).integer_divide(&int(2)).unwrap(), int(-3));
    assert_eq!(int(6).integer_divide(&State::Double(None)).unwrap(), State::Int(None));
    assert_eq!(State::Num.integer_divide(&double(2.0)).unwrap(), State::Int(None));
}

#[test]
fn test_integer_divide_by_zero() {
    assert_eq!(
        kind_of(int(5).integer_divide(&int(0))),
        ErrorKind::IntegerDivideByZero
    );
    assert_eq!(State::Int(None).integer_divide(&int(0)).unwrap(), State::Int(None));
    assert_eq!(
        kind_of(double(5.0).integer_divide(&double(0.0))),
        ErrorKind::ThrowsAtRuntime
    );
}

#[test]
fn test_negated() {
    assert_eq!(int(3).negated().unwrap(), int(-3));
    assert_eq!(double(2.0).negated().unwrap(), double(-2.0));
    assert_eq!(State::Int(None).negated().unwrap(), State::Int(None));
    assert_eq!(State::Dynamic.negated().unwrap(), State::Num);
}

// ── bitwise ─────────────────────────────────────────────────────────────────

#[test]
fn test_bit_ops() {
    assert_eq!(int(6).bit_and(&int(3)).unwrap(), int(2));
    assert_eq!(int(6).bit_or(&int(3)).unwrap(), int(7));
    assert_eq!(int(6).bit_xor(&int(3)).unwrap(), int(5));
    assert_eq!(int(3).bit_not().unwrap(), int(-4));
    assert_eq!(int(-1).bit_and(&int(0xff)).unwrap(), int(0xff));
}

#[test]
fn test_bit_ops_unknown() {
    assert_eq!(int(6).bit_and(&State::Int(None)).unwrap(), State::Int(None));
    assert_eq!(State::Num.bit_or(&int(1)).unwrap(), State::Int(None));
    assert_eq!(State::Dynamic.bit_not().unwrap(), State::Int(None));
}

#[test]
fn test_bit_ops_reject_non_int() {
    assert_eq!(kind_of(int(6).bit_and(&string("3"))), ErrorKind::NotInt);
    assert_eq!(kind_of(double(6.0).bit_xor(&int(3))), ErrorKind::NotInt);
    assert_eq!(kind_of(string("6").bit_not()), ErrorKind::NotInt);
    assert_eq!(kind_of(int(6).bit_or(&State::Null)), ErrorKind::InvalidConstant);
}

#[test]
fn test_shifts() {
    assert_eq!(int(6).shift_left(&int(3)).unwrap(), int(48));
    assert_eq!(int(48).shift_right(&int(3)).unwrap(), int(6));
    assert_eq!(int(-48).shift_right(&int(3)).unwrap(), int(-6));
    assert_eq!(int(-1).shift_right(&int(10)).unwrap(), int(-1));
    assert_eq!(
        int(1).shift_left(&int(100)).unwrap(),
        State::Int(Some(BigInt::from(1) << 100usize))
    );
}

#[test]
fn test_shift_by_wide_amount_is_unknown() {
    let huge = State::from_int(i64::MAX);
    assert_eq!(int(6).shift_left(&huge).unwrap(), State::Int(None));
    assert_eq!(int(48).shift_right(&huge).unwrap(), State::Int(None));
    assert_eq!(int(1).shift_left(&int(1 << 31)).unwrap(), State::Int(None));
}

#[test]
fn test_largest_accepted_shift_amount() {
    let widest = int(0x7fff_ffff);
    assert_eq!(int(0).shift_left(&widest).unwrap(), int(0));
    assert_eq!(int(1).shift_right(&widest).unwrap(), int(0));
    assert_eq!(int(-1).shift_right(&widest).unwrap(), int(-1));
    assert_eq!(int(0).shift_left(&int(0x8000_0000)).unwrap(), State::Int(None));
}

#[test]
fn test_shift_failures() {
    assert_eq!(kind_of(int(6).shift_left(&State::StringVal(None))), ErrorKind::NotInt);
    assert_eq!(kind_of(State::StringVal(None).shift_right(&int(3))), ErrorKind::NotInt);
    assert_eq!(kind_of(int(6).shift_left(&int(-1))), ErrorKind::ThrowsAtRuntime);
}

// ── comparison ──────────────────────────────────────────────────────────────

#[test]
fn test_equal_equal_scalars() {
    assert_eq!(State::FALSE.equal_equal(&State::FALSE).unwrap(), State::TRUE);
    assert_eq!(int(-5).equal_equal(&int(5)).unwrap(), State::FALSE);
    assert_eq!(double(2.0).equal_equal(&double(2.0)).unwrap(), State::TRUE);
    assert_eq!(int(2).equal_equal(&double(2.0)).unwrap(), State::TRUE);
    assert_eq!(string("abc").equal_equal(&string("def")).unwrap(), State::FALSE);
    assert_eq!(State::Null.equal_equal(&State::Null).unwrap(), State::TRUE);
}

#[test]
fn test_equal_equal_unknown() {
    assert_eq!(State::Bool(None).equal_equal(&State::FALSE).unwrap(), State::Bool(None));
    assert_eq!(State::Int(None).equal_equal(&int(3)).unwrap(), State::Bool(None));
    assert_eq!(State::StringVal(None).equal_equal(&string("d")).unwrap(), State::Bool(None));
    assert_eq!(State::Dynamic.equal_equal(&int(1)).unwrap(), State::Bool(None));
    assert_eq!(State::Num.equal_equal(&double(1.0)).unwrap(), State::Bool(None));
}

#[test]
fn test_equal_equal_distinct_variants_is_false() {
    assert_eq!(State::TRUE.equal_equal(&int(1)).unwrap(), State::FALSE);
    assert_eq!(string("1").equal_equal(&int(1)).unwrap(), State::FALSE);
    assert_eq!(State::Null.equal_equal(&int(0)).unwrap(), State::FALSE);
}

#[test]
fn test_equal_equal_nan() {
    assert_eq!(double(f64::NAN).equal_equal(&double(f64::NAN)).unwrap(), State::FALSE);
}

#[test]
fn test_equal_equal_lists() {
    let a = list(vec![int(1), int(2)]);
    let b = list(vec![int(1), int(2)]);
    let c = list(vec![int(2), int(1)]);
    assert_eq!(a.equal_equal(&b).unwrap(), State::TRUE);
    assert_eq!(a.equal_equal(&c).unwrap(), State::FALSE);
    assert_eq!(a.equal_equal(&list(vec![int(1)])).unwrap(), State::FALSE);
    assert_eq!(list(vec![]).equal_equal(&list(vec![])).unwrap(), State::TRUE);
    assert_eq!(
        a.equal_equal(&list(vec![int(1), State::Int(None)])).unwrap(),
        State::Bool(None)
    );
    // A known mismatch decides even next to an unknown element.
    assert_eq!(
        a.equal_equal(&list(vec![State::Int(None), int(3)])).unwrap(),
        State::FALSE
    );
}

#[test]
fn test_relations() {
    assert_eq!(int(2).greater_than(&int(1)).unwrap(), State::TRUE);
    assert_eq!(double(1.0).greater_than(&int(2)).unwrap(), State::FALSE);
    assert_eq!(int(2).greater_than_or_equal(&int(2)).unwrap(), State::TRUE);
    assert_eq!(int(1).less_than(&int(2)).unwrap(), State::TRUE);
    assert_eq!(double(2.0).less_than_or_equal(&int(1)).unwrap(), State::FALSE);
    assert_eq!(int(1).less_than(&State::Double(None)).unwrap(), State::Bool(None));
    assert_eq!(State::Num.greater_than(&int(1)).unwrap(), State::Bool(None));
}

#[test]
fn test_relations_reject_non_numeric() {
    assert_eq!(kind_of(int(1).greater_than(&string("2"))), ErrorKind::NotNum);
    assert_eq!(kind_of(string("1").less_than(&int(2))), ErrorKind::NotNum);
    assert_eq!(kind_of(State::Null.less_than(&int(2))), ErrorKind::InvalidConstant);
}

// ── logic ───────────────────────────────────────────────────────────────────

#[test]
fn test_logical_and() {
    assert_eq!(State::FALSE.logical_and(&State::TRUE).unwrap(), State::FALSE);
    assert_eq!(State::TRUE.logical_and(&State::TRUE).unwrap(), State::TRUE);
    assert_eq!(State::TRUE.logical_and(&State::FALSE).unwrap(), State::FALSE);
    assert_eq!(State::FALSE.logical_and(&State::Bool(None)).unwrap(), State::FALSE);
    assert_eq!(State::Bool(None).logical_and(&State::TRUE).unwrap(), State::Bool(None));
    assert_eq!(State::TRUE.logical_and(&State::Dynamic).unwrap(), State::Bool(None));
}

#[test]
fn test_logical_and_checks_both_operands() {
    assert_eq!(kind_of(State::FALSE.logical_and(&State::Null)), ErrorKind::NotBool);
    assert_eq!(kind_of(State::TRUE.logical_and(&State::Null)), ErrorKind::NotBool);
    assert_eq!(kind_of(State::FALSE.logical_and(&string("false"))), ErrorKind::NotBool);
    assert_eq!(kind_of(State::Null.logical_and(&State::FALSE)), ErrorKind::NotBool);
}

#[test]
fn test_logical_or() {
    assert_eq!(State::TRUE.logical_or(&State::FALSE).unwrap(), State::TRUE);
    assert_eq!(State::FALSE.logical_or(&State::TRUE).unwrap(), State::TRUE);
    assert_eq!(State::FALSE.logical_or(&State::FALSE).unwrap(), State::FALSE);
    assert_eq!(State::Bool(None).logical_or(&State::FALSE).unwrap(), State::Bool(None));
    assert_eq!(kind_of(State::TRUE.logical_or(&State::Null)), ErrorKind::NotBool);
    assert_eq!(kind_of(string("true").logical_or(&State::FALSE)), ErrorKind::NotBool);
}

#[test]
fn test_logical_not() {
    assert_eq!(State::TRUE.logical_not().unwrap(), State::FALSE);
    assert_eq!(State::Bool(None).logical_not().unwrap(), State::Bool(None));
    assert_eq!(State::Dynamic.logical_not().unwrap(), State::Bool(None));
    assert_eq!(kind_of(State::Null.logical_not()), ErrorKind::NotBool);
    assert_eq!(kind_of(State::StringVal(None).logical_not()), ErrorKind::NotBool);
}

#[test]
fn test_convert_to_bool() {
    assert_eq!(State::TRUE.convert_to_bool().unwrap(), State::TRUE);
    assert_eq!(int(1).convert_to_bool().unwrap(), State::FALSE);
    assert_eq!(string("true").convert_to_bool().unwrap(), State::FALSE);
    assert_eq!(State::Dynamic.convert_to_bool().unwrap(), State::Bool(None));
    assert_eq!(kind_of(State::Null.convert_to_bool()), ErrorKind::ThrowsAtRuntime);
}

// ── strings ─────────────────────────────────────────────────────────────────

#[test]
fn test_concatenate() {
    assert_eq!(string("abc").concatenate(&string("def")).unwrap(), string("abcdef"));
    assert_eq!(State::StringVal(None).concatenate(&string("x")).unwrap(), State::StringVal(None));
    assert_eq!(string("abc").concatenate(&State::StringVal(None)).unwrap(), State::StringVal(None));
    assert_eq!(kind_of(string("abc").concatenate(&int(3))), ErrorKind::NotBool);
    assert_eq!(kind_of(int(2).concatenate(&string("def"))), ErrorKind::InvalidConstant);
}

#[test]
fn test_string_length_counts_utf16_units() {
    assert_eq!(string("abc").string_length().unwrap(), int(3));
    assert_eq!(string("héllo").string_length().unwrap(), int(5));
    assert_eq!(string("😀").string_length().unwrap(), int(2));
    assert_eq!(State::StringVal(None).string_length().unwrap(), State::Int(None));
    assert_eq!(kind_of(int(0).string_length()), ErrorKind::NotBool);
}

#[test]
fn test_convert_to_string() {
    assert_eq!(State::FALSE.convert_to_string().unwrap(), string("false"));
    assert_eq!(State::Bool(None).convert_to_string().unwrap(), State::StringVal(None));
    assert_eq!(int(5).convert_to_string().unwrap(), string("5"));
    assert_eq!(double(2.0).convert_to_string().unwrap(), string("2.0"));
    assert_eq!(State::Null.convert_to_string().unwrap(), string("null"));
    assert_eq!(
        State::Symbol(Some("foo".into())).convert_to_string().unwrap(),
        string("foo")
    );
    assert_eq!(
        State::TypeRef(Some(ElementHandle::new("Point"))).convert_to_string().unwrap(),
        string("Point")
    );
    assert_eq!(list(vec![int(1)]).convert_to_string().unwrap(), State::StringVal(None));
    assert_eq!(State::Num.convert_to_string().unwrap(), State::StringVal(None));
}

#[test]
fn test_format_double() {
    assert_eq!(format_double(2.0), "2.0");
    assert_eq!(format_double(-0.0), "-0.0");
    assert_eq!(format_double(0.1), "0.1");
    assert_eq!(format_double(1e20), "100000000000000000000.0");
    assert_eq!(format_double(1e21), "1e+21");
    assert_eq!(format_double(1.5e-7), "1.5e-7");
    assert_eq!(format_double(f64::NAN), "NaN");
    assert_eq!(format_double(f64::NEG_INFINITY), "-Infinity");
}

// ── queries ─────────────────────────────────────────────────────────────────

#[test]
fn test_has_exact_value() {
    assert!(State::Bool(None).has_exact_value());
    assert!(State::Int(None).has_exact_value());
    assert!(State::StringVal(None).has_exact_value());
    assert!(State::Null.has_exact_value());
    assert!(!State::Num.has_exact_value());
    assert!(!State::Dynamic.has_exact_value());
    assert!(list(vec![int(23)]).has_exact_value());
    assert!(!list(vec![State::Dynamic]).has_exact_value());
}

#[test]
fn test_value() {
    assert_eq!(State::TRUE.value(), Some(ExactValue::Bool(true)));
    assert_eq!(int(23).value(), Some(ExactValue::Int(BigInt::from(23))));
    assert_eq!(State::Double(None).value(), None);
    assert_eq!(State::Null.value(), Some(ExactValue::Null));
    assert_eq!(
        list(vec![int(1), string("a")]).value(),
        Some(ExactValue::List(vec![
            ExactValue::Int(BigInt::from(1)),
            ExactValue::String("a".into())
        ]))
    );
    assert_eq!(list(vec![int(1), State::Int(None)]).value(), None);
}

#[test]
fn test_is_unknown() {
    assert!(State::Int(None).is_unknown());
    assert!(State::Num.is_unknown());
    assert!(!int(1).is_unknown());
    assert!(!State::Null.is_unknown());
}

#[test]
fn test_structural_equality_treats_nan_as_equal() {
    assert_eq!(double(f64::NAN), double(f64::NAN));
    assert_ne!(double(0.0), double(-0.0));
}

#[test]
fn test_display() {
    assert_eq!(int(3).to_string(), "3");
    assert_eq!(State::Int(None).to_string(), "-unknown-");
    assert_eq!(string("a").to_string(), "\"a\"");
    assert_eq!(list(vec![int(1), State::Null]).to_string(), "[1, null]");
}
