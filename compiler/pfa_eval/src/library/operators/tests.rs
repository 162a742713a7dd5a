#![expect(clippy::unwrap_used, reason = "test code")]

use pfa_types::{Idx, Pool};
use pretty_assertions::assert_eq;

use crate::test_helpers::{code, double, run, run_doubles};
use crate::Value;

fn ints(name: &str, x: i32, y: i32) -> crate::EvalResult {
    run(&mut Pool::new(), name, &[Idx::INT, Idx::INT], &[Value::Int(x), Value::Int(y)])
}

fn longs(name: &str, x: i64, y: i64) -> crate::EvalResult {
    run(
        &mut Pool::new(),
        name,
        &[Idx::LONG, Idx::LONG],
        &[Value::Long(x), Value::Long(y)],
    )
}

#[test]
fn arithmetic_keeps_operand_type() {
    assert_eq!(ints("+", 2, 3).unwrap(), Value::Int(5));
    assert_eq!(longs("*", 4, 5).unwrap(), Value::Long(20));
    assert_eq!(double(run_doubles("-", &[1.5, 0.25])), 1.25);
    let sum = run(
        &mut Pool::new(),
        "+",
        &[Idx::FLOAT, Idx::FLOAT],
        &[Value::Float(0.5), Value::Float(0.25)],
    );
    assert_eq!(sum.unwrap(), Value::Float(0.75));
}

#[test]
fn mixed_operand_types_do_not_resolve() {
    let registry = crate::test_helpers::registry();
    let resolved = registry.resolve(
        &mut Pool::new(),
        "+",
        &[Idx::INT, Idx::DOUBLE],
        pfa_patterns::Version::default(),
    );
    assert!(resolved.is_err());
}

#[test]
fn integer_overflow_fails_with_type_specific_code() {
    assert_eq!(code(ints("+", i32::MAX, 1)), 18000);
    assert_eq!(code(longs("+", i64::MAX, 1)), 18001);
    assert_eq!(code(ints("*", i32::MIN, -1)), 18020);
    let neg = run(&mut Pool::new(), "u-", &[Idx::INT], &[Value::Int(i32::MIN)]);
    assert_eq!(code(neg), 18050);
}

#[test]
fn integer_division() {
    assert_eq!(ints("//", 7, 2).unwrap(), Value::Int(3));
    assert_eq!(ints("//", -7, 2).unwrap(), Value::Int(-3));
    assert_eq!(code(ints("//", 1, 0)), 18040);
    assert_eq!(double(run_doubles("/", &[1.0, 0.0])), f64::INFINITY);
}

#[test]
fn modulo_takes_divisor_sign() {
    assert_eq!(ints("%", -7, 3).unwrap(), Value::Int(2));
    assert_eq!(ints("%", 7, -3).unwrap(), Value::Int(-2));
    assert_eq!(double(run_doubles("%", &[-7.5, 2.0])), 0.5);
    assert!(double(run_doubles("%", &[1.0, 0.0])).is_nan());
    assert_eq!(code(ints("%", 1, 0)), 18060);
}

#[test]
fn remainder_takes_dividend_sign() {
    assert_eq!(ints("%%", -7, 3).unwrap(), Value::Int(-1));
    assert_eq!(longs("%%", 7, -3).unwrap(), Value::Long(1));
    assert_eq!(double(run_doubles("%%", &[2.5, f64::INFINITY])), 2.5);
    assert_eq!(code(longs("%%", 1, 0)), 18070);
}

#[test]
fn power_checks_integer_range() {
    assert_eq!(ints("**", 2, 10).unwrap(), Value::Int(1024));
    assert_eq!(code(ints("**", 2, 31)), 18080);
    assert_eq!(code(longs("**", 2, 63)), 18081);
    assert_eq!(double(run_doubles("**", &[2.0, -1.0])), 0.5);
}

#[test]
fn comparison_uses_type_order() {
    let mut pool = Pool::new();
    let strings = [Idx::STRING, Idx::STRING];
    let (a, b) = (Value::string("apple"), Value::string("banana"));
    let out = run(&mut pool, "cmp", &strings, &[a.clone(), b.clone()]);
    assert_eq!(out.unwrap(), Value::Int(-1));
    assert_eq!(
        run(&mut pool, "<", &strings, &[a.clone(), b.clone()]).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        run(&mut pool, "==", &strings, &[a.clone(), a.clone()]).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        run(&mut pool, "max", &strings, &[a, b.clone()]).unwrap(),
        b
    );
}

#[test]
fn enum_comparison_follows_symbol_order() {
    let mut pool = Pool::new();
    let colors = pool
        .enumeration(None, vec!["red".into(), "green".into(), "blue".into()])
        .unwrap();
    let out = run(
        &mut pool,
        ">",
        &[colors, colors],
        &[Value::symbol("blue"), Value::symbol("red")],
    );
    assert_eq!(out.unwrap(), Value::Boolean(true));
}

#[test]
fn min_and_max_break_ties_differently() {
    let mut pool = Pool::new();
    let zero = Value::Double(0.0);
    let negative_zero = Value::Double(-0.0);
    let types = [Idx::DOUBLE, Idx::DOUBLE];
    let max = run(&mut pool, "max", &types, &[zero.clone(), negative_zero.clone()]);
    let min = run(&mut pool, "min", &types, &[zero, negative_zero]);
    assert!(double(max).is_sign_positive());
    assert!(double(min).is_sign_negative());
}

#[test]
fn kleene_logic_propagates_unknown() {
    let mut pool = Pool::new();
    let maybe = pool.union([Idx::BOOLEAN, Idx::NULL]).unwrap();
    let types = [maybe, maybe];
    let mut kleene = |name: &str, x: Value, y: Value| run(&mut pool, name, &types, &[x, y]).unwrap();

    assert_eq!(kleene("&&&", Value::Null, Value::Boolean(false)), Value::Boolean(false));
    assert_eq!(kleene("&&&", Value::Null, Value::Boolean(true)), Value::Null);
    assert_eq!(kleene("|||", Value::Null, Value::Boolean(true)), Value::Boolean(true));
    assert_eq!(kleene("|||", Value::Boolean(false), Value::Null), Value::Null);
}

#[test]
fn boolean_and_bitwise_operators() {
    let mut pool = Pool::new();
    let bools = [Idx::BOOLEAN, Idx::BOOLEAN];
    let xor = run(&mut pool, "^^", &bools, &[Value::Boolean(true), Value::Boolean(true)]);
    assert_eq!(xor.unwrap(), Value::Boolean(false));
    assert_eq!(ints("&", 0b1100, 0b1010).unwrap(), Value::Int(0b1000));
    assert_eq!(longs("^", 0b1100, 0b1010).unwrap(), Value::Long(0b0110));
    let not = run(&mut pool, "~", &[Idx::INT], &[Value::Int(0)]);
    assert_eq!(not.unwrap(), Value::Int(-1));
}
