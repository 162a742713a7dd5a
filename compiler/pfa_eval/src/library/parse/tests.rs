#![expect(clippy::unwrap_used, reason = "test code")]

use pfa_types::{Idx, Pool};
use pretty_assertions::assert_eq;

use crate::test_helpers::{code, run};
use crate::{EvalResult, Value};

fn integral(name: &str, text: &str, base: i32) -> EvalResult {
    run(
        &mut Pool::new(),
        name,
        &[Idx::STRING, Idx::INT],
        &[Value::string(text), Value::Int(base)],
    )
}

fn floating(name: &str, text: &str) -> EvalResult {
    run(&mut Pool::new(), name, &[Idx::STRING], &[Value::string(text)])
}

#[test]
fn integers_in_any_base() {
    assert_eq!(integral("parse.int", " 42 ", 10).unwrap(), Value::Int(42));
    assert_eq!(integral("parse.int", "-ff", 16).unwrap(), Value::Int(-255));
    assert_eq!(integral("parse.int", "z", 36).unwrap(), Value::Int(35));
    assert_eq!(
        integral("parse.long", "9223372036854775807", 10).unwrap(),
        Value::Long(i64::MAX)
    );
}

#[test]
fn integer_failures() {
    assert_eq!(code(integral("parse.int", "12x", 10)), 33000);
    assert_eq!(code(integral("parse.int", "2147483648", 10)), 33000);
    assert_eq!(code(integral("parse.long", "9223372036854775808", 10)), 33010);
    assert_eq!(code(integral("parse.int", "1", 1)), 33001);
    assert_eq!(code(integral("parse.long", "1", 37)), 33011);
}

#[test]
fn floating_point() {
    assert_eq!(floating("parse.double", "2.5e3").unwrap(), Value::Double(2500.0));
    assert_eq!(floating("parse.float", " -0.5").unwrap(), Value::Float(-0.5));
    assert_eq!(floating("parse.float", "1e39").unwrap(), Value::Float(f32::INFINITY));
    assert_eq!(floating("parse.float", "-1e39").unwrap(), Value::Float(f32::NEG_INFINITY));
    assert_eq!(floating("parse.float", "1e-50").unwrap(), Value::Float(0.0));
    assert_eq!(
        floating("parse.double", "inf").unwrap(),
        Value::Double(f64::INFINITY)
    );
}

#[test]
fn floating_point_failures() {
    assert_eq!(code(floating("parse.float", "one")), 33020);
    assert_eq!(code(floating("parse.double", "")), 33030);
}
