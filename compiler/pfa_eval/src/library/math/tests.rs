#![expect(clippy::unwrap_used, reason = "test code")]

use pfa_types::{Idx, Pool};
use pretty_assertions::assert_eq;

use crate::test_helpers::{assert_close, code, double, run, run_doubles};
use crate::Value;

fn log(x: f64, base: i32) -> crate::EvalResult {
    run(
        &mut Pool::new(),
        "m.log",
        &[Idx::DOUBLE, Idx::INT],
        &[Value::Double(x), Value::Int(base)],
    )
}

#[test]
fn constants() {
    assert_eq!(double(run_doubles("m.pi", &[])), std::f64::consts::PI);
    assert_eq!(double(run_doubles("m.e", &[])), std::f64::consts::E);
}

#[test]
fn out_of_domain_inputs_give_nan_or_infinity() {
    assert!(double(run_doubles("m.acos", &[2.0])).is_nan());
    assert!(double(run_doubles("m.sqrt", &[-1.0])).is_nan());
    assert!(double(run_doubles("m.ln", &[-1.0])).is_nan());
    assert_eq!(double(run_doubles("m.ln", &[0.0])), f64::NEG_INFINITY);
    assert_eq!(double(run_doubles("m.log10", &[0.0])), f64::NEG_INFINITY);
}

#[test]
fn log_in_integer_base() {
    assert_close(double(log(8.0, 2)), 3.0);
    assert_eq!(double(log(0.0, 10)), f64::NEG_INFINITY);
    assert!(double(log(-1.0, 10)).is_nan());
    assert_eq!(code(log(8.0, 0)), 27170);
    assert_eq!(code(log(8.0, -2)), 27170);
}

#[test]
fn log_base_one_follows_the_limit() {
    assert_eq!(double(log(8.0, 1)), f64::INFINITY);
    assert_eq!(double(log(0.5, 1)), f64::NEG_INFINITY);
    assert!(double(log(1.0, 1)).is_nan());
}

#[test]
fn abs_and_copysign_keep_type() {
    let mut pool = Pool::new();
    let abs = run(&mut pool, "m.abs", &[Idx::INT], &[Value::Int(-3)]);
    assert_eq!(abs.unwrap(), Value::Int(3));
    let min = run(&mut pool, "m.abs", &[Idx::INT], &[Value::Int(i32::MIN)]);
    assert_eq!(code(min), 27020);
    let long_min = run(&mut pool, "m.abs", &[Idx::LONG], &[Value::Long(i64::MIN)]);
    assert_eq!(code(long_min), 27021);

    let signed = run(
        &mut pool,
        "m.copysign",
        &[Idx::LONG, Idx::LONG],
        &[Value::Long(5), Value::Long(-1)],
    );
    assert_eq!(signed.unwrap(), Value::Long(-5));
    assert_eq!(double(run_doubles("m.copysign", &[2.0, -0.0])), -2.0);
}

#[test]
fn round_and_rint() {
    let mut pool = Pool::new();
    let rounded = run(&mut pool, "m.round", &[Idx::DOUBLE], &[Value::Double(2.5)]);
    assert_eq!(rounded.unwrap(), Value::Long(3));
    let rounded = run(&mut pool, "m.round", &[Idx::FLOAT], &[Value::Float(-2.5)]);
    assert_eq!(rounded.unwrap(), Value::Int(-2));
    let huge = run(&mut pool, "m.round", &[Idx::FLOAT], &[Value::Float(1e20)]);
    assert_eq!(code(huge), 27190);
    let huge = run(&mut pool, "m.round", &[Idx::DOUBLE], &[Value::Double(1e300)]);
    assert_eq!(code(huge), 27191);

    assert_eq!(double(run_doubles("m.rint", &[2.5])), 2.0);
    assert_eq!(double(run_doubles("m.rint", &[3.5])), 4.0);
}

#[test]
fn signum_of_nan_is_zero() {
    assert_eq!(run_doubles("m.signum", &[-4.0]).unwrap(), Value::Int(-1));
    assert_eq!(run_doubles("m.signum", &[f64::NAN]).unwrap(), Value::Int(0));
}

#[test]
fn two_argument_functions() {
    assert_close(double(run_doubles("m.hypot", &[3.0, 4.0])), 5.0);
    assert_close(
        double(run_doubles("m.atan2", &[1.0, 1.0])),
        std::f64::consts::FRAC_PI_4,
    );
}
