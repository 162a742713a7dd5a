//! Shared helpers for library tests.

#![expect(clippy::unwrap_used, reason = "test code")]

use pfa_patterns::Version;
use pfa_types::{Idx, Pool};

use crate::{EvalError, EvalResult, Executor, FunctionRegistry, SharedRegistry, Value};

pub(crate) fn registry() -> SharedRegistry<FunctionRegistry> {
    FunctionRegistry::standard().unwrap()
}

/// Resolve `name` for `types` and run it on `args`.
pub(crate) fn run(pool: &mut Pool, name: &str, types: &[Idx], args: &[Value]) -> EvalResult {
    let registry = registry();
    let call = registry
        .resolve(pool, name, types, Version::default())
        .unwrap();
    Executor::new(&registry, pool).invoke(&call, args, None)
}

/// Run a function whose parameters are all `double`.
pub(crate) fn run_doubles(name: &str, args: &[f64]) -> EvalResult {
    let mut pool = Pool::new();
    let types = vec![Idx::DOUBLE; args.len()];
    let values: Vec<Value> = args.iter().copied().map(Value::Double).collect();
    run(&mut pool, name, &types, &values)
}

/// The `double` result of a call that must succeed.
pub(crate) fn double(result: EvalResult) -> f64 {
    match result.unwrap() {
        Value::Double(x) => x,
        other => panic!("expected a double, got {other:?}"),
    }
}

/// The failure code of a call that must fail at runtime.
pub(crate) fn code(result: EvalResult) -> i32 {
    match result {
        Err(EvalError::Runtime(err)) => err.code,
        other => panic!("expected a runtime failure, got {other:?}"),
    }
}

pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "{actual} is not close to {expected}"
    );
}

/// Values of an `array<double>` result.
pub(crate) fn doubles(result: EvalResult) -> Vec<f64> {
    match result.unwrap() {
        Value::Array(items) => items.iter().map(|v| v.as_f64().unwrap()).collect(),
        other => panic!("expected an array, got {other:?}"),
    }
}
