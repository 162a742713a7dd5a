#![expect(clippy::unwrap_used, reason = "test code")]

use pfa_types::{Field, Idx, Pool};
use pretty_assertions::assert_eq;

use crate::test_helpers::{code, doubles, run};
use crate::{Callee, EvalError, EvalResult, Value};

fn layer(weights: &[&[f64]], bias: &[f64]) -> Value {
    let rows = weights.iter().map(|row| Value::doubles(row.to_vec())).collect();
    Value::record([
        ("weights", Value::array(rows)),
        ("bias", Value::doubles(bias.to_vec())),
    ])
}

fn relu() -> Callee {
    Callee::native("relu", |args| match args.as_slice() {
        [Value::Double(x)] => Ok(Value::Double(x.max(0.0))),
        _ => Err(EvalError::user("relu takes one double", None)),
    })
}

fn simple_layers(datum: &[f64], layers: Vec<Value>, activation: Callee) -> EvalResult {
    let mut pool = Pool::new();
    let vector = pool.array(Idx::DOUBLE);
    let matrix = pool.array(vector);
    let layer_ty = pool
        .record(
            None,
            vec![Field::new("weights", matrix), Field::new("bias", vector)],
        )
        .unwrap();
    let model_ty = pool.array(layer_ty);
    let activation_ty = pool.function(vec![Idx::DOUBLE], Idx::DOUBLE);
    run(
        &mut pool,
        "model.neural.simpleLayers",
        &[vector, model_ty, activation_ty],
        &[
            Value::doubles(datum.to_vec()),
            Value::array(layers),
            Value::function(activation),
        ],
    )
}

#[test]
fn activation_applies_to_hidden_layers_only() {
    let hidden = layer(&[&[1.0, 0.0], &[0.0, 1.0]], &[0.0, -5.0]);
    let output = layer(&[&[1.0, 1.0]], &[-10.0]);
    let out = simple_layers(&[2.0, 3.0], vec![hidden, output], relu());
    // hidden: relu([2, -2]) = [2, 0]; output: 2 + 0 - 10, no activation
    assert_eq!(doubles(out), vec![-8.0]);
}

#[test]
fn single_layer_is_affine() {
    let out = simple_layers(&[1.0], vec![layer(&[&[3.0], &[-1.0]], &[1.0, 0.0])], relu());
    assert_eq!(doubles(out), vec![4.0, -1.0]);
}

#[test]
fn layer_failures() {
    assert_eq!(code(simple_layers(&[1.0], vec![], relu())), 11000);
    let misaligned = layer(&[&[1.0, 2.0]], &[0.0]);
    assert_eq!(code(simple_layers(&[1.0], vec![misaligned], relu())), 11001);
    let short_bias = layer(&[&[1.0]], &[]);
    assert_eq!(code(simple_layers(&[1.0], vec![short_bias], relu())), 11001);
}

#[test]
fn activation_failure_propagates_unchanged() {
    let failing = Callee::native("boom", |_| Err(EvalError::user("boom", Some(7))));
    let hidden = layer(&[&[1.0]], &[0.0]);
    let output = layer(&[&[1.0]], &[0.0]);
    let out = simple_layers(&[1.0], vec![hidden, output], failing);
    assert_eq!(out, Err(EvalError::user("boom", Some(7))));
}
