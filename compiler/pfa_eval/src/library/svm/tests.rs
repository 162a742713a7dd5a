#![expect(clippy::unwrap_used, reason = "test code")]

use pfa_types::{Field, Idx, Pool};
use pretty_assertions::assert_eq;

use crate::test_helpers::{code, double, registry, run};
use crate::{EvalResult, Value};

fn support(sup_vec: &[f64], coeff: f64) -> Value {
    Value::record([
        ("supVec", Value::doubles(sup_vec.to_vec())),
        ("coeff", Value::Double(coeff)),
    ])
}

fn score(datum: &[f64], positive: Vec<Value>, negative: Vec<Value>) -> EvalResult {
    let mut pool = Pool::new();
    let vector = pool.array(Idx::DOUBLE);
    let sv = pool
        .record(
            None,
            vec![Field::new("supVec", vector), Field::new("coeff", Idx::DOUBLE)],
        )
        .unwrap();
    let svs = pool.array(sv);
    let model_ty = pool
        .record(
            None,
            vec![
                Field::new("const", Idx::DOUBLE),
                Field::new("posClass", svs),
                Field::new("negClass", svs),
            ],
        )
        .unwrap();
    let registry = registry();
    let kernel_ty = registry.fcnref_type(&mut pool, "m.kernel.linear").unwrap();
    let kernel = registry.fcnref(&mut pool, "m.kernel.linear").unwrap();
    let model = Value::record([
        ("const", Value::Double(0.5)),
        ("posClass", Value::array(positive)),
        ("negClass", Value::array(negative)),
    ]);
    run(
        &mut pool,
        "model.svm.score",
        &[vector, model_ty, kernel_ty],
        &[Value::doubles(datum.to_vec()), model, Value::function(kernel)],
    )
}

#[test]
fn score_sums_weighted_kernel_values() {
    let out = score(
        &[1.0, 2.0],
        vec![support(&[1.0, 0.0], 2.0)],
        vec![support(&[0.0, 1.0], -1.0)],
    );
    // 0.5 + 2 * 1 - 1 * 2
    assert_eq!(double(out), 0.5);
}

#[test]
fn score_needs_support_vectors() {
    assert_eq!(code(score(&[1.0], vec![], vec![])), 12000);
}

#[test]
fn support_vectors_must_match_datum() {
    let out = score(&[1.0, 2.0], vec![support(&[1.0], 1.0)], vec![]);
    assert_eq!(code(out), 12001);
}
