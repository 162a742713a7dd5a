//! `model.naive.*`: naive Bayes log-likelihoods.
//!
//! Each function scores one datum against the model of a single class.
//! Features are aligned by position for arrays and by key for maps.

use std::collections::BTreeMap;

use pfa_patterns::{Pattern, Signature};

use super::args::{array, double_field, double_map, doubles, field, record, string, take};
use crate::{Builtin, CallBoundary, CallContext, EvalError, EvalResult, Value};

/// Smallest positive normal double, added to multinomial probabilities so a
/// zero-count feature does not produce `-inf`.
const TINY: f64 = 2.225_073_858_507_201_4e-308;

pub(super) fn provide() -> Vec<Builtin> {
    let moments = || {
        Pattern::wild_record("C", [("mean", Pattern::Double), ("variance", Pattern::Double)])
    };
    let values = |ty: Pattern| Pattern::wild_record("C", [("values", ty)]);
    let array_of_doubles = || Pattern::array(Pattern::Double);
    let map_of_doubles = || Pattern::map(Pattern::Double);
    let scored = |datum: Pattern, model: Pattern| {
        Signature::new([("datum", datum), ("classModel", model)], Pattern::Double)
    };

    vec![
        Builtin::new(
            "model.naive.gaussian",
            10000,
            vec![
                scored(array_of_doubles(), Pattern::array(moments())),
                scored(map_of_doubles(), Pattern::map(moments())),
            ],
            gaussian,
        ),
        Builtin::new(
            "model.naive.multinomial",
            10010,
            vec![
                scored(array_of_doubles(), array_of_doubles()),
                scored(map_of_doubles(), map_of_doubles()),
                scored(array_of_doubles(), values(array_of_doubles())),
                scored(map_of_doubles(), values(map_of_doubles())),
            ],
            multinomial,
        ),
        Builtin::new(
            "model.naive.bernoulli",
            10020,
            vec![
                scored(Pattern::array(Pattern::String), map_of_doubles()),
                scored(Pattern::array(Pattern::String), values(map_of_doubles())),
            ],
            bernoulli,
        ),
    ]
}

fn misaligned(ctx: &CallContext<'_>) -> EvalError {
    ctx.fail(0, "datum and classModel misaligned")
}

fn gaussian(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [datum, model] = take(ctx, args)?;
    let pairs: Vec<(f64, &Value)> = match (datum, model) {
        (Value::Array(_), Value::Array(classes)) => {
            let xs = doubles(ctx, datum)?;
            if xs.len() != classes.len() {
                return Err(misaligned(ctx));
            }
            xs.into_iter().zip(classes.iter()).collect()
        }
        (Value::Map(_), Value::Map(classes)) => {
            let xs = double_map(ctx, datum)?;
            if !xs.keys().eq(classes.keys()) {
                return Err(misaligned(ctx));
            }
            xs.into_values().zip(classes.values()).collect()
        }
        _ => return Err(ctx.mismatch("an array or map datum with a matching classModel")),
    };

    let mut ll = 0.0;
    for (x, class) in pairs {
        let class = record(ctx, class)?;
        let mean = double_field(ctx, class, "mean")?;
        let variance = double_field(ctx, class, "variance")?;
        if variance <= 0.0 {
            return Err(ctx.fail(1, "variance less than or equal to zero"));
        }
        ll -= 0.5 * (2.0 * std::f64::consts::PI * variance).ln();
        ll -= 0.5 * (x - mean) * (x - mean) / variance;
    }
    Ok(Value::Double(ll))
}

/// The `values` field of a record-shaped class model, or the model itself.
fn class_values<'v>(ctx: &CallContext<'_>, model: &'v Value) -> Result<&'v Value, EvalError> {
    match model {
        Value::Record(r) => field(ctx, r, "values"),
        other => Ok(other),
    }
}

/// Sum of the class probabilities, which must be non-empty and positive.
fn positive_total(ctx: &CallContext<'_>, probabilities: &[f64]) -> Result<f64, EvalError> {
    if probabilities.is_empty() || probabilities.iter().any(|&p| p <= 0.0 || p.is_nan()) {
        return Err(ctx.fail(1, "classModel must be non-empty and strictly positive"));
    }
    Ok(probabilities.iter().sum())
}

fn multinomial(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [datum, model] = take(ctx, args)?;
    let model = class_values(ctx, model)?;
    let pairs: Vec<(f64, f64)> = match datum {
        Value::Array(_) => {
            let (xs, ps) = (doubles(ctx, datum)?, doubles(ctx, model)?);
            let total = positive_total(ctx, &ps)?;
            if xs.len() != ps.len() {
                return Err(misaligned(ctx));
            }
            xs.into_iter().zip(ps.into_iter().map(|p| p / total)).collect()
        }
        Value::Map(_) => {
            let (xs, ps) = (double_map(ctx, datum)?, double_map(ctx, model)?);
            let total = positive_total(ctx, &ps.values().copied().collect::<Vec<_>>())?;
            if !xs.keys().eq(ps.keys()) {
                return Err(misaligned(ctx));
            }
            xs.into_values()
                .zip(ps.into_values().map(|p| p / total))
                .collect()
        }
        _ => return Err(ctx.mismatch("an array or map datum")),
    };
    Ok(Value::Double(
        pairs.into_iter().map(|(d, p)| d * (p + TINY).ln()).sum(),
    ))
}

/// Log-likelihood of observing exactly the features in `datum`.
fn bernoulli(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [datum, model] = take(ctx, args)?;
    let probabilities: BTreeMap<String, f64> = double_map(ctx, class_values(ctx, model)?)?;

    let mut ll = 0.0;
    for &p in probabilities.values() {
        if p <= 0.0 || p >= 1.0 || p.is_nan() {
            return Err(ctx.fail(
                0,
                "probability in classModel cannot be less than 0 or greater than 1",
            ));
        }
        ll += (1.0 - p).ln();
    }
    for item in array(ctx, datum)? {
        if let Some(&p) = probabilities.get(string(ctx, item)?) {
            ll += p.ln() - (1.0 - p).ln();
        }
    }
    Ok(Value::Double(ll))
}
