//! `m.link.*`: inverse link functions for generalized linear models.
//!
//! Each function accepts an `array<double>`, a `map<double>` or a single
//! `double`, and applies elementwise. `softmax` normalizes a whole
//! collection instead and has no scalar form.

use std::collections::BTreeMap;

use pfa_patterns::{Pattern, Signature};

use super::args::{double, take};
use crate::{Builtin, CallBoundary, CallContext, EvalError, EvalResult, Value};

pub(super) fn provide() -> Vec<Builtin> {
    vec![
        Builtin::new("m.link.softmax", 25000, collections(), softmax),
        Builtin::new("m.link.logit", 25010, elementwise(), logit),
        Builtin::new("m.link.probit", 25020, elementwise(), probit),
        Builtin::new("m.link.cloglog", 25030, elementwise(), cloglog),
        Builtin::new("m.link.loglog", 25040, elementwise(), loglog),
        Builtin::new("m.link.cauchit", 25050, elementwise(), cauchit),
        Builtin::new("m.link.softplus", 25060, elementwise(), softplus),
        Builtin::new("m.link.relu", 25070, elementwise(), relu),
        Builtin::new("m.link.tanh", 25080, elementwise(), tanh),
    ]
}

fn collections() -> Vec<Signature> {
    [Pattern::array(Pattern::Double), Pattern::map(Pattern::Double)]
        .into_iter()
        .map(|ty| Signature::new([("x", ty.clone())], ty))
        .collect()
}

fn elementwise() -> Vec<Signature> {
    let mut signatures = collections();
    signatures.push(Signature::new([("x", Pattern::Double)], Pattern::Double));
    signatures
}

/// Apply `f` to a scalar, or to every element of an array or map.
fn apply(ctx: &CallContext<'_>, args: &[Value], f: fn(f64) -> f64) -> EvalResult {
    let [x] = take(ctx, args)?;
    match x {
        Value::Array(items) => items
            .iter()
            .map(|item| Ok(Value::Double(f(double(ctx, item)?))))
            .collect::<Result<Vec<_>, EvalError>>()
            .map(Value::array),
        Value::Map(entries) => entries
            .iter()
            .map(|(key, item)| Ok((key.clone(), Value::Double(f(double(ctx, item)?)))))
            .collect::<Result<BTreeMap<_, _>, EvalError>>()
            .map(Value::map),
        scalar => Ok(Value::Double(f(double(ctx, scalar)?))),
    }
}

/// The shift that keeps `exp` in range: the maximum if the element of
/// largest magnitude is non-negative, the minimum otherwise.
fn softmax_shift(values: &[f64]) -> f64 {
    let dominant = values
        .iter()
        .copied()
        .fold(0.0_f64, |best, v| if v.abs() > best.abs() { v } else { best });
    if dominant >= 0.0 {
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    } else {
        values.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

fn softmax_weights(values: &[f64]) -> Vec<f64> {
    let shift = softmax_shift(values);
    let exps: Vec<f64> = values.iter().map(|v| (v - shift).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

fn softmax(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x] = take(ctx, args)?;
    let empty = || ctx.fail(0, "empty input");
    match x {
        Value::Array(items) => {
            if items.is_empty() {
                return Err(empty());
            }
            let values = items
                .iter()
                .map(|item| double(ctx, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::doubles(softmax_weights(&values)))
        }
        Value::Map(entries) => {
            if entries.is_empty() {
                return Err(empty());
            }
            let values = entries
                .values()
                .map(|item| double(ctx, item))
                .collect::<Result<Vec<_>, _>>()?;
            let weights = softmax_weights(&values);
            Ok(Value::map(
                entries
                    .keys()
                    .cloned()
                    .zip(weights.into_iter().map(Value::Double))
                    .collect(),
            ))
        }
        _ => Err(ctx.mismatch("an array or map")),
    }
}

fn logit(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    apply(ctx, args, |x| 1.0 / (1.0 + (-x).exp()))
}

fn probit(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    apply(ctx, args, |x| (libm::erf(x / std::f64::consts::SQRT_2) + 1.0) / 2.0)
}

fn cloglog(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    apply(ctx, args, |x| 1.0 - (-x.exp()).exp())
}

fn loglog(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    apply(ctx, args, |x| (-x.exp()).exp())
}

fn cauchit(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    apply(ctx, args, |x| 0.5 + x.atan() / std::f64::consts::PI)
}

fn softplus(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    apply(ctx, args, |x| x.exp().ln_1p())
}

/// NaN passes through.
fn relu(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    apply(ctx, args, |x| if x.is_nan() { x } else { x.max(0.0) })
}

fn tanh(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    apply(ctx, args, f64::tanh)
}
