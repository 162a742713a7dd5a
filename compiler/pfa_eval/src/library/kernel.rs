//! `m.kernel.*`: kernel functions for support vector machines.
//!
//! Each kernel takes two equal-length vectors; unequal lengths fail with
//! offset 0.

use pfa_patterns::{Pattern, Signature};

use super::args::{double, doubles, take};
use super::numeric::{dot, pow_like_java};
use crate::{Builtin, CallBoundary, CallContext, EvalError, EvalResult, Value};

pub(super) fn provide() -> Vec<Builtin> {
    vec![
        Builtin::new("m.kernel.linear", 23000, vec![signature(&[])], linear),
        Builtin::new("m.kernel.rbf", 23010, vec![signature(&["gamma"])], rbf),
        Builtin::new(
            "m.kernel.poly",
            23020,
            vec![signature(&["gamma", "intercept", "degree"])],
            poly,
        ),
        Builtin::new(
            "m.kernel.sigmoid",
            23030,
            vec![signature(&["gamma", "intercept"])],
            sigmoid,
        ),
    ]
}

/// `(x: array<double>, y: array<double>, <scalars>: double) -> double`
fn signature(scalars: &[&str]) -> Signature {
    let vectors = ["x", "y"].map(|name| (name, Pattern::array(Pattern::Double)));
    Signature::new(
        vectors
            .into_iter()
            .chain(scalars.iter().map(|&name| (name, Pattern::Double))),
        Pattern::Double,
    )
}

fn mismatched(ctx: &CallContext<'_>) -> EvalError {
    ctx.fail(0, "arrays must have same length")
}

/// The two vectors and their dot product.
fn vectors(
    ctx: &CallContext<'_>,
    x: &Value,
    y: &Value,
) -> Result<(Vec<f64>, Vec<f64>, f64), EvalError> {
    let (x, y) = (doubles(ctx, x)?, doubles(ctx, y)?);
    let product = dot(&x, &y).ok_or_else(|| mismatched(ctx))?;
    Ok((x, y, product))
}

fn linear(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y] = take(ctx, args)?;
    let (_, _, product) = vectors(ctx, x, y)?;
    Ok(Value::Double(product))
}

/// `exp(-gamma * |x - y|^2)`
fn rbf(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y, gamma] = take(ctx, args)?;
    let (x, y, _) = vectors(ctx, x, y)?;
    let distance: f64 = x.iter().zip(&y).map(|(a, b)| (a - b) * (a - b)).sum();
    Ok(Value::Double((-double(ctx, gamma)? * distance).exp()))
}

/// `(gamma * x.y + intercept) ^ degree`
fn poly(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y, gamma, intercept, degree] = take(ctx, args)?;
    let (_, _, product) = vectors(ctx, x, y)?;
    let base = double(ctx, gamma)? * product + double(ctx, intercept)?;
    Ok(Value::Double(pow_like_java(base, double(ctx, degree)?)))
}

/// `tanh(gamma * x.y + intercept)`
fn sigmoid(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y, gamma, intercept] = take(ctx, args)?;
    let (_, _, product) = vectors(ctx, x, y)?;
    Ok(Value::Double(
        (double(ctx, gamma)? * product + double(ctx, intercept)?).tanh(),
    ))
}
