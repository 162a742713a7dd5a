//! `m.special.*`: combinatorics and special functions.

use pfa_patterns::{Pattern, Signature};

use super::args::{double, int, take};
use crate::{Builtin, CallBoundary, CallContext, EvalResult, Value};

pub(super) fn provide() -> Vec<Builtin> {
    vec![
        Builtin::new(
            "m.special.nChooseK",
            36000,
            vec![Signature::new(
                [("n", Pattern::Int), ("k", Pattern::Int)],
                Pattern::Int,
            )],
            n_choose_k,
        ),
        Builtin::new(
            "m.special.lnBeta",
            36010,
            vec![Signature::new(
                [("a", Pattern::Double), ("b", Pattern::Double)],
                Pattern::Double,
            )],
            ln_beta,
        ),
        Builtin::new("m.special.erf", 36020, vec![unary()], erf),
        Builtin::new("m.special.erfc", 36040, vec![unary()], erfc),
        Builtin::new("m.special.lnGamma", 36050, vec![unary()], ln_gamma),
    ]
}

fn unary() -> Signature {
    Signature::new([("x", Pattern::Double)], Pattern::Double)
}

/// Binomial coefficient, defined for `0 < k < n`.
fn n_choose_k(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [n, k] = take(ctx, args)?;
    let (n, k) = (int(ctx, n)?, int(ctx, k)?);
    if k <= 0 || n <= k {
        return Err(ctx.fail(0, "domain error"));
    }
    let k = k.min(n - k);
    let mut out: i128 = 1;
    for i in 1..=i128::from(k) {
        // Exact at every step: out is C(n - k + i - 1, i - 1).
        out = out * (i128::from(n) - i128::from(k) + i) / i;
        if out > i128::from(i32::MAX) {
            return Err(ctx.fail(0, "result out of int range"));
        }
    }
    i32::try_from(out)
        .map(Value::Int)
        .map_err(|_| ctx.fail(0, "result out of int range"))
}

fn ln_beta(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [a, b] = take(ctx, args)?;
    let (a, b) = (double(ctx, a)?, double(ctx, b)?);
    if a <= 0.0 || b <= 0.0 {
        return Err(ctx.fail(0, "domain error"));
    }
    Ok(Value::Double(
        libm::lgamma(a) + libm::lgamma(b) - libm::lgamma(a + b),
    ))
}

fn erf(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x] = take(ctx, args)?;
    Ok(Value::Double(libm::erf(double(ctx, x)?)))
}

fn erfc(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x] = take(ctx, args)?;
    Ok(Value::Double(libm::erfc(double(ctx, x)?)))
}

fn ln_gamma(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x] = take(ctx, args)?;
    let x = double(ctx, x)?;
    if x == f64::INFINITY {
        Ok(Value::Double(f64::NAN))
    } else if x <= 0.0 {
        Err(ctx.fail(0, "domain error"))
    } else {
        Ok(Value::Double(libm::lgamma(x)))
    }
}
