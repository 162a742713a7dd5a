//! `m.*`: elementary functions.
//!
//! Out-of-domain inputs produce NaN or an infinity rather than a failure,
//! except where a function documents otherwise (`m.log` with a non-positive
//! base, integer overflow in `m.abs`, `m.copysign` and `m.round`).

use pfa_patterns::{Pattern, Signature};

use super::args::{double, int, take};
use super::numeric::{to_int, to_long};
use crate::{Builtin, CallBoundary, CallContext, EvalError, EvalResult, Value};

pub(super) fn provide() -> Vec<Builtin> {
    vec![
        Builtin::new("m.pi", 27000, vec![constant()], pi),
        Builtin::new("m.e", 27010, vec![constant()], e),
        Builtin::new("m.abs", 27020, vec![same_number(&["x"])], abs),
        Builtin::new("m.acos", 27030, vec![unary()], acos),
        Builtin::new("m.asin", 27040, vec![unary()], asin),
        Builtin::new("m.atan", 27050, vec![unary()], atan),
        Builtin::new("m.atan2", 27060, vec![binary("y", "x")], atan2),
        Builtin::new("m.ceil", 27070, vec![unary()], ceil),
        Builtin::new("m.copysign", 27080, vec![same_number(&["mag", "sign"])], copysign),
        Builtin::new("m.cos", 27090, vec![unary()], cos),
        Builtin::new("m.cosh", 27100, vec![unary()], cosh),
        Builtin::new("m.exp", 27110, vec![unary()], exp),
        Builtin::new("m.expm1", 27120, vec![unary()], expm1),
        Builtin::new("m.floor", 27130, vec![unary()], floor),
        Builtin::new("m.hypot", 27140, vec![binary("x", "y")], hypot),
        Builtin::new("m.ln", 27150, vec![unary()], ln),
        Builtin::new("m.log10", 27160, vec![unary()], log10),
        Builtin::new(
            "m.log",
            27170,
            vec![Signature::new(
                [("x", Pattern::Double), ("base", Pattern::Int)],
                Pattern::Double,
            )],
            log,
        ),
        Builtin::new("m.ln1p", 27180, vec![unary()], ln1p),
        Builtin::new(
            "m.round",
            27190,
            vec![
                Signature::new([("x", Pattern::Float)], Pattern::Int),
                Signature::new([("x", Pattern::Double)], Pattern::Long),
            ],
            round,
        ),
        Builtin::new("m.rint", 27200, vec![unary()], rint),
        Builtin::new(
            "m.signum",
            27210,
            vec![Signature::new([("x", Pattern::Double)], Pattern::Int)],
            signum,
        ),
        Builtin::new("m.sin", 27220, vec![unary()], sin),
        Builtin::new("m.sinh", 27230, vec![unary()], sinh),
        Builtin::new("m.sqrt", 27240, vec![unary()], sqrt),
        Builtin::new("m.tan", 27250, vec![unary()], tan),
        Builtin::new("m.tanh", 27260, vec![unary()], tanh),
    ]
}

fn constant() -> Signature {
    Signature::new([], Pattern::Double)
}

fn unary() -> Signature {
    Signature::new([("x", Pattern::Double)], Pattern::Double)
}

fn binary(x: &str, y: &str) -> Signature {
    Signature::new([(x, Pattern::Double), (y, Pattern::Double)], Pattern::Double)
}

fn same_number(params: &[&str]) -> Signature {
    Signature::new(
        params.iter().enumerate().map(|(i, &name)| {
            let pattern = if i == 0 {
                Pattern::any_number("A")
            } else {
                Pattern::wildcard("A")
            };
            (name, pattern)
        }),
        Pattern::wildcard("A"),
    )
}

/// Apply `f` to the single `double` argument.
fn unary_double(ctx: &CallContext<'_>, args: &[Value], f: fn(f64) -> f64) -> EvalResult {
    let [x] = take(ctx, args)?;
    Ok(Value::Double(f(double(ctx, x)?)))
}

fn pi(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    take::<0>(ctx, args)?;
    Ok(Value::Double(std::f64::consts::PI))
}

fn e(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    take::<0>(ctx, args)?;
    Ok(Value::Double(std::f64::consts::E))
}

fn abs(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x] = take(ctx, args)?;
    magnitude(ctx, x)
}

/// `|x|` in the type of `x`, failing where the integer range is asymmetric.
fn magnitude(ctx: &CallContext<'_>, x: &Value) -> EvalResult {
    match x {
        Value::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| ctx.fail(0, "int overflow")),
        Value::Long(n) => n
            .checked_abs()
            .map(Value::Long)
            .ok_or_else(|| ctx.fail(1, "long overflow")),
        Value::Float(v) => Ok(Value::Float(v.abs())),
        Value::Double(v) => Ok(Value::Double(v.abs())),
        _ => Err(ctx.mismatch("a number")),
    }
}

fn acos(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::acos)
}

fn asin(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::asin)
}

fn atan(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::atan)
}

fn atan2(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [y, x] = take(ctx, args)?;
    Ok(Value::Double(double(ctx, y)?.atan2(double(ctx, x)?)))
}

fn ceil(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::ceil)
}

/// Magnitude of the first argument with the sign of the second.
fn copysign(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [mag, sign] = take(ctx, args)?;
    let negative = match sign {
        Value::Int(n) => *n < 0,
        Value::Long(n) => *n < 0,
        Value::Float(v) => v.is_sign_negative(),
        Value::Double(v) => v.is_sign_negative(),
        _ => return Err(ctx.mismatch("a number")),
    };
    let positive = magnitude(ctx, mag)?;
    if !negative {
        return Ok(positive);
    }
    Ok(match positive {
        Value::Int(n) => Value::Int(-n),
        Value::Long(n) => Value::Long(-n),
        Value::Float(v) => Value::Float(-v),
        Value::Double(v) => Value::Double(-v),
        other => other,
    })
}

fn cos(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::cos)
}

fn cosh(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::cosh)
}

fn exp(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::exp)
}

fn expm1(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::exp_m1)
}

fn floor(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::floor)
}

fn hypot(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y] = take(ctx, args)?;
    Ok(Value::Double(double(ctx, x)?.hypot(double(ctx, y)?)))
}

fn ln(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::ln)
}

fn log10(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::log10)
}

/// Logarithm in an integer base.
///
/// Base 1 is defined by its limit: `-inf` below 1, NaN at 1, `+inf` above.
fn log(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, base] = take(ctx, args)?;
    let (x, base) = (double(ctx, x)?, int(ctx, base)?);
    if base <= 0 {
        return Err(ctx.fail(0, "base must be positive"));
    }
    let out = if x.is_nan() || x < 0.0 {
        f64::NAN
    } else if x == 0.0 {
        f64::NEG_INFINITY
    } else if base == 1 {
        match x.partial_cmp(&1.0) {
            Some(std::cmp::Ordering::Less) => f64::NEG_INFINITY,
            Some(std::cmp::Ordering::Greater) => f64::INFINITY,
            _ => f64::NAN,
        }
    } else {
        x.ln() / f64::from(base).ln()
    };
    Ok(Value::Double(out))
}

fn ln1p(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::ln_1p)
}

/// Round half up: `floor(x + 0.5)`.
fn round(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x] = take(ctx, args)?;
    match x {
        Value::Float(v) => to_int((f64::from(*v) + 0.5).floor())
            .map(Value::Int)
            .ok_or_else(|| overflow(ctx, 0, "int")),
        Value::Double(v) => to_long((v + 0.5).floor())
            .map(Value::Long)
            .ok_or_else(|| overflow(ctx, 1, "long")),
        _ => Err(ctx.mismatch("a float or double")),
    }
}

fn overflow(ctx: &CallContext<'_>, offset: i32, ty: &str) -> EvalError {
    ctx.fail(offset, format!("{ty} overflow"))
}

/// Round to the nearest integer, ties to even.
fn rint(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::round_ties_even)
}

fn signum(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x] = take(ctx, args)?;
    let x = double(ctx, x)?;
    Ok(Value::Int(if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }))
}

fn sin(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::sin)
}

fn sinh(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::sinh)
}

fn sqrt(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::sqrt)
}

fn tan(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::tan)
}

fn tanh(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    unary_double(ctx, args, f64::tanh)
}

#[cfg(test)]
mod tests;
