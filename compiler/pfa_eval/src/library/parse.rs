//! `parse.*`: numbers from strings.
//!
//! Leading and trailing whitespace is ignored. Integers accept an optional
//! sign and digits in any base from 2 to 36.

use pfa_patterns::{Pattern, Signature};

use super::args::{int, string, take};
use crate::{Builtin, CallBoundary, CallContext, EvalError, EvalResult, Value};

pub(super) fn provide() -> Vec<Builtin> {
    let integral = |ret| Signature::new([("str", Pattern::String), ("base", Pattern::Int)], ret);
    let floating = |ret| Signature::new([("str", Pattern::String)], ret);
    vec![
        Builtin::new("parse.int", 33000, vec![integral(Pattern::Int)], parse_int),
        Builtin::new("parse.long", 33010, vec![integral(Pattern::Long)], parse_long),
        Builtin::new("parse.float", 33020, vec![floating(Pattern::Float)], parse_float),
        Builtin::new("parse.double", 33030, vec![floating(Pattern::Double)], parse_double),
    ]
}

/// The string as an integer in the requested base.
fn integer(ctx: &CallContext<'_>, args: &[Value], not_integer: &str) -> Result<i128, EvalError> {
    let [text, base] = take(ctx, args)?;
    let (text, base) = (string(ctx, text)?, int(ctx, base)?);
    let radix = u32::try_from(base)
        .ok()
        .filter(|radix| (2..=36).contains(radix))
        .ok_or_else(|| ctx.fail(1, "base out of range"))?;
    i128::from_str_radix(text.trim(), radix).map_err(|_| ctx.fail(0, not_integer))
}

fn parse_int(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    const NOT_INT: &str = "not an integer";
    let n = integer(ctx, args, NOT_INT)?;
    i32::try_from(n)
        .map(Value::Int)
        .map_err(|_| ctx.fail(0, NOT_INT))
}

fn parse_long(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    const NOT_LONG: &str = "not a long integer";
    let n = integer(ctx, args, NOT_LONG)?;
    i64::try_from(n)
        .map(Value::Long)
        .map_err(|_| ctx.fail(0, NOT_LONG))
}

fn floating(ctx: &CallContext<'_>, args: &[Value], not_float: &str) -> Result<f64, EvalError> {
    let [text] = take(ctx, args)?;
    string(ctx, text)?
        .trim()
        .parse::<f64>()
        .map_err(|_| ctx.fail(0, not_float))
}

/// Values beyond the `float` range saturate to an infinity; values too
/// small for a subnormal `float` become zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "range is handled before narrowing"
)]
fn parse_float(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let x = floating(ctx, args, "not a single-precision float")?;
    let out = if x.is_nan() || x.is_infinite() {
        x as f32
    } else if x > f64::from(f32::MAX) {
        f32::INFINITY
    } else if -x > f64::from(f32::MAX) {
        f32::NEG_INFINITY
    } else if x.abs() < 1.4e-45 {
        0.0
    } else {
        x as f32
    };
    Ok(Value::Float(out))
}

fn parse_double(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    floating(ctx, args, "not a double-precision float").map(Value::Double)
}

#[cfg(test)]
mod tests;
