//! Core operators: arithmetic, comparison, logic and bitwise.
//!
//! Integer arithmetic is checked; overflow fails with offset 0 for `int`
//! and offset 1 for `long`. Integer division or modulo by zero fails with
//! offset 0. Floating-point operations follow IEEE semantics.

use std::cmp::Ordering;

use pfa_patterns::{Pattern, Signature};

use super::args::{boolean, take};
use super::numeric::{pow_like_java, to_int, to_long};
use crate::{compare, Builtin, CallBoundary, CallContext, EvalError, EvalResult, Value};

pub(super) fn provide() -> Vec<Builtin> {
    vec![
        Builtin::new("+", 18000, vec![same_number("x", "y")], plus),
        Builtin::new("-", 18010, vec![same_number("x", "y")], minus),
        Builtin::new("*", 18020, vec![same_number("x", "y")], times),
        Builtin::new(
            "/",
            18030,
            vec![Signature::new(
                [("x", Pattern::Double), ("y", Pattern::Double)],
                Pattern::Double,
            )],
            divide,
        ),
        Builtin::new(
            "//",
            18040,
            vec![Signature::new(
                [
                    ("x", Pattern::wildcard_of("A", [Pattern::Int, Pattern::Long])),
                    ("y", Pattern::wildcard("A")),
                ],
                Pattern::wildcard("A"),
            )],
            floor_divide,
        ),
        Builtin::new(
            "u-",
            18050,
            vec![Signature::new(
                [("x", Pattern::any_number("A"))],
                Pattern::wildcard("A"),
            )],
            negative,
        ),
        Builtin::new("%", 18060, vec![same_number("k", "n")], modulo),
        Builtin::new("%%", 18070, vec![same_number("k", "n")], remainder),
        Builtin::new("**", 18080, vec![same_number("x", "y")], power),
        Builtin::new("cmp", 18090, vec![same_any(Pattern::Int)], cmp),
        Builtin::new("==", 18100, vec![same_any(Pattern::Boolean)], equal),
        Builtin::new(">=", 18110, vec![same_any(Pattern::Boolean)], greater_or_equal),
        Builtin::new(">", 18120, vec![same_any(Pattern::Boolean)], greater),
        Builtin::new("!=", 18130, vec![same_any(Pattern::Boolean)], not_equal),
        Builtin::new("<", 18140, vec![same_any(Pattern::Boolean)], less),
        Builtin::new("<=", 18150, vec![same_any(Pattern::Boolean)], less_or_equal),
        Builtin::new("max", 18160, vec![same_any(Pattern::wildcard("A"))], max),
        Builtin::new("min", 18170, vec![same_any(Pattern::wildcard("A"))], min),
        Builtin::new("&&", 18180, vec![booleans(2)], and),
        Builtin::new("||", 18190, vec![booleans(2)], or),
        Builtin::new("^^", 18200, vec![booleans(2)], xor),
        Builtin::new("!", 18210, vec![booleans(1)], not),
        Builtin::new("&&&", 18220, vec![kleene(2)], kleene_and),
        Builtin::new("|||", 18230, vec![kleene(2)], kleene_or),
        Builtin::new("!!!", 18240, vec![kleene(1)], kleene_not),
        Builtin::new("&", 18250, integral(2), bit_and),
        Builtin::new("|", 18260, integral(2), bit_or),
        Builtin::new("^", 18270, integral(2), bit_xor),
        Builtin::new("~", 18280, integral(1), bit_not),
    ]
}

/// `(x: any A of {int, long, float, double}, y: A) -> A`
fn same_number(x: &str, y: &str) -> Signature {
    Signature::new(
        [(x, Pattern::any_number("A")), (y, Pattern::wildcard("A"))],
        Pattern::wildcard("A"),
    )
}

/// `(x: any A, y: A) -> ret`
fn same_any(ret: Pattern) -> Signature {
    Signature::new(
        [("x", Pattern::wildcard("A")), ("y", Pattern::wildcard("A"))],
        ret,
    )
}

fn booleans(arity: usize) -> Signature {
    Signature::new(
        ["x", "y"].into_iter().take(arity).map(|p| (p, Pattern::Boolean)),
        Pattern::Boolean,
    )
}

fn kleene(arity: usize) -> Signature {
    let maybe = || Pattern::union([Pattern::Boolean, Pattern::Null]);
    Signature::new(
        ["x", "y"].into_iter().take(arity).map(|p| (p, maybe())),
        maybe(),
    )
}

fn integral(arity: usize) -> Vec<Signature> {
    [Pattern::Int, Pattern::Long]
        .into_iter()
        .map(|ty| {
            Signature::new(
                ["x", "y"].into_iter().take(arity).map(|p| (p, ty.clone())),
                ty.clone(),
            )
        })
        .collect()
}

fn int_overflow(ctx: &CallContext<'_>) -> EvalError {
    ctx.fail(0, "int overflow")
}

fn long_overflow(ctx: &CallContext<'_>) -> EvalError {
    ctx.fail(1, "long overflow")
}

fn division_by_zero(ctx: &CallContext<'_>) -> EvalError {
    ctx.fail(0, "integer division by zero")
}

/// Apply a binary operation to two numbers of the same type.
#[expect(
    clippy::cast_possible_truncation,
    reason = "float results are computed in double precision"
)]
fn arithmetic(
    ctx: &CallContext<'_>,
    args: &[Value],
    int: fn(i32, i32) -> Option<i32>,
    long: fn(i64, i64) -> Option<i64>,
    float: fn(f64, f64) -> f64,
) -> EvalResult {
    let [x, y] = take(ctx, args)?;
    match (x, y) {
        (Value::Int(a), Value::Int(b)) => int(*a, *b)
            .map(Value::Int)
            .ok_or_else(|| int_overflow(ctx)),
        (Value::Long(a), Value::Long(b)) => long(*a, *b)
            .map(Value::Long)
            .ok_or_else(|| long_overflow(ctx)),
        (Value::Float(a), Value::Float(b)) => {
            Ok(Value::Float(float(f64::from(*a), f64::from(*b)) as f32))
        }
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(float(*a, *b))),
        _ => Err(ctx.mismatch("two numbers of the same type")),
    }
}

fn plus(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    arithmetic(ctx, args, i32::checked_add, i64::checked_add, |a, b| a + b)
}

fn minus(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    arithmetic(ctx, args, i32::checked_sub, i64::checked_sub, |a, b| a - b)
}

fn times(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    arithmetic(ctx, args, i32::checked_mul, i64::checked_mul, |a, b| a * b)
}

fn divide(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y] = take(ctx, args)?;
    match (x, y) {
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a / b)),
        _ => Err(ctx.mismatch("two doubles")),
    }
}

/// Integer division truncating toward zero.
fn floor_divide(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y] = take(ctx, args)?;
    match (x, y) {
        (Value::Int(_), Value::Int(0)) | (Value::Long(_), Value::Long(0)) => {
            Err(division_by_zero(ctx))
        }
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_div(*b))),
        (Value::Long(a), Value::Long(b)) => Ok(Value::Long(a.wrapping_div(*b))),
        _ => Err(ctx.mismatch("two integers of the same type")),
    }
}

fn negative(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x] = take(ctx, args)?;
    match x {
        Value::Int(a) => a.checked_neg().map(Value::Int).ok_or_else(|| int_overflow(ctx)),
        Value::Long(a) => a
            .checked_neg()
            .map(Value::Long)
            .ok_or_else(|| long_overflow(ctx)),
        Value::Float(a) => Ok(Value::Float(-a)),
        Value::Double(a) => Ok(Value::Double(-a)),
        _ => Err(ctx.mismatch("a number")),
    }
}

/// Modulo whose result takes the sign of the divisor.
#[expect(
    clippy::cast_possible_truncation,
    reason = "float results are computed in double precision"
)]
fn modulo(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    fn floored_i64(a: i64, b: i64) -> i64 {
        let r = a.wrapping_rem(b);
        if r != 0 && (r < 0) != (b < 0) {
            r + b
        } else {
            r
        }
    }
    fn floored_f64(a: f64, b: f64) -> f64 {
        if b == 0.0 {
            return f64::NAN;
        }
        let r = a % b;
        if r != 0.0 && (r < 0.0) != (b < 0.0) {
            r + b
        } else {
            r
        }
    }

    let [x, y] = take(ctx, args)?;
    match (x, y) {
        (Value::Int(_), Value::Int(0)) | (Value::Long(_), Value::Long(0)) => {
            Err(division_by_zero(ctx))
        }
        (Value::Int(a), Value::Int(b)) => {
            let r = floored_i64(i64::from(*a), i64::from(*b));
            i32::try_from(r).map(Value::Int).map_err(|_| int_overflow(ctx))
        }
        (Value::Long(a), Value::Long(b)) => Ok(Value::Long(floored_i64(*a, *b))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(
            floored_f64(f64::from(*a), f64::from(*b)) as f32,
        )),
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(floored_f64(*a, *b))),
        _ => Err(ctx.mismatch("two numbers of the same type")),
    }
}

/// Remainder whose result takes the sign of the dividend.
#[expect(
    clippy::cast_possible_truncation,
    reason = "float results are computed in double precision"
)]
fn remainder(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    fn truncated_f64(a: f64, b: f64) -> f64 {
        if b == 0.0 {
            f64::NAN
        } else if a.is_finite() && b.is_infinite() {
            a
        } else {
            a % b
        }
    }

    let [x, y] = take(ctx, args)?;
    match (x, y) {
        (Value::Int(_), Value::Int(0)) | (Value::Long(_), Value::Long(0)) => {
            Err(division_by_zero(ctx))
        }
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_rem(*b))),
        (Value::Long(a), Value::Long(b)) => Ok(Value::Long(a.wrapping_rem(*b))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(
            truncated_f64(f64::from(*a), f64::from(*b)) as f32,
        )),
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(truncated_f64(*a, *b))),
        _ => Err(ctx.mismatch("two numbers of the same type")),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float results are computed in double precision"
)]
fn power(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y] = take(ctx, args)?;
    match (x, y) {
        (Value::Int(a), Value::Int(b)) => to_int(pow_like_java(f64::from(*a), f64::from(*b)))
            .map(Value::Int)
            .ok_or_else(|| int_overflow(ctx)),
        (Value::Long(a), Value::Long(b)) => to_long(pow_like_java(*a as f64, *b as f64))
            .map(Value::Long)
            .ok_or_else(|| long_overflow(ctx)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(
            pow_like_java(f64::from(*a), f64::from(*b)) as f32,
        )),
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(pow_like_java(*a, *b))),
        _ => Err(ctx.mismatch("two numbers of the same type")),
    }
}

fn ordering(ctx: &CallContext<'_>, args: &[Value]) -> Result<Ordering, EvalError> {
    let [x, y] = take(ctx, args)?;
    compare(ctx.pool, ctx.param_types[0], x, y).ok_or_else(|| ctx.mismatch("comparable values"))
}

fn cmp(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    Ok(Value::Int(match ordering(ctx, args)? {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }))
}

fn equal(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    Ok(Value::Boolean(ordering(ctx, args)?.is_eq()))
}

fn not_equal(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    Ok(Value::Boolean(ordering(ctx, args)?.is_ne()))
}

fn greater_or_equal(
    ctx: &CallContext<'_>,
    args: &[Value],
    _: &mut dyn CallBoundary,
) -> EvalResult {
    Ok(Value::Boolean(ordering(ctx, args)?.is_ge()))
}

fn greater(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    Ok(Value::Boolean(ordering(ctx, args)?.is_gt()))
}

fn less(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    Ok(Value::Boolean(ordering(ctx, args)?.is_lt()))
}

fn less_or_equal(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    Ok(Value::Boolean(ordering(ctx, args)?.is_le()))
}

/// Ties go to the first argument.
fn max(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let winner = if ordering(ctx, args)?.is_ge() { 0 } else { 1 };
    Ok(args[winner].clone())
}

/// Ties go to the second argument.
fn min(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let winner = if ordering(ctx, args)?.is_lt() { 0 } else { 1 };
    Ok(args[winner].clone())
}

fn and(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y] = take(ctx, args)?;
    Ok(Value::Boolean(boolean(ctx, x)? && boolean(ctx, y)?))
}

fn or(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y] = take(ctx, args)?;
    Ok(Value::Boolean(boolean(ctx, x)? || boolean(ctx, y)?))
}

fn xor(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y] = take(ctx, args)?;
    Ok(Value::Boolean(boolean(ctx, x)? != boolean(ctx, y)?))
}

fn not(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x] = take(ctx, args)?;
    Ok(Value::Boolean(!boolean(ctx, x)?))
}

/// `true`, `false`, or unknown (`null`).
fn tristate(ctx: &CallContext<'_>, value: &Value) -> Result<Option<bool>, EvalError> {
    match value {
        Value::Boolean(b) => Ok(Some(*b)),
        Value::Null => Ok(None),
        _ => Err(ctx.mismatch("a boolean or null")),
    }
}

fn from_tristate(value: Option<bool>) -> Value {
    value.map_or(Value::Null, Value::Boolean)
}

fn kleene_and(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y] = take(ctx, args)?;
    Ok(from_tristate(match (tristate(ctx, x)?, tristate(ctx, y)?) {
        (Some(false), _) | (_, Some(false)) => Some(false),
        (Some(true), Some(true)) => Some(true),
        _ => None,
    }))
}

fn kleene_or(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y] = take(ctx, args)?;
    Ok(from_tristate(match (tristate(ctx, x)?, tristate(ctx, y)?) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (Some(false), Some(false)) => Some(false),
        _ => None,
    }))
}

fn kleene_not(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x] = take(ctx, args)?;
    Ok(from_tristate(tristate(ctx, x)?.map(|b| !b)))
}

fn bitwise(
    ctx: &CallContext<'_>,
    args: &[Value],
    int: fn(i32, i32) -> i32,
    long: fn(i64, i64) -> i64,
) -> EvalResult {
    let [x, y] = take(ctx, args)?;
    match (x, y) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(int(*a, *b))),
        (Value::Long(a), Value::Long(b)) => Ok(Value::Long(long(*a, *b))),
        _ => Err(ctx.mismatch("two integers of the same type")),
    }
}

fn bit_and(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    bitwise(ctx, args, |a, b| a & b, |a, b| a & b)
}

fn bit_or(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    bitwise(ctx, args, |a, b| a | b, |a, b| a | b)
}

fn bit_xor(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    bitwise(ctx, args, |a, b| a ^ b, |a, b| a ^ b)
}

fn bit_not(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x] = take(ctx, args)?;
    match x {
        Value::Int(a) => Ok(Value::Int(!a)),
        Value::Long(a) => Ok(Value::Long(!a)),
        _ => Err(ctx.mismatch("an integer")),
    }
}

#[cfg(test)]
mod tests;
