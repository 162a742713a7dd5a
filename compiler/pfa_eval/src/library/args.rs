//! Argument extraction for library function bodies.
//!
//! Resolution guarantees argument types, so a failure here means the host
//! passed a value that contradicts its own type.

use std::collections::BTreeMap;

use crate::{CallContext, Callee, EvalError, RecordValue, Value};

/// The arguments as a fixed-size array.
pub(super) fn take<'v, const N: usize>(
    ctx: &CallContext<'_>,
    args: &'v [Value],
) -> Result<&'v [Value; N], EvalError> {
    args.try_into().map_err(|_| ctx.arity(N, args.len()))
}

pub(super) fn double(ctx: &CallContext<'_>, value: &Value) -> Result<f64, EvalError> {
    value.as_f64().ok_or_else(|| ctx.mismatch("a number"))
}

pub(super) fn int(ctx: &CallContext<'_>, value: &Value) -> Result<i32, EvalError> {
    value.as_int().ok_or_else(|| ctx.mismatch("an int"))
}

pub(super) fn boolean(ctx: &CallContext<'_>, value: &Value) -> Result<bool, EvalError> {
    value.as_bool().ok_or_else(|| ctx.mismatch("a boolean"))
}

pub(super) fn string<'v>(ctx: &CallContext<'_>, value: &'v Value) -> Result<&'v str, EvalError> {
    value.as_str().ok_or_else(|| ctx.mismatch("a string"))
}

pub(super) fn array<'v>(ctx: &CallContext<'_>, value: &'v Value) -> Result<&'v [Value], EvalError> {
    value.as_array().ok_or_else(|| ctx.mismatch("an array"))
}

pub(super) fn map<'v>(
    ctx: &CallContext<'_>,
    value: &'v Value,
) -> Result<&'v BTreeMap<String, Value>, EvalError> {
    value.as_map().ok_or_else(|| ctx.mismatch("a map"))
}

pub(super) fn record<'v>(
    ctx: &CallContext<'_>,
    value: &'v Value,
) -> Result<&'v RecordValue, EvalError> {
    value.as_record().ok_or_else(|| ctx.mismatch("a record"))
}

pub(super) fn callee<'v>(ctx: &CallContext<'_>, value: &'v Value) -> Result<&'v Callee, EvalError> {
    value.as_callee().ok_or_else(|| ctx.mismatch("a function"))
}

/// A named field of a record argument.
pub(super) fn field<'v>(
    ctx: &CallContext<'_>,
    record: &'v RecordValue,
    name: &str,
) -> Result<&'v Value, EvalError> {
    record
        .get(name)
        .ok_or_else(|| ctx.mismatch("a record with the required fields"))
}

pub(super) fn double_field(
    ctx: &CallContext<'_>,
    record: &RecordValue,
    name: &str,
) -> Result<f64, EvalError> {
    double(ctx, field(ctx, record, name)?)
}

/// An `array<double>` argument.
pub(super) fn doubles(ctx: &CallContext<'_>, value: &Value) -> Result<Vec<f64>, EvalError> {
    array(ctx, value)?
        .iter()
        .map(|item| double(ctx, item))
        .collect()
}

/// A `map<double>` argument.
pub(super) fn double_map(
    ctx: &CallContext<'_>,
    value: &Value,
) -> Result<BTreeMap<String, f64>, EvalError> {
    map(ctx, value)?
        .iter()
        .map(|(key, item)| Ok((key.clone(), double(ctx, item)?)))
        .collect()
}
