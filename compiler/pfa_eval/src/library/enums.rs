//! `enum.*`: conversions between enum symbols and their positions.

use pfa_patterns::{Pattern, Signature};

use super::args::take;
use crate::{Builtin, CallBoundary, CallContext, EvalError, EvalResult, Value};

pub(super) fn provide() -> Vec<Builtin> {
    let from_enum = |ret| Signature::new([("x", Pattern::wild_enum("A"))], ret);
    vec![
        Builtin::new("enum.toString", 19000, vec![from_enum(Pattern::String)], to_string),
        Builtin::new("enum.toInt", 19010, vec![from_enum(Pattern::Int)], to_int),
        Builtin::new("enum.numSymbols", 19020, vec![from_enum(Pattern::Int)], num_symbols),
    ]
}

/// Symbols of the argument's enum type.
fn symbols<'a>(ctx: &CallContext<'a>) -> Result<&'a [String], EvalError> {
    ctx.param_types
        .first()
        .and_then(|&ty| ctx.pool.enum_symbols(ty))
        .ok_or_else(|| ctx.mismatch("an enum"))
}

/// Position of the argument's symbol in its enum.
fn position(ctx: &CallContext<'_>, args: &[Value]) -> Result<usize, EvalError> {
    let [x] = take(ctx, args)?;
    let symbol = x.as_symbol().ok_or_else(|| ctx.mismatch("an enum symbol"))?;
    let symbols = symbols(ctx)?;
    symbols.iter().position(|s| s == symbol).ok_or_else(|| {
        let ty = ctx.pool.format_type(ctx.param_types[0]);
        ctx.fail(0, format!("\"{symbol}\" is not a symbol of {ty}"))
    })
}

fn to_string(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let index = position(ctx, args)?;
    Ok(Value::string(symbols(ctx)?[index].as_str()))
}

fn to_int(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let index = position(ctx, args)?;
    i32::try_from(index)
        .map(Value::Int)
        .map_err(|_| ctx.mismatch("an enum with fewer than 2^31 symbols"))
}

fn num_symbols(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    take::<1>(ctx, args)?;
    i32::try_from(symbols(ctx)?.len())
        .map(Value::Int)
        .map_err(|_| ctx.mismatch("an enum with fewer than 2^31 symbols"))
}
