//! `fixed.*`: conversions between `fixed` and `bytes`.

use pfa_patterns::{Pattern, Signature};

use super::args::take;
use crate::{Builtin, CallBoundary, CallContext, EvalResult, Value};

pub(super) fn provide() -> Vec<Builtin> {
    vec![
        Builtin::new(
            "fixed.toBytes",
            20000,
            vec![Signature::new([("x", Pattern::wild_fixed("A"))], Pattern::Bytes)],
            to_bytes,
        ),
        Builtin::new(
            "fixed.fromBytes",
            20010,
            vec![Signature::new(
                [
                    ("original", Pattern::wild_fixed("A")),
                    ("replacement", Pattern::Bytes),
                ],
                Pattern::wildcard("A"),
            )],
            from_bytes,
        ),
    ]
}

fn to_bytes(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x] = take(ctx, args)?;
    let bytes = x.as_bytes().ok_or_else(|| ctx.mismatch("a fixed"))?;
    Ok(Value::bytes(bytes))
}

/// Overwrite the start of `original` with `replacement`, keeping the size.
///
/// Extra replacement bytes are dropped; missing ones keep the original's.
fn from_bytes(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [original, replacement] = take(ctx, args)?;
    let (Some(original), Some(replacement)) = (original.as_bytes(), replacement.as_bytes()) else {
        return Err(ctx.mismatch("a fixed and bytes"));
    };
    let n = original.len().min(replacement.len());
    let mut out = replacement[..n].to_vec();
    out.extend_from_slice(&original[n..]);
    Ok(Value::fixed(out))
}
