//! `a.*`: array utilities.

use pfa_patterns::{Pattern, Signature};

use super::args::{array, boolean, callee, take};
use crate::{Builtin, CallBoundary, CallContext, EvalResult, Value};

pub(super) fn provide() -> Vec<Builtin> {
    let items = || Pattern::array(Pattern::wildcard("A"));
    vec![
        Builtin::new(
            "a.len",
            15000,
            vec![Signature::new([("a", items())], Pattern::Int)],
            len,
        ),
        Builtin::new(
            "a.map",
            15010,
            vec![Signature::new(
                [
                    ("a", items()),
                    (
                        "fcn",
                        Pattern::fcn([Pattern::wildcard("A")], Pattern::wildcard("B")),
                    ),
                ],
                Pattern::array(Pattern::wildcard("B")),
            )],
            map,
        ),
        Builtin::new(
            "a.filter",
            15020,
            vec![Signature::new(
                [
                    ("a", items()),
                    ("fcn", Pattern::fcn([Pattern::wildcard("A")], Pattern::Boolean)),
                ],
                items(),
            )],
            filter,
        ),
    ]
}

fn len(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [a] = take(ctx, args)?;
    i32::try_from(array(ctx, a)?.len())
        .map(Value::Int)
        .map_err(|_| ctx.fail(0, "array too long for an int length"))
}

fn map(ctx: &CallContext<'_>, args: &[Value], exec: &mut dyn CallBoundary) -> EvalResult {
    let [a, fcn] = take(ctx, args)?;
    let fcn = callee(ctx, fcn)?;
    array(ctx, a)?
        .iter()
        .map(|item| exec.call(fcn, vec![item.clone()]))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::array)
}

fn filter(ctx: &CallContext<'_>, args: &[Value], exec: &mut dyn CallBoundary) -> EvalResult {
    let [a, fcn] = take(ctx, args)?;
    let fcn = callee(ctx, fcn)?;
    let mut kept = Vec::new();
    for item in array(ctx, a)? {
        if boolean(ctx, &exec.call(fcn, vec![item.clone()])?)? {
            kept.push(item.clone());
        }
    }
    Ok(Value::array(kept))
}
