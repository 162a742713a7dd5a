//! `stat.change.*`: change detection.

use pfa_patterns::{Pattern, Signature};

use super::args::{boolean, double, double_field, field, int, record, take};
use crate::{Builtin, CallBoundary, CallContext, EvalResult, Value};

const COUNTERS: [&str; 4] = ["numEvents", "numRuns", "currentRun", "longestRun"];

pub(super) fn provide() -> Vec<Builtin> {
    let moments = |extra: &[&'static str]| {
        Pattern::wild_record(
            "A",
            extra
                .iter()
                .chain(&["mean", "variance"])
                .map(|&name| (name, Pattern::Double)),
        )
    };
    vec![
        Builtin::new(
            "stat.change.updateTrigger",
            37000,
            vec![Signature::new(
                [
                    ("predicate", Pattern::Boolean),
                    (
                        "history",
                        Pattern::wild_record("A", COUNTERS.map(|name| (name, Pattern::Int))),
                    ),
                ],
                Pattern::wildcard("A"),
            )],
            update_trigger,
        ),
        Builtin::new(
            "stat.change.zValue",
            37010,
            vec![
                Signature::new(
                    [("x", Pattern::Double), ("meanVariance", moments(&[]))],
                    Pattern::Double,
                ),
                Signature::new(
                    [
                        ("x", Pattern::Double),
                        ("meanVariance", moments(&["count"])),
                        ("unbiased", Pattern::Boolean),
                    ],
                    Pattern::Double,
                ),
            ],
            z_value,
        ),
        Builtin::new(
            "stat.change.updateCUSUM",
            37020,
            vec![Signature::new(
                [
                    ("logLikelihoodRatio", Pattern::Double),
                    ("last", Pattern::Double),
                    ("reset", Pattern::Double),
                ],
                Pattern::Double,
            )],
            update_cusum,
        ),
    ]
}

/// Count events and runs of consecutive `true` predicates.
///
/// Returns a copy of `history` with the four counters updated; any other
/// fields are carried over unchanged.
fn update_trigger(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [predicate, history] = take(ctx, args)?;
    let predicate = boolean(ctx, predicate)?;
    let history = record(ctx, history)?;
    let out_of_range = || ctx.fail(0, "counter out of range");

    let mut counters = [0; 4];
    for (slot, name) in counters.iter_mut().zip(COUNTERS) {
        *slot = int(ctx, field(ctx, history, name)?)?;
    }
    if counters.iter().any(|&n| n < 0) {
        return Err(out_of_range());
    }
    let [mut events, mut runs, mut current, mut longest] = counters;
    if predicate {
        events = events.checked_add(1).ok_or_else(out_of_range)?;
        if current == 0 {
            runs = runs.checked_add(1).ok_or_else(out_of_range)?;
        }
        current = current.checked_add(1).ok_or_else(out_of_range)?;
        longest = longest.max(current);
    } else {
        current = 0;
    }

    let updated = [events, runs, current, longest].map(Value::Int);
    history
        .with_fields(COUNTERS.into_iter().zip(updated))
        .map(Value::Record)
        .ok_or_else(|| ctx.mismatch("a record with trigger counters"))
}

/// Standard score of `x`, optionally with Bessel's correction.
fn z_value(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let (x, moments, unbiased) = match args {
        [x, moments] => (x, moments, false),
        [x, moments, unbiased] => (x, moments, boolean(ctx, unbiased)?),
        _ => return Err(ctx.arity(2, args.len())),
    };
    let x = double(ctx, x)?;
    let moments = record(ctx, moments)?;
    let mean = double_field(ctx, moments, "mean")?;
    let variance = double_field(ctx, moments, "variance")?;
    let sigma = if variance >= 0.0 { variance.sqrt() } else { f64::NAN };
    let z = (x - mean) / sigma;
    if !unbiased {
        return Ok(Value::Double(z));
    }
    let count = double_field(ctx, moments, "count")?;
    let ratio = count / (count - 1.0);
    let correction = if ratio >= 0.0 { ratio.sqrt() } else { f64::NAN };
    Ok(Value::Double(z * correction))
}

/// One step of the cumulative sum control chart, floored at `reset`.
fn update_cusum(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [llr, last, reset] = take(ctx, args)?;
    let out = double(ctx, llr)? + double(ctx, last)?;
    let reset = double(ctx, reset)?;
    Ok(Value::Double(if out > reset { out } else { reset }))
}
