//! `model.neural.simpleLayers`: feed-forward network evaluation.

use pfa_patterns::{Pattern, Signature};

use super::args::{array, callee, double, doubles, field, record, take};
use crate::{
    Builtin, CallBoundary, CallContext, Callee, EvalError, EvalResult, RecordValue, Value,
};

pub(super) fn provide() -> Vec<Builtin> {
    let vector = || Pattern::array(Pattern::Double);
    vec![Builtin::new(
        "model.neural.simpleLayers",
        11000,
        vec![Signature::new(
            [
                ("datum", vector()),
                (
                    "model",
                    Pattern::array(Pattern::wild_record(
                        "M",
                        [("weights", Pattern::array(vector())), ("bias", vector())],
                    )),
                ),
                ("activation", Pattern::fcn([Pattern::Double], Pattern::Double)),
            ],
            vector(),
        )],
        simple_layers,
    )]
}

/// Run `datum` through every layer. The activation applies to all layers
/// except the last.
fn simple_layers(
    ctx: &CallContext<'_>,
    args: &[Value],
    exec: &mut dyn CallBoundary,
) -> EvalResult {
    let [datum, model, activation] = take(ctx, args)?;
    let layers = array(ctx, model)?;
    let activation = callee(ctx, activation)?;
    let Some((last, hidden)) = layers.split_last() else {
        return Err(ctx.fail(0, "no layers"));
    };

    let mut signal = doubles(ctx, datum)?;
    for layer in hidden {
        let sums = affine(ctx, record(ctx, layer)?, &signal)?;
        signal = sums
            .into_iter()
            .map(|x| activate(ctx, exec, activation, x))
            .collect::<Result<_, _>>()?;
    }
    affine(ctx, record(ctx, last)?, &signal).map(Value::doubles)
}

/// `weights * signal + bias` for one layer.
fn affine(
    ctx: &CallContext<'_>,
    layer: &RecordValue,
    signal: &[f64],
) -> Result<Vec<f64>, EvalError> {
    let misaligned = || ctx.fail(1, "weights, bias, or datum misaligned");
    let bias = doubles(ctx, field(ctx, layer, "bias")?)?;
    let weights = array(ctx, field(ctx, layer, "weights")?)?;
    if bias.len() != weights.len() {
        return Err(misaligned());
    }
    weights
        .iter()
        .zip(bias)
        .map(|(row, b)| {
            let row = doubles(ctx, row)?;
            if row.len() != signal.len() {
                return Err(misaligned());
            }
            Ok(row.iter().zip(signal).map(|(w, x)| w * x).sum::<f64>() + b)
        })
        .collect()
}

fn activate(
    ctx: &CallContext<'_>,
    exec: &mut dyn CallBoundary,
    activation: &Callee,
    x: f64,
) -> Result<f64, EvalError> {
    double(ctx, &exec.call(activation, vec![Value::Double(x)])?)
}

#[cfg(test)]
mod tests;
