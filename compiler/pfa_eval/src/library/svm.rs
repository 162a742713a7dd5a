//! `model.svm.score`: support vector machine decision function.

use pfa_patterns::{Pattern, Signature};

use super::args::{array, callee, double, double_field, field, record, take};
use crate::{Builtin, CallBoundary, CallContext, EvalResult, Value};

pub(super) fn provide() -> Vec<Builtin> {
    let vector = || Pattern::array(Pattern::Double);
    let support = |label: &str| {
        Pattern::array(Pattern::wild_record(
            label,
            [("supVec", vector()), ("coeff", Pattern::Double)],
        ))
    };
    vec![Builtin::new(
        "model.svm.score",
        12000,
        vec![Signature::new(
            [
                ("datum", vector()),
                (
                    "model",
                    Pattern::wild_record(
                        "L",
                        [
                            ("const", Pattern::Double),
                            ("posClass", support("M")),
                            ("negClass", support("N")),
                        ],
                    ),
                ),
                ("kernel", Pattern::fcn([vector(), vector()], Pattern::Double)),
            ],
            Pattern::Double,
        )],
        score,
    )]
}

/// `const + sum(coeff * kernel(supVec, datum))` over both classes.
///
/// Negative-class coefficients carry their own sign.
fn score(ctx: &CallContext<'_>, args: &[Value], exec: &mut dyn CallBoundary) -> EvalResult {
    let [datum, model, kernel] = take(ctx, args)?;
    let dimension = array(ctx, datum)?.len();
    let model = record(ctx, model)?;
    let kernel = callee(ctx, kernel)?;
    let negative = array(ctx, field(ctx, model, "negClass")?)?;
    let positive = array(ctx, field(ctx, model, "posClass")?)?;
    if negative.is_empty() && positive.is_empty() {
        return Err(ctx.fail(0, "no support vectors"));
    }

    let mut total = double_field(ctx, model, "const")?;
    for vector in negative.iter().chain(positive) {
        let vector = record(ctx, vector)?;
        let support = field(ctx, vector, "supVec")?;
        if array(ctx, support)?.len() != dimension {
            return Err(ctx.fail(1, "support vectors must have same length as datum"));
        }
        let similarity = exec.call(kernel, vec![support.clone(), datum.clone()])?;
        total += double(ctx, &similarity)? * double_field(ctx, vector, "coeff")?;
    }
    Ok(Value::Double(total))
}

#[cfg(test)]
mod tests;
