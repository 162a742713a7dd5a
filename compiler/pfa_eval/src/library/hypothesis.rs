//! `stat.test.*`: goodness of fit.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use pfa_patterns::{Pattern, Signature};

use super::args::{
    array, double, double_field, double_map, doubles, field, int, map, record, take,
};
use super::numeric::{chi2_cdf, solve};
use crate::{Builtin, CallBoundary, CallContext, EvalError, EvalResult, Value};

const MISALIGNED: [&str; 2] = ["misaligned prediction", "misaligned uncertainty"];

pub(super) fn provide() -> Vec<Builtin> {
    let shapes = |params: &[&'static str]| {
        [
            Pattern::Double,
            Pattern::array(Pattern::Double),
            Pattern::map(Pattern::Double),
        ]
        .map(|shape| {
            Signature::new(params.iter().map(|&p| (p, shape.clone())), shape.clone())
        })
        .to_vec()
    };
    let state = || {
        Pattern::wild_record("A", [("chi2", Pattern::Double), ("dof", Pattern::Int)])
    };
    vec![
        Builtin::new(
            "stat.test.kolmogorov",
            38000,
            vec![Signature::new(
                [
                    ("x", Pattern::array(Pattern::Double)),
                    ("y", Pattern::array(Pattern::Double)),
                ],
                Pattern::Double,
            )],
            kolmogorov,
        ),
        Builtin::new(
            "stat.test.residual",
            38010,
            shapes(&["observation", "prediction"]),
            residual,
        ),
        Builtin::new(
            "stat.test.pull",
            38020,
            shapes(&["observation", "prediction", "uncertainty"]),
            pull,
        ),
        Builtin::new(
            "stat.test.mahalanobis",
            38030,
            vec![
                Signature::new(
                    [
                        ("observation", Pattern::array(Pattern::Double)),
                        ("prediction", Pattern::array(Pattern::Double)),
                        (
                            "covariance",
                            Pattern::array(Pattern::array(Pattern::Double)),
                        ),
                    ],
                    Pattern::Double,
                ),
                Signature::new(
                    [
                        ("observation", Pattern::map(Pattern::Double)),
                        ("prediction", Pattern::map(Pattern::Double)),
                        ("covariance", Pattern::map(Pattern::map(Pattern::Double))),
                    ],
                    Pattern::Double,
                ),
            ],
            mahalanobis,
        ),
        Builtin::new(
            "stat.test.updateChi2",
            38040,
            [
                Pattern::Double,
                Pattern::array(Pattern::Double),
                Pattern::map(Pattern::Double),
            ]
            .map(|pull| {
                Signature::new([("pull", pull), ("state", state())], Pattern::wildcard("A"))
            })
            .to_vec(),
            update_chi2,
        ),
        Builtin::new(
            "stat.test.reducedChi2",
            38050,
            vec![Signature::new([("state", state())], Pattern::Double)],
            reduced_chi2,
        ),
        Builtin::new(
            "stat.test.chi2Prob",
            38060,
            vec![Signature::new([("state", state())], Pattern::Double)],
            chi2_prob,
        ),
    ]
}

/// An `array<double>` argument without NaNs, sorted.
fn sample(ctx: &CallContext<'_>, value: &Value) -> Result<Vec<f64>, EvalError> {
    let mut out: Vec<f64> = doubles(ctx, value)?
        .into_iter()
        .filter(|x| !x.is_nan())
        .collect();
    out.sort_by(f64::total_cmp);
    Ok(out)
}

/// Largest distance between the empirical distribution functions of two
/// sorted samples.
fn ks_statistic(x: &[f64], y: &[f64]) -> f64 {
    let (n1, n2) = (x.len() as f64, y.len() as f64);
    let (mut j1, mut j2) = (0, 0);
    let (mut fn1, mut fn2, mut d) = (0.0, 0.0, 0.0_f64);
    while let (Some(&d1), Some(&d2)) = (x.get(j1), y.get(j2)) {
        if d1 <= d2 {
            j1 += 1;
            fn1 = j1 as f64 / n1;
        }
        if d2 <= d1 {
            j2 += 1;
            fn2 = j2 as f64 / n2;
        }
        d = d.max((fn2 - fn1).abs());
    }
    d
}

/// Cumulative distribution of the Kolmogorov distribution.
fn kolmogorov_cdf(z: f64) -> f64 {
    let scale = PI * PI / (8.0 * z * z);
    let sum: f64 = (1..150_i32)
        .map(|v| {
            let k = f64::from(2 * v - 1);
            (-k * k * scale).exp()
        })
        .sum();
    (2.0 * PI).sqrt() / z * sum
}

/// Two-sample Kolmogorov-Smirnov p-value. NaNs are ignored; identical
/// samples give 1 and an empty sample against a non-empty one gives 0.
fn kolmogorov(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y] = take(ctx, args)?;
    let (x, y) = (sample(ctx, x)?, sample(ctx, y)?);
    if x == y {
        return Ok(Value::Double(1.0));
    }
    if x.is_empty() || y.is_empty() {
        return Ok(Value::Double(0.0));
    }
    let d = ks_statistic(&x, &y);
    let (n1, n2) = (x.len() as f64, y.len() as f64);
    let en = (n1 * n2 / (n1 + n2)).sqrt();
    Ok(Value::Double(1.0 - kolmogorov_cdf((en + 0.12 + 0.11 / en) * d)))
}

/// Combine same-shaped scalars, arrays or maps element by element.
///
/// Every argument after the first must match its length or key set; the
/// `n`th one fails at offset `n - 1` otherwise.
fn elementwise(ctx: &CallContext<'_>, args: &[Value], f: fn(&[f64]) -> f64) -> EvalResult {
    let misaligned = |columns: usize, aligned: &dyn Fn(usize) -> bool| {
        (1..columns)
            .zip((0..).zip(MISALIGNED))
            .find(|&(column, _)| !aligned(column))
            .map_or(Ok(()), |(_, (offset, message))| Err(ctx.fail(offset, message)))
    };
    match args.first() {
        Some(Value::Array(_)) => {
            let columns = args
                .iter()
                .map(|arg| doubles(ctx, arg))
                .collect::<Result<Vec<_>, _>>()?;
            let n = columns.first().map_or(0, Vec::len);
            misaligned(columns.len(), &|c: usize| columns[c].len() == n)?;
            Ok(Value::doubles((0..n).map(|i| {
                let row: Vec<f64> = columns.iter().map(|column| column[i]).collect();
                f(&row)
            })))
        }
        Some(Value::Map(_)) => {
            let columns = args
                .iter()
                .map(|arg| double_map(ctx, arg))
                .collect::<Result<Vec<_>, _>>()?;
            let Some(first) = columns.first() else {
                return Err(ctx.arity(2, 0));
            };
            misaligned(columns.len(), &|c: usize| columns[c].keys().eq(first.keys()))?;
            let out: BTreeMap<String, Value> = first
                .keys()
                .map(|key| {
                    let row: Vec<f64> = columns.iter().map(|column| column[key]).collect();
                    (key.clone(), Value::Double(f(&row)))
                })
                .collect();
            Ok(Value::map(out))
        }
        _ => {
            let row = args
                .iter()
                .map(|arg| double(ctx, arg))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Double(f(&row)))
        }
    }
}

fn residual(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let args: &[Value; 2] = take(ctx, args)?;
    elementwise(ctx, args, |v| v[0] - v[1])
}

fn pull(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let args: &[Value; 3] = take(ctx, args)?;
    elementwise(ctx, args, |v| (v[0] - v[1]) / v[2])
}

/// Distance of an observation from a prediction in units of the
/// covariance. Maps are aligned by the observation's keys.
fn mahalanobis(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [observation, prediction, covariance] = take(ctx, args)?;
    let too_few = || ctx.fail(0, "too few rows/cols");
    let misaligned_prediction = || ctx.fail(1, "misaligned prediction");
    let misaligned_covariance = || ctx.fail(2, "misaligned covariance");

    let (x, matrix) = if let Value::Map(_) = observation {
        let observation = double_map(ctx, observation)?;
        let prediction = double_map(ctx, prediction)?;
        if observation.is_empty() {
            return Err(too_few());
        }
        if !observation.keys().eq(prediction.keys()) {
            return Err(misaligned_prediction());
        }
        let covariance = map(ctx, covariance)?;
        let matrix = observation
            .keys()
            .map(|k1| {
                let row = covariance.get(k1).ok_or_else(misaligned_covariance)?;
                let row = double_map(ctx, row)?;
                observation
                    .keys()
                    .map(|k2| row.get(k2).copied().ok_or_else(misaligned_covariance))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let x = observation
            .iter()
            .map(|(key, o)| o - prediction[key])
            .collect::<Vec<_>>();
        (x, matrix)
    } else {
        let observation = doubles(ctx, observation)?;
        let prediction = doubles(ctx, prediction)?;
        let n = observation.len();
        if n < 1 {
            return Err(too_few());
        }
        if prediction.len() != n {
            return Err(misaligned_prediction());
        }
        let matrix = array(ctx, covariance)?
            .iter()
            .map(|row| doubles(ctx, row))
            .collect::<Result<Vec<_>, _>>()?;
        if matrix.len() != n || matrix.iter().any(|row| row.len() != n) {
            return Err(misaligned_covariance());
        }
        let x = observation
            .iter()
            .zip(&prediction)
            .map(|(o, p)| o - p)
            .collect::<Vec<_>>();
        (x, matrix)
    };

    let y = solve(matrix, x.clone()).ok_or_else(|| ctx.fail(3, "singular covariance"))?;
    let squared: f64 = y.iter().zip(&x).map(|(a, b)| a * b).sum();
    Ok(Value::Double(if squared < 0.0 {
        f64::NAN
    } else {
        squared.sqrt()
    }))
}

/// The `chi2` and `dof` fields of a running chi-squared state.
fn chi2_state(ctx: &CallContext<'_>, state: &Value) -> Result<(f64, i32), EvalError> {
    let state = record(ctx, state)?;
    Ok((
        double_field(ctx, state, "chi2")?,
        int(ctx, field(ctx, state, "dof")?)?,
    ))
}

/// Add the squared pulls to `chi2` and one degree of freedom.
fn update_chi2(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [pull, state] = take(ctx, args)?;
    let squares: f64 = match pull {
        Value::Array(_) => doubles(ctx, pull)?.iter().map(|p| p * p).sum(),
        Value::Map(_) => double_map(ctx, pull)?.values().map(|p| p * p).sum(),
        scalar => double(ctx, scalar)?.powi(2),
    };
    let (chi2, dof) = chi2_state(ctx, state)?;
    let dof = dof
        .checked_add(1)
        .ok_or_else(|| ctx.fail(0, "degrees of freedom out of range"))?;
    record(ctx, state)?
        .with_fields([("chi2", Value::Double(chi2 + squares)), ("dof", Value::Int(dof))])
        .map(Value::Record)
        .ok_or_else(|| ctx.mismatch("a record with chi2 and dof"))
}

fn reduced_chi2(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [state] = take(ctx, args)?;
    let (chi2, dof) = chi2_state(ctx, state)?;
    Ok(Value::Double(chi2 / f64::from(dof)))
}

/// Probability that a chi-squared variable with `dof` degrees of freedom
/// falls below `chi2`.
fn chi2_prob(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [state] = take(ctx, args)?;
    let (chi2, dof) = chi2_state(ctx, state)?;
    if dof < 0 {
        return Err(ctx.fail(0, "invalid parameterization"));
    }
    let p = if dof == 0 || chi2.is_infinite() {
        if chi2 > 0.0 {
            1.0
        } else {
            0.0
        }
    } else if chi2.is_nan() {
        f64::NAN
    } else {
        chi2_cdf(chi2, dof)
    };
    Ok(Value::Double(p))
}
