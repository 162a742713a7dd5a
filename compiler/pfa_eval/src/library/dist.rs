//! `prob.dist.*`: normal, exponential and chi-squared distributions.
//!
//! The normal functions take either `(x, mu, sigma)` or
//! `(x, {mean, variance})`. Throughout, an invalid parameterization fails
//! with offset 0 and an invalid `x` or `p` with offset 1.

use std::f64::consts::{PI, SQRT_2};

use pfa_patterns::{Pattern, Signature};

use super::args::{double, double_field, int, record, take};
use super::numeric::chi2_cdf;
use crate::{Builtin, CallBoundary, CallContext, EvalError, EvalResult, Value};

pub(super) fn provide() -> Vec<Builtin> {
    let signatures = || {
        vec![
            Signature::new(
                [
                    ("x", Pattern::Double),
                    ("mu", Pattern::Double),
                    ("sigma", Pattern::Double),
                ],
                Pattern::Double,
            ),
            Signature::new(
                [
                    ("x", Pattern::Double),
                    (
                        "params",
                        Pattern::wild_record(
                            "A",
                            [("mean", Pattern::Double), ("variance", Pattern::Double)],
                        ),
                    ),
                ],
                Pattern::Double,
            ),
        ]
    };
    let rate = |point: &'static str| {
        Signature::new(
            [(point, Pattern::Double), ("lambda", Pattern::Double)],
            Pattern::Double,
        )
    };
    let dof = || {
        Signature::new(
            [("x", Pattern::Double), ("dof", Pattern::Int)],
            Pattern::Double,
        )
    };
    vec![
        Builtin::new("prob.dist.gaussianLL", 13000, signatures(), gaussian_ll),
        Builtin::new("prob.dist.gaussianCDF", 13010, signatures(), gaussian_cdf),
        Builtin::new(
            "prob.dist.exponentialPDF",
            13030,
            vec![rate("x")],
            exponential_pdf,
        ),
        Builtin::new(
            "prob.dist.exponentialCDF",
            13040,
            vec![rate("x")],
            exponential_cdf,
        ),
        Builtin::new(
            "prob.dist.exponentialQF",
            13050,
            vec![rate("p")],
            exponential_qf,
        ),
        Builtin::new("prob.dist.chi2PDF", 13060, vec![dof()], chi2_pdf),
        Builtin::new("prob.dist.chi2CDF", 13070, vec![dof()], chi2_cdf_at),
    ]
}

/// A validated normal distribution and the point to evaluate it at.
struct Normal {
    x: f64,
    mu: f64,
    sigma: f64,
}

impl Normal {
    fn from_args(ctx: &CallContext<'_>, args: &[Value]) -> Result<Self, EvalError> {
        let invalid = || ctx.fail(0, "invalid parameterization");
        let (x, mu, sigma) = match args {
            [x, mu, sigma] => (x, double(ctx, mu)?, double(ctx, sigma)?),
            [x, params] => {
                let params = record(ctx, params)?;
                let variance = double_field(ctx, params, "variance")?;
                if variance.is_nan() || variance < 0.0 {
                    return Err(invalid());
                }
                (x, double_field(ctx, params, "mean")?, variance.sqrt())
            }
            _ => return Err(ctx.arity(3, args.len())),
        };
        if !mu.is_finite() || !sigma.is_finite() || sigma < 0.0 {
            return Err(invalid());
        }
        let x = double(ctx, x)?;
        if !x.is_finite() {
            return Err(ctx.fail(1, "invalid input"));
        }
        Ok(Normal { x, mu, sigma })
    }
}

fn gaussian_ll(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let Normal { x, mu, sigma } = Normal::from_args(ctx, args)?;
    let ll = if sigma == 0.0 {
        if x == mu {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        }
    } else {
        let z = (x - mu) / sigma;
        -0.5 * z * z - (sigma * (2.0 * PI).sqrt()).ln()
    };
    Ok(Value::Double(ll))
}

fn gaussian_cdf(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let Normal { x, mu, sigma } = Normal::from_args(ctx, args)?;
    let p = if sigma == 0.0 {
        if x < mu {
            0.0
        } else {
            1.0
        }
    } else {
        0.5 * (1.0 + libm::erf((x - mu) / (sigma * SQRT_2)))
    };
    Ok(Value::Double(p))
}

/// The point and rate of an exponential distribution.
fn exponential(ctx: &CallContext<'_>, args: &[Value]) -> Result<(f64, f64), EvalError> {
    let [x, rate] = take(ctx, args)?;
    let rate = double(ctx, rate)?;
    if !rate.is_finite() || rate < 0.0 {
        return Err(ctx.fail(0, "invalid parameterization"));
    }
    Ok((double(ctx, x)?, rate))
}

fn exponential_pdf(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let (x, rate) = exponential(ctx, args)?;
    if !x.is_finite() {
        return Err(ctx.fail(1, "invalid input"));
    }
    let density = if rate == 0.0 || x < 0.0 {
        0.0
    } else if x == 0.0 {
        rate
    } else {
        rate * (-rate * x).exp()
    };
    Ok(Value::Double(density))
}

fn exponential_cdf(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let (x, rate) = exponential(ctx, args)?;
    if !x.is_finite() {
        return Err(ctx.fail(1, "invalid input"));
    }
    let p = if rate == 0.0 || x <= 0.0 {
        0.0
    } else {
        -(-rate * x).exp_m1()
    };
    Ok(Value::Double(p))
}

fn exponential_qf(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let (p, rate) = exponential(ctx, args)?;
    if !(0.0..=1.0).contains(&p) {
        return Err(ctx.fail(1, "invalid input"));
    }
    let q = if p == 0.0 {
        0.0
    } else if rate == 0.0 || p == 1.0 {
        f64::INFINITY
    } else {
        -(-p).ln_1p() / rate
    };
    Ok(Value::Double(q))
}

/// The point and degrees of freedom of a chi-squared distribution.
fn chi2(ctx: &CallContext<'_>, args: &[Value]) -> Result<(f64, i32), EvalError> {
    let [x, dof] = take(ctx, args)?;
    let dof = int(ctx, dof)?;
    if dof < 0 {
        return Err(ctx.fail(0, "invalid parameterization"));
    }
    let x = double(ctx, x)?;
    if !x.is_finite() {
        return Err(ctx.fail(1, "invalid input"));
    }
    Ok((x, dof))
}

fn chi2_pdf(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let (x, dof) = chi2(ctx, args)?;
    let density = if dof == 0 {
        if x == 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    } else if x <= 0.0 {
        0.0
    } else {
        let half = f64::from(dof) / 2.0;
        ((half - 1.0) * x.ln() - x / 2.0 - half * std::f64::consts::LN_2 - libm::lgamma(half))
            .exp()
    };
    Ok(Value::Double(density))
}

fn chi2_cdf_at(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let (x, dof) = chi2(ctx, args)?;
    Ok(Value::Double(chi2_cdf(x, dof)))
}

#[cfg(test)]
mod tests;
