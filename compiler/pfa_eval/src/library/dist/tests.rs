#![expect(clippy::unwrap_used, reason = "test code")]

use pfa_types::{Field, Idx, Pool};
use pretty_assertions::assert_eq;

use crate::test_helpers::{assert_close, code, double, run, run_doubles};
use crate::{EvalResult, Value};

fn with_params(name: &str, x: f64, mean: f64, variance: f64) -> EvalResult {
    let mut pool = Pool::new();
    let ty = pool
        .record(
            None,
            vec![
                Field::new("mean", Idx::DOUBLE),
                Field::new("variance", Idx::DOUBLE),
            ],
        )
        .unwrap();
    let params = Value::record([
        ("mean", Value::Double(mean)),
        ("variance", Value::Double(variance)),
    ]);
    run(&mut pool, name, &[Idx::DOUBLE, ty], &[Value::Double(x), params])
}

#[test]
fn log_density() {
    let standard = -0.5 * (2.0 * std::f64::consts::PI).ln();
    assert_close(double(run_doubles("prob.dist.gaussianLL", &[0.0, 0.0, 1.0])), standard);
    assert_close(
        double(with_params("prob.dist.gaussianLL", 3.0, 1.0, 4.0)),
        -0.5 - (2.0 * (2.0 * std::f64::consts::PI).sqrt()).ln(),
    );
}

#[test]
fn cumulative_distribution() {
    assert_eq!(double(run_doubles("prob.dist.gaussianCDF", &[0.0, 0.0, 1.0])), 0.5);
    assert_close(
        double(with_params("prob.dist.gaussianCDF", 1.0, 0.0, 1.0)),
        0.841_344_746_068_542_9,
    );
}

#[test]
fn degenerate_distribution() {
    let ll = |x| double(run_doubles("prob.dist.gaussianLL", &[x, 1.0, 0.0]));
    assert_eq!(ll(1.0), f64::INFINITY);
    assert_eq!(ll(2.0), f64::NEG_INFINITY);
    let cdf = |x| double(run_doubles("prob.dist.gaussianCDF", &[x, 1.0, 0.0]));
    assert_eq!(cdf(0.5), 0.0);
    assert_eq!(cdf(1.0), 1.0);
}

#[test]
fn invalid_parameters_and_inputs() {
    assert_eq!(code(run_doubles("prob.dist.gaussianLL", &[0.0, 0.0, -1.0])), 13000);
    assert_eq!(code(run_doubles("prob.dist.gaussianLL", &[0.0, f64::NAN, 1.0])), 13000);
    assert_eq!(code(with_params("prob.dist.gaussianCDF", 0.0, 0.0, -1.0)), 13010);
    assert_eq!(code(run_doubles("prob.dist.gaussianLL", &[f64::INFINITY, 0.0, 1.0])), 13001);
    assert_eq!(code(with_params("prob.dist.gaussianCDF", f64::NAN, 0.0, 1.0)), 13011);
}

#[test]
fn exponential_distribution() {
    let pdf = |x, rate| run_doubles("prob.dist.exponentialPDF", &[x, rate]);
    assert_close(double(pdf(1.0, 2.0)), 2.0 * (-2.0_f64).exp());
    assert_eq!(double(pdf(0.0, 2.0)), 2.0);
    assert_eq!(double(pdf(-1.0, 2.0)), 0.0);
    assert_eq!(double(pdf(1.0, 0.0)), 0.0);
    assert_eq!(code(pdf(1.0, -1.0)), 13030);
    assert_eq!(code(pdf(f64::NAN, 1.0)), 13031);

    let cdf = |x, rate| run_doubles("prob.dist.exponentialCDF", &[x, rate]);
    assert_close(double(cdf(1.0, 2.0)), 1.0 - (-2.0_f64).exp());
    assert_eq!(double(cdf(-1.0, 2.0)), 0.0);
    assert_eq!(code(cdf(1.0, f64::INFINITY)), 13040);
    assert_eq!(code(cdf(f64::INFINITY, 1.0)), 13041);

    let qf = |p, rate| run_doubles("prob.dist.exponentialQF", &[p, rate]);
    assert_close(double(qf(0.5, 2.0)), std::f64::consts::LN_2 / 2.0);
    assert_eq!(double(qf(0.0, 0.0)), 0.0);
    assert_eq!(double(qf(0.5, 0.0)), f64::INFINITY);
    assert_eq!(double(qf(1.0, 2.0)), f64::INFINITY);
    assert_eq!(code(qf(1.5, 2.0)), 13051);
    assert_eq!(code(qf(f64::NAN, 2.0)), 13051);
}

fn chi2(name: &str, x: f64, dof: i32) -> EvalResult {
    let mut pool = Pool::new();
    run(
        &mut pool,
        name,
        &[Idx::DOUBLE, Idx::INT],
        &[Value::Double(x), Value::Int(dof)],
    )
}

#[test]
fn chi_squared_distribution() {
    assert_close(double(chi2("prob.dist.chi2PDF", 2.0, 2)), 0.5 * (-1.0_f64).exp());
    assert_close(
        double(chi2("prob.dist.chi2PDF", 1.0, 1)),
        (-0.5_f64).exp() / (2.0 * std::f64::consts::PI).sqrt(),
    );
    assert_eq!(double(chi2("prob.dist.chi2PDF", 0.0, 0)), f64::INFINITY);
    assert_eq!(double(chi2("prob.dist.chi2PDF", 1.0, 0)), 0.0);
    assert_eq!(double(chi2("prob.dist.chi2PDF", -1.0, 3)), 0.0);

    assert_close(double(chi2("prob.dist.chi2CDF", 2.0, 2)), 1.0 - (-1.0_f64).exp());
    assert_close(double(chi2("prob.dist.chi2CDF", 1.0, 1)), libm::erf(0.5_f64.sqrt()));
    assert_eq!(double(chi2("prob.dist.chi2CDF", 1.0, 0)), 1.0);
    assert_eq!(double(chi2("prob.dist.chi2CDF", -1.0, 2)), 0.0);

    assert_eq!(code(chi2("prob.dist.chi2PDF", 1.0, -1)), 13060);
    assert_eq!(code(chi2("prob.dist.chi2CDF", f64::NAN, 2)), 13071);
}
