//! Numeric helpers shared by several library modules.

/// `x` raised to `y` with the JVM's special cases.
///
/// Differs from C `pow` on NaN and infinite exponents: `pow(1, inf)` and
/// `pow(1, NaN)` are NaN, as is a negative base with a non-integral exponent.
pub(super) fn pow_like_java(x: f64, y: f64) -> f64 {
    if x.is_nan() && y == 0.0 {
        1.0
    } else if x.is_nan() || y.is_nan() {
        f64::NAN
    } else if x == 0.0 && y < 0.0 {
        f64::INFINITY
    } else if y.is_infinite() {
        if x == 1.0 || x == -1.0 {
            f64::NAN
        } else if (x.abs() < 1.0) == (y > 0.0) {
            0.0
        } else {
            f64::INFINITY
        }
    } else if x.is_infinite() {
        if y == 0.0 {
            1.0
        } else if y < 0.0 {
            0.0
        } else if x < 0.0 && y.fract() == 0.0 && y % 2.0 == 1.0 {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    } else if x < 0.0 && y.fract() != 0.0 {
        f64::NAN
    } else {
        x.powf(y)
    }
}

/// Dot product of two equal-length slices.
pub(super) fn dot(x: &[f64], y: &[f64]) -> Option<f64> {
    (x.len() == y.len()).then(|| x.iter().zip(y).map(|(a, b)| a * b).sum())
}

/// `int` result of a double computation, if it is in range.
#[expect(
    clippy::cast_possible_truncation,
    reason = "range is checked before the cast"
)]
pub(super) fn to_int(x: f64) -> Option<i32> {
    (!x.is_nan() && x >= f64::from(i32::MIN) && x <= f64::from(i32::MAX)).then(|| x as i32)
}

/// `long` result of a double computation, if it is in range.
#[expect(
    clippy::cast_possible_truncation,
    reason = "range is checked before the cast"
)]
pub(crate) fn to_long(x: f64) -> Option<i64> {
    // 2^63 is exactly representable; i64::MAX is not.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (!x.is_nan() && (-LIMIT..LIMIT).contains(&x)).then(|| x as i64)
}

/// Lower regularized incomplete gamma function `P(a, x)`.
///
/// Series expansion below `a + 1`, Lentz's continued fraction for the
/// complement above.
pub(super) fn regularized_gamma_p(a: f64, x: f64) -> f64 {
    const EPSILON: f64 = 1e-15;
    const MAX_TERMS: usize = 1000;
    const TINY: f64 = 1e-300;

    if a.is_nan() || x.is_nan() || a <= 0.0 || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return 0.0;
    }
    if x.is_infinite() {
        return 1.0;
    }
    let prefix = (a * x.ln() - x - libm::lgamma(a)).exp();
    if x < a + 1.0 {
        let mut n = a;
        let mut term = 1.0 / a;
        let mut sum = term;
        for _ in 0..MAX_TERMS {
            n += 1.0;
            term *= x / n;
            sum += term;
            if term.abs() < sum.abs() * EPSILON {
                break;
            }
        }
        (sum * prefix).min(1.0)
    } else {
        let mut b = x + 1.0 - a;
        let mut c = 1.0 / TINY;
        let mut d = 1.0 / b;
        let mut h = d;
        let mut i = 0.0;
        for _ in 0..MAX_TERMS {
            i += 1.0;
            let an = -i * (i - a);
            b += 2.0;
            d = an * d + b;
            if d.abs() < TINY {
                d = TINY;
            }
            c = b + an / c;
            if c.abs() < TINY {
                c = TINY;
            }
            d = 1.0 / d;
            let delta = d * c;
            h *= delta;
            if (delta - 1.0).abs() < EPSILON {
                break;
            }
        }
        (1.0 - prefix * h).max(0.0)
    }
}

/// Chi-squared cumulative distribution for finite `x` and `dof >= 0`.
///
/// Zero degrees of freedom put all mass at the origin.
pub(super) fn chi2_cdf(x: f64, dof: i32) -> f64 {
    if dof == 0 {
        if x > 0.0 {
            1.0
        } else {
            0.0
        }
    } else if x <= 0.0 {
        0.0
    } else {
        regularized_gamma_p(f64::from(dof) / 2.0, x / 2.0)
    }
}

/// Solve `matrix · y = rhs` by Gaussian elimination with partial pivoting.
///
/// `matrix` is square with one row per entry of `rhs`. Returns `None` when
/// the matrix is singular.
pub(super) fn solve(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Option<Vec<f64>> {
    let n = rhs.len();
    for col in 0..n {
        let pivot =
            (col..n).max_by(|&i, &j| matrix[i][col].abs().total_cmp(&matrix[j][col].abs()))?;
        if matrix[pivot][col] == 0.0 {
            return None;
        }
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);
        for row in col + 1..n {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..n {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }
    let mut out = vec![0.0; n];
    for row in (0..n).rev() {
        let known: f64 = (row + 1..n).map(|k| matrix[row][k] * out[k]).sum();
        out[row] = (rhs[row] - known) / matrix[row][row];
    }
    Some(out)
}
