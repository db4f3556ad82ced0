use serde::Serialize;

use crate::model::thresholds::ScreeningProfile;
use crate::pipeline::stage2_aggregate::AggregateView;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZTest {
    pub z: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrevalenceTest {
    pub n: usize,
    pub cases: usize,
    pub p_observed: f64,
    pub p_expected: f64,
    pub z: f64,
    pub p_value: f64,
    pub alpha: f64,
    pub significant: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrevalenceOutcome {
    Tested(PrevalenceTest),
    InsufficientData,
}

/// One-sample two-sided z-test of a proportion. Degenerate inputs (`n == 0`,
/// `p_expected` at 0 or 1) have no standard error and yield NaN.
pub fn z_test(p_observed: f64, p_expected: f64, n: usize) -> ZTest {
    let se = (p_expected * (1.0 - p_expected) / n as f64).sqrt();
    if n == 0 || !se.is_finite() || se <= 0.0 {
        return ZTest {
            z: f64::NAN,
            p_value: f64::NAN,
        };
    }
    let z = (p_observed - p_expected) / se;
    // 2 * (1 - Phi(|z|)) == erfc(|z| / sqrt 2)
    let p_value = erfc(z.abs() / std::f64::consts::SQRT_2);
    ZTest { z, p_value }
}

/// Tests the share of non-normal classifications in `view` against the
/// profile's reference prevalence.
pub fn prevalence_test(view: &AggregateView, profile: &ScreeningProfile) -> PrevalenceOutcome {
    let n = view.n();
    if n == 0 {
        return PrevalenceOutcome::InsufficientData;
    }
    let cases = view.non_normal();
    let p_observed = cases as f64 / n as f64;
    let ZTest { z, p_value } = z_test(p_observed, profile.expected_prevalence, n);
    if !z.is_finite() || p_value.is_nan() {
        return PrevalenceOutcome::InsufficientData;
    }
    PrevalenceOutcome::Tested(PrevalenceTest {
        n,
        cases,
        p_observed,
        p_expected: profile.expected_prevalence,
        z,
        p_value,
        alpha: profile.alpha,
        significant: p_value < profile.alpha,
    })
}

/// Standard normal cumulative distribution function.
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

const SERIES_CUTOFF: f64 = 2.0;
const CF_TERMS: u32 = 200;
const TWO_OVER_SQRT_PI: f64 = std::f64::consts::FRAC_2_SQRT_PI;

/// Complementary error function.
fn erfc(x: f64) -> f64 {
    if x < 0.0 {
        return 2.0 - erfc(-x);
    }
    if x < SERIES_CUTOFF {
        1.0 - erf_series(x)
    } else {
        erfc_continued_fraction(x)
    }
}

// Maclaurin series: erf(x) = 2/sqrt(pi) * sum (-1)^n x^(2n+1) / (n! (2n+1))
fn erf_series(x: f64) -> f64 {
    let x2 = x * x;
    let mut term = x;
    let mut sum = x;
    let mut n = 1.0;
    loop {
        term *= -x2 / n;
        let contrib = term / (2.0 * n + 1.0);
        sum += contrib;
        if contrib.abs() <= f64::EPSILON * sum.abs() {
            break;
        }
        n += 1.0;
    }
    TWO_OVER_SQRT_PI * sum
}

// Laplace continued fraction, evaluated bottom-up:
// erfc(x) = exp(-x^2)/sqrt(pi) * 1/(x + (1/2)/(x + 1/(x + (3/2)/(x + ...))))
fn erfc_continued_fraction(x: f64) -> f64 {
    let mut tail = x;
    for k in (1..=CF_TERMS).rev() {
        tail = x + (k as f64 / 2.0) / tail;
    }
    0.5 * TWO_OVER_SQRT_PI * (-x * x).exp() / tail
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_prevalence.rs"]
mod tests;
