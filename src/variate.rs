// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Agrisim Farmer Adoption Suite - Payoff Sampler

//! Positive-truncated normal variate for the stochastic NP payoff.
//!
//! The NP payoff is a zero-mean normal with scale `var`, truncated
//! symmetrically at `±mean` and then shifted by `+mean`. The support is
//! therefore exactly `[0, 2*mean]` and the sample is non-negative by
//! construction. Sampling goes through the inverse CDF of the truncated
//! interval rather than rejection against an unbounded normal, so the
//! density is proportional to the normal density restricted to the bounds.

use rand::Rng;

/// Draw one NP payoff sample. Requires `mean > 0` and `var > 0`
/// (enforced by configuration validation).
pub fn positive_normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, var: f64) -> f64 {
    debug_assert!(mean > 0.0 && var > 0.0);
    let lo = std_normal_cdf(-mean / var);
    let hi = std_normal_cdf(mean / var);
    let u: f64 = rng.gen();
    let p = (lo + u * (hi - lo)).clamp(f64::MIN_POSITIVE, 1.0 - 1e-16);
    let z = std_normal_quantile(p);
    // Quantile is a rational approximation; clamp keeps the support exact.
    (z * var).clamp(-mean, mean) + mean
}

// ─── Standard normal CDF / quantile ─────────────────────────────────────────

/// Abramowitz & Stegun 7.1.26 polynomial approximation of erf,
/// |error| < 1.5e-7.
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t * (-x * x).exp();
    sign * y
}

fn std_normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Acklam's rational approximation of the standard normal quantile,
/// |relative error| < 1.15e-9 over (0, 1).
fn std_normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
