//! Response curves mapping `[0, 1]` inputs to `[0, 1]` scores.

use utility_ai::clamp01;

/// Logistic curve centered at `x0` with steepness `k`.
pub fn sigmoid(x: f64, k: f64, x0: f64) -> f64 {
    clamp01(1.0 / (1.0 + (-k * (x - x0)).exp()))
}

/// High when the input is low.
pub fn inverse(x: f64) -> f64 {
    clamp01(1.0 - x)
}

/// Power curve; `p > 1` emphasizes high values.
pub fn exp_pow(x: f64, p: f64) -> f64 {
    clamp01(clamp01(x).powf(p))
}
