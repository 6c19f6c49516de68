// src/strategy/optimization.rs

//! Statistics behind safety stock and risk pooling.
//!
//! Pooling independent demand streams adds their means but only adds their
//! variances, so the pooled standard deviation grows with the square root of
//! the sum of squares. The relative variability (coefficient of variation)
//! of the pooled stream is therefore lower than that of any typical region.

use crate::error::{SimError, SimResult};

/// Pooled mean demand: the plain sum of the regional means.
pub fn pooled_mean(means: &[f64]) -> f64 {
    means.iter().sum()
}

/// Pooled standard deviation of independent demand streams.
///
/// Formula: sigma_pooled = sqrt(sigma_1^2 + sigma_2^2 + ... + sigma_n^2)
pub fn pooled_std_dev(std_devs: &[f64]) -> f64 {
    std_devs.iter().map(|s| s * s).sum::<f64>().sqrt()
}

/// Weighted average of `values`; an all-zero weight vector falls back to the plain mean.
pub fn demand_weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let total_weight: f64 = weights.iter().sum();
    if total_weight <= 0.0 {
        return values.iter().sum::<f64>() / values.len() as f64;
    }
    values
        .iter()
        .zip(weights)
        .map(|(v, w)| v * w)
        .sum::<f64>()
        / total_weight
}

/// Relative variability of a demand stream (std / mean).
pub fn coefficient_of_variation(mean: f64, std_dev: f64) -> f64 {
    if mean == 0.0 {
        return 0.0;
    }
    std_dev / mean
}

/// Standard deviation of demand over a stochastic lead time.
///
/// Combines per-period demand variance with lead-time variance:
/// sigma_LTD = sqrt(L * sigma_d^2 + d^2 * sigma_L^2)
pub fn lead_time_demand_std(
    mean_demand: f64,
    demand_std: f64,
    mean_lead_time: f64,
    lead_time_std: f64,
) -> f64 {
    (mean_lead_time * demand_std.powi(2) + mean_demand.powi(2) * lead_time_std.powi(2)).sqrt()
}

/// Bound on the Z-score a service level converts to.
///
/// Levels at or above 1 map to `Z_SCORE_CAP`, levels at or below 0 to
/// `-Z_SCORE_CAP`, and extreme levels inside (0, 1) are clamped to the same
/// range, so a safety factor never exceeds five standard deviations.
pub const Z_SCORE_CAP: f64 = 5.0;

/// Z-score for a target cycle service level (probability of no stockout per cycle).
///
/// Uses the rational tail approximation of Abramowitz and Stegun 26.2.23,
/// accurate to 4.5e-4. The result is clamped to `[-Z_SCORE_CAP, Z_SCORE_CAP]`.
pub fn z_score_for_service_level(level: f64) -> f64 {
    if level >= 1.0 {
        return Z_SCORE_CAP;
    }
    if level <= 0.0 {
        return -Z_SCORE_CAP;
    }

    let tail = level.min(1.0 - level);
    let z = upper_tail_quantile(tail).min(Z_SCORE_CAP);
    if level < 0.5 {
        -z
    } else {
        z
    }
}

/// Quantile `z >= 0` with `P(Z > z) = tail`, for `0 < tail <= 0.5`.
fn upper_tail_quantile(tail: f64) -> f64 {
    const NUM: [f64; 3] = [2.515517, 0.802853, 0.010328];
    const DEN: [f64; 3] = [1.432788, 0.189269, 0.001308];

    let t = (-2.0 * tail.ln()).sqrt();
    let num = NUM[0] + t * (NUM[1] + t * NUM[2]);
    let den = 1.0 + t * (DEN[0] + t * (DEN[1] + t * DEN[2]));
    (t - num / den).max(0.0)
}

/// Safety factor for a target service level.
///
/// The level must lie strictly inside (0, 1). Levels below 0.5 would ask for
/// negative safety stock, so they yield 0.
pub fn safety_factor_for_service_level(level: f64) -> SimResult<f64> {
    if !level.is_finite() || level <= 0.0 || level >= 1.0 {
        return Err(SimError::invalid(
            "service_level",
            format!("must lie strictly between 0 and 1, got {}", level),
        ));
    }
    Ok(z_score_for_service_level(level).max(0.0))
}
