// src/io/demand.rs

use crate::error::{SimError, SimResult};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Builds a Normal distribution, reporting bad parameters against `field`.
pub fn normal(field: &str, mean: f64, std_dev: f64) -> SimResult<Normal<f64>> {
    Normal::new(mean, std_dev).map_err(|e| SimError::invalid(field, e.to_string()))
}

/// Draws one day of demand.
///
/// Logic to handle conversion:
/// 1. Round to nearest integer.
/// 2. Clamp negative numbers to 0 (demand cannot be negative).
pub fn sample_demand<R: Rng + ?Sized>(distribution: &Normal<f64>, rng: &mut R) -> u64 {
    let value = distribution.sample(rng).round();
    if value < 0.0 {
        0
    } else {
        value as u64
    }
}

/// Draws a replenishment lead time in whole days, never shorter than one day.
pub fn sample_lead_time<R: Rng + ?Sized>(distribution: &Normal<f64>, rng: &mut R) -> u32 {
    let value = distribution.sample(rng).round();
    if value < 1.0 {
        1
    } else {
        value as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn zero_deviation_returns_the_mean() {
        let mut rng = SmallRng::seed_from_u64(1);
        let demand = normal("demand", 5.0, 0.0).unwrap();
        let lead_time = normal("lead_time", 3.0, 0.0).unwrap();
        for _ in 0..50 {
            assert_eq!(sample_demand(&demand, &mut rng), 5);
            assert_eq!(sample_lead_time(&lead_time, &mut rng), 3);
        }
    }

    #[test]
    fn samples_are_clamped_to_their_domain() {
        let mut rng = SmallRng::seed_from_u64(2);
        let demand = normal("demand", -50.0, 1.0).unwrap();
        let lead_time = normal("lead_time", -5.0, 1.0).unwrap();
        for _ in 0..100 {
            assert_eq!(sample_demand(&demand, &mut rng), 0);
            assert_eq!(sample_lead_time(&lead_time, &mut rng), 1);
        }
    }

    #[test]
    fn negative_deviation_is_rejected() {
        assert!(matches!(
            normal("north.demand_std", 5.0, -1.0),
            Err(SimError::InvalidParameter { .. })
        ));
    }
}
