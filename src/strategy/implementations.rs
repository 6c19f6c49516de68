// src/strategy/implementations.rs

use crate::error::SimError;
use crate::simulation::config::SiteParameters;
use crate::strategy::optimization::lead_time_demand_std;
use crate::strategy::traits::ReorderPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =========================================================================
// 1. Simple ROP
// =========================================================================

/// Safety stock sized on the per-period demand deviation only.
///
/// Formula: ROP = d * L + z * sigma_d
///
/// Ignores lead-time variance, so it understates safety stock whenever
/// deliveries are unreliable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRop;

impl ReorderPolicy for SimpleRop {
    fn safety_stock(&self, params: &SiteParameters) -> f64 {
        params.safety_factor * params.demand_std
    }
}

// =========================================================================
// 2. Combined-variance ROP
// =========================================================================

/// Safety stock sized on the deviation of demand over a random lead time.
///
/// Formula: ROP = d * L + z * sqrt(L * sigma_d^2 + d^2 * sigma_L^2)
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinedVarianceRop;

impl ReorderPolicy for CombinedVarianceRop {
    fn safety_stock(&self, params: &SiteParameters) -> f64 {
        params.safety_factor
            * lead_time_demand_std(
                params.mean_demand,
                params.demand_std,
                params.mean_lead_time,
                params.lead_time_std,
            )
    }
}

// =========================================================================
// Selection
// =========================================================================

/// Which reorder policy every site of a run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RopPolicy {
    Simple,
    #[default]
    CombinedVariance,
}

impl RopPolicy {
    pub fn build(self) -> Box<dyn ReorderPolicy> {
        match self {
            RopPolicy::Simple => Box::new(SimpleRop),
            RopPolicy::CombinedVariance => Box::new(CombinedVarianceRop),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RopPolicy::Simple => "simple",
            RopPolicy::CombinedVariance => "combined_variance",
        }
    }
}

impl fmt::Display for RopPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RopPolicy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "simple" => Ok(RopPolicy::Simple),
            "combined_variance" | "combined" => Ok(RopPolicy::CombinedVariance),
            _ => Err(SimError::UnknownPolicy(s.to_string())),
        }
    }
}
