// src/simulation/engine.rs

use crate::error::SimResult;
use crate::model::site::{InventorySite, SiteReport};
use crate::simulation::clock::SimClock;
use crate::simulation::config::ScenarioConfig;
use crate::simulation::rng::{fresh_seed, site_rng};
use crate::strategy::implementations::RopPolicy;
use serde::Serialize;
use tracing::info;

/// Scenario-level aggregates of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioTotals {
    pub total_cost_decentralized: f64,
    pub total_lost_sales_decentralized: f64,
    pub total_cost_centralized: f64,
    pub total_lost_sales_centralized: f64,
}

impl ScenarioTotals {
    /// Positive when the central warehouse is the more expensive option.
    pub fn cost_difference(&self) -> f64 {
        self.total_cost_centralized - self.total_cost_decentralized
    }

    pub fn verdict(&self) -> PoolingVerdict {
        if self.total_lost_sales_decentralized > self.total_lost_sales_centralized {
            PoolingVerdict::PoolingAvoidedStockouts {
                units: self.total_lost_sales_decentralized - self.total_lost_sales_centralized,
            }
        } else {
            PoolingVerdict::DecentralizedHeld
        }
    }
}

/// Which network served demand better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolingVerdict {
    /// The pooled site lost `units` fewer sales than the regions combined.
    PoolingAvoidedStockouts { units: f64 },
    /// The regional network lost no more sales than the pooled site.
    DecentralizedHeld,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    /// Seed actually used, even when none was configured.
    pub seed: u64,
    pub horizon_days: u32,
    pub rop_policy: RopPolicy,
    pub decentralized: Vec<SiteReport>,
    pub centralized: SiteReport,
    pub totals: ScenarioTotals,
    pub verdict: PoolingVerdict,
}

impl RunResult {
    /// Every site of the run, regions first and the pooled site last.
    pub fn sites(&self) -> impl Iterator<Item = &SiteReport> {
        self.decentralized
            .iter()
            .chain(std::iter::once(&self.centralized))
    }

    pub fn site(&self, name: &str) -> Option<&SiteReport> {
        self.sites().find(|site| site.name == name)
    }
}

/// Drives the regional sites and the pooled site over one shared clock.
pub struct ScenarioRunner {
    config: ScenarioConfig,
}

impl ScenarioRunner {
    /// Validates the configuration up front so `run` never starts a bad scenario.
    pub fn new(config: ScenarioConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn run(&self) -> SimResult<RunResult> {
        run(&self.config)
    }
}

/// Runs the decentralized and centralized networks side by side.
///
/// All sites advance in lock-step, one day per tick, each with its own
/// random stream derived from the run seed. The configuration is only read.
pub fn run(config: &ScenarioConfig) -> SimResult<RunResult> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(fresh_seed);
    let pooled = config.centralized.pooled_parameters(&config.regions)?;

    info!(
        seed,
        horizon_days = config.horizon_days,
        regions = config.regions.len(),
        rop_policy = %config.rop_policy,
        "starting scenario"
    );

    let mut regions = Vec::with_capacity(config.regions.len());
    for region in &config.regions {
        regions.push(InventorySite::new(
            region.name.clone(),
            region.params.clone(),
            config.costs.clone(),
            config.rop_policy.build(),
        )?);
    }
    let mut pooled_site = InventorySite::new(
        config.centralized.site_name(),
        pooled,
        config.costs.clone(),
        config.rop_policy.build(),
    )?;

    let mut region_rngs: Vec<_> = (0..regions.len()).map(|i| site_rng(seed, i)).collect();
    let mut pooled_rng = site_rng(seed, regions.len());

    let mut clock = SimClock::new(config.horizon_days);
    while !clock.is_finished() {
        let day = clock.day();
        for (site, rng) in regions.iter_mut().zip(region_rngs.iter_mut()) {
            site.advance_one_day(day, rng);
        }
        pooled_site.advance_one_day(day, &mut pooled_rng);
        clock.tick();
    }

    let decentralized: Vec<SiteReport> =
        regions.into_iter().map(InventorySite::into_report).collect();
    let centralized = pooled_site.into_report();

    let totals = ScenarioTotals {
        total_cost_decentralized: decentralized.iter().map(|s| s.cost_total).sum(),
        total_lost_sales_decentralized: decentralized.iter().map(|s| s.lost_sales_total).sum(),
        total_cost_centralized: centralized.cost_total,
        total_lost_sales_centralized: centralized.lost_sales_total,
    };

    info!(
        seed,
        decentralized_cost = totals.total_cost_decentralized,
        centralized_cost = totals.total_cost_centralized,
        decentralized_lost_sales = totals.total_lost_sales_decentralized,
        centralized_lost_sales = totals.total_lost_sales_centralized,
        "scenario finished"
    );

    Ok(RunResult {
        seed,
        horizon_days: config.horizon_days,
        rop_policy: config.rop_policy,
        verdict: totals.verdict(),
        decentralized,
        centralized,
        totals,
    })
}
