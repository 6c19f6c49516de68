// src/simulation/config.rs

use crate::error::{SimError, SimResult};
use crate::strategy::implementations::RopPolicy;
use crate::strategy::optimization::{demand_weighted_mean, pooled_mean, pooled_std_dev};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Immutable per-run description of one distribution center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteParameters {
    pub mean_demand: f64,
    pub demand_std: f64,
    pub mean_lead_time: f64,
    pub lead_time_std: f64,
    pub freight_cost_per_unit: f64,
    #[serde(default)]
    pub initial_stock: u64,
    /// Z-score multiplier applied to the safety stock term.
    #[serde(default)]
    pub safety_factor: f64,
}

impl SiteParameters {
    /// Checks every field; `site` prefixes the field name in the error.
    pub fn validate(&self, site: &str) -> SimResult<()> {
        let field = |name: &str| format!("{}.{}", site, name);

        require_positive(&field("mean_demand"), self.mean_demand)?;
        require_non_negative(&field("demand_std"), self.demand_std)?;
        require_positive(&field("mean_lead_time"), self.mean_lead_time)?;
        require_non_negative(&field("lead_time_std"), self.lead_time_std)?;
        require_non_negative(&field("freight_cost_per_unit"), self.freight_cost_per_unit)?;
        require_non_negative(&field("safety_factor"), self.safety_factor)?;
        Ok(())
    }
}

/// Cost constants shared by every site in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Penalty per unit of lost sales.
    pub stockout_cost_per_unit: f64,
    /// Holding cost per unit per year, accrued daily.
    pub annual_holding_cost_per_unit: f64,
    pub days_per_year: u32,
    pub fixed_order_cost: f64,
    /// Fixed lot size of every replenishment order.
    pub order_quantity: u64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            stockout_cost_per_unit: 20.0,
            annual_holding_cost_per_unit: 5.0,
            days_per_year: 365,
            fixed_order_cost: 150.0,
            order_quantity: 300,
        }
    }
}

impl CostModel {
    pub fn daily_holding_cost_per_unit(&self) -> f64 {
        self.annual_holding_cost_per_unit / self.days_per_year as f64
    }

    pub fn validate(&self) -> SimResult<()> {
        require_non_negative("costs.stockout_cost_per_unit", self.stockout_cost_per_unit)?;
        require_non_negative(
            "costs.annual_holding_cost_per_unit",
            self.annual_holding_cost_per_unit,
        )?;
        require_non_negative("costs.fixed_order_cost", self.fixed_order_cost)?;
        if self.days_per_year == 0 {
            return Err(SimError::invalid("costs.days_per_year", "must be at least 1"));
        }
        if self.order_quantity == 0 {
            return Err(SimError::invalid("costs.order_quantity", "must be at least 1"));
        }
        Ok(())
    }
}

/// One regional site of the decentralized network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    #[serde(flatten)]
    pub params: SiteParameters,
}

impl RegionConfig {
    pub fn new(name: impl Into<String>, params: SiteParameters) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// How the single pooled site is derived from the regions.
///
/// Demand is always pooled (sum of means, root-sum-of-squares of deviations).
/// Everything else defaults to a demand-weighted blend of the regions and can
/// be overridden. The penalty fields model the extra physical distance of a
/// single central warehouse and are zero unless configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentralizedConfig {
    pub name: Option<String>,
    pub mean_lead_time: Option<f64>,
    pub lead_time_std: Option<f64>,
    pub lead_time_penalty_days: f64,
    pub lead_time_std_penalty: f64,
    pub freight_cost_per_unit: Option<f64>,
    pub initial_stock: Option<u64>,
    pub safety_factor: Option<f64>,
}

impl CentralizedConfig {
    pub fn site_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Centralized")
    }

    /// Builds the pooled site's parameters from the regional ones.
    pub fn pooled_parameters(&self, regions: &[RegionConfig]) -> SimResult<SiteParameters> {
        if regions.is_empty() {
            return Err(SimError::invalid("regions", "at least one region is required"));
        }
        require_non_negative("centralized.lead_time_penalty_days", self.lead_time_penalty_days)?;
        require_non_negative("centralized.lead_time_std_penalty", self.lead_time_std_penalty)?;

        let means: Vec<f64> = regions.iter().map(|r| r.params.mean_demand).collect();
        let stds: Vec<f64> = regions.iter().map(|r| r.params.demand_std).collect();

        let mean_lead_time = self
            .mean_lead_time
            .unwrap_or_else(|| weighted_by_demand(regions, |p| p.mean_lead_time));
        let lead_time_std = self
            .lead_time_std
            .unwrap_or_else(|| weighted_by_demand(regions, |p| p.lead_time_std));
        let initial_stock = match self.initial_stock {
            Some(stock) => stock,
            None => regions
                .iter()
                .try_fold(0u64, |acc, r| acc.checked_add(r.params.initial_stock))
                .ok_or_else(|| {
                    SimError::invalid(
                        "centralized.initial_stock",
                        "sum of regional initial stock overflows",
                    )
                })?,
        };

        let params = SiteParameters {
            mean_demand: pooled_mean(&means),
            demand_std: pooled_std_dev(&stds),
            mean_lead_time: mean_lead_time + self.lead_time_penalty_days,
            lead_time_std: lead_time_std + self.lead_time_std_penalty,
            freight_cost_per_unit: self
                .freight_cost_per_unit
                .unwrap_or_else(|| weighted_by_demand(regions, |p| p.freight_cost_per_unit)),
            initial_stock,
            safety_factor: self.safety_factor.unwrap_or_else(|| {
                regions
                    .iter()
                    .map(|r| r.params.safety_factor)
                    .fold(0.0, f64::max)
            }),
        };
        params.validate(self.site_name())?;
        Ok(params)
    }
}

fn weighted_by_demand(regions: &[RegionConfig], value: impl Fn(&SiteParameters) -> f64) -> f64 {
    let values: Vec<f64> = regions.iter().map(|r| value(&r.params)).collect();
    let weights: Vec<f64> = regions.iter().map(|r| r.params.mean_demand).collect();
    demand_weighted_mean(&values, &weights)
}

fn default_horizon_days() -> u32 {
    365
}

/// Full description of one decentralized-vs-centralized comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub rop_policy: RopPolicy,
    #[serde(default)]
    pub costs: CostModel,
    pub regions: Vec<RegionConfig>,
    #[serde(default)]
    pub centralized: CentralizedConfig,
}

impl ScenarioConfig {
    /// Three regions (North, South, Center) against one central warehouse.
    ///
    /// `volatility` drives the regional demand deviations (`v/30`, `(v+5)/30`,
    /// `(v-5)/30`), `lead_time_base` the regional lead times and
    /// `transport_std` their deviation. The central warehouse sits two days
    /// further away, with one extra day of deviation and dearer freight.
    pub fn three_region(volatility: f64, lead_time_base: f64, transport_std: f64) -> Self {
        let region = |mean_demand, demand_std, mean_lead_time, initial_stock| SiteParameters {
            mean_demand,
            demand_std,
            mean_lead_time,
            lead_time_std: transport_std,
            freight_cost_per_unit: 2.50,
            initial_stock,
            safety_factor: 0.0,
        };

        Self {
            horizon_days: default_horizon_days(),
            seed: None,
            rop_policy: RopPolicy::default(),
            costs: CostModel::default(),
            regions: vec![
                RegionConfig::new(
                    "North",
                    region(3.3, volatility / 30.0, lead_time_base + 1.0, 50),
                ),
                RegionConfig::new(
                    "South",
                    region(4.1, (volatility + 5.0) / 30.0, lead_time_base, 60),
                ),
                RegionConfig::new(
                    "Center",
                    region(3.0, (volatility - 5.0) / 30.0, lead_time_base - 1.0, 40),
                ),
            ],
            centralized: CentralizedConfig {
                name: Some("Centralized".to_string()),
                mean_lead_time: Some(lead_time_base),
                lead_time_std: Some(transport_std),
                lead_time_penalty_days: 2.0,
                lead_time_std_penalty: 1.0,
                freight_cost_per_unit: Some(3.80),
                initial_stock: Some(150),
                safety_factor: None,
            },
        }
    }

    /// Overrides every site's safety factor, the pooled one included.
    pub fn with_safety_factor(mut self, safety_factor: f64) -> Self {
        for region in &mut self.regions {
            region.params.safety_factor = safety_factor;
        }
        self.centralized.safety_factor = Some(safety_factor);
        self
    }

    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> SimResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.horizon_days == 0 {
            return Err(SimError::invalid("horizon_days", "must be at least 1 day"));
        }
        if self.regions.is_empty() {
            return Err(SimError::invalid("regions", "at least one region is required"));
        }
        self.costs.validate()?;
        for region in &self.regions {
            region.params.validate(&region.name)?;
        }
        self.centralized.pooled_parameters(&self.regions)?;
        Ok(())
    }
}

fn require_positive(field: &str, value: f64) -> SimResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SimError::invalid(
            field,
            format!("must be a finite value > 0, got {}", value),
        ));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> SimResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimError::invalid(
            field,
            format!("must be a finite value >= 0, got {}", value),
        ));
    }
    Ok(())
}
