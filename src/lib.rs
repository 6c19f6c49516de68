//! Inventory simulation comparing a decentralized network of regional
//! distribution centers against one centralized, risk-pooled warehouse.
//!
//! Each site draws daily demand, reorders below its reorder point with a
//! fixed lot and a stochastic lead time, and accrues holding, stockout and
//! ordering costs. All sites run in lock-step on one shared daily clock.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{SimError, SimResult};
pub use model::site::{CostBreakdown, DailyCycle, DailyRecord, InventorySite, SiteReport, StockSnapshot};
pub use simulation::config::{CentralizedConfig, CostModel, RegionConfig, ScenarioConfig, SiteParameters};
pub use simulation::engine::{run, PoolingVerdict, RunResult, ScenarioRunner, ScenarioTotals};
pub use strategy::implementations::RopPolicy;
