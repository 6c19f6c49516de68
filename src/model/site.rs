// src/model/site.rs

use crate::error::SimResult;
use crate::io::demand::{normal, sample_demand, sample_lead_time};
use crate::model::replenishment::{PendingOrder, Replenishment};
use crate::simulation::config::{CostModel, SiteParameters};
use crate::strategy::optimization::coefficient_of_variation;
use crate::strategy::traits::ReorderPolicy;
use rand::Rng;
use rand_distr::Normal;
use serde::Serialize;
use tracing::{debug, trace};

/// Phase of a site's daily loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DailyCycle {
    Consuming,
    CheckingRop,
}

/// Stock on hand at the start of a day, after any arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockSnapshot {
    pub day: u32,
    pub stock: u64,
}

/// End-of-day state of a site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub day: u32,
    pub demand: u64,
    pub stock: u64,
    pub lost_sales_total: f64,
    pub cost_total: f64,
    pub order_in_transit: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub holding: f64,
    pub stockout: f64,
    pub ordering: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.holding + self.stockout + self.ordering
    }
}

/// One distribution center: its stock, its reorder logic and the costs it accrues.
pub struct InventorySite {
    name: String,
    params: SiteParameters,
    costs: CostModel,

    // Interchangeable reorder logic
    policy: Box<dyn ReorderPolicy>,
    demand: Normal<f64>,
    lead_time: Normal<f64>,

    // State Variables
    stock: u64,
    cycle: DailyCycle,
    replenishment: Replenishment,

    // Accumulators, never decreasing
    lost_sales_total: f64,
    cost_total: f64,
    cost_breakdown: CostBreakdown,
    total_demand: u64,
    units_served: u64,
    stockout_days: u32,
    orders_placed: u32,
    orders_received: u32,

    history: Vec<StockSnapshot>,
    ledger: Vec<DailyRecord>,
}

impl InventorySite {
    pub fn new(
        name: impl Into<String>,
        params: SiteParameters,
        costs: CostModel,
        policy: Box<dyn ReorderPolicy>,
    ) -> SimResult<Self> {
        let name = name.into();
        params.validate(&name)?;
        costs.validate()?;

        let demand = normal(
            &format!("{}.demand_std", name),
            params.mean_demand,
            params.demand_std,
        )?;
        let lead_time = normal(
            &format!("{}.lead_time_std", name),
            params.mean_lead_time,
            params.lead_time_std,
        )?;

        Ok(Self {
            name,
            stock: params.initial_stock,
            params,
            costs,
            policy,
            demand,
            lead_time,
            cycle: DailyCycle::Consuming,
            replenishment: Replenishment::Idle,
            lost_sales_total: 0.0,
            cost_total: 0.0,
            cost_breakdown: CostBreakdown::default(),
            total_demand: 0,
            units_served: 0,
            stockout_days: 0,
            orders_placed: 0,
            orders_received: 0,
            history: Vec::new(),
            ledger: Vec::new(),
        })
    }

    /// Runs one simulated day.
    ///
    /// A pending order due today lands first, then the site records its
    /// snapshot, serves demand, checks the reorder point and pays holding cost.
    pub fn advance_one_day<R: Rng + ?Sized>(&mut self, day: u32, rng: &mut R) {
        self.receive_arrival(day);

        self.history.push(StockSnapshot {
            day,
            stock: self.stock,
        });

        let mut demand = 0;
        loop {
            match self.cycle {
                DailyCycle::Consuming => {
                    demand = sample_demand(&self.demand, rng);
                    self.consume(demand);
                    self.cycle = DailyCycle::CheckingRop;
                }
                DailyCycle::CheckingRop => {
                    if (self.stock as f64) < self.reorder_point()
                        && !self.replenishment.is_in_transit()
                    {
                        self.launch_replenishment(day, rng);
                    }
                    self.cycle = DailyCycle::Consuming;
                    break;
                }
            }
        }

        let holding = self.stock as f64 * self.costs.daily_holding_cost_per_unit();
        self.cost_total += holding;
        self.cost_breakdown.holding += holding;

        trace!(
            site = %self.name,
            day,
            demand,
            stock = self.stock,
            cost_total = self.cost_total,
            "day closed"
        );

        self.ledger.push(DailyRecord {
            day,
            demand,
            stock: self.stock,
            lost_sales_total: self.lost_sales_total,
            cost_total: self.cost_total,
            order_in_transit: self.replenishment.is_in_transit(),
        });
    }

    /// Serves `demand` from stock. Any shortfall is lost and penalized.
    ///
    /// Unit counters saturate instead of wrapping on absurdly large demand.
    fn consume(&mut self, demand: u64) {
        self.total_demand = self.total_demand.saturating_add(demand);

        if self.stock >= demand {
            self.units_served = self.units_served.saturating_add(demand);
            self.stock -= demand;
        } else {
            self.units_served = self.units_served.saturating_add(self.stock);
            let shortfall = demand - self.stock;
            let penalty = shortfall as f64 * self.costs.stockout_cost_per_unit;
            self.lost_sales_total += shortfall as f64;
            self.cost_total += penalty;
            self.cost_breakdown.stockout += penalty;
            self.stockout_days += 1;
            self.stock = 0;
        }
    }

    /// Draws a lead time and marks the order in flight right away, so no
    /// second order can start before this one lands.
    fn launch_replenishment<R: Rng + ?Sized>(&mut self, day: u32, rng: &mut R) {
        let lead_time = sample_lead_time(&self.lead_time, rng);
        let order = PendingOrder {
            placed_on: day,
            arrives_on: day.saturating_add(lead_time),
            quantity: self.costs.order_quantity,
        };

        if self.replenishment.launch(order) {
            self.orders_placed += 1;
            debug!(
                site = %self.name,
                day,
                lead_time,
                arrives_on = order.arrives_on,
                stock = self.stock,
                "replenishment launched"
            );
        }
    }

    fn receive_arrival(&mut self, day: u32) {
        let Some(order) = self.replenishment.take_arrival(day) else {
            return;
        };

        self.stock = self.stock.saturating_add(order.quantity);
        let ordering = self.costs.fixed_order_cost
            + order.quantity as f64 * self.params.freight_cost_per_unit;
        self.cost_total += ordering;
        self.cost_breakdown.ordering += ordering;
        self.orders_received += 1;

        debug!(
            site = %self.name,
            day,
            quantity = order.quantity,
            stock = self.stock,
            "replenishment arrived"
        );
    }

    pub fn reorder_point(&self) -> f64 {
        self.policy.reorder_point(&self.params)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &SiteParameters {
        &self.params
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }

    pub fn cycle(&self) -> DailyCycle {
        self.cycle
    }

    pub fn order_in_transit(&self) -> bool {
        self.replenishment.is_in_transit()
    }

    pub fn pending_order(&self) -> Option<&PendingOrder> {
        self.replenishment.pending()
    }

    pub fn lost_sales_total(&self) -> f64 {
        self.lost_sales_total
    }

    pub fn cost_total(&self) -> f64 {
        self.cost_total
    }

    pub fn history(&self) -> &[StockSnapshot] {
        &self.history
    }

    pub fn ledger(&self) -> &[DailyRecord] {
        &self.ledger
    }

    /// Consumes the site and freezes its results.
    pub fn into_report(self) -> SiteReport {
        let fill_rate = if self.total_demand == 0 {
            1.0
        } else {
            self.units_served as f64 / self.total_demand as f64
        };
        let demand_cv =
            coefficient_of_variation(self.params.mean_demand, self.params.demand_std);

        SiteReport {
            reorder_point: self.reorder_point(),
            order_in_transit_at_end: self.replenishment.is_in_transit(),
            name: self.name,
            params: self.params,
            final_stock: self.stock,
            lost_sales_total: self.lost_sales_total,
            cost_total: self.cost_total,
            cost_breakdown: self.cost_breakdown,
            total_demand: self.total_demand,
            units_served: self.units_served,
            fill_rate,
            demand_cv,
            stockout_days: self.stockout_days,
            orders_placed: self.orders_placed,
            orders_received: self.orders_received,
            stock_history: self.history,
            ledger: self.ledger,
        }
    }
}

/// Read-only results of one site after the horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteReport {
    pub name: String,
    pub params: SiteParameters,
    pub reorder_point: f64,
    pub final_stock: u64,
    pub lost_sales_total: f64,
    pub cost_total: f64,
    pub cost_breakdown: CostBreakdown,
    pub total_demand: u64,
    pub units_served: u64,
    pub fill_rate: f64,
    /// Relative demand variability (std / mean) the site faces.
    pub demand_cv: f64,
    pub stockout_days: u32,
    pub orders_placed: u32,
    pub orders_received: u32,
    pub order_in_transit_at_end: bool,
    #[serde(skip)]
    pub stock_history: Vec<StockSnapshot>,
    #[serde(skip)]
    pub ledger: Vec<DailyRecord>,
}
