// src/strategy/traits.rs

use crate::simulation::config::SiteParameters;
use std::fmt::Debug;

/// Decides when a site must reorder.
///
/// We require `Send` + `Sync` so sites can be moved across threads by callers
/// running several scenarios at once.
pub trait ReorderPolicy: Debug + Send + Sync {
    /// Extra inventory held above expected lead-time demand.
    fn safety_stock(&self, params: &SiteParameters) -> f64;

    /// Stock threshold below which a replenishment order is launched.
    ///
    /// ROP = expected demand during the mean lead time + safety stock.
    fn reorder_point(&self, params: &SiteParameters) -> f64 {
        params.mean_demand * params.mean_lead_time + self.safety_stock(params)
    }
}
