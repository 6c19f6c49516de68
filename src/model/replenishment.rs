// src/model/replenishment.rs

use serde::Serialize;

/// An order on its way from the supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingOrder {
    pub placed_on: u32,
    pub arrives_on: u32,
    pub quantity: u64,
}

impl PendingOrder {
    pub fn lead_time(&self) -> u32 {
        self.arrives_on - self.placed_on
    }
}

/// Replenishment state of one site. At most one order is ever in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Replenishment {
    #[default]
    Idle,
    InTransit(PendingOrder),
}

impl Replenishment {
    pub fn is_in_transit(&self) -> bool {
        matches!(self, Replenishment::InTransit(_))
    }

    pub fn pending(&self) -> Option<&PendingOrder> {
        match self {
            Replenishment::Idle => None,
            Replenishment::InTransit(order) => Some(order),
        }
    }

    /// Puts `order` in flight. Returns `false` and leaves the current order
    /// untouched if one is already in transit.
    pub fn launch(&mut self, order: PendingOrder) -> bool {
        if self.is_in_transit() {
            return false;
        }
        *self = Replenishment::InTransit(order);
        true
    }

    /// Hands over the pending order once `day` reaches its arrival day and
    /// goes back to `Idle`.
    pub fn take_arrival(&mut self, day: u32) -> Option<PendingOrder> {
        match *self {
            Replenishment::InTransit(order) if order.arrives_on <= day => {
                *self = Replenishment::Idle;
                Some(order)
            }
            _ => None,
        }
    }
}
