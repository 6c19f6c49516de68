// src/simulation/clock.rs

/// The one clock every site of a run shares. Sites only read the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimClock {
    day: u32,
    horizon_days: u32,
}

impl SimClock {
    pub fn new(horizon_days: u32) -> Self {
        Self {
            day: 0,
            horizon_days,
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// True once every day of the horizon has been simulated.
    pub fn is_finished(&self) -> bool {
        self.day >= self.horizon_days
    }

    /// Advance to the next day. Returns the new day.
    pub fn tick(&mut self) -> u32 {
        self.day += 1;
        self.day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_exactly_the_horizon() {
        let mut clock = SimClock::new(3);
        let mut days = Vec::new();
        while !clock.is_finished() {
            days.push(clock.day());
            clock.tick();
        }
        assert_eq!(days, vec![0, 1, 2]);
        assert_eq!(clock.day(), clock.horizon_days());
    }
}
