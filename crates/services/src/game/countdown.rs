/// Result of a single countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// The countdown is not armed; nothing happened.
    Idle,
    /// One unit elapsed; the value is what remains.
    Running(u32),
    /// The last unit elapsed. Reported once per arming.
    Expired,
}

/// Per-question time budget, counted in whole seconds.
///
/// Pure bookkeeping: something else decides when a second has passed and
/// calls [`Countdown::tick`]. Expiry disarms the countdown so it can only
/// fire once until it is armed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    budget: u32,
    remaining: u32,
    armed: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            remaining: budget,
            armed: false,
        }
    }

    /// Reset to the full budget and start counting.
    pub fn arm(&mut self) {
        self.remaining = self.budget;
        self.armed = self.budget > 0;
    }

    /// Stop counting. Remaining time is kept for display.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn tick(&mut self) -> CountdownTick {
        if !self.armed {
            return CountdownTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.armed = false;
            CountdownTick::Expired
        } else {
            CountdownTick::Running(self.remaining)
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_countdown_is_idle() {
        let mut countdown = Countdown::new(3);
        assert_eq!(countdown.tick(), CountdownTick::Idle);
        assert_eq!(countdown.remaining(), 3);
    }

    #[test]
    fn expires_once_after_budget_ticks() {
        let mut countdown = Countdown::new(3);
        countdown.arm();
        assert_eq!(countdown.tick(), CountdownTick::Running(2));
        assert_eq!(countdown.tick(), CountdownTick::Running(1));
        assert_eq!(countdown.tick(), CountdownTick::Expired);
        assert_eq!(countdown.tick(), CountdownTick::Idle);
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn rearm_restores_full_budget() {
        let mut countdown = Countdown::new(45);
        countdown.arm();
        for _ in 0..10 {
            countdown.tick();
        }
        assert_eq!(countdown.remaining(), 35);
        countdown.disarm();
        assert_eq!(countdown.tick(), CountdownTick::Idle);

        countdown.arm();
        assert_eq!(countdown.remaining(), 45);
        assert!(countdown.is_armed());
    }
}
