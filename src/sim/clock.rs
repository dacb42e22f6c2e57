/// Counts simulated periods from the first non-seed period up to the horizon.
///
/// The capital recursion is second order, so the first periods of a run are
/// supplied rather than simulated. `PeriodClock` yields the remaining ones.
///
/// # Examples
///
/// ```
/// use energy_transition::sim::clock::PeriodClock;
///
/// let mut clock = PeriodClock::new(2, 5);
/// let mut periods = Vec::new();
///
/// clock.run(|period| periods.push(period));
/// assert_eq!(periods, vec![2, 3, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct PeriodClock {
    /// Next period to hand out
    current: usize,
    /// One past the last period
    horizon: usize,
}

impl PeriodClock {
    /// Creates a clock yielding `first..horizon`.
    ///
    /// # Arguments
    ///
    /// * `first` - First simulated period (the number of seed periods)
    /// * `horizon` - Total number of periods, seeds included
    pub fn new(first: usize, horizon: usize) -> Self {
        Self {
            current: first,
            horizon,
        }
    }

    /// Advances the clock by one period.
    ///
    /// # Returns
    ///
    /// * `Some(period)` - The period to simulate next
    /// * `None` - If the horizon has been reached
    pub fn tick(&mut self) -> Option<usize> {
        if self.current < self.horizon {
            let period = self.current;
            self.current += 1;
            Some(period)
        } else {
            None
        }
    }

    /// Periods not yet handed out.
    pub fn remaining(&self) -> usize {
        self.horizon.saturating_sub(self.current)
    }

    /// Runs a function for each remaining period.
    pub fn run(&mut self, mut f: impl FnMut(usize)) {
        while let Some(period) = self.tick() {
            f(period);
        }
    }
}
