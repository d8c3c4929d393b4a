use euchre_core::model::seat::Seat;
use std::time::Duration;

/// Pause before a scheduled bot acts, so plays stay readable at the table.
pub const CPU_ACTION_DELAY: Duration = Duration::from_millis(2000);

/// A deferred bot turn. The embedding runtime sleeps for `delay`, then hands
/// the activation back to the session, which honors it only if the
/// generation still matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuActivation {
    pub seat: Seat,
    pub generation: u64,
    pub delay: Duration,
}

/// Issues bot activations stamped with a generation counter. Every accepted
/// table action bumps the generation, so an activation scheduled before the
/// action fires becomes stale and is dropped instead of acting twice.
#[derive(Debug, Clone, Default)]
pub struct TurnScheduler {
    generation: u64,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Invalidates all outstanding activations.
    pub fn advance(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn schedule(&self, seat: Seat) -> CpuActivation {
        CpuActivation {
            seat,
            generation: self.generation,
            delay: CPU_ACTION_DELAY,
        }
    }

    pub fn is_current(&self, activation: &CpuActivation) -> bool {
        activation.generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::TurnScheduler;
    use euchre_core::model::seat::Seat;

    #[test]
    fn activation_is_valid_until_the_next_action() {
        let mut scheduler = TurnScheduler::new();
        let activation = scheduler.schedule(Seat::One);
        assert!(scheduler.is_current(&activation));

        scheduler.advance();
        assert!(!scheduler.is_current(&activation));
    }

    #[test]
    fn duplicate_schedules_share_a_generation() {
        let scheduler = TurnScheduler::new();
        let first = scheduler.schedule(Seat::Two);
        let second = scheduler.schedule(Seat::Two);
        assert_eq!(first, second);
    }

    #[test]
    fn generations_increase_monotonically() {
        let mut scheduler = TurnScheduler::new();
        let mut last = scheduler.generation();
        for _ in 0..10 {
            let next = scheduler.advance();
            assert!(next > last);
            last = next;
        }
    }
}
