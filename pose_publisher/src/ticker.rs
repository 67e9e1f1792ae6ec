use std::time::{Duration, Instant};

/// Fixed-period cadence polled from the GUI thread, standing in for a timer object. Fires on
/// the first poll, then at most once per period.
#[derive(Debug, Clone)]
pub struct Cadence {
    period: Duration,
    last: Option<Instant>,
}

impl Cadence {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// Whether the cadence is due at `now`, arming the next period if it is.
    pub fn due(&mut self, now: Instant) -> bool {
        let due = self
            .last
            .is_none_or(|last| now.duration_since(last) >= self.period);
        if due {
            self.last = Some(now);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_the_first_poll() {
        let mut cadence = Cadence::new(Duration::from_secs(1));
        assert!(cadence.due(Instant::now()));
    }

    #[test]
    fn fires_once_per_period() {
        let mut cadence = Cadence::new(Duration::from_secs(1));
        let start = Instant::now();

        assert!(cadence.due(start));
        assert!(!cadence.due(start + Duration::from_millis(999)));
        assert!(cadence.due(start + Duration::from_secs(1)));
        assert!(!cadence.due(start + Duration::from_millis(1500)));
    }
}
