use std::time::{Duration, Instant};

/// One timed phase of an operation.
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub elapsed: Duration,
    pub round_trips: usize,
}

impl PhaseStats {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Wall-clock timer for comparing phases of a single operation.
pub struct PhaseTimer {
    phase: String,
    start_time: Instant,
    start_round_trips: usize,
}

impl PhaseTimer {
    pub fn start(phase: impl Into<String>, round_trips: usize) -> Self {
        let phase = phase.into();
        tracing::debug!("⏱️  {} started", phase);
        Self {
            phase,
            start_time: Instant::now(),
            start_round_trips: round_trips,
        }
    }

    pub fn finish(self, round_trips: usize) -> PhaseStats {
        let stats = PhaseStats {
            elapsed: self.start_time.elapsed(),
            round_trips: round_trips.saturating_sub(self.start_round_trips),
            phase: self.phase,
        };
        tracing::info!(
            "📊 {} - Time: {:?}, Round trips: {}",
            stats.phase,
            stats.elapsed,
            stats.round_trips
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_are_relative_to_start() {
        let timer = PhaseTimer::start("lazy", 3);
        let stats = timer.finish(10);
        assert_eq!(stats.phase, "lazy");
        assert_eq!(stats.round_trips, 7);
    }
}
