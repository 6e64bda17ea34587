use std::fmt;
use std::time::{Duration, Instant};

/// Captures the monotonic start time of a search; the terminal transition
/// freezes it into a [`SearchStats`].
#[derive(Debug, Clone, Copy)]
pub struct StatsCollector {
    started: Instant,
}

impl StatsCollector {
    pub fn start() -> Self {
        StatsCollector {
            started: Instant::now(),
        }
    }

    pub fn finish(&self, blocks_covered: usize) -> SearchStats {
        SearchStats {
            elapsed: self.started.elapsed(),
            blocks_covered,
        }
    }
}

/// Final measurements of one search run. `blocks_covered` counts entries
/// in the visited trace, which excludes the start and end cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStats {
    pub elapsed: Duration,
    pub blocks_covered: usize,
}

impl SearchStats {
    pub fn solve_time_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time Taken: {} ms", self.solve_time_ms())?;
        writeln!(f, "Blocks Covered: {}", self.blocks_covered)?;
        Ok(())
    }
}
