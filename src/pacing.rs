use std::time::Duration;

use crate::rolling_avg::RollingAvg;

const HISTORY: usize = 30;

/// Self-throttling schedule: the next pass starts one period after the
/// current one began, or immediately if the pass overran.
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    passes: RollingAvg,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / fps.max(1),
            passes: RollingAvg::new(HISTORY),
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Records a finished pass and returns how long to wait before the next.
    pub fn finish(&mut self, elapsed: Duration) -> Duration {
        self.passes.push(elapsed);
        self.period.saturating_sub(elapsed)
    }

    pub fn average_pass(&self) -> Option<Duration> {
        self.passes.average()
    }

    /// True when the recent passes take longer than the period on average.
    pub fn is_overrunning(&self) -> bool {
        self.average_pass().map_or(false, |avg| avg > self.period)
    }
}
