use std::collections::VecDeque;
use std::time::Duration;

/// Mean of the last `capacity` pass durations.
#[derive(Debug, Clone)]
pub struct RollingAvg {
    capacity: usize,
    total: Duration,
    history: VecDeque<Duration>,
}

impl RollingAvg {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        Self {
            capacity,
            total: Duration::ZERO,
            history: VecDeque::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.total = Duration::ZERO;
        self.history.clear();
    }

    pub fn push(&mut self, sample: Duration) {
        if self.history.len() == self.capacity {
            if let Some(old) = self.history.pop_back() {
                self.total -= old;
            }
        }

        self.history.push_front(sample);
        self.total += sample;
    }

    pub fn average(&self) -> Option<Duration> {
        if self.history.is_empty() {
            return None;
        }

        Some(self.total / self.history.len() as u32)
    }

    #[inline]
    pub fn last(&self) -> Option<Duration> {
        self.history.front().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
