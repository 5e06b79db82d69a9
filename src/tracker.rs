use crate::orientation::{Answer, Orientation};

/// Per-marker dwell state for the answer currently shown.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingRecord {
    pub answer: Answer,
    pub raw_angle: f32,
    pub first_seen_at: u64,
    pub last_seen_at: u64,
    pub confirmed: bool,
}

/// What a record did with an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Holding,
    /// Dwell time reached on this observation.
    Confirmed,
    /// Answer differed; dwell restarted.
    Restarted { previous: Answer },
}

impl TrackingRecord {
    pub fn new(orientation: Orientation, ts: u64) -> Self {
        Self {
            answer: orientation.answer,
            raw_angle: orientation.raw_angle,
            first_seen_at: ts,
            last_seen_at: ts,
            confirmed: false,
        }
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        Orientation {
            answer: self.answer,
            raw_angle: self.raw_angle,
        }
    }

    #[inline]
    pub fn visible_for(&self, ts: u64) -> u64 {
        ts.saturating_sub(self.first_seen_at)
    }

    #[inline]
    pub fn absent_for(&self, ts: u64) -> u64 {
        ts.saturating_sub(self.last_seen_at)
    }

    /// Dwell progress in `[0, 1]`; `None` once confirmed.
    pub fn progress(&self, ts: u64, dwell_ms: u64) -> Option<f32> {
        if self.confirmed {
            return None;
        }

        if dwell_ms == 0 {
            return Some(1.0);
        }

        Some((self.visible_for(ts) as f32 / dwell_ms as f32).min(1.0))
    }

    pub fn update(&mut self, orientation: Orientation, ts: u64, dwell_ms: u64) -> Step {
        if orientation.answer != self.answer {
            let previous = self.answer;
            *self = Self::new(orientation, ts);

            return Step::Restarted { previous };
        }

        self.last_seen_at = ts.max(self.first_seen_at);
        self.raw_angle = orientation.raw_angle;

        if !self.confirmed && self.visible_for(ts) >= dwell_ms {
            self.confirmed = true;
            return Step::Confirmed;
        }

        Step::Holding
    }
}
