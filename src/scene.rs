use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::board::{BoardEntry, ConfirmationEvent, ConfirmationKind, ConfirmedEntry};
use crate::config::EngineConfig;
use crate::frame::Frame;
use crate::orientation::{Answer, Classifier, Orientation};
use crate::overlay::MarkerOverlay;
use crate::tracker::{Step, TrackingRecord};

/// Result of one processed frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    pub events: Vec<ConfirmationEvent>,
    pub overlays: Vec<MarkerOverlay>,
}

/// All answer state for one scanning session.
///
/// Tracking records are provisional and evicted on absence; confirmed
/// entries stay on the board until [`Scene::reset`].
#[derive(Debug, Clone)]
pub struct Scene {
    config: EngineConfig,
    classifier: Classifier,
    records: HashMap<u32, TrackingRecord>,
    confirmed: BTreeMap<u32, ConfirmedEntry>,
}

impl Scene {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            classifier: Classifier::new(config.hysteresis_margin_deg),
            records: HashMap::with_capacity(64),
            confirmed: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Swaps timing and margin parameters. Existing state is kept.
    pub fn configure(&mut self, config: EngineConfig) {
        self.config = config;
        self.classifier = Classifier::new(config.hysteresis_margin_deg);
    }

    #[inline]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Feeds one classified observation for `id` taken at `ts`.
    pub fn update(
        &mut self,
        id: u32,
        answer: Answer,
        raw_angle: f32,
        ts: u64,
    ) -> Option<ConfirmationEvent> {
        let orientation = Orientation { answer, raw_angle };
        let dwell = self.config.dwell_time_ms;

        let record = match self.records.get_mut(&id) {
            Some(record) => record,
            None => {
                debug!(id, %answer, "tracking new marker");
                self.records.insert(id, TrackingRecord::new(orientation, ts));

                // a zero dwell confirms on first sight
                if dwell > 0 {
                    return None;
                }

                self.records.get_mut(&id)?.confirmed = true;
                return self.confirm(id, answer, ts);
            }
        };

        match record.update(orientation, ts, dwell) {
            Step::Holding => None,
            Step::Restarted { previous } => {
                debug!(id, %previous, %answer, "answer changed, dwell restarted");

                if dwell == 0 {
                    record.confirmed = true;
                    return self.confirm(id, answer, ts);
                }

                None
            }
            Step::Confirmed => self.confirm(id, answer, ts),
        }
    }

    fn confirm(&mut self, id: u32, answer: Answer, ts: u64) -> Option<ConfirmationEvent> {
        let kind = match self.confirmed.get(&id) {
            Some(prev) if prev.answer == answer => return None,
            Some(prev) => ConfirmationKind::Changed {
                previous: prev.answer,
            },
            None => ConfirmationKind::New,
        };

        self.confirmed.insert(
            id,
            ConfirmedEntry {
                answer,
                confirmed_at: ts,
                changed_since_last_display: true,
            },
        );

        let event = ConfirmationEvent {
            id,
            answer,
            kind,
            timestamp: ts,
        };

        info!("{}", event);

        Some(event)
    }

    /// Drops records of markers missing from `present` for longer than the
    /// grace period. Returns the number of evicted records.
    pub fn sweep(&mut self, present: &HashSet<u32>, ts: u64) -> usize {
        let grace = self.config.grace_period_ms;
        let before = self.records.len();

        self.records.retain(|id, r| {
            let keep = present.contains(id) || r.absent_for(ts) <= grace;
            if !keep {
                debug!(id, absent_ms = r.absent_for(ts), "evicting marker");
            }

            keep
        });

        before - self.records.len()
    }

    /// One full pass: classify, update and sweep.
    ///
    /// A malformed observation is skipped for this frame only; the marker is
    /// then handled as absent.
    pub fn process(&mut self, frame: &Frame) -> FrameOutcome {
        let ts = frame.timestamp;
        let mut present = HashSet::with_capacity(frame.len());
        let mut outcome = FrameOutcome::default();

        for obs in frame.iter() {
            let corners = match obs.corners() {
                Ok(corners) => corners,
                Err(err) => {
                    warn!("skipping observation: {}", err);
                    continue;
                }
            };

            let previous = self.records.get(&obs.id).map(TrackingRecord::orientation);
            let orientation = match self.classifier.classify(&corners, previous) {
                Some(orientation) => orientation,
                None => {
                    debug!(id = obs.id, "no usable rotation signal");
                    continue;
                }
            };

            present.insert(obs.id);

            let event = self.update(obs.id, orientation.answer, orientation.raw_angle, ts);
            outcome.events.extend(event);

            outcome.overlays.push(MarkerOverlay::new(
                obs.id,
                &corners,
                orientation.answer,
                self.progress_percent(obs.id, ts),
            ));
        }

        self.sweep(&present, ts);

        outcome
    }

    /// Dwell progress of an unconfirmed record in `[0, 1]`.
    pub fn progress(&self, id: u32, ts: u64) -> Option<f32> {
        self.records.get(&id)?.progress(ts, self.config.dwell_time_ms)
    }

    /// Progress as a floored percentage, for display.
    pub fn progress_percent(&self, id: u32, ts: u64) -> Option<u8> {
        self.progress(id, ts).map(|p| (p * 100.0).floor() as u8)
    }

    #[inline]
    pub fn record(&self, id: u32) -> Option<&TrackingRecord> {
        self.records.get(&id)
    }

    #[inline]
    pub fn confirmed(&self, id: u32) -> Option<&ConfirmedEntry> {
        self.confirmed.get(&id)
    }

    #[inline]
    pub fn tracked_count(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn confirmed_count(&self) -> usize {
        self.confirmed.len()
    }

    /// Scoreboard sorted by marker id.
    pub fn board(&self) -> Vec<BoardEntry> {
        self.confirmed
            .iter()
            .map(|(&id, entry)| BoardEntry::new(id, entry))
            .collect()
    }

    /// Clears the "changed" flags once the board has been shown.
    pub fn mark_displayed(&mut self) {
        for entry in self.confirmed.values_mut() {
            entry.changed_since_last_display = false;
        }
    }

    /// Clears every record and confirmed answer. Returns false if there was
    /// nothing to clear.
    pub fn reset(&mut self) -> bool {
        let had_state = !self.records.is_empty() || !self.confirmed.is_empty();

        self.records.clear();
        self.confirmed.clear();

        if had_state {
            info!("scene reset");
        }

        had_state
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
