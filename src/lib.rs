pub mod board;
pub mod clock;
pub mod config;
pub mod detection;
pub mod dictionary;
pub mod error;
pub mod frame;
pub mod math;
pub mod orientation;
pub mod overlay;
pub mod pacing;
pub mod scanner;
pub mod scene;
pub mod tracker;

mod rolling_avg;

pub use board::{BoardEntry, ConfirmationEvent, ConfirmationKind};
pub use config::{Config, EngineConfig, ScannerConfig};
pub use detection::MarkerObservation;
pub use error::Error;
pub use frame::Frame;
pub use orientation::{Answer, Orientation};
pub use scene::FrameOutcome;

use std::rc::Rc;

pub trait Tracking {
    fn update(&mut self, frames: &[Frame]) -> Vec<ConfirmationEvent>;
    fn board(&self) -> Rc<[BoardEntry]>;
    fn reset(&mut self) -> bool;
}

/// Answer-stability engine: one scene fed frame by frame.
#[derive(Debug, Clone)]
pub struct QuizTracker {
    scene: scene::Scene,
}

impl QuizTracker {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scene: scene::Scene::new(config),
        }
    }

    pub fn configure(&mut self, dwell_time_ms: u64, grace_period_ms: u64, hysteresis_margin_deg: f32) {
        self.scene.configure(EngineConfig::new(
            dwell_time_ms,
            grace_period_ms,
            hysteresis_margin_deg,
        ));
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        self.scene.config()
    }

    #[inline]
    pub fn process(&mut self, frame: &Frame) -> FrameOutcome {
        self.scene.process(frame)
    }

    #[inline]
    pub fn scene(&self) -> &scene::Scene {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut scene::Scene {
        &mut self.scene
    }

    /// Live dwell percentage for an unconfirmed marker.
    #[inline]
    pub fn progress(&self, id: u32, ts: u64) -> Option<u8> {
        self.scene.progress_percent(id, ts)
    }

    #[inline]
    pub fn confirmed_count(&self) -> usize {
        self.scene.confirmed_count()
    }

    #[inline]
    pub fn mark_displayed(&mut self) {
        self.scene.mark_displayed()
    }
}

impl Default for QuizTracker {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl crate::Tracking for QuizTracker {
    fn update(&mut self, frames: &[Frame]) -> Vec<ConfirmationEvent> {
        let mut events = Vec::new();

        for frame in frames {
            events.extend(self.scene.process(frame).events);
        }

        events
    }

    #[inline]
    fn board(&self) -> Rc<[BoardEntry]> {
        self.scene.board().into()
    }

    #[inline]
    fn reset(&mut self) -> bool {
        self.scene.reset()
    }
}
