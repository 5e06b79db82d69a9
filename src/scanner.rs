use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::ScannerConfig;
use crate::detection::MarkerObservation;
use crate::dictionary::ArucoDictionary;
use crate::error::Error;
use crate::frame::Frame;
use crate::pacing::FramePacer;
use crate::scene::FrameOutcome;
use crate::QuizTracker;

/// External marker detector: grabs the current camera frame and returns the
/// markers found in it.
pub trait MarkerSource {
    fn detect(&mut self, dictionary: ArucoDictionary) -> Result<Vec<MarkerObservation>, Error>;
}

impl<F> MarkerSource for F
where
    F: FnMut(ArucoDictionary) -> Result<Vec<MarkerObservation>, Error>,
{
    fn detect(&mut self, dictionary: ArucoDictionary) -> Result<Vec<MarkerObservation>, Error> {
        self(dictionary)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    pub timestamp: u64,
    pub outcome: FrameOutcome,
    /// Wait before starting the next pass.
    pub delay: Duration,
}

/// Single-threaded scan loop. Passes never overlap: the next one is only
/// scheduled once the previous has returned.
pub struct Scanner<S, C> {
    source: S,
    clock: C,
    tracker: QuizTracker,
    pacer: FramePacer,
    config: ScannerConfig,
}

impl<S: MarkerSource, C: Clock> Scanner<S, C> {
    pub fn new(source: S, clock: C, tracker: QuizTracker, config: ScannerConfig) -> Self {
        Self {
            source,
            clock,
            tracker,
            pacer: FramePacer::new(config.fps),
            config,
        }
    }

    #[inline]
    pub fn tracker(&self) -> &QuizTracker {
        &self.tracker
    }

    #[inline]
    pub fn tracker_mut(&mut self) -> &mut QuizTracker {
        &mut self.tracker
    }

    #[inline]
    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    pub fn into_tracker(self) -> QuizTracker {
        self.tracker
    }

    /// Detects, stamps and processes one frame.
    pub fn pass(&mut self) -> Result<Pass, Error> {
        let begin = self.clock.now();
        let observations = self.source.detect(self.config.dictionary)?;
        let frame = Frame::new(begin, observations);

        let outcome = self.tracker.process(&frame);

        let elapsed = Duration::from_millis(self.clock.now().saturating_sub(begin));
        let delay = self.pacer.finish(elapsed);

        if delay.is_zero() {
            debug!(elapsed_ms = elapsed.as_millis() as u64, "pass overran frame period");
        }

        Ok(Pass {
            timestamp: begin,
            outcome,
            delay,
        })
    }

    /// Runs passes until `stop` is raised. Tracking state is left as is when
    /// the loop ends.
    pub fn run<F>(&mut self, stop: &AtomicBool, mut on_pass: F) -> Result<(), Error>
    where
        F: FnMut(&Pass),
    {
        info!(fps = self.config.fps, dictionary = %self.config.dictionary, "scanning started");

        while !stop.load(Ordering::Relaxed) {
            let pass = match self.pass() {
                Ok(pass) => pass,
                Err(err) => {
                    warn!("scanning stopped: {}", err);
                    return Err(err);
                }
            };

            on_pass(&pass);

            if !pass.delay.is_zero() {
                std::thread::sleep(pass.delay);
            }
        }

        info!("scanning stopped");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::detection::tests::square;
    use crate::orientation::Answer;
    use crate::Tracking;

    #[test]
    fn test_pass_stamps_and_paces() {
        let clock = ManualClock::new(1000);
        let source = |_: ArucoDictionary| -> Result<Vec<MarkerObservation>, Error> {
            clock.advance(5);
            Ok(vec![square(3, 50.0, 50.0, 20.0, 90.0)])
        };

        let mut scanner = Scanner::new(source, &clock, QuizTracker::default(), ScannerConfig::default());
        let pass = scanner.pass().unwrap();

        assert_eq!(pass.timestamp, 1000);
        assert_eq!(pass.outcome.overlays.len(), 1);
        assert_eq!(pass.outcome.overlays[0].answer, Answer::D);
        assert_eq!(pass.delay, Duration::from_nanos(28_333_333));
    }

    #[test]
    fn test_run_until_stopped() {
        let clock = ManualClock::new(0);
        let stop = AtomicBool::new(false);
        let mut passes = 0;

        let source = |dict: ArucoDictionary| -> Result<Vec<MarkerObservation>, Error> {
            assert_eq!(dict, ArucoDictionary::Dict5x5_100);
            clock.advance(100);
            Ok(vec![square(11, 0.0, 0.0, 20.0, 180.0)])
        };
        let config = ScannerConfig {
            fps: 1000,
            dictionary: ArucoDictionary::Dict5x5_100,
        };

        let mut scanner = Scanner::new(source, &clock, QuizTracker::default(), config);
        scanner
            .run(&stop, |pass| {
                passes += 1;
                if !pass.outcome.events.is_empty() {
                    stop.store(true, Ordering::Relaxed);
                }
            })
            .unwrap();

        // stamped at 0, 100, ..., 2500
        assert_eq!(passes, 26);
        assert_eq!(scanner.tracker().board()[0].answer, Answer::C);
    }

    #[test]
    fn test_source_error_ends_run() {
        let stop = AtomicBool::new(false);
        let source = |_: ArucoDictionary| -> Result<Vec<MarkerObservation>, Error> {
            Err(Error::Source("camera unplugged".into()))
        };

        let mut scanner = Scanner::new(
            source,
            ManualClock::new(0),
            QuizTracker::default(),
            ScannerConfig::default(),
        );

        assert!(matches!(scanner.run(&stop, |_| {}), Err(Error::Source(_))));
    }
}
