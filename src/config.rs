use std::fs;
use std::path::Path;

use serde_derive::{Deserialize, Serialize};

use crate::dictionary::ArucoDictionary;
use crate::error::Error;
use crate::orientation::DEFAULT_MARGIN_DEG;

pub const REQUIRED_VISIBILITY_TIME_MS: u64 = 2500;
pub const ABSENCE_GRACE_PERIOD_MS: u64 = 500;
pub const DEFAULT_FPS: u32 = 30;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Continuous time an answer must be held before it is confirmed.
    pub dwell_time_ms: u64,
    /// Absence after which a marker's tracking record is dropped.
    pub grace_period_ms: u64,
    pub hysteresis_margin_deg: f32,
}

impl EngineConfig {
    pub fn new(dwell_time_ms: u64, grace_period_ms: u64, hysteresis_margin_deg: f32) -> Self {
        Self {
            dwell_time_ms,
            grace_period_ms,
            hysteresis_margin_deg,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dwell_time_ms: REQUIRED_VISIBILITY_TIME_MS,
            grace_period_ms: ABSENCE_GRACE_PERIOD_MS,
            hysteresis_margin_deg: DEFAULT_MARGIN_DEG,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ScannerConfig {
    pub fps: u32,
    pub dictionary: ArucoDictionary,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            dictionary: ArucoDictionary::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub scanner: ScannerConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(contents)?)
    }
}
