//! In-plane rotation → quadrant answer, with boundary hysteresis.
//!
//! The direction of the marker's top edge (corner 0 → corner 1) gives its
//! rotation about the camera axis. Tilt moves the corners but barely moves
//! this direction, so no pose estimation is needed.

use std::fmt;

use serde_derive::{Deserialize, Serialize};

use crate::detection::MarkerCorners;
use crate::math;

/// Quadrant boundaries in degrees.
pub const BOUNDARIES: [f32; 4] = [45.0, 135.0, 225.0, 315.0];

pub const DEFAULT_MARGIN_DEG: f32 = 12.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Answer {
    A,
    B,
    C,
    D,
}

impl Answer {
    /// Unfiltered quadrant for a raw angle in `[0, 360)`.
    ///
    /// Top edge pointing right is A; turning the card clockwise by a quarter
    /// gives D, a half gives C, three quarters B.
    pub fn from_angle(deg: f32) -> Self {
        let deg = math::normalize_degrees(deg);

        if !(45.0..315.0).contains(&deg) {
            Answer::A
        } else if deg < 135.0 {
            Answer::D
        } else if deg < 225.0 {
            Answer::C
        } else {
            Answer::B
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Answer::A => 'A',
            Answer::B => 'B',
            Answer::C => 'C',
            Answer::D => 'D',
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub answer: Answer,
    pub raw_angle: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    margin_deg: f32,
}

impl Classifier {
    pub fn new(margin_deg: f32) -> Self {
        Self {
            margin_deg: margin_deg.abs(),
        }
    }

    #[inline]
    pub fn margin(&self) -> f32 {
        self.margin_deg
    }

    /// True when `deg` is within the margin of any of the four boundaries,
    /// not only the one between the old and new answer.
    pub fn near_boundary(&self, deg: f32) -> bool {
        BOUNDARIES
            .iter()
            .any(|&b| math::angular_distance(deg, b) < self.margin_deg)
    }

    /// Hysteresis step for an already computed raw angle.
    pub fn classify_angle(&self, raw_angle: f32, previous: Option<Orientation>) -> Orientation {
        let raw_angle = math::normalize_degrees(raw_angle);
        let fresh = Answer::from_angle(raw_angle);

        let answer = match previous {
            Some(prev) if prev.answer != fresh && self.near_boundary(raw_angle) => prev.answer,
            _ => fresh,
        };

        Orientation { answer, raw_angle }
    }

    /// Classifies a validated corner quad.
    ///
    /// A zero-length top edge carries no rotation signal: the previous
    /// orientation is returned untouched, or `None` on a first sighting.
    pub fn classify(
        &self,
        corners: &MarkerCorners,
        previous: Option<Orientation>,
    ) -> Option<Orientation> {
        match math::edge_angle(&corners[0], &corners[1]) {
            Some(raw_angle) => Some(self.classify_angle(raw_angle, previous)),
            None => previous,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN_DEG)
    }
}
