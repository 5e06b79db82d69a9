use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

use crate::error::Error;
use crate::math;

pub type MarkerCorners = [na::Point2<f32>; 4];

/// One marker as reported by the external detector for a single frame.
///
/// Corners are expected clockwise as seen in the image:
/// top-left, top-right, bottom-right, bottom-left.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MarkerObservation {
    pub id: u32,
    pub corners: Vec<[f32; 2]>,
}

impl MarkerObservation {
    pub fn new(id: u32, corners: Vec<[f32; 2]>) -> Self {
        Self { id, corners }
    }

    pub fn from_points(id: u32, corners: &MarkerCorners) -> Self {
        Self {
            id,
            corners: corners.iter().map(|p| [p.x, p.y]).collect(),
        }
    }

    /// Validated corner quad.
    pub fn corners(&self) -> Result<MarkerCorners, Error> {
        if self.corners.len() != 4 {
            return Err(Error::CornerCount {
                id: self.id,
                count: self.corners.len(),
            });
        }

        if self
            .corners
            .iter()
            .any(|[x, y]| !x.is_finite() || !y.is_finite())
        {
            return Err(Error::NonFiniteCorner { id: self.id });
        }

        let c = &self.corners;
        let quad = [
            na::Point2::new(c[0][0], c[0][1]),
            na::Point2::new(c[1][0], c[1][1]),
            na::Point2::new(c[2][0], c[2][1]),
            na::Point2::new(c[3][0], c[3][1]),
        ];

        // zero area is left to the classifier's degenerate-edge rule
        if math::signed_area2(&quad[..]) < 0.0 {
            return Err(Error::CounterClockwise { id: self.id });
        }

        Ok(quad)
    }
}
