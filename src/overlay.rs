use nalgebra as na;

use crate::detection::MarkerCorners;
use crate::math;
use crate::orientation::Answer;

const AXIS_SCALE: f32 = 0.75;

/// Read-only drawing hints for one classified marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerOverlay {
    pub id: u32,
    pub center: na::Point2<f32>,
    /// Marker +x direction, scaled to three quarters of the half-width.
    pub x_axis: na::Vector2<f32>,
    pub y_axis: na::Vector2<f32>,
    pub answer: Answer,
    /// Dwell percentage while the answer is unconfirmed.
    pub progress: Option<u8>,
}

impl MarkerOverlay {
    pub fn new(id: u32, corners: &MarkerCorners, answer: Answer, progress: Option<u8>) -> Self {
        let [lt, rt, rb, lb] = corners.map(|p| p.coords);

        Self {
            id,
            center: math::centroid(corners),
            x_axis: ((rt + rb) - (lt + lb)) / 2.0 * AXIS_SCALE,
            y_axis: ((lt + rt) - (lb + rb)) / 2.0 * AXIS_SCALE,
            answer,
            progress,
        }
    }

    #[inline]
    pub fn x_axis_end(&self) -> na::Point2<f32> {
        self.center + self.x_axis
    }

    #[inline]
    pub fn y_axis_end(&self) -> na::Point2<f32> {
        self.center + self.y_axis
    }
}
