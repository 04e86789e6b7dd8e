//! Head tilt from the nose-chin vector.
//!
//! The angle is a 2D projection, not a true 3D head pose: a frontal face has
//! the chin straight below the nose (~90°), turning left rotates the vector
//! past 100°, turning right below 80°. This projection is the system's sole
//! liveness signal by design.

use crate::shared::constants::{CHIN, NOSE_TIP};
use crate::shared::landmarks::LandmarkSet;

/// Scalar head tilt in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseEstimate {
    angle_deg: f64,
}

impl PoseEstimate {
    pub fn new(angle_deg: f64) -> Self {
        Self { angle_deg }
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }
}

/// Derives a [`PoseEstimate`] from one frame's landmarks.
///
/// Pure: no state, no side effects. A frame missing either landmark yields
/// no estimate and must be treated as a no-op by the caller, never as a
/// failure.
pub struct PoseEstimator {
    nose_index: u32,
    chin_index: u32,
}

impl PoseEstimator {
    pub fn new(nose_index: u32, chin_index: u32) -> Self {
        Self {
            nose_index,
            chin_index,
        }
    }

    pub fn estimate(&self, landmarks: &LandmarkSet) -> Option<PoseEstimate> {
        let nose = landmarks.point(self.nose_index)?;
        let chin = landmarks.point(self.chin_index)?;
        let delta_x = chin.0 - nose.0;
        let delta_y = chin.1 - nose.1;
        let angle_deg = delta_y.atan2(delta_x).to_degrees();
        Some(PoseEstimate::new(angle_deg))
    }
}

impl Default for PoseEstimator {
    fn default() -> Self {
        Self::new(NOSE_TIP, CHIN)
    }
}
