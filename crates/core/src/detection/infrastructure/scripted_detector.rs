use std::collections::VecDeque;

use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::shared::frame::Frame;
use crate::shared::landmarks::LandmarkSet;

/// Replays a prerecorded queue of landmark observations, one per frame.
///
/// Stands in for the real detection model in scripted replays and tests.
/// `None` entries model frames where no face was detected; an exhausted
/// queue keeps reporting "no face" rather than erroring.
pub struct ScriptedLandmarkDetector {
    observations: VecDeque<Option<LandmarkSet>>,
}

impl ScriptedLandmarkDetector {
    pub fn new(observations: Vec<Option<LandmarkSet>>) -> Self {
        Self {
            observations: observations.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.observations.len()
    }
}

impl LandmarkDetector for ScriptedLandmarkDetector {
    fn detect(
        &mut self,
        _frame: &Frame,
    ) -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>> {
        Ok(self.observations.pop_front().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::{CHIN, NOSE_TIP};

    fn frame() -> Frame {
        Frame::new(vec![0; 3], 1, 1, 0)
    }

    fn landmarks() -> LandmarkSet {
        [(NOSE_TIP, (0.5, 0.4)), (CHIN, (0.5, 0.7))]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_replays_observations_in_order() {
        let mut detector =
            ScriptedLandmarkDetector::new(vec![Some(landmarks()), None, Some(landmarks())]);
        assert!(detector.detect(&frame()).unwrap().is_some());
        assert!(detector.detect(&frame()).unwrap().is_none());
        assert!(detector.detect(&frame()).unwrap().is_some());
        assert_eq!(detector.remaining(), 0);
    }

    #[test]
    fn test_exhausted_queue_reports_no_face() {
        let mut detector = ScriptedLandmarkDetector::new(vec![]);
        assert!(detector.detect(&frame()).unwrap().is_none());
    }
}
