use crate::challenge::step::ChallengeStep;
use crate::pose::estimator::PoseEstimate;
use crate::session::liveness_session::{LivenessSession, SessionState};
use crate::session::proof_capture::ProofCapture;

/// Drives the ordered challenge sequence over a [`LivenessSession`].
///
/// Holds only the immutable step list; all run state lives in the session
/// value, so tests can drive the machine without any rendering surface.
/// Only the active step's angle range is ever tested, which fixes the
/// resolution order even when ranges overlap. There is no timeout or
/// failure transition: an unsatisfied step keeps the session in `Awaiting`
/// indefinitely.
pub struct ChallengeSequencer {
    steps: Vec<ChallengeStep>,
}

impl ChallengeSequencer {
    pub fn new(steps: Vec<ChallengeStep>) -> Result<Self, &'static str> {
        if steps.is_empty() {
            return Err("challenge sequence must have at least one step");
        }
        Ok(Self { steps })
    }

    /// Sequencer over the fixed straight/left/right sequence.
    pub fn standard() -> Self {
        Self {
            steps: crate::challenge::step::standard_sequence(),
        }
    }

    pub fn steps(&self) -> &[ChallengeStep] {
        &self.steps
    }

    pub fn start(&self, session: &mut LivenessSession, now_ms: u64) {
        session.begin(now_ms);
        log::debug!("liveness sequence started, awaiting '{}'", self.steps[0].id);
    }

    /// The step the session is currently awaiting or capturing.
    pub fn active_step(&self, session: &LivenessSession) -> Option<&ChallengeStep> {
        session.current_step_index().map(|i| &self.steps[i])
    }

    /// Feeds one pose estimate to the machine.
    ///
    /// Returns the step that matched if this estimate locked it for
    /// capture. While a step is capturing, or outside `Awaiting`, every
    /// estimate is ignored.
    pub fn observe(
        &self,
        session: &mut LivenessSession,
        estimate: PoseEstimate,
    ) -> Option<&ChallengeStep> {
        match session.state() {
            SessionState::Awaiting(i) if self.steps[i].accepts(estimate.angle_deg()) => {
                session.enter_capture();
                log::debug!(
                    "step '{}' matched at {:.1} degrees",
                    self.steps[i].id,
                    estimate.angle_deg()
                );
                Some(&self.steps[i])
            }
            _ => None,
        }
    }

    /// Records the settle capture for the locked step and advances the
    /// session, completing it after the last step.
    pub fn finish_capture(
        &self,
        session: &mut LivenessSession,
        capture: ProofCapture,
        now_ms: u64,
    ) {
        debug_assert!(
            self.active_step(session)
                .is_some_and(|s| s.id == capture.step_id),
            "capture step id must match the active step"
        );
        session.complete_step(capture, self.steps.len(), now_ms);
        match session.state() {
            SessionState::Completed => log::info!("liveness sequence completed"),
            SessionState::Awaiting(i) => {
                log::debug!("awaiting '{}'", self.steps[i].id);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::Frame;

    fn sequencer() -> ChallengeSequencer {
        ChallengeSequencer::standard()
    }

    fn started_session(seq: &ChallengeSequencer) -> LivenessSession {
        let mut session = LivenessSession::new();
        seq.start(&mut session, 0);
        session
    }

    fn capture_for(seq: &ChallengeSequencer, session: &LivenessSession) -> ProofCapture {
        let step = seq.active_step(session).unwrap();
        ProofCapture::new(&step.id, Frame::new(vec![0; 3], 1, 1, 0), 0)
    }

    fn estimate(angle: f64) -> PoseEstimate {
        PoseEstimate::new(angle)
    }

    #[test]
    fn test_new_rejects_empty_sequence() {
        assert!(ChallengeSequencer::new(vec![]).is_err());
    }

    #[test]
    fn test_matching_angle_locks_step() {
        let seq = sequencer();
        let mut session = started_session(&seq);
        let matched = seq.observe(&mut session, estimate(88.0));
        assert_eq!(matched.unwrap().id, "straight");
        assert_eq!(session.state(), SessionState::Capturing(0));
    }

    #[test]
    fn test_out_of_range_angle_is_ignored() {
        let seq = sequencer();
        let mut session = started_session(&seq);
        assert!(seq.observe(&mut session, estimate(45.0)).is_none());
        assert_eq!(session.state(), SessionState::Awaiting(0));
    }

    #[test]
    fn test_later_step_range_not_evaluated() {
        // 105 degrees satisfies 'left' but the machine is awaiting
        // 'straight'; it must not advance out of order.
        let seq = sequencer();
        let mut session = started_session(&seq);
        assert!(seq.observe(&mut session, estimate(105.0)).is_none());
        assert!(seq.observe(&mut session, estimate(70.0)).is_none());
        assert_eq!(session.state(), SessionState::Awaiting(0));
        assert!(session.captures().is_empty());
    }

    #[test]
    fn test_estimates_ignored_while_capturing() {
        let seq = sequencer();
        let mut session = started_session(&seq);
        seq.observe(&mut session, estimate(88.0));
        // Further qualifying estimates must not re-trigger the step.
        assert!(seq.observe(&mut session, estimate(88.0)).is_none());
        assert!(seq.observe(&mut session, estimate(90.0)).is_none());
        assert_eq!(session.state(), SessionState::Capturing(0));
        assert!(session.captures().is_empty());
    }

    #[test]
    fn test_finish_capture_advances_to_next_step() {
        let seq = sequencer();
        let mut session = started_session(&seq);
        seq.observe(&mut session, estimate(88.0));
        let capture = capture_for(&seq, &session);
        seq.finish_capture(&mut session, capture, 10);
        assert_eq!(session.state(), SessionState::Awaiting(1));
        assert_eq!(seq.active_step(&session).unwrap().id, "left");
        assert_eq!(session.captures().len(), 1);
    }

    #[test]
    fn test_full_sequence_completes_in_order() {
        let seq = sequencer();
        let mut session = started_session(&seq);
        for angle in [88.0, 105.0, 70.0] {
            assert!(seq.observe(&mut session, estimate(angle)).is_some());
            let capture = capture_for(&seq, &session);
            seq.finish_capture(&mut session, capture, 0);
        }
        assert_eq!(session.state(), SessionState::Completed);
        let ids: Vec<&str> = session
            .captures()
            .iter()
            .map(|c| c.step_id.as_str())
            .collect();
        assert_eq!(ids, ["straight", "left", "right"]);
    }

    #[test]
    fn test_estimates_before_start_are_ignored() {
        let seq = sequencer();
        let mut session = LivenessSession::new();
        assert!(seq.observe(&mut session, estimate(90.0)).is_none());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_estimates_after_completion_are_ignored() {
        let seq = sequencer();
        let mut session = started_session(&seq);
        for angle in [88.0, 105.0, 70.0] {
            seq.observe(&mut session, estimate(angle));
            let capture = capture_for(&seq, &session);
            seq.finish_capture(&mut session, capture, 0);
        }
        assert!(seq.observe(&mut session, estimate(88.0)).is_none());
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.captures().len(), 3);
    }

    #[test]
    fn test_boundary_angles_match_inclusively() {
        let seq = sequencer();
        let mut session = started_session(&seq);
        assert!(seq.observe(&mut session, estimate(87.0)).is_some());
    }
}
