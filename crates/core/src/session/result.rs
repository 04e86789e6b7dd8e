use serde::Serialize;

use crate::session::liveness_session::{LivenessSession, SessionState};

/// Outcome of one challenge step within a completed check.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepResult {
    pub step_id: String,
    pub passed: bool,
    pub captured_at_ms: u64,
}

/// Final verdict handed to the enrollment workflow.
///
/// `passed` is always `true`: the machine has no failure transition, so a
/// subject who never matches a pose stalls the session instead of producing
/// a negative verdict.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LivenessResult {
    pub passed: bool,
    pub completed_at_ms: u64,
    pub steps: Vec<StepResult>,
}

impl LivenessResult {
    /// Assembles the verdict from a completed session; `None` while the
    /// session is still in progress, failed, or idle.
    pub fn from_session(session: &LivenessSession) -> Option<Self> {
        if session.state() != SessionState::Completed {
            return None;
        }
        let steps = session
            .captures()
            .iter()
            .map(|c| StepResult {
                step_id: c.step_id.clone(),
                passed: true,
                captured_at_ms: c.captured_at_ms,
            })
            .collect();
        Some(Self {
            passed: true,
            completed_at_ms: session.completed_at_ms()?,
            steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::proof_capture::ProofCapture;
    use crate::shared::frame::Frame;

    fn completed_session() -> LivenessSession {
        let mut session = LivenessSession::new();
        session.begin(0);
        for (i, id) in ["straight", "left", "right"].iter().enumerate() {
            session.enter_capture();
            let capture = ProofCapture::new(id, Frame::new(vec![0; 3], 1, 1, i), (i as u64 + 1) * 100);
            session.complete_step(capture, 3, (i as u64 + 1) * 100);
        }
        session
    }

    #[test]
    fn test_verdict_from_completed_session() {
        let result = LivenessResult::from_session(&completed_session()).unwrap();
        assert!(result.passed);
        assert_eq!(result.completed_at_ms, 300);
        let ids: Vec<&str> = result.steps.iter().map(|s| s.step_id.as_str()).collect();
        assert_eq!(ids, ["straight", "left", "right"]);
        assert!(result.steps.iter().all(|s| s.passed));
        assert_eq!(result.steps[1].captured_at_ms, 200);
    }

    #[test]
    fn test_no_verdict_while_in_progress() {
        let mut session = LivenessSession::new();
        assert!(LivenessResult::from_session(&session).is_none());
        session.begin(0);
        assert!(LivenessResult::from_session(&session).is_none());
    }

    #[test]
    fn test_no_verdict_from_failed_session() {
        let mut session = LivenessSession::new();
        session.begin(0);
        session.fail();
        assert!(LivenessResult::from_session(&session).is_none());
    }
}
