use crate::session::proof_capture::ProofCapture;

/// Where the session is in the challenge sequence.
///
/// `Capturing` locks the sequencer: estimates are ignored until the settle
/// capture for that step completes. `Failed` is the explicit dead-end for a
/// broken landmark collaborator; there is no failure transition for a
/// subject who simply never matches a pose (the session stalls in
/// `Awaiting` instead).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Awaiting(usize),
    Capturing(usize),
    Completed,
    Failed,
}

/// Mutable aggregate for one end-to-end liveness run.
///
/// Mutated only by the sequencer and capture manager (crate-internal
/// operations); callers observe it read-only. Invariants: while in progress
/// `captures.len()` equals the active step index; equal to the step count
/// exactly when `Completed`; captures are in step order with at most one
/// per step.
#[derive(Clone, Debug)]
pub struct LivenessSession {
    state: SessionState,
    captures: Vec<ProofCapture>,
    started_at_ms: Option<u64>,
    completed_at_ms: Option<u64>,
}

impl LivenessSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            captures: Vec::new(),
            started_at_ms: None,
            completed_at_ms: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn captures(&self) -> &[ProofCapture] {
        &self.captures
    }

    pub fn started_at_ms(&self) -> Option<u64> {
        self.started_at_ms
    }

    pub fn completed_at_ms(&self) -> Option<u64> {
        self.completed_at_ms
    }

    /// Index of the step currently awaited or being captured.
    pub fn current_step_index(&self) -> Option<usize> {
        match self.state {
            SessionState::Awaiting(i) | SessionState::Capturing(i) => Some(i),
            _ => None,
        }
    }

    pub(crate) fn begin(&mut self, now_ms: u64) {
        debug_assert_eq!(self.state, SessionState::Idle, "session already started");
        self.state = SessionState::Awaiting(0);
        self.started_at_ms = Some(now_ms);
    }

    /// Locks the active step for capture. Once entered, the step cannot
    /// un-trigger.
    pub(crate) fn enter_capture(&mut self) {
        match self.state {
            SessionState::Awaiting(i) => {
                debug_assert_eq!(self.captures.len(), i);
                self.state = SessionState::Capturing(i);
            }
            other => debug_assert!(false, "enter_capture from {other:?}"),
        }
    }

    /// Records the proof capture for the locked step and advances to the
    /// next step, or completes the session after the last one.
    pub(crate) fn complete_step(&mut self, capture: ProofCapture, step_count: usize, now_ms: u64) {
        match self.state {
            SessionState::Capturing(i) => {
                debug_assert_eq!(self.captures.len(), i);
                self.captures.push(capture);
                if i + 1 == step_count {
                    self.state = SessionState::Completed;
                    self.completed_at_ms = Some(now_ms);
                } else {
                    self.state = SessionState::Awaiting(i + 1);
                }
            }
            other => debug_assert!(false, "complete_step from {other:?}"),
        }
    }

    pub(crate) fn fail(&mut self) {
        self.state = SessionState::Failed;
    }
}

impl Default for LivenessSession {
    fn default() -> Self {
        Self::new()
    }
}
