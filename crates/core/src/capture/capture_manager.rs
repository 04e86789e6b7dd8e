use crate::capture::domain::frame_source::FrameSource;
use crate::challenge::step::ChallengeStep;
use crate::session::proof_capture::ProofCapture;
use crate::shared::error::SessionError;

/// A capture that has been scheduled but not yet taken.
#[derive(Clone, Debug)]
struct PendingCapture {
    step_id: String,
    due_at_ms: u64,
}

/// Scoped acquisition of proof captures, one per challenge step.
///
/// When a step matches, the capture is scheduled `settle_ms` in the future
/// so the subject holds the pose while the UI announces the capture. The
/// pending capture is a value, not a timer thread: the caller polls it via
/// [`acquire`](Self::acquire), and [`cancel`](Self::cancel) discards it
/// deterministically on reset.
pub struct CaptureManager {
    source: Box<dyn FrameSource>,
    settle_ms: u64,
    pending: Option<PendingCapture>,
}

impl CaptureManager {
    pub fn new(source: Box<dyn FrameSource>, settle_ms: u64) -> Self {
        Self {
            source,
            settle_ms,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at_ms(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.due_at_ms)
    }

    /// Schedules the settle capture for a freshly locked step.
    ///
    /// At most one capture can be pending; the sequencer's capturing lock
    /// guarantees this holds per step.
    pub fn schedule(&mut self, step: &ChallengeStep, now_ms: u64) {
        debug_assert!(self.pending.is_none(), "capture already pending");
        log::debug!("capture for '{}' scheduled in {} ms", step.id, self.settle_ms);
        self.pending = Some(PendingCapture {
            step_id: step.id.clone(),
            due_at_ms: now_ms + self.settle_ms,
        });
    }

    /// Takes the pending capture if its settle delay has elapsed.
    ///
    /// Returns `Ok(None)` when nothing is pending or the delay is still
    /// running. On acquisition failure the pending capture stays in place,
    /// so the step is retried rather than skipped.
    pub fn acquire(&mut self, now_ms: u64) -> Result<Option<ProofCapture>, SessionError> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| now_ms >= p.due_at_ms);
        if !due {
            return Ok(None);
        }
        let image = self
            .source
            .screenshot()
            .map_err(|e| SessionError::Capture(e.to_string()))?;
        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };
        log::debug!("captured proof for '{}'", pending.step_id);
        Ok(Some(ProofCapture::new(&pending.step_id, image, now_ms)))
    }

    /// Drops any in-flight capture. The only cancellation path; used by
    /// session reset (e.g. on a camera-source change).
    pub fn cancel(&mut self) {
        if let Some(p) = self.pending.take() {
            log::debug!("pending capture for '{}' cancelled", p.step_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::Frame;

    struct StubSource {
        shots: usize,
    }

    impl FrameSource for StubSource {
        fn screenshot(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
            let frame = Frame::new(vec![1, 2, 3], 1, 1, self.shots);
            self.shots += 1;
            Ok(frame)
        }
    }

    struct UnavailableSource;

    impl FrameSource for UnavailableSource {
        fn screenshot(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
            Err("video source unavailable".into())
        }
    }

    /// Fails the first `failures` screenshots, then recovers.
    struct FlakySource {
        failures: usize,
    }

    impl FrameSource for FlakySource {
        fn screenshot(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err("transient failure".into());
            }
            Ok(Frame::new(vec![0; 3], 1, 1, 0))
        }
    }

    fn step() -> ChallengeStep {
        ChallengeStep::new("straight", "Look straight", 87.0, 93.0, 0)
    }

    #[test]
    fn test_nothing_pending_acquires_nothing() {
        let mut mgr = CaptureManager::new(Box::new(StubSource { shots: 0 }), 1000);
        assert!(!mgr.is_pending());
        assert!(mgr.acquire(5000).unwrap().is_none());
    }

    #[test]
    fn test_capture_waits_for_settle_delay() {
        let mut mgr = CaptureManager::new(Box::new(StubSource { shots: 0 }), 1000);
        mgr.schedule(&step(), 0);
        assert!(mgr.is_pending());
        assert_eq!(mgr.due_at_ms(), Some(1000));
        assert!(mgr.acquire(999).unwrap().is_none());
        assert!(mgr.is_pending());
    }

    #[test]
    fn test_due_capture_is_taken_once() {
        let mut mgr = CaptureManager::new(Box::new(StubSource { shots: 0 }), 1000);
        mgr.schedule(&step(), 0);
        let capture = mgr.acquire(1000).unwrap().unwrap();
        assert_eq!(capture.step_id, "straight");
        assert_eq!(capture.captured_at_ms, 1000);
        assert!(!mgr.is_pending());
        assert!(mgr.acquire(2000).unwrap().is_none());
    }

    #[test]
    fn test_zero_settle_is_due_immediately() {
        let mut mgr = CaptureManager::new(Box::new(StubSource { shots: 0 }), 0);
        mgr.schedule(&step(), 42);
        assert!(mgr.acquire(42).unwrap().is_some());
    }

    #[test]
    fn test_acquisition_failure_keeps_capture_pending() {
        let mut mgr = CaptureManager::new(Box::new(UnavailableSource), 0);
        mgr.schedule(&step(), 0);
        let err = mgr.acquire(0).unwrap_err();
        assert!(matches!(err, SessionError::Capture(_)));
        // Step must not be skipped.
        assert!(mgr.is_pending());
    }

    #[test]
    fn test_acquisition_retries_after_transient_failure() {
        let mut mgr = CaptureManager::new(Box::new(FlakySource { failures: 1 }), 0);
        mgr.schedule(&step(), 0);
        assert!(mgr.acquire(0).is_err());
        let capture = mgr.acquire(10).unwrap().unwrap();
        assert_eq!(capture.step_id, "straight");
        assert_eq!(capture.captured_at_ms, 10);
    }

    #[test]
    fn test_cancel_discards_pending_capture() {
        let mut mgr = CaptureManager::new(Box::new(StubSource { shots: 0 }), 1000);
        mgr.schedule(&step(), 0);
        mgr.cancel();
        assert!(!mgr.is_pending());
        assert!(mgr.acquire(5000).unwrap().is_none());
    }
}
