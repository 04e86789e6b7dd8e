use crossbeam_channel::{bounded, Receiver, Sender};

use crate::capture::capture_manager::CaptureManager;
use crate::capture::domain::frame_source::FrameSource;
use crate::challenge::sequencer::ChallengeSequencer;
use crate::challenge::step::ChallengeStep;
use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::pose::estimator::PoseEstimator;
use crate::session::liveness_session::{LivenessSession, SessionState};
use crate::session::result::LivenessResult;
use crate::shared::clock::Clock;
use crate::shared::constants::DEFAULT_SETTLE_MS;
use crate::shared::error::SessionError;
use crate::shared::frame::Frame;
use crate::shared::landmarks::LandmarkSet;

/// What the pipeline did with one frame (or one poll).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    /// Session not started yet; frame discarded.
    NotStarted,
    /// No face in this frame; skipped without state change.
    NoFace,
    /// Face present but a required landmark was missing; skipped.
    NoEstimate,
    /// Estimate produced but outside the active step's range.
    OutOfRange,
    /// A capture's settle delay is running; estimate ignored.
    Settling,
    /// The active step matched and its settle capture was scheduled.
    CaptureScheduled,
    /// A settle capture was taken and the next step is now awaited.
    StepCaptured,
    /// The final capture was taken; the verdict is attached.
    Completed,
    /// Session already completed; frame is a no-op.
    AlreadyCompleted,
}

/// Per-frame pipeline output: the event plus the angle, active step, and
/// landmark set as plain data for an external renderer.
#[derive(Clone, Debug)]
pub struct FrameReport {
    pub event: FrameEvent,
    pub angle_deg: Option<f64>,
    pub step_index: Option<usize>,
    pub landmarks: Option<LandmarkSet>,
    pub result: Option<LivenessResult>,
}

impl FrameReport {
    fn bare(event: FrameEvent) -> Self {
        Self {
            event,
            angle_deg: None,
            step_index: None,
            landmarks: None,
            result: None,
        }
    }
}

/// Composes the per-session pipeline: landmark detection, pose estimation,
/// challenge sequencing, and proof capture.
///
/// Frames are fed in one at a time and run to completion; the settle delay
/// is the only suspension point, realized as a clock deadline fired by
/// [`poll`](Self::poll) (also checked at the head of each frame). On
/// completion the verdict is returned in the report and published exactly
/// once to every subscriber; afterwards frames are no-ops until
/// [`reset`](Self::reset).
pub struct SessionController {
    detector: Box<dyn LandmarkDetector>,
    estimator: PoseEstimator,
    sequencer: ChallengeSequencer,
    captures: CaptureManager,
    clock: Box<dyn Clock>,
    session: LivenessSession,
    subscribers: Vec<Sender<LivenessResult>>,
}

impl SessionController {
    pub fn new(
        detector: Box<dyn LandmarkDetector>,
        source: Box<dyn FrameSource>,
        clock: Box<dyn Clock>,
        sequencer: ChallengeSequencer,
        settle_ms: u64,
    ) -> Self {
        Self {
            detector,
            estimator: PoseEstimator::default(),
            sequencer,
            captures: CaptureManager::new(source, settle_ms),
            clock,
            session: LivenessSession::new(),
            subscribers: Vec::new(),
        }
    }

    /// Controller over the fixed straight/left/right sequence with the
    /// default settle delay.
    pub fn standard(
        detector: Box<dyn LandmarkDetector>,
        source: Box<dyn FrameSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self::new(
            detector,
            source,
            clock,
            ChallengeSequencer::standard(),
            DEFAULT_SETTLE_MS,
        )
    }

    pub fn session(&self) -> &LivenessSession {
        &self.session
    }

    pub fn steps(&self) -> &[ChallengeStep] {
        self.sequencer.steps()
    }

    pub fn active_step(&self) -> Option<&ChallengeStep> {
        self.sequencer.active_step(&self.session)
    }

    /// The verdict, once the session has completed.
    pub fn result(&self) -> Option<LivenessResult> {
        LivenessResult::from_session(&self.session)
    }

    /// Channel that receives the verdict exactly once on completion.
    pub fn subscribe(&mut self) -> Receiver<LivenessResult> {
        let (tx, rx) = bounded(1);
        self.subscribers.push(tx);
        rx
    }

    /// Begins the challenge sequence. A no-op unless the session is idle;
    /// use [`reset`](Self::reset) first to restart a running session.
    pub fn start(&mut self) {
        if self.session.state() != SessionState::Idle {
            log::warn!("start requested but session is already running");
            return;
        }
        self.sequencer.start(&mut self.session, self.clock.now_ms());
    }

    /// Discards all session state, cancelling any in-flight capture, and
    /// returns to idle. The only cancellation path (e.g. on a
    /// camera-source change).
    pub fn reset(&mut self) {
        self.captures.cancel();
        self.session = LivenessSession::new();
        log::debug!("session reset to idle");
    }

    /// Fires the pending settle capture if its delay has elapsed.
    ///
    /// Drives the scheduled continuation when no frames are arriving (the
    /// final capture of a stream fires here). `Ok(None)` when nothing was
    /// due.
    pub fn poll(&mut self) -> Result<Option<FrameReport>, SessionError> {
        match self.session.state() {
            SessionState::Failed => Err(SessionError::Unusable),
            SessionState::Capturing(_) => self.fire_due_capture(),
            _ => Ok(None),
        }
    }

    /// Runs one frame through the pipeline.
    ///
    /// A due settle capture fires before the frame's estimate is
    /// considered, so the estimate is always tested against the step the
    /// session is actually awaiting.
    pub fn process_frame(&mut self, frame: &Frame) -> Result<FrameReport, SessionError> {
        match self.session.state() {
            SessionState::Failed => return Err(SessionError::Unusable),
            SessionState::Completed => return Ok(FrameReport::bare(FrameEvent::AlreadyCompleted)),
            SessionState::Idle => return Ok(FrameReport::bare(FrameEvent::NotStarted)),
            _ => {}
        }

        if let Some(report) = self.fire_due_capture()? {
            if report.event == FrameEvent::Completed {
                return Ok(report);
            }
            // A step was captured and the session advanced; this frame's
            // estimate now runs against the next step.
        }

        let landmarks = match self.detector.detect(frame) {
            Ok(landmarks) => landmarks,
            Err(e) => {
                self.captures.cancel();
                self.session.fail();
                log::error!("landmark detector failed: {e}");
                return Err(SessionError::LandmarkDetector(e.to_string()));
            }
        };
        let Some(landmarks) = landmarks else {
            return Ok(FrameReport::bare(FrameEvent::NoFace));
        };

        let step_index = self.session.current_step_index();
        let Some(estimate) = self.estimator.estimate(&landmarks) else {
            return Ok(FrameReport {
                event: FrameEvent::NoEstimate,
                angle_deg: None,
                step_index,
                landmarks: Some(landmarks),
                result: None,
            });
        };

        if matches!(self.session.state(), SessionState::Capturing(_)) {
            return Ok(FrameReport {
                event: FrameEvent::Settling,
                angle_deg: Some(estimate.angle_deg()),
                step_index,
                landmarks: Some(landmarks),
                result: None,
            });
        }

        let event = match self.sequencer.observe(&mut self.session, estimate) {
            Some(step) => {
                self.captures.schedule(step, self.clock.now_ms());
                FrameEvent::CaptureScheduled
            }
            None => FrameEvent::OutOfRange,
        };
        Ok(FrameReport {
            event,
            angle_deg: Some(estimate.angle_deg()),
            step_index,
            landmarks: Some(landmarks),
            result: None,
        })
    }

    fn fire_due_capture(&mut self) -> Result<Option<FrameReport>, SessionError> {
        let now_ms = self.clock.now_ms();
        let Some(capture) = self.captures.acquire(now_ms)? else {
            return Ok(None);
        };
        let step_index = self.session.current_step_index();
        self.sequencer
            .finish_capture(&mut self.session, capture, now_ms);

        if let Some(result) = LivenessResult::from_session(&self.session) {
            for tx in &self.subscribers {
                let _ = tx.try_send(result.clone());
            }
            Ok(Some(FrameReport {
                event: FrameEvent::Completed,
                angle_deg: None,
                step_index,
                landmarks: None,
                result: Some(result),
            }))
        } else {
            Ok(Some(FrameReport {
                event: FrameEvent::StepCaptured,
                angle_deg: None,
                step_index,
                landmarks: None,
                result: None,
            }))
        }
    }
}
