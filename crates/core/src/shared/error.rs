use thiserror::Error;

/// Session-level failures surfaced to the result consumer.
///
/// Per-frame anomalies (no face detected, missing landmarks) are absorbed
/// locally by the pipeline and never appear here.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The landmark collaborator failed outright. Fatal: the session moves
    /// to a failed state and rejects further frames.
    #[error("landmark detector unavailable: {0}")]
    LandmarkDetector(String),

    /// Frame acquisition failed at capture time. The pending capture is
    /// retained, so the step is retried on the next poll rather than
    /// silently skipped.
    #[error("proof capture acquisition failed: {0}")]
    Capture(String),

    /// The session previously failed and cannot process further frames.
    #[error("session is in a failed state")]
    Unusable,
}
