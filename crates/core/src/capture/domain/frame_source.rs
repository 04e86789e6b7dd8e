use crate::shared::frame::Frame;

/// Supplies the visual snapshot recorded as a proof capture.
///
/// One source is owned exclusively by one active session; concurrent
/// sessions against the same source are not supported. Acquisition may
/// fail (e.g. the underlying camera went away), which the capture manager
/// surfaces as a retryable error.
pub trait FrameSource: Send {
    fn screenshot(&mut self) -> Result<Frame, Box<dyn std::error::Error>>;
}
