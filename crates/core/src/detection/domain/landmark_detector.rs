use crate::shared::frame::Frame;
use crate::shared::landmarks::LandmarkSet;

/// Port for the external landmark-detection capability.
///
/// Treated as a black box: the only contract is that landmark indices are
/// stable across calls and that "no face" (`Ok(None)`) is a valid, non-error
/// outcome. An `Err` means the collaborator itself is unavailable, which is
/// fatal to the session. Implementations may be stateful, hence `&mut self`.
pub trait LandmarkDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>>;
}
