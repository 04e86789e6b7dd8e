use crate::shared::frame::Frame;

/// The visual artifact recorded at the moment a challenge step was
/// satisfied. Exactly one per completed step, owned by the session.
#[derive(Clone, Debug, PartialEq)]
pub struct ProofCapture {
    pub step_id: String,
    pub image: Frame,
    pub captured_at_ms: u64,
}

impl ProofCapture {
    pub fn new(step_id: &str, image: Frame, captured_at_ms: u64) -> Self {
        Self {
            step_id: step_id.to_string(),
            image,
            captured_at_ms,
        }
    }
}
