use serde::Serialize;

/// One pose challenge: an instruction plus the tilt-angle range that
/// satisfies it. Immutable; the set and order of steps is fixed for the
/// lifetime of a session.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChallengeStep {
    pub id: String,
    pub label: String,
    pub min_angle: f64,
    pub max_angle: f64,
    pub order: usize,
}

impl ChallengeStep {
    pub fn new(id: &str, label: &str, min_angle: f64, max_angle: f64, order: usize) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            min_angle,
            max_angle,
            order,
        }
    }

    /// Inclusive on both bounds.
    pub fn accepts(&self, angle_deg: f64) -> bool {
        angle_deg >= self.min_angle && angle_deg <= self.max_angle
    }
}

/// The fixed challenge sequence: straight, then left, then right.
///
/// Ranges may overlap arbitrarily; ordering is enforced by the sequencer,
/// which only ever tests the active step.
pub fn standard_sequence() -> Vec<ChallengeStep> {
    vec![
        ChallengeStep::new("straight", "Look straight", 87.0, 93.0, 0),
        ChallengeStep::new("left", "Turn left", 100.0, 115.0, 1),
        ChallengeStep::new("right", "Turn right", 65.0, 80.0, 2),
    ]
}
