use std::fs;
use std::path::Path;

use serde::Deserialize;

use liveness_core::shared::constants::{CHIN, NOSE_TIP};
use liveness_core::shared::landmarks::LandmarkSet;

/// One scripted frame observation.
///
/// Either `angle` (shorthand for a synthetic nose/chin pair at that tilt),
/// explicit `nose`/`chin` points, or `no_face`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFrame {
    pub angle: Option<f64>,
    pub nose: Option<(f64, f64)>,
    pub chin: Option<(f64, f64)>,
    #[serde(default)]
    pub no_face: bool,
}

impl ScenarioFrame {
    /// The landmark observation this frame feeds to the pipeline; `None`
    /// models a frame where no face was detected.
    pub fn to_observation(&self) -> Option<LandmarkSet> {
        if self.no_face {
            return None;
        }
        if let Some(angle) = self.angle {
            let rad = angle.to_radians();
            let nose = (0.5, 0.5);
            let chin = (nose.0 + 0.2 * rad.cos(), nose.1 + 0.2 * rad.sin());
            return Some([(NOSE_TIP, nose), (CHIN, chin)].into_iter().collect());
        }
        let mut landmarks = LandmarkSet::new();
        if let Some(nose) = self.nose {
            landmarks.insert(NOSE_TIP, nose);
        }
        if let Some(chin) = self.chin {
            landmarks.insert(CHIN, chin);
        }
        Some(landmarks)
    }
}

/// A scripted run: per-frame observations plus an optional settle override.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub settle_ms: Option<u64>,
    pub frames: Vec<ScenarioFrame>,
}

pub fn load(path: &Path) -> Result<Scenario, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let scenario: Scenario = serde_json::from_str(&text)?;
    Ok(scenario)
}
