/// Landmark index of the nose tip in the face-mesh topology.
pub const NOSE_TIP: u32 = 1;

/// Landmark index of the chin point in the face-mesh topology.
pub const CHIN: u32 = 152;

/// Delay between a challenge step matching and its proof capture being
/// taken, so the subject holds the pose while the capture is announced.
pub const DEFAULT_SETTLE_MS: u64 = 1000;
