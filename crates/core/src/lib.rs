//! Head-pose liveness verification core.
//!
//! Consumes a stream of per-frame facial-landmark observations and drives a
//! fixed sequence of pose challenges, recording one timestamped proof capture
//! per challenge. Landmark detection and rendering are external collaborators
//! behind ports; the core itself is pure state-machine logic.

pub mod capture;
pub mod challenge;
pub mod detection;
pub mod pose;
pub mod session;
pub mod shared;
