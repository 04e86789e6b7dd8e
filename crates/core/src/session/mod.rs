pub mod controller;
pub mod liveness_session;
pub mod proof_capture;
pub mod result;
