pub mod sequencer;
pub mod step;
