//! Stage model and the stepper that interprets it.

pub mod context;
pub mod sequencer;
pub mod stage;
