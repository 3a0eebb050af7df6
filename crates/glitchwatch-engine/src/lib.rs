//! Glitchwatch — Game engine.
//!
//! Responsible for wiring the progress store, dialogue box, quiz sessions
//! and encounter sequencer into one game: routing hotspot clicks, loading
//! scenes and the hub, publishing mission reports, and reaching the
//! finale. Hosts drive it with player input plus `tick` and read back the
//! notices it queues.

pub mod application;
pub mod domain;
