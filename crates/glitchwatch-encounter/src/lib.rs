//! Glitchwatch — Scripted encounters.
//!
//! Responsible for the antagonist sequence that gates a module's quiz and
//! for the victory sequence that follows it. Each sequence is an ordered
//! list of tagged stages interpreted by a single stepper, which waits on
//! virtual-time delays and on dialogue acknowledgements and can be
//! cancelled at any point without running another stage.

pub mod application;
pub mod domain;
