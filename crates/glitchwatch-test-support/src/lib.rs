//! Shared test doubles and utilities for the Glitchwatch narrative engine.

mod clock;
mod collaborators;
mod rng;

pub use clock::{FixedClock, ManualClock, fixed_now};
pub use collaborators::{CollaboratorCall, CollaboratorLog, RecordingAudio, RecordingSceneView};
pub use rng::{MockRng, SequenceRng};
