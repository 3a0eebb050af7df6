//! Glitchwatch — Progress tracking.
//!
//! Responsible for the player's score, which hotspots have been visited,
//! which encounters have fired, which modules are complete, and the
//! per-scene timer and mistake counter. Every mutation publishes a
//! progress-changed notification for the presentation layer.

pub mod application;
pub mod domain;
