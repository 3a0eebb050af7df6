//! Glitchwatch — Content configuration.
//!
//! Responsible for the read-only scene graph the engine runs on: scenes and
//! their hotspots, quiz question pools, encounter scripts, scoring rules,
//! rank thresholds and narrator settings, plus loading them from JSON or
//! YAML and rejecting inconsistent graphs.

pub mod application;
pub mod domain;
