//! Glitchwatch — Dialogue delivery.
//!
//! Responsible for the single active dialogue box: revealing text one
//! character per interval, skipping to the full text, holding the caller's
//! continuation until the player acknowledges, and pausing while the host
//! is backgrounded.

pub mod application;
pub mod domain;
