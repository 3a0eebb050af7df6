//! Glitchwatch Core — shared runtime abstractions.
//!
//! This crate defines the traits and small runtime types every component
//! depends on: time, randomness, deferred timers, notification envelopes
//! and the external collaborators the engine drives. It contains no game
//! rules.

pub mod clock;
pub mod collaborators;
pub mod error;
pub mod event;
pub mod rng;
pub mod timer;
