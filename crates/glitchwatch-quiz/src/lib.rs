//! Glitchwatch — Quiz assessment.
//!
//! Responsible for picking and shuffling a module's questions, running the
//! answer/feedback/retry loop through the dialogue box, counting mistakes,
//! and ranking the finished attempt against configurable tiers.

pub mod application;
pub mod domain;
