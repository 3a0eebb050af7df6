//! Engine-level value types.

pub mod continuation;
pub mod notice;
pub mod report;
pub mod screen;
