//! The engine and its read views.

pub mod engine;
pub mod queries;
