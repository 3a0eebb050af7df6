//! Read-only views over progress state.

pub mod queries;
