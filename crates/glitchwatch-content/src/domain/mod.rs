//! Configuration data model.

pub mod config;
pub mod scene;
