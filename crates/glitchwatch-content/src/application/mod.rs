//! Loading and validation of configuration documents.

pub mod loader;
