//! Adapters and read views around the dialogue controller.

pub mod queries;
pub mod voiced;
