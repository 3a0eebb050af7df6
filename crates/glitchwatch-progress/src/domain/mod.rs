//! Progress state and the notifications it publishes.

pub mod catalog;
pub mod events;
pub mod store;
