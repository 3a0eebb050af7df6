//! Dialogue state machine and its observer seam.

pub mod controller;
pub mod observer;
pub mod speaker;
