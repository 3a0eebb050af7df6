//! Read views for the quiz overlay.

pub mod queries;
