//! Read views over the sequencer.

pub mod queries;
