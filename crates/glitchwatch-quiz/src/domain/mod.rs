//! Quiz state machine and rank tiers.

pub mod rank;
pub mod session;
