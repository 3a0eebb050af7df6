//! Scripted random draws for quiz shuffles.

use glitchwatch_core::rng::DeterministicRng;

/// Always draws the lowest value in range. Under Fisher–Yates this swaps
/// every element with the first one, so a pool `[a, b, c]` comes out as
/// `[b, c, a]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// Replays a fixed list of draws, clamped into each requested range.
///
/// A Fisher–Yates shuffle over `n` items asks for `n - 1` draws, from the
/// last index down; answering each with its upper bound keeps the order.
///
/// # Panics
///
/// Panics when more draws are requested than were scripted.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    draws: Vec<u32>,
    next: usize,
}

impl SequenceRng {
    /// Scripts the given draws.
    #[must_use]
    pub fn new(draws: Vec<u32>) -> Self {
        Self { draws, next: 0 }
    }

    /// Draws not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draws.len() - self.next
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let Some(&draw) = self.draws.get(self.next) else {
            panic!("SequenceRng exhausted after {} draws", self.draws.len());
        };
        self.next += 1;
        draw.clamp(min, max.max(min))
    }
}
