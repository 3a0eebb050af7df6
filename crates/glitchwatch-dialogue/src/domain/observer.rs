//! Reveal observer — how the controller reports progress without knowing
//! who listens.

use glitchwatch_core::collaborators::Speaker;

/// Receives typing progress from a `DialogueController`.
///
/// All methods default to no-ops.
pub trait RevealObserver {
    /// A new dialogue started typing.
    fn on_started(&mut self, _speaker: Speaker, _text: &str) {}

    /// One more character became visible.
    fn on_character(&mut self, _speaker: Speaker, _ch: char) {}

    /// The full text is visible, by typing or by skipping.
    fn on_finished(&mut self, _speaker: Speaker) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl RevealObserver for SilentObserver {}
