//! Everything a running encounter touches, borrowed for one call.

use glitchwatch_core::collaborators::{AudioService, SceneView};
use glitchwatch_dialogue::domain::controller::DialogueController;
use glitchwatch_progress::domain::store::ProgressStore;

/// Continuation the sequencer attaches to lines it waits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncounterResume {
    /// Run that showed the line.
    pub run: u64,
}

/// Borrowed session state and collaborators.
pub struct EncounterContext<'a, C> {
    /// Score and completion tracking.
    pub progress: &'a mut ProgressStore,
    /// The shared dialogue box.
    pub dialogue: &'a mut DialogueController<C>,
    /// Panorama and overlays.
    pub view: &'a mut dyn SceneView,
    /// Music, effects and speech.
    pub audio: &'a mut dyn AudioService,
}
