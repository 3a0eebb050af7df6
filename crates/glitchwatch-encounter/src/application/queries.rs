//! Encounter status for hosts and diagnostics.

use serde::Serialize;

use crate::domain::sequencer::{EventSequencer, RunKind};

/// Snapshot of the sequencer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncounterStatus {
    /// `"intro"` or `"victory"` while a run is active.
    pub running: Option<&'static str>,
    /// Scene of the active run.
    pub scene_id: Option<String>,
    /// Stages left to execute.
    pub remaining_stages: usize,
    /// Whether the run waits for the player to close a line.
    pub waiting_on_dialogue: bool,
}

/// Builds the sequencer snapshot.
#[must_use]
pub fn encounter_status(sequencer: &EventSequencer) -> EncounterStatus {
    EncounterStatus {
        running: sequencer.active_kind().map(|kind| match kind {
            RunKind::Intro => "intro",
            RunKind::Victory => "victory",
        }),
        scene_id: sequencer.active_scene().map(str::to_owned),
        remaining_stages: sequencer.remaining_stages(),
        waiting_on_dialogue: sequencer.is_waiting_on_dialogue(),
    }
}
