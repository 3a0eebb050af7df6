//! Notifications published by the progress store.

use glitchwatch_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Event type of every progress notification.
pub const PROGRESS_CHANGED_EVENT_TYPE: &str = "progress.changed";

/// What mutation produced a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressCause {
    /// A scene was entered.
    SceneEntered {
        /// The scene.
        scene_id: String,
    },
    /// A hotspot was clicked.
    HotspotVisited {
        /// The hotspot.
        hotspot_id: String,
        /// Whether this was the first click.
        first_visit: bool,
    },
    /// Points were added or removed.
    ScoreAdjusted {
        /// Requested delta before clamping.
        delta: i64,
    },
    /// A quiz answer was wrong.
    QuizMistake,
    /// An encounter was marked as fired.
    EncounterFired {
        /// The scene.
        scene_id: String,
    },
    /// A scene's progress was rolled back.
    SceneReset {
        /// The scene.
        scene_id: String,
    },
    /// A module was completed.
    ModuleCompleted {
        /// The scene.
        scene_id: String,
    },
    /// The whole session was reset.
    SessionReset,
}

/// Score and exploration percent after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressChanged {
    /// Current score.
    pub score: i64,
    /// Exploration percent of the current scene.
    pub percent: u8,
    /// The mutation that produced this notification.
    pub cause: ProgressCause,
}

/// Notification envelope.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub payload: ProgressChanged,
}

impl DomainEvent for ProgressEvent {
    fn event_type(&self) -> &'static str {
        PROGRESS_CHANGED_EVENT_TYPE
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.payload).unwrap_or_default()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
