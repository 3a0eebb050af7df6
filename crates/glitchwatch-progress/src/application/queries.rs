//! Query views over the progress store.
//!
//! These return read-only, serializable snapshots for the presentation
//! layer and the mission report.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::store::ProgressStore;
use glitchwatch_content::domain::scene::SceneConfig;
use glitchwatch_core::clock::format_elapsed;

/// Snapshot of the whole session.
#[derive(Debug, Serialize)]
pub struct ProgressView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Current score.
    pub score: i64,
    /// The scene being played.
    pub current_scene_id: Option<String>,
    /// Exploration percent of the current scene.
    pub percent: u8,
    /// Completed modules, sorted.
    pub completed_modules: Vec<String>,
    /// Time in the current scene, `MM:SS`.
    pub time_in_scene: String,
}

/// Exploration figures for one scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorationStats {
    /// Non-quiz hotspots visited.
    pub explored: usize,
    /// Non-quiz hotspots in the scene.
    pub total: usize,
    /// `explored / total` as a rounded percent; 100 when `total` is 0.
    pub percent: u8,
}

/// Builds the session snapshot.
#[must_use]
pub fn progress_view(store: &ProgressStore) -> ProgressView {
    let mut completed_modules: Vec<String> =
        store.state().completed_modules.iter().cloned().collect();
    completed_modules.sort();
    ProgressView {
        session_id: store.session_id(),
        score: store.score(),
        current_scene_id: store.current_scene_id().map(str::to_owned),
        percent: store.current_progress_percent(),
        completed_modules,
        time_in_scene: format_elapsed(store.elapsed()),
    }
}

/// Counts visited exploration hotspots of a scene. Unlike the tracker
/// percent this one is rounded, as shown on the mission report.
#[must_use]
pub fn exploration_stats(store: &ProgressStore, scene: &SceneConfig) -> ExplorationStats {
    let total = scene.exploration_hotspots().count();
    let explored = scene
        .exploration_hotspots()
        .filter(|h| store.is_visited(&h.id))
        .count();
    let percent = if total == 0 {
        100
    } else {
        u8::try_from((explored * 200 + total) / (total * 2)).unwrap_or(100)
    };
    ExplorationStats {
        explored,
        total,
        percent,
    }
}
