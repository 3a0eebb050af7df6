//! The progress store.
//!
//! All progress state is mutated through `ProgressStore` methods. Each method
//! runs to completion and appends exactly one notification, so the
//! presentation layer never observes a half-applied change. Unknown scene or
//! hotspot ids are silent no-ops with safe return values.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use glitchwatch_content::domain::config::GameplayRules;
use glitchwatch_content::domain::scene::HotspotConfig;
use glitchwatch_core::clock::Clock;
use glitchwatch_core::event::EventMetadata;
use tracing::debug;
use uuid::Uuid;

use super::catalog::SceneCatalog;
use super::events::{PROGRESS_CHANGED_EVENT_TYPE, ProgressCause, ProgressChanged, ProgressEvent};

/// Mutable per-session progress.
#[derive(Debug, Clone)]
pub struct ProgressState {
    /// Score, never negative.
    pub score: i64,
    /// Hotspots clicked at least once.
    pub visited_hotspots: HashSet<String>,
    /// Scenes whose encounter has fired.
    pub events_triggered: HashSet<String>,
    /// Module scenes completed.
    pub completed_modules: HashSet<String>,
    /// Wrong answers since the current scene was entered.
    pub quiz_mistakes: u32,
    /// When the current scene was entered.
    pub scene_started_at: DateTime<Utc>,
    /// The scene being played.
    pub current_scene_id: Option<String>,
}

impl ProgressState {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            score: 0,
            visited_hotspots: HashSet::new(),
            events_triggered: HashSet::new(),
            completed_modules: HashSet::new(),
            quiz_mistakes: 0,
            scene_started_at: now,
            current_scene_id: None,
        }
    }
}

/// Owner of `ProgressState`.
pub struct ProgressStore {
    session_id: Uuid,
    catalog: SceneCatalog,
    rules: GameplayRules,
    clock: Arc<dyn Clock>,
    state: ProgressState,
    sequence: i64,
    pending_events: Vec<ProgressEvent>,
}

impl std::fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressStore")
            .field("session_id", &self.session_id)
            .field("state", &self.state)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

impl ProgressStore {
    /// Creates a fresh store for one play session.
    #[must_use]
    pub fn new(catalog: SceneCatalog, rules: GameplayRules, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        Self {
            session_id: Uuid::new_v4(),
            catalog,
            rules,
            clock,
            state: ProgressState::new(now),
            sequence: 0,
            pending_events: Vec::new(),
        }
    }

    /// Play session identifier stamped on every notification.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Read-only access to the raw state.
    #[must_use]
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// The scoring rules this store applies.
    #[must_use]
    pub fn rules(&self) -> &GameplayRules {
        &self.rules
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.state.score
    }

    /// The scene being played.
    #[must_use]
    pub fn current_scene_id(&self) -> Option<&str> {
        self.state.current_scene_id.as_deref()
    }

    /// Returns `true` if the hotspot has been clicked.
    #[must_use]
    pub fn is_visited(&self, hotspot_id: &str) -> bool {
        self.state.visited_hotspots.contains(hotspot_id)
    }

    /// Enters a scene: restarts its timer and mistake counter. Score and
    /// visits are untouched.
    pub fn enter_scene(&mut self, scene_id: &str) {
        if !self.catalog.contains_scene(scene_id) {
            debug!(scene_id, "enter_scene ignored: unknown scene");
            return;
        }
        self.state.current_scene_id = Some(scene_id.to_owned());
        self.state.scene_started_at = self.clock.now();
        self.state.quiz_mistakes = 0;
        self.publish(ProgressCause::SceneEntered {
            scene_id: scene_id.to_owned(),
        });
    }

    /// Records a hotspot click. Points are awarded only on the first visit,
    /// but every call publishes a notification.
    ///
    /// Returns `true` on the first visit.
    pub fn register_visit(&mut self, hotspot_id: &str) -> bool {
        if self.catalog.owner_of(hotspot_id).is_none() {
            debug!(hotspot_id, "register_visit ignored: unknown hotspot");
            return false;
        }
        let first_visit = self.state.visited_hotspots.insert(hotspot_id.to_owned());
        if first_visit {
            self.apply_delta(self.rules.points_per_hotspot);
        }
        self.publish(ProgressCause::HotspotVisited {
            hotspot_id: hotspot_id.to_owned(),
            first_visit,
        });
        first_visit
    }

    /// Applies a score delta, clamping the result at zero.
    pub fn add_score(&mut self, delta: i64) {
        self.apply_delta(delta);
        self.publish(ProgressCause::ScoreAdjusted { delta });
    }

    /// Counts a wrong quiz answer for the current scene.
    pub fn record_quiz_mistake(&mut self) {
        self.state.quiz_mistakes = self.state.quiz_mistakes.saturating_add(1);
        self.publish(ProgressCause::QuizMistake);
    }

    /// Returns `true` if the scene's encounter has already fired.
    #[must_use]
    pub fn has_encounter_fired(&self, scene_id: &str) -> bool {
        self.state.events_triggered.contains(scene_id)
    }

    /// Marks a scene's encounter as fired.
    ///
    /// Returns `false` if it had already fired or the scene is unknown.
    pub fn mark_encounter_fired(&mut self, scene_id: &str) -> bool {
        if !self.catalog.contains_scene(scene_id) {
            return false;
        }
        let newly = self.state.events_triggered.insert(scene_id.to_owned());
        if newly {
            self.publish(ProgressCause::EncounterFired {
                scene_id: scene_id.to_owned(),
            });
        }
        newly
    }

    /// Rolls a scene back so it can be replayed: forgets its visited
    /// hotspots (refunding their exploration points), re-arms its encounter,
    /// optionally reverses the quiz-completion bonus, and restarts its timer.
    ///
    /// Completed modules stay completed.
    pub fn reset_scene(&mut self, scene_id: &str, deduct_quiz_points: bool) {
        let Some(scene) = self.catalog.scene(scene_id) else {
            debug!(scene_id, "reset_scene ignored: unknown scene");
            return;
        };
        let mut removed: i64 = 0;
        for hotspot_id in &scene.hotspots {
            if self.state.visited_hotspots.remove(hotspot_id) {
                removed += 1;
            }
        }

        let mut refund = removed.saturating_mul(self.rules.points_per_hotspot);
        if deduct_quiz_points {
            refund = refund.saturating_add(self.rules.points_quiz_correct);
        }
        self.apply_delta(-refund);

        self.state.events_triggered.remove(scene_id);
        self.state.quiz_mistakes = 0;
        self.state.scene_started_at = self.clock.now();
        debug!(scene_id, removed, refund, "scene progress reset");
        self.publish(ProgressCause::SceneReset {
            scene_id: scene_id.to_owned(),
        });
    }

    /// Marks a module as completed.
    ///
    /// Returns `true` iff every module scene is now complete. Hub and
    /// unknown scenes are ignored and return `false`.
    pub fn complete_module(&mut self, scene_id: &str) -> bool {
        if !self.catalog.is_module(scene_id) {
            debug!(scene_id, "complete_module ignored: not a module scene");
            return false;
        }
        self.state.completed_modules.insert(scene_id.to_owned());
        self.publish(ProgressCause::ModuleCompleted {
            scene_id: scene_id.to_owned(),
        });
        self.state.completed_modules.len() == self.catalog.module_count()
    }

    /// Returns `true` if the module has been completed.
    #[must_use]
    pub fn is_module_completed(&self, scene_id: &str) -> bool {
        self.state.completed_modules.contains(scene_id)
    }

    /// Full reset back to the start screen.
    pub fn reset(&mut self) {
        self.state = ProgressState::new(self.clock.now());
        self.publish(ProgressCause::SessionReset);
    }

    /// Percent of the non-quiz hotspots in `hotspots` that were visited,
    /// rounded down. An empty list counts as fully explored.
    #[must_use]
    pub fn get_progress_percent(&self, hotspots: &[HotspotConfig]) -> u8 {
        let ids: Vec<&str> = hotspots
            .iter()
            .filter(|h| !h.is_quiz())
            .map(|h| h.id.as_str())
            .collect();
        self.percent_of(&ids)
    }

    /// Exploration percent of the current scene, `0` outside any scene.
    #[must_use]
    pub fn current_progress_percent(&self) -> u8 {
        let Some(scene) = self
            .state
            .current_scene_id
            .as_deref()
            .and_then(|id| self.catalog.scene(id))
        else {
            return 0;
        };
        let ids: Vec<&str> = scene.exploration.iter().map(String::as_str).collect();
        self.percent_of(&ids)
    }

    /// Returns `true` if every non-quiz hotspot of the scene was visited.
    /// Unknown scenes are never explored.
    #[must_use]
    pub fn is_scene_fully_explored(&self, scene_id: &str) -> bool {
        self.catalog.scene(scene_id).is_some_and(|scene| {
            scene
                .exploration
                .iter()
                .all(|id| self.state.visited_hotspots.contains(id))
        })
    }

    /// Returns `true` if the scene's quiz may be opened.
    #[must_use]
    pub fn can_unlock_quiz(&self, scene_id: &str) -> bool {
        !self.rules.require_exploration_to_quiz || self.is_scene_fully_explored(scene_id)
    }

    /// Time since the current scene was entered.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.now() - self.state.scene_started_at
    }

    /// Notifications not yet handed to the presentation layer.
    #[must_use]
    pub fn pending_events(&self) -> &[ProgressEvent] {
        &self.pending_events
    }

    /// Takes every pending notification.
    pub fn drain_events(&mut self) -> Vec<ProgressEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn percent_of(&self, ids: &[&str]) -> u8 {
        if ids.is_empty() {
            return 100;
        }
        let visited = ids
            .iter()
            .filter(|id| self.state.visited_hotspots.contains(**id))
            .count();
        u8::try_from(visited * 100 / ids.len()).unwrap_or(100)
    }

    fn apply_delta(&mut self, delta: i64) {
        self.state.score = self.state.score.saturating_add(delta).max(0);
    }

    fn publish(&mut self, cause: ProgressCause) {
        self.sequence += 1;
        let event = ProgressEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: PROGRESS_CHANGED_EVENT_TYPE.to_owned(),
                session_id: self.session_id,
                sequence_number: self.sequence,
                occurred_at: self.clock.now(),
            },
            payload: ProgressChanged {
                score: self.state.score,
                percent: self.current_progress_percent(),
                cause,
            },
        };
        self.pending_events.push(event);
    }
}
