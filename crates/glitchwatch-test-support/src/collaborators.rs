//! Recording collaborators — `SceneView` and `AudioService` doubles that
//! append every call to a shared log so tests can assert on ordering across
//! both surfaces.

use std::sync::{Arc, Mutex};

use glitchwatch_core::collaborators::{
    AudioService, BeepTone, SceneView, Speaker, SphericalPosition, VisualEffect,
};

/// One recorded side-effect request.
#[derive(Debug, Clone, PartialEq)]
pub enum CollaboratorCall {
    /// `SceneView::load_scene`.
    LoadScene(String),
    /// `SceneView::set_initial_view`.
    InitialView(f64, f64),
    /// `SceneView::clear_hotspots`.
    ClearHotspots,
    /// `SceneView::add_hotspot_to_tracking`.
    TrackHotspot(String, SphericalPosition),
    /// `SceneView::set_effect`.
    Effect(VisualEffect, bool),
    /// `SceneView::set_antagonist_visible`.
    Antagonist(bool),
    /// `AudioService::play_bgm`.
    PlayBgm(String),
    /// `AudioService::stop_bgm`.
    StopBgm,
    /// `AudioService::play_sfx`.
    PlaySfx(String),
    /// `AudioService::play_alarm`.
    PlayAlarm(String),
    /// `AudioService::stop_alarm`.
    StopAlarm,
    /// `AudioService::speak`.
    Speak(String, Speaker),
    /// `AudioService::stop_speech`.
    StopSpeech,
    /// `AudioService::play_typing_beep`.
    Beep(BeepTone),
}

/// Shared, clonable call log.
#[derive(Debug, Clone, Default)]
pub struct CollaboratorLog(Arc<Mutex<Vec<CollaboratorCall>>>);

impl CollaboratorLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: CollaboratorCall) {
        self.0.lock().unwrap().push(call);
    }

    /// Returns a snapshot of every recorded call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<CollaboratorCall> {
        self.0.lock().unwrap().clone()
    }

    /// Returns recorded calls with typing beeps filtered out.
    #[must_use]
    pub fn calls_without_beeps(&self) -> Vec<CollaboratorCall> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, CollaboratorCall::Beep(_)))
            .collect()
    }

    /// Counts recorded calls equal to `call`.
    #[must_use]
    pub fn count(&self, call: &CollaboratorCall) -> usize {
        self.0.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    /// Returns `true` if `call` was recorded at least once.
    #[must_use]
    pub fn contains(&self, call: &CollaboratorCall) -> bool {
        self.count(call) > 0
    }

    /// Forgets every recorded call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

/// A `SceneView` that records into a `CollaboratorLog`.
#[derive(Debug, Clone)]
pub struct RecordingSceneView {
    log: CollaboratorLog,
}

impl RecordingSceneView {
    /// Creates a view writing into `log`.
    #[must_use]
    pub fn new(log: CollaboratorLog) -> Self {
        Self { log }
    }
}

impl SceneView for RecordingSceneView {
    fn load_scene(&mut self, image_ref: &str) {
        self.log.push(CollaboratorCall::LoadScene(image_ref.to_owned()));
    }

    fn set_initial_view(&mut self, yaw: f64, pitch: f64) {
        self.log.push(CollaboratorCall::InitialView(yaw, pitch));
    }

    fn clear_hotspots(&mut self) {
        self.log.push(CollaboratorCall::ClearHotspots);
    }

    fn add_hotspot_to_tracking(&mut self, handle: &str, position: SphericalPosition) {
        self.log
            .push(CollaboratorCall::TrackHotspot(handle.to_owned(), position));
    }

    fn set_effect(&mut self, effect: VisualEffect, enabled: bool) {
        self.log.push(CollaboratorCall::Effect(effect, enabled));
    }

    fn set_antagonist_visible(&mut self, visible: bool) {
        self.log.push(CollaboratorCall::Antagonist(visible));
    }
}

/// An `AudioService` that records into a `CollaboratorLog`.
#[derive(Debug, Clone)]
pub struct RecordingAudio {
    log: CollaboratorLog,
}

impl RecordingAudio {
    /// Creates an audio double writing into `log`.
    #[must_use]
    pub fn new(log: CollaboratorLog) -> Self {
        Self { log }
    }
}

impl AudioService for RecordingAudio {
    fn play_bgm(&mut self, track: &str) {
        self.log.push(CollaboratorCall::PlayBgm(track.to_owned()));
    }

    fn stop_bgm(&mut self) {
        self.log.push(CollaboratorCall::StopBgm);
    }

    fn play_sfx(&mut self, clip: &str) {
        self.log.push(CollaboratorCall::PlaySfx(clip.to_owned()));
    }

    fn play_alarm(&mut self, clip: &str) {
        self.log.push(CollaboratorCall::PlayAlarm(clip.to_owned()));
    }

    fn stop_alarm(&mut self) {
        self.log.push(CollaboratorCall::StopAlarm);
    }

    fn speak(&mut self, text: &str, speaker: Speaker) {
        self.log
            .push(CollaboratorCall::Speak(text.to_owned(), speaker));
    }

    fn stop_speech(&mut self) {
        self.log.push(CollaboratorCall::StopSpeech);
    }

    fn play_typing_beep(&mut self, tone: BeepTone) {
        self.log.push(CollaboratorCall::Beep(tone));
    }
}
