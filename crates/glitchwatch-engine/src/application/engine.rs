//! The game engine.
//!
//! `GameEngine` owns every per-session component and the two external
//! collaborators. Player input arrives through its methods, time through
//! `tick`, and everything the presentation layer must render is queued as
//! [`EngineNotice`]s. Runtime errors never escape: they are logged and
//! surfaced as `EngineNotice::Declined` with no state changed.

use std::sync::Arc;

use glitchwatch_content::domain::config::GameConfig;
use glitchwatch_content::domain::scene::{EncounterScript, HotspotAction};
use glitchwatch_core::clock::Clock;
use glitchwatch_core::collaborators::{AudioService, SceneView, Speaker};
use glitchwatch_core::error::DomainError;
use glitchwatch_core::rng::DeterministicRng;
use glitchwatch_dialogue::application::voiced::VoicedReveal;
use glitchwatch_dialogue::domain::controller::{Advance, DialogueController, DialogueRequest};
use glitchwatch_dialogue::domain::speaker::SpeakerProfiles;
use glitchwatch_encounter::domain::context::EncounterContext;
use glitchwatch_encounter::domain::sequencer::{EncounterSignal, EventSequencer};
use glitchwatch_progress::domain::catalog::SceneCatalog;
use glitchwatch_progress::domain::store::ProgressStore;
use glitchwatch_quiz::application::queries::question_view;
use glitchwatch_quiz::domain::rank::RankEngine;
use glitchwatch_quiz::domain::session::{
    AnswerOutcome, QuizResult, QuizResume, QuizSession, QuizStep, validate_pool,
};
use tracing::{debug, info, warn};

use crate::domain::continuation::Continuation;
use crate::domain::notice::{EngineNotice, HotspotMarker};
use crate::domain::report::MissionReport;
use crate::domain::screen::Screen;

fn narrate(
    dialogue: &mut DialogueController<Continuation>,
    audio: &mut dyn AudioService,
    text: &str,
) {
    if text.trim().is_empty() {
        return;
    }
    dialogue.show(
        DialogueRequest::new(Speaker::Narrator, text),
        &mut VoicedReveal::new(audio),
    );
}

/// One play session.
pub struct GameEngine<V, A> {
    config: GameConfig,
    progress: ProgressStore,
    dialogue: DialogueController<Continuation>,
    sequencer: EventSequencer,
    quiz: Option<QuizSession>,
    report: Option<MissionReport>,
    profiles: SpeakerProfiles,
    view: V,
    audio: A,
    rng: Box<dyn DeterministicRng>,
    screen: Screen,
    suspended: bool,
    quiz_serial: u64,
    notices: Vec<EngineNotice>,
}

impl<V: SceneView, A: AudioService> GameEngine<V, A> {
    /// Builds an engine on the title screen.
    pub fn new(
        config: GameConfig,
        view: V,
        audio: A,
        clock: Arc<dyn Clock>,
        rng: Box<dyn DeterministicRng>,
    ) -> Self {
        let progress = ProgressStore::new(SceneCatalog::from_config(&config), config.gameplay, clock);
        info!(
            title = %config.meta.title,
            scenes = config.scenes.len(),
            session_id = %progress.session_id(),
            "engine ready"
        );
        Self {
            dialogue: DialogueController::new(config.narrator.typing_speed_ms),
            profiles: SpeakerProfiles::from_config(&config.narrator),
            progress,
            sequencer: EventSequencer::new(),
            quiz: None,
            report: None,
            view,
            audio,
            rng,
            screen: Screen::Start,
            suspended: false,
            quiz_serial: 0,
            notices: Vec::new(),
            config,
        }
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Score and completion tracking.
    #[must_use]
    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    /// The dialogue box.
    #[must_use]
    pub fn dialogue(&self) -> &DialogueController<Continuation> {
        &self.dialogue
    }

    /// The encounter sequencer.
    #[must_use]
    pub fn sequencer(&self) -> &EventSequencer {
        &self.sequencer
    }

    /// The open quiz, if any.
    #[must_use]
    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    /// The mission report waiting to be closed, if any.
    #[must_use]
    pub fn pending_report(&self) -> Option<&MissionReport> {
        self.report.as_ref()
    }

    /// Name plates and portraits.
    #[must_use]
    pub fn profiles(&self) -> &SpeakerProfiles {
        &self.profiles
    }

    /// Current top-level screen.
    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Returns `true` while the host is backgrounded.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// The scene collaborator.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The audio collaborator.
    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Takes every queued notice.
    pub fn drain_notices(&mut self) -> Vec<EngineNotice> {
        self.flush_progress();
        std::mem::take(&mut self.notices)
    }

    /// Leaves the title screen: start sound, hub, intro narration.
    pub fn start_game(&mut self) {
        if self.screen != Screen::Start {
            debug!(screen = ?self.screen, "start_game ignored: already started");
            return;
        }
        info!("game started");
        if let Some(sound) = &self.config.meta.start_sound {
            self.audio.play_sfx(sound);
        }
        if let Some(track) = &self.config.meta.menu_bgm {
            self.audio.play_bgm(track);
        }
        self.show_hub();
        if let Some(intro) = &self.config.narrator.intro_text {
            narrate(&mut self.dialogue, &mut self.audio, intro);
        }
        self.flush_progress();
    }

    /// Loads a module picked from the hub. Picking the hub itself goes
    /// home.
    pub fn select_module(&mut self, scene_id: &str) {
        if self.config.hub().is_some_and(|hub| hub.id == scene_id) {
            self.go_home();
            return;
        }
        if let Err(err) = self.load_scene(scene_id) {
            self.decline(err);
        }
        self.flush_progress();
    }

    /// Handles a click on a hotspot of the module on screen.
    pub fn interact(&mut self, hotspot_id: &str) {
        if let Err(err) = self.handle_hotspot(hotspot_id) {
            self.decline(err);
        }
        self.flush_progress();
    }

    /// Picks option `option_index` of the current quiz question.
    pub fn answer(&mut self, option_index: usize) {
        let Some(quiz) = self.quiz.as_mut() else {
            debug!(option_index, "answer ignored: no quiz open");
            return;
        };
        let outcome = quiz.select(
            option_index,
            &mut self.dialogue,
            &mut VoicedReveal::new(&mut self.audio),
        );
        match outcome {
            AnswerOutcome::Ignored => return,
            AnswerOutcome::Correct => {}
            AnswerOutcome::Wrong => {
                self.progress.record_quiz_mistake();
                let penalty = self.config.gameplay.points_quiz_retry;
                if penalty != 0 {
                    self.progress.add_score(penalty);
                }
            }
        }
        if let Some(view) = self.quiz.as_ref().and_then(question_view) {
            self.notices.push(EngineNotice::QuizQuestion(view));
        }
        self.flush_progress();
    }

    /// The dialogue box's "next" button: skips typing, or closes the box
    /// and resumes whatever was waiting on it.
    pub fn advance_dialogue(&mut self) {
        let advance = self
            .dialogue
            .advance_or_skip(&mut VoicedReveal::new(&mut self.audio));
        if let Advance::Closed(Some(continuation)) = advance {
            match continuation {
                Continuation::Encounter(token) => {
                    let mut ctx = EncounterContext {
                        progress: &mut self.progress,
                        dialogue: &mut self.dialogue,
                        view: &mut self.view,
                        audio: &mut self.audio,
                    };
                    let signals = self.sequencer.resume(token, &mut ctx);
                    self.handle_signals(signals);
                }
                Continuation::Quiz(token) => self.resume_quiz(token),
            }
        }
        self.flush_progress();
    }

    /// Dismisses the mission report and plays the victory sequence.
    pub fn close_report(&mut self) {
        let Some(report) = self.report.take() else {
            debug!("close_report ignored: no report pending");
            return;
        };
        let scene_id = report.scene_id;
        let script = self
            .config
            .scene(&scene_id)
            .and_then(|scene| scene.event.clone())
            .filter(EncounterScript::is_antagonist_sequence);

        match script {
            Some(script) => {
                let timing = self.config.encounter_timing;
                let mut ctx = EncounterContext {
                    progress: &mut self.progress,
                    dialogue: &mut self.dialogue,
                    view: &mut self.view,
                    audio: &mut self.audio,
                };
                let signals = self.sequencer.on_victory(
                    &scene_id,
                    &script,
                    &timing,
                    self.config.narrator.select_module_text.as_deref(),
                    &mut ctx,
                );
                self.handle_signals(signals);
            }
            None => self.complete_without_encounter(&scene_id),
        }
        self.flush_progress();
    }

    /// Abandons whatever is running and shows the hub.
    pub fn go_home(&mut self) {
        self.teardown();
        self.return_to_hub();
        self.flush_progress();
    }

    /// Abandons whatever is running, wipes all progress and returns to the
    /// title screen.
    pub fn restart(&mut self) {
        self.teardown();
        self.progress.reset();
        self.view.clear_hotspots();
        if let Some(track) = &self.config.meta.menu_bgm {
            self.audio.play_bgm(track);
        }
        self.screen = Screen::Start;
        self.notices.push(EngineNotice::StartScreen);
        info!("game restarted");
        self.flush_progress();
    }

    /// Freezes typing and every pending timer while the host is in the
    /// background.
    pub fn suspend(&mut self) {
        if self.suspended {
            return;
        }
        self.suspended = true;
        let paused = self.dialogue.pause();
        info!(dialogue_paused = paused, "engine suspended");
    }

    /// Continues exactly where `suspend` stopped.
    pub fn resume(&mut self) {
        if !self.suspended {
            return;
        }
        self.suspended = false;
        let resumed = self.dialogue.resume();
        info!(dialogue_resumed = resumed, "engine resumed");
    }

    /// Advances virtual time: typing first, then encounter delays.
    pub fn tick(&mut self, delta_ms: u64) {
        if self.suspended {
            return;
        }
        self.dialogue
            .tick(delta_ms, &mut VoicedReveal::new(&mut self.audio));
        let mut ctx = EncounterContext {
            progress: &mut self.progress,
            dialogue: &mut self.dialogue,
            view: &mut self.view,
            audio: &mut self.audio,
        };
        let signals = self.sequencer.tick(delta_ms, &mut ctx);
        self.handle_signals(signals);
        self.flush_progress();
    }

    fn load_scene(&mut self, scene_id: &str) -> Result<(), DomainError> {
        let scene = self
            .config
            .scene(scene_id)
            .filter(|scene| scene.is_module())
            .cloned()
            .ok_or_else(|| DomainError::UnknownScene(scene_id.to_owned()))?;

        self.teardown();
        match &scene.audio_ambience {
            Some(track) => self.audio.play_bgm(track),
            None => self.audio.stop_bgm(),
        }
        self.progress.enter_scene(&scene.id);
        if let Some(image) = &scene.image {
            self.view.load_scene(image);
        }
        let initial = scene.initial_view.unwrap_or_default();
        self.view.set_initial_view(initial.yaw, initial.pitch);
        self.view.clear_hotspots();
        for hotspot in &scene.hotspots {
            self.view.add_hotspot_to_tracking(&hotspot.id, hotspot.position);
        }
        self.screen = Screen::Scene(scene.id.clone());
        if let Some(intro) = &scene.narrator_intro {
            narrate(&mut self.dialogue, &mut self.audio, intro);
        }

        let hotspots = scene
            .hotspots
            .iter()
            .map(|h| HotspotMarker {
                id: h.id.clone(),
                label: h.label.clone(),
                icon: h.icon.clone(),
                is_quiz: h.is_quiz(),
                visited: self.progress.is_visited(&h.id),
            })
            .collect();
        info!(scene_id = %scene.id, hotspots = scene.hotspots.len(), "scene loaded");
        self.notices.push(EngineNotice::SceneLoaded {
            scene_id: scene.id,
            name: scene.name,
            hotspots,
        });
        Ok(())
    }

    fn handle_hotspot(&mut self, hotspot_id: &str) -> Result<(), DomainError> {
        let Some(scene_id) = self.screen.scene_id().map(str::to_owned) else {
            return Err(DomainError::Validation(
                "no module is on screen".to_owned(),
            ));
        };
        let scene = self
            .config
            .scene(&scene_id)
            .ok_or_else(|| DomainError::UnknownScene(scene_id.clone()))?;
        let hotspot = scene
            .hotspot(hotspot_id)
            .cloned()
            .ok_or_else(|| DomainError::UnknownHotspot(hotspot_id.to_owned()))?;
        let script = scene
            .event
            .clone()
            .filter(EncounterScript::is_antagonist_sequence);

        if self.sequencer.is_active() || self.quiz.is_some() || self.report.is_some() {
            debug!(hotspot_id, "hotspot ignored: sequence in progress");
            return Ok(());
        }

        match hotspot.action {
            HotspotAction::Dialog => {
                self.progress.register_visit(&hotspot.id);
                narrate(&mut self.dialogue, &mut self.audio, &hotspot.content);
            }
            HotspotAction::Quiz => {
                validate_pool(&hotspot.id, &hotspot.questions)?;
                self.progress.register_visit(&hotspot.id);

                if !self.progress.can_unlock_quiz(&scene_id) {
                    let message = hotspot
                        .locked_message
                        .clone()
                        .unwrap_or_else(|| self.config.narrator.locked_message.clone());
                    debug!(hotspot_id, "quiz locked");
                    narrate(&mut self.dialogue, &mut self.audio, &message);
                    self.notices.push(EngineNotice::QuizLocked {
                        hotspot_id: hotspot.id,
                        message,
                    });
                    return Ok(());
                }

                match script {
                    Some(script) => {
                        let timing = self.config.encounter_timing;
                        let mut ctx = EncounterContext {
                            progress: &mut self.progress,
                            dialogue: &mut self.dialogue,
                            view: &mut self.view,
                            audio: &mut self.audio,
                        };
                        let signals =
                            self.sequencer
                                .trigger(&scene_id, &hotspot.id, &script, &timing, &mut ctx);
                        self.handle_signals(signals);
                    }
                    None => self.open_quiz(&scene_id, &hotspot.id),
                }
            }
        }
        Ok(())
    }

    fn open_quiz(&mut self, scene_id: &str, hotspot_id: &str) {
        let Some(hotspot) = self
            .config
            .scene(scene_id)
            .and_then(|scene| scene.hotspot(hotspot_id))
        else {
            warn!(scene_id, hotspot_id, "quiz hotspot vanished before opening");
            return;
        };
        self.quiz_serial += 1;
        match QuizSession::start(
            self.quiz_serial,
            scene_id,
            hotspot_id,
            &hotspot.questions,
            hotspot.question_count,
            self.rng.as_mut(),
        ) {
            Ok(session) => {
                if let Some(view) = question_view(&session) {
                    self.notices.push(EngineNotice::QuizQuestion(view));
                }
                self.quiz = Some(session);
            }
            Err(err) => self.decline(err),
        }
    }

    fn resume_quiz(&mut self, token: QuizResume) {
        let Some(quiz) = self.quiz.as_mut() else {
            debug!(serial = token.serial, "stale quiz continuation dropped");
            return;
        };
        let ranks = RankEngine::from_stats(&self.config.stats);
        match quiz.resume(token, &ranks) {
            QuizStep::Ignored => {}
            QuizStep::NextQuestion | QuizStep::Retry => {
                if let Some(view) = question_view(quiz) {
                    self.notices.push(EngineNotice::QuizQuestion(view));
                }
            }
            QuizStep::Completed(result) => self.finish_quiz(&result),
        }
    }

    fn finish_quiz(&mut self, result: &QuizResult) {
        let Some(session) = self.quiz.take() else {
            return;
        };
        self.notices.push(EngineNotice::QuizClosed);
        self.progress
            .add_score(self.config.gameplay.points_quiz_correct);

        let Some(scene) = self.config.scene(session.scene_id()) else {
            warn!(scene_id = session.scene_id(), "quiz scene vanished");
            return;
        };
        let report = MissionReport::build(&self.config, scene, &self.progress, result);
        info!(
            scene_id = %report.scene_id,
            rank = %report.rank,
            accuracy = report.accuracy,
            score = report.score,
            "mission report"
        );
        self.notices
            .push(EngineNotice::MissionReport(report.clone()));
        self.report = Some(report);
    }

    fn complete_without_encounter(&mut self, scene_id: &str) {
        if self.progress.complete_module(scene_id) {
            self.enter_finale();
            return;
        }
        self.progress.reset_scene(scene_id, true);
        self.return_to_hub();
        if let Some(text) = &self.config.narrator.select_module_text {
            narrate(&mut self.dialogue, &mut self.audio, text);
        }
    }

    fn handle_signals(&mut self, signals: Vec<EncounterSignal>) {
        for signal in signals {
            match signal {
                EncounterSignal::OpenQuiz {
                    scene_id,
                    hotspot_id,
                } => self.open_quiz(&scene_id, &hotspot_id),
                EncounterSignal::ReturnToHub { scene_id } => {
                    debug!(%scene_id, "module beaten, back to hub");
                    self.return_to_hub();
                }
                EncounterSignal::GameFinale { .. } => self.enter_finale(),
            }
        }
    }

    fn show_hub(&mut self) {
        self.view.clear_hotspots();
        self.screen = Screen::Hub;
        let (cards, background) = self
            .config
            .hub()
            .map(|hub| (hub.cards.clone(), hub.background.clone()))
            .unwrap_or_default();
        let mut completed: Vec<String> = self
            .progress
            .state()
            .completed_modules
            .iter()
            .cloned()
            .collect();
        completed.sort();
        self.notices.push(EngineNotice::HubShown {
            cards,
            background,
            completed,
        });
    }

    fn return_to_hub(&mut self) {
        self.show_hub();
        if let Some(track) = &self.config.meta.menu_bgm {
            self.audio.play_bgm(track);
        }
    }

    fn enter_finale(&mut self) {
        info!("every module complete");
        self.view.clear_hotspots();
        self.screen = Screen::Finale;
        if let Some(text) = &self.config.narrator.finale_text {
            narrate(&mut self.dialogue, &mut self.audio, text);
        }
        self.notices.push(EngineNotice::GameFinale);
    }

    /// Stops every running sequence.
    fn teardown(&mut self) {
        let mut ctx = EncounterContext {
            progress: &mut self.progress,
            dialogue: &mut self.dialogue,
            view: &mut self.view,
            audio: &mut self.audio,
        };
        self.sequencer.abort(&mut ctx);
        if self.dialogue.cancel() {
            self.audio.stop_speech();
        }
        if self.quiz.take().is_some() {
            self.notices.push(EngineNotice::QuizClosed);
        }
        self.report = None;
    }

    fn decline(&mut self, err: DomainError) {
        warn!(error = %err, "request declined");
        self.notices.push(EngineNotice::Declined(err));
    }

    fn flush_progress(&mut self) {
        self.notices.extend(
            self.progress
                .drain_events()
                .into_iter()
                .map(|event| EngineNotice::Progress(event.payload)),
        );
    }
}
