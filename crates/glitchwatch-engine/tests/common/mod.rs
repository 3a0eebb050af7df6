//! Shared test helpers for engine integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use glitchwatch_content::domain::config::GameConfig;
use glitchwatch_core::rng::DeterministicRng;
use glitchwatch_dialogue::domain::controller::DialoguePhase;
use glitchwatch_engine::application::engine::GameEngine;
use glitchwatch_engine::domain::notice::EngineNotice;
use glitchwatch_quiz::application::queries::question_view;
use glitchwatch_test_support::{
    CollaboratorLog, FixedClock, MockRng, RecordingAudio, RecordingSceneView, fixed_now,
};

pub type TestEngine = GameEngine<RecordingSceneView, RecordingAudio>;

/// A hub, a lab module with an antagonist encounter and a two-question
/// quiz, and a vault module whose one-question quiz has no encounter.
pub const FIXTURE: &str = r#"{
    "meta": {"title": "Glitchwatch Test", "menu_bgm": "menu.mp3", "start_sound": "start.mp3"},
    "narrator": {
        "typing_speed_ms": 10,
        "intro_text": "Welcome, agent.",
        "select_module_text": "Pick your next module.",
        "finale_text": "All systems secure.",
        "locked_message": "Explore first."
    },
    "gameplay": {"points_per_hotspot": 10, "points_quiz_correct": 50, "points_quiz_retry": -5},
    "stats": {"messages": {"average": {"title": "NOT BAD", "subtitle": "Room to grow"}}},
    "scenes": [
        {"id": "hub", "type": "menu", "name": "Hub", "background": "hub.jpg", "cards": [
            {"label": "Lab", "target_scene": "lab"},
            {"label": "Vault", "target_scene": "vault"}
        ]},
        {"id": "lab", "type": "module", "name": "Data Lab", "image": "lab.jpg",
         "initial_view": {"yaw": 30.0, "pitch": -5.0}, "audio_ambience": "lab.mp3",
         "narrator_intro": "This is the lab.",
         "hotspots": [
            {"id": "desk", "action": "dialog", "content": "A dusty desk.", "position": "10,5", "label": "Desk"},
            {"id": "shelf", "action": "dialog", "content": "Backup tapes."},
            {"id": "terminal", "action": "quiz", "locked_message": "Terminal locked.", "questions": [
                {"text": "First?", "options": [{"text": "right", "correct": true}, {"text": "wrong"}]},
                {"text": "Second?", "options": [{"text": "wrong"}, {"text": "right", "correct": true}]}
            ]}
         ],
         "event": {
            "alarm_sound": "alarm.mp3",
            "antagonist_speech": "Your data is mine!",
            "system_alert": "Intrusion detected!",
            "defeat_speech": "Impossible!",
            "victory_message": "Threat neutralised.",
            "victory_sound": "win.mp3"
         }},
        {"id": "vault", "type": "module", "name": "Vault", "hotspots": [
            {"id": "safe", "action": "dialog", "content": "Locked tight."},
            {"id": "keypad", "action": "quiz", "questions": [
                {"text": "Code?", "options": [{"text": "right", "correct": true}, {"text": "wrong"}]}
            ]}
        ]}
    ]
}"#;

/// Parses the shared fixture.
pub fn fixture_config() -> GameConfig {
    serde_json::from_str(FIXTURE).unwrap()
}

/// Builds an engine over `config` and `rng` whose collaborators record
/// into one log.
pub fn build_engine_with_rng(
    config: GameConfig,
    rng: Box<dyn DeterministicRng>,
) -> (TestEngine, CollaboratorLog) {
    let log = CollaboratorLog::new();
    let engine = GameEngine::new(
        config,
        RecordingSceneView::new(log.clone()),
        RecordingAudio::new(log.clone()),
        Arc::new(FixedClock(fixed_now())),
        rng,
    );
    (engine, log)
}

/// Builds an engine over `config` with `MockRng`.
pub fn build_engine_with(config: GameConfig) -> (TestEngine, CollaboratorLog) {
    build_engine_with_rng(config, Box::new(MockRng))
}

/// Builds an engine over the shared fixture.
pub fn build_engine() -> (TestEngine, CollaboratorLog) {
    build_engine_with(fixture_config())
}

/// Starts the game and loads `scene_id`, discarding notices and calls so
/// far.
pub fn enter_module(scene_id: &str) -> (TestEngine, CollaboratorLog) {
    let (mut engine, log) = build_engine();
    engine.start_game();
    engine.select_module(scene_id);
    engine.drain_notices();
    log.clear();
    (engine, log)
}

/// Closes the line on screen, skipping its typing first.
pub fn ack(engine: &mut TestEngine) {
    if engine.dialogue().phase() != DialoguePhase::Complete {
        engine.advance_dialogue();
    }
    engine.advance_dialogue();
}

/// Plays the lab encounter from the quiz click until the quiz opens.
pub fn play_lab_encounter(engine: &mut TestEngine) {
    engine.interact("terminal");
    engine.tick(4300);
    ack(engine);
    ack(engine);
}

/// Index of the enabled option labelled `text` on the current question.
pub fn option_index(engine: &TestEngine, text: &str) -> usize {
    let view = question_view(engine.quiz().unwrap()).unwrap();
    view.options
        .iter()
        .position(|o| o.enabled && o.text == text)
        .unwrap()
}

/// Picks the option labelled `text` and closes the feedback line.
pub fn answer_with(engine: &mut TestEngine, text: &str) {
    let index = option_index(engine, text);
    engine.answer(index);
    ack(engine);
}

/// Visits every dialog hotspot of the lab.
pub fn explore_lab(engine: &mut TestEngine) {
    engine.interact("desk");
    engine.interact("shelf");
}

/// Returns `true` if any notice matches.
pub fn has_notice(notices: &[EngineNotice], matches: impl Fn(&EngineNotice) -> bool) -> bool {
    notices.iter().any(matches)
}
