//! Integration tests for hub navigation, scene loading and exploration.

mod common;

use glitchwatch_core::collaborators::{Speaker, SphericalPosition};
use glitchwatch_core::error::DomainError;
use glitchwatch_engine::application::queries::engine_status;
use glitchwatch_engine::domain::notice::EngineNotice;
use glitchwatch_engine::domain::screen::Screen;
use glitchwatch_progress::domain::events::ProgressCause;
use glitchwatch_test_support::CollaboratorCall;

#[test]
fn test_start_game_shows_hub_and_narrates_intro() {
    // Arrange
    let (mut engine, log) = common::build_engine();

    // Act
    engine.start_game();
    let notices = engine.drain_notices();

    // Assert
    assert_eq!(engine.screen(), &Screen::Hub);
    assert_eq!(
        log.calls_without_beeps(),
        vec![
            CollaboratorCall::PlaySfx("start.mp3".to_owned()),
            CollaboratorCall::PlayBgm("menu.mp3".to_owned()),
            CollaboratorCall::ClearHotspots,
            CollaboratorCall::Speak("Welcome, agent.".to_owned(), Speaker::Narrator),
        ]
    );
    let Some(EngineNotice::HubShown {
        cards,
        background,
        completed,
    }) = notices.first()
    else {
        panic!("expected HubShown, got {notices:?}");
    };
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].target_scene, "lab");
    assert_eq!(background.as_deref(), Some("hub.jpg"));
    assert!(completed.is_empty());
    assert_eq!(engine.dialogue().full_text(), "Welcome, agent.");
}

#[test]
fn test_start_game_twice_is_ignored() {
    // Arrange
    let (mut engine, log) = common::build_engine();
    engine.start_game();
    engine.drain_notices();
    log.clear();

    // Act
    engine.start_game();

    // Assert
    assert!(log.calls().is_empty());
    assert!(engine.drain_notices().is_empty());
}

#[test]
fn test_select_module_loads_panorama_and_tracks_hotspots() {
    // Arrange
    let (mut engine, log) = common::build_engine();
    engine.start_game();
    engine.drain_notices();
    log.clear();

    // Act
    engine.select_module("lab");
    let notices = engine.drain_notices();

    // Assert
    assert_eq!(engine.screen(), &Screen::Scene("lab".to_owned()));
    assert_eq!(engine.progress().current_scene_id(), Some("lab"));
    assert_eq!(
        log.calls_without_beeps(),
        vec![
            CollaboratorCall::StopSpeech,
            CollaboratorCall::PlayBgm("lab.mp3".to_owned()),
            CollaboratorCall::LoadScene("lab.jpg".to_owned()),
            CollaboratorCall::InitialView(30.0, -5.0),
            CollaboratorCall::ClearHotspots,
            CollaboratorCall::TrackHotspot(
                "desk".to_owned(),
                SphericalPosition {
                    yaw: 10.0,
                    pitch: 5.0
                }
            ),
            CollaboratorCall::TrackHotspot("shelf".to_owned(), SphericalPosition::default()),
            CollaboratorCall::TrackHotspot("terminal".to_owned(), SphericalPosition::default()),
            CollaboratorCall::Speak("This is the lab.".to_owned(), Speaker::Narrator),
        ]
    );
    let loaded = notices.iter().find_map(|n| match n {
        EngineNotice::SceneLoaded { name, hotspots, .. } => Some((name, hotspots)),
        _ => None,
    });
    let (name, hotspots) = loaded.unwrap();
    assert_eq!(name, "Data Lab");
    assert_eq!(hotspots.len(), 3);
    assert_eq!(hotspots[0].label.as_deref(), Some("Desk"));
    assert!(hotspots[2].is_quiz);
    assert!(common::has_notice(&notices, |n| matches!(
        n,
        EngineNotice::Progress(p) if p.cause == ProgressCause::SceneEntered { scene_id: "lab".to_owned() }
    )));
}

#[test]
fn test_scene_without_ambience_stops_music() {
    // Arrange
    let (mut engine, log) = common::build_engine();
    engine.start_game();
    log.clear();

    // Act
    engine.select_module("vault");

    // Assert
    let calls = log.calls_without_beeps();
    assert!(calls.contains(&CollaboratorCall::StopBgm));
    assert!(calls.contains(&CollaboratorCall::InitialView(0.0, 0.0)));
    assert!(
        !calls
            .iter()
            .any(|c| matches!(c, CollaboratorCall::LoadScene(_)))
    );
}

#[test]
fn test_unknown_scene_is_declined_without_changes() {
    // Arrange
    let (mut engine, log) = common::build_engine();
    engine.start_game();
    engine.drain_notices();
    log.clear();

    // Act
    engine.select_module("attic");
    let notices = engine.drain_notices();

    // Assert
    assert_eq!(
        notices,
        vec![EngineNotice::Declined(DomainError::UnknownScene(
            "attic".to_owned()
        ))]
    );
    assert_eq!(engine.screen(), &Screen::Hub);
    assert!(log.calls().is_empty());
}

#[test]
fn test_selecting_hub_goes_home() {
    // Arrange
    let (mut engine, _log) = common::enter_module("lab");

    // Act
    engine.select_module("hub");

    // Assert
    assert_eq!(engine.screen(), &Screen::Hub);
    assert!(!engine.dialogue().is_active());
}

#[test]
fn test_dialog_hotspot_awards_points_once() {
    // Arrange
    let (mut engine, log) = common::enter_module("lab");

    // Act
    engine.interact("desk");
    engine.interact("desk");
    let notices = engine.drain_notices();

    // Assert
    assert_eq!(engine.progress().score(), 10);
    assert!(engine.progress().is_visited("desk"));
    let visits: Vec<bool> = notices
        .iter()
        .filter_map(|n| match n {
            EngineNotice::Progress(p) => match &p.cause {
                ProgressCause::HotspotVisited { first_visit, .. } => Some(*first_visit),
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(visits, vec![true, false]);
    assert_eq!(
        log.count(&CollaboratorCall::Speak(
            "A dusty desk.".to_owned(),
            Speaker::Narrator
        )),
        2
    );
}

#[test]
fn test_typing_reveals_characters_over_ticks() {
    // Arrange
    let (mut engine, log) = common::enter_module("lab");
    engine.interact("desk");

    // Act
    engine.tick(1_000);

    // Assert
    assert_eq!(engine.dialogue().visible_text(), "A dusty desk.");
    assert!(
        log.calls()
            .iter()
            .any(|c| matches!(c, CollaboratorCall::Beep(_)))
    );
}

#[test]
fn test_unknown_hotspot_is_declined() {
    // Arrange
    let (mut engine, _log) = common::enter_module("lab");

    // Act
    engine.interact("safe");
    let notices = engine.drain_notices();

    // Assert
    assert_eq!(
        notices,
        vec![EngineNotice::Declined(DomainError::UnknownHotspot(
            "safe".to_owned()
        ))]
    );
    assert!(!engine.progress().is_visited("safe"));
}

#[test]
fn test_hotspot_click_on_hub_is_declined() {
    // Arrange
    let (mut engine, _log) = common::build_engine();
    engine.start_game();
    engine.drain_notices();

    // Act
    engine.interact("desk");

    // Assert
    assert!(matches!(
        engine.drain_notices().as_slice(),
        [EngineNotice::Declined(DomainError::Validation(_))]
    ));
}

#[test]
fn test_locked_quiz_narrates_hotspot_message_and_counts_visit() {
    // Arrange
    let (mut engine, log) = common::enter_module("lab");
    engine.interact("desk");

    // Act
    engine.interact("terminal");
    let notices = engine.drain_notices();

    // Assert
    assert!(engine.quiz().is_none());
    assert!(!engine.sequencer().is_active());
    assert!(engine.progress().is_visited("terminal"));
    assert!(common::has_notice(&notices, |n| *n
        == EngineNotice::QuizLocked {
            hotspot_id: "terminal".to_owned(),
            message: "Terminal locked.".to_owned(),
        }));
    assert!(log.contains(&CollaboratorCall::Speak(
        "Terminal locked.".to_owned(),
        Speaker::Narrator
    )));
}

#[test]
fn test_locked_quiz_falls_back_to_stock_message() {
    // Arrange
    let (mut engine, log) = common::enter_module("vault");

    // Act
    engine.interact("keypad");

    // Assert
    assert!(log.contains(&CollaboratorCall::Speak(
        "Explore first.".to_owned(),
        Speaker::Narrator
    )));
    assert!(engine.quiz().is_none());
}

#[test]
fn test_invalid_quiz_data_is_declined_before_visit() {
    // Arrange
    let mut config = common::fixture_config();
    let vault = config.scenes.iter_mut().find(|s| s.id == "vault").unwrap();
    vault.hotspots[1].questions.clear();
    let (mut engine, _log) = common::build_engine_with(config);
    engine.start_game();
    engine.select_module("vault");
    engine.interact("safe");
    engine.drain_notices();

    // Act
    engine.interact("keypad");
    let notices = engine.drain_notices();

    // Assert
    assert!(matches!(
        notices.as_slice(),
        [EngineNotice::Declined(DomainError::InvalidQuizData { hotspot_id, .. })]
            if hotspot_id == "keypad"
    ));
    assert!(!engine.progress().is_visited("keypad"));
    assert_eq!(engine.progress().score(), 10);
}

#[test]
fn test_exploration_disabled_opens_quiz_immediately() {
    // Arrange
    let mut config = common::fixture_config();
    config.gameplay.require_exploration_to_quiz = false;
    let (mut engine, _log) = common::build_engine_with(config);
    engine.start_game();
    engine.select_module("vault");
    engine.drain_notices();

    // Act
    engine.interact("keypad");
    let notices = engine.drain_notices();

    // Assert
    let quiz = engine.quiz().unwrap();
    assert_eq!(quiz.hotspot_id(), "keypad");
    assert!(common::has_notice(&notices, |n| matches!(
        n,
        EngineNotice::QuizQuestion(q) if q.text == "Code?" && q.total == 1
    )));
}

#[test]
fn test_restart_wipes_progress_and_returns_to_title() {
    // Arrange
    let (mut engine, log) = common::enter_module("lab");
    common::explore_lab(&mut engine);
    engine.drain_notices();

    // Act
    engine.restart();
    let notices = engine.drain_notices();

    // Assert
    assert_eq!(engine.screen(), &Screen::Start);
    assert_eq!(engine.progress().score(), 0);
    assert!(!engine.progress().is_visited("desk"));
    assert!(notices.contains(&EngineNotice::StartScreen));
    assert!(log.contains(&CollaboratorCall::PlayBgm("menu.mp3".to_owned())));

    engine.start_game();
    assert_eq!(engine.screen(), &Screen::Hub);
}

#[test]
fn test_status_snapshot_serializes() {
    // Arrange
    let (mut engine, _log) = common::enter_module("lab");
    engine.interact("desk");

    // Act
    let status = serde_json::to_value(engine_status(&engine)).unwrap();

    // Assert
    assert_eq!(status["screen"]["screen"], "scene");
    assert_eq!(status["screen"]["scene_id"], "lab");
    assert_eq!(status["suspended"], false);
    assert_eq!(status["report_pending"], false);
    assert!(status["quiz"].is_null());
}
