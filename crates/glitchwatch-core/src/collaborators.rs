//! External collaborators driven by the engine.
//!
//! Rendering and audio playback live outside the core. Every call is a
//! fire-and-forget side-effect request: nothing returns a value the engine
//! depends on, and a failing implementation must swallow its own errors.

use serde::{Deserialize, Serialize};

/// A position on the panorama sphere, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SphericalPosition {
    /// Horizontal angle.
    pub yaw: f64,
    /// Vertical angle.
    pub pitch: f64,
}

/// Who is talking in a dialogue box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The guide character.
    #[default]
    Narrator,
    /// The scripted antagonist.
    Antagonist,
}

/// Full-screen visual overlays the encounter scripts toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualEffect {
    /// Red alert tint.
    Alert,
    /// Corruption/glitch distortion.
    Glitch,
    /// Glow shown while the antagonist is being defeated.
    VictoryGlow,
}

/// Pitch of the per-character typing beep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeepTone {
    /// Narrator beep.
    High,
    /// Antagonist beep.
    Low,
}

/// Panorama renderer and overlay surface.
pub trait SceneView {
    /// Loads the panorama image for a scene.
    fn load_scene(&mut self, image_ref: &str);

    /// Points the camera at the given angles.
    fn set_initial_view(&mut self, yaw: f64, pitch: f64);

    /// Drops every tracked hotspot.
    fn clear_hotspots(&mut self);

    /// Starts projecting a hotspot handle at a sphere position.
    fn add_hotspot_to_tracking(&mut self, handle: &str, position: SphericalPosition);

    /// Switches a visual overlay on or off.
    fn set_effect(&mut self, effect: VisualEffect, enabled: bool);

    /// Shows or hides the antagonist sprite.
    fn set_antagonist_visible(&mut self, visible: bool);
}

/// Music, effects and speech output.
pub trait AudioService {
    /// Starts (or keeps) a looping background track.
    fn play_bgm(&mut self, track: &str);

    /// Stops the background track.
    fn stop_bgm(&mut self);

    /// Plays a one-shot effect.
    fn play_sfx(&mut self, clip: &str);

    /// Starts a looping alarm, replacing any previous one.
    fn play_alarm(&mut self, clip: &str);

    /// Stops the alarm loop.
    fn stop_alarm(&mut self);

    /// Speaks a line with the voice of the given speaker.
    fn speak(&mut self, text: &str, speaker: Speaker);

    /// Cuts off any speech in progress.
    fn stop_speech(&mut self);

    /// Emits a short typing beep.
    fn play_typing_beep(&mut self, tone: BeepTone);
}
