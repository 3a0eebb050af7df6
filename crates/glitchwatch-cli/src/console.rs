//! Console collaborators: the terminal has no panorama or speakers, so
//! every request is logged instead.

use glitchwatch_core::collaborators::{
    AudioService, BeepTone, SceneView, Speaker, SphericalPosition, VisualEffect,
};
use tracing::{debug, info, trace};

/// `SceneView` that logs every call.
#[derive(Debug, Default)]
pub struct ConsoleSceneView {
    tracked: usize,
}

impl SceneView for ConsoleSceneView {
    fn load_scene(&mut self, image_ref: &str) {
        info!(image_ref, "view: load panorama");
    }

    fn set_initial_view(&mut self, yaw: f64, pitch: f64) {
        debug!(yaw, pitch, "view: initial camera");
    }

    fn clear_hotspots(&mut self) {
        debug!(tracked = self.tracked, "view: clear hotspots");
        self.tracked = 0;
    }

    fn add_hotspot_to_tracking(&mut self, handle: &str, position: SphericalPosition) {
        self.tracked += 1;
        debug!(handle, yaw = position.yaw, pitch = position.pitch, "view: track hotspot");
    }

    fn set_effect(&mut self, effect: VisualEffect, enabled: bool) {
        info!(?effect, enabled, "view: effect");
    }

    fn set_antagonist_visible(&mut self, visible: bool) {
        info!(visible, "view: antagonist");
    }
}

/// `AudioService` that logs every call. Typing beeps go to `trace`.
#[derive(Debug, Default)]
pub struct ConsoleAudio;

impl AudioService for ConsoleAudio {
    fn play_bgm(&mut self, track: &str) {
        info!(track, "audio: bgm");
    }

    fn stop_bgm(&mut self) {
        info!("audio: bgm stopped");
    }

    fn play_sfx(&mut self, clip: &str) {
        info!(clip, "audio: sfx");
    }

    fn play_alarm(&mut self, clip: &str) {
        info!(clip, "audio: alarm");
    }

    fn stop_alarm(&mut self) {
        info!("audio: alarm stopped");
    }

    fn speak(&mut self, text: &str, speaker: Speaker) {
        debug!(?speaker, chars = text.chars().count(), "audio: speak");
    }

    fn stop_speech(&mut self) {
        debug!("audio: speech stopped");
    }

    fn play_typing_beep(&mut self, tone: BeepTone) {
        trace!(?tone, "audio: beep");
    }
}
