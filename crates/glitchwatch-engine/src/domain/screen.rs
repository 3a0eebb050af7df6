//! Which top-level screen the game shows.

use serde::Serialize;

/// Top-level screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "screen", content = "scene_id", rename_all = "snake_case")]
pub enum Screen {
    /// Title screen, before `start_game`.
    #[default]
    Start,
    /// Level select.
    Hub,
    /// A module panorama.
    Scene(String),
    /// Every module is complete.
    Finale,
}

impl Screen {
    /// The module on screen, if any.
    #[must_use]
    pub fn scene_id(&self) -> Option<&str> {
        match self {
            Self::Scene(id) => Some(id),
            _ => None,
        }
    }
}
