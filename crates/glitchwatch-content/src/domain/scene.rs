//! Scenes, hotspots, quiz pools and encounter scripts.

use glitchwatch_core::collaborators::SphericalPosition;
use serde::{Deserialize, Deserializer, Serialize};

/// Whether a scene is the hub menu or an explorable module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Level-select hub. Never counts towards module completion.
    Menu,
    /// A panorama with hotspots and, usually, a quiz.
    #[default]
    #[serde(alias = "exploration")]
    Module,
}

/// What clicking a hotspot does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotspotAction {
    /// Narrates `content`.
    Dialog,
    /// Opens the scene's quiz.
    Quiz,
}

/// One answer option of a quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Button label.
    pub text: String,
    /// Whether picking it answers the question.
    #[serde(default)]
    pub correct: bool,
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Prompt text.
    pub text: String,
    /// Answer options, in authoring order.
    pub options: Vec<QuizOption>,
    /// Narrated after a correct pick.
    #[serde(default = "default_feedback_correct")]
    pub feedback_correct: String,
    /// Narrated after a wrong pick.
    #[serde(default = "default_feedback_wrong")]
    pub feedback_wrong: String,
}

fn default_feedback_correct() -> String {
    "Correct!".to_owned()
}

fn default_feedback_wrong() -> String {
    "Not quite. Try again.".to_owned()
}

/// A clickable point on a panorama.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotConfig {
    /// Identifier, unique across the whole scene graph.
    pub id: String,
    /// Click behaviour.
    pub action: HotspotAction,
    /// Narration for dialog hotspots.
    #[serde(default)]
    pub content: String,
    /// Where the marker sits. Accepts `"yaw,pitch"` or `{yaw, pitch}`.
    #[serde(default, deserialize_with = "deserialize_position")]
    pub position: SphericalPosition,
    /// Marker label.
    #[serde(default)]
    pub label: Option<String>,
    /// Marker icon name.
    #[serde(default)]
    pub icon: Option<String>,
    /// Question pool for quiz hotspots.
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
    /// How many questions to draw from the pool; the whole pool when absent.
    #[serde(default)]
    pub question_count: Option<usize>,
    /// Narrated when the quiz is still locked.
    #[serde(default)]
    pub locked_message: Option<String>,
}

impl HotspotConfig {
    /// Returns `true` for quiz hotspots.
    #[must_use]
    pub fn is_quiz(&self) -> bool {
        self.action == HotspotAction::Quiz
    }
}

/// Speeches and sounds of a scripted antagonist encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterScript {
    /// Script flavour; only `antagonist_appears` is interpreted.
    #[serde(rename = "type", alias = "kind", default = "default_encounter_kind")]
    pub kind: String,
    /// Looping alarm started with the red alert.
    #[serde(default)]
    pub alarm_sound: Option<String>,
    /// The antagonist's taunt.
    pub antagonist_speech: String,
    /// The guide's follow-up warning.
    pub system_alert: String,
    /// The antagonist's line when the quiz is beaten.
    pub defeat_speech: String,
    /// The guide's line after the defeat.
    pub victory_message: String,
    /// One-shot played with the victory message.
    #[serde(default)]
    pub victory_sound: Option<String>,
}

impl EncounterScript {
    /// Returns `true` if this is the antagonist sequence the sequencer
    /// knows how to run.
    #[must_use]
    pub fn is_antagonist_sequence(&self) -> bool {
        self.kind == default_encounter_kind()
    }
}

fn default_encounter_kind() -> String {
    "antagonist_appears".to_owned()
}

/// A level-select card on the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCard {
    /// Card title.
    pub label: String,
    /// Card blurb.
    #[serde(default)]
    pub description: String,
    /// Card artwork.
    #[serde(default)]
    pub image: Option<String>,
    /// Scene loaded when the card is picked.
    pub target_scene: String,
}

/// One node of the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Identifier.
    pub id: String,
    /// Hub or module.
    #[serde(rename = "type", default)]
    pub kind: SceneKind,
    /// Display name used in mission reports.
    #[serde(default)]
    pub name: String,
    /// Panorama image reference.
    #[serde(default)]
    pub image: Option<String>,
    /// Initial camera angles.
    #[serde(default)]
    pub initial_view: Option<SphericalPosition>,
    /// Looping ambience for the scene.
    #[serde(default)]
    pub audio_ambience: Option<String>,
    /// Narrated on entry.
    #[serde(default)]
    pub narrator_intro: Option<String>,
    /// Hotspots in display order.
    #[serde(default)]
    pub hotspots: Vec<HotspotConfig>,
    /// Encounter gating the quiz.
    #[serde(default)]
    pub event: Option<EncounterScript>,
    /// Hub cards (menu scenes only).
    #[serde(default)]
    pub cards: Vec<ModuleCard>,
    /// Hub background (image or video).
    #[serde(default)]
    pub background: Option<String>,
}

impl SceneConfig {
    /// Returns `true` for module scenes.
    #[must_use]
    pub fn is_module(&self) -> bool {
        self.kind == SceneKind::Module
    }

    /// Hotspots that count towards exploration.
    pub fn exploration_hotspots(&self) -> impl Iterator<Item = &HotspotConfig> {
        self.hotspots.iter().filter(|h| !h.is_quiz())
    }

    /// Looks up a hotspot of this scene.
    #[must_use]
    pub fn hotspot(&self, hotspot_id: &str) -> Option<&HotspotConfig> {
        self.hotspots.iter().find(|h| h.id == hotspot_id)
    }

    /// The scene's quiz hotspot, if any.
    #[must_use]
    pub fn quiz_hotspot(&self) -> Option<&HotspotConfig> {
        self.hotspots.iter().find(|h| h.is_quiz())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PositionInput {
    Text(String),
    Angles(SphericalPosition),
}

/// Parses `"yaw,pitch"`; missing or malformed parts read as zero.
#[must_use]
pub fn parse_position(text: &str) -> SphericalPosition {
    let mut parts = text
        .split(',')
        .map(|part| part.trim().parse::<f64>().unwrap_or(0.0));
    SphericalPosition {
        yaw: parts.next().unwrap_or(0.0),
        pitch: parts.next().unwrap_or(0.0),
    }
}

fn deserialize_position<'de, D>(deserializer: D) -> Result<SphericalPosition, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match PositionInput::deserialize(deserializer)? {
        PositionInput::Text(text) => parse_position(&text),
        PositionInput::Angles(angles) => angles,
    })
}
