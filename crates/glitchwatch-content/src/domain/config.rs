//! Top-level game configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::scene::{HotspotConfig, SceneConfig, SceneKind};

/// Title and global audio cues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaConfig {
    /// Game title.
    #[serde(default)]
    pub title: String,
    /// Hub background music.
    #[serde(default)]
    pub menu_bgm: Option<String>,
    /// One-shot played when the game starts.
    #[serde(default)]
    pub start_sound: Option<String>,
}

/// Dialogue box settings and the engine's stock lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarratorConfig {
    /// Guide name.
    #[serde(default = "default_narrator_name")]
    pub name: String,
    /// Guide portrait.
    #[serde(default)]
    pub image: Option<String>,
    /// Antagonist name.
    #[serde(default = "default_antagonist_name")]
    pub antagonist_name: String,
    /// Antagonist portrait (the dialogue box hides it).
    #[serde(default)]
    pub antagonist_image: Option<String>,
    /// Delay between revealed characters.
    #[serde(default = "default_typing_speed_ms")]
    pub typing_speed_ms: u64,
    /// Narrated when the game starts.
    #[serde(default)]
    pub intro_text: Option<String>,
    /// Narrated shortly after returning to the hub from a beaten module.
    #[serde(default)]
    pub select_module_text: Option<String>,
    /// Narrated once every module is complete.
    #[serde(default)]
    pub finale_text: Option<String>,
    /// Fallback for quiz hotspots without their own locked message.
    #[serde(default = "default_locked_message")]
    pub locked_message: String,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            name: default_narrator_name(),
            image: None,
            antagonist_name: default_antagonist_name(),
            antagonist_image: None,
            typing_speed_ms: default_typing_speed_ms(),
            intro_text: None,
            select_module_text: None,
            finale_text: None,
            locked_message: default_locked_message(),
        }
    }
}

fn default_narrator_name() -> String {
    "B.Y.T.E.".to_owned()
}

fn default_antagonist_name() -> String {
    "GLITCH".to_owned()
}

fn default_typing_speed_ms() -> u64 {
    30
}

fn default_locked_message() -> String {
    "Access denied. Explore more.".to_owned()
}

/// Point values and quiz gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameplayRules {
    /// Awarded on the first visit to a hotspot.
    #[serde(default = "default_points_per_hotspot")]
    pub points_per_hotspot: i64,
    /// Awarded when a quiz is completed.
    #[serde(default = "default_points_quiz_correct")]
    pub points_quiz_correct: i64,
    /// Applied on every wrong answer; usually negative.
    #[serde(default)]
    pub points_quiz_retry: i64,
    /// Whether a quiz stays locked until its scene is fully explored.
    #[serde(default = "default_true")]
    pub require_exploration_to_quiz: bool,
}

impl Default for GameplayRules {
    fn default() -> Self {
        Self {
            points_per_hotspot: default_points_per_hotspot(),
            points_quiz_correct: default_points_quiz_correct(),
            points_quiz_retry: 0,
            require_exploration_to_quiz: true,
        }
    }
}

fn default_points_per_hotspot() -> i64 {
    10
}

fn default_points_quiz_correct() -> i64 {
    50
}

fn default_true() -> bool {
    true
}

/// One rank tier. Tiers are matched in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankThreshold {
    /// Rank name.
    pub rank: String,
    /// Lowest accuracy (0–100) that still earns the rank.
    pub min_accuracy: u32,
    /// Highest mistake count that still earns the rank.
    pub max_mistakes: u32,
}

/// Title and subtitle shown on the mission report for a rank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankMessage {
    /// Report heading.
    pub title: String,
    /// Report sub-heading.
    #[serde(default)]
    pub subtitle: String,
}

/// Rank thresholds and report wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Tiers in priority order.
    #[serde(default = "default_rank_thresholds")]
    pub rank_thresholds: Vec<RankThreshold>,
    /// Rank given when no tier matches.
    #[serde(default = "default_rank")]
    pub default_rank: String,
    /// Report wording per rank.
    #[serde(default)]
    pub messages: BTreeMap<String, RankMessage>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            rank_thresholds: default_rank_thresholds(),
            default_rank: default_rank(),
            messages: BTreeMap::new(),
        }
    }
}

/// Stock tiers used when the configuration leaves them out.
#[must_use]
pub fn default_rank_thresholds() -> Vec<RankThreshold> {
    [("excellent", 90, 1), ("good", 70, 3), ("average", 50, 5)]
        .into_iter()
        .map(|(rank, min_accuracy, max_mistakes)| RankThreshold {
            rank: rank.to_owned(),
            min_accuracy,
            max_mistakes,
        })
        .collect()
}

fn default_rank() -> String {
    "poor".to_owned()
}

/// Delays between the stages of an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterTiming {
    /// Red alert until the glitch effect.
    #[serde(default = "default_alert_to_glitch_ms")]
    pub alert_to_glitch_ms: u64,
    /// Glitch effect until the antagonist appears.
    #[serde(default = "default_glitch_to_antagonist_ms")]
    pub glitch_to_antagonist_ms: u64,
    /// Antagonist appearance until the first speech.
    #[serde(default = "default_antagonist_to_speech_ms")]
    pub antagonist_to_speech_ms: u64,
    /// Return to the hub until the welcome narration.
    #[serde(default = "default_hub_welcome_ms")]
    pub hub_welcome_ms: u64,
}

impl Default for EncounterTiming {
    fn default() -> Self {
        Self {
            alert_to_glitch_ms: default_alert_to_glitch_ms(),
            glitch_to_antagonist_ms: default_glitch_to_antagonist_ms(),
            antagonist_to_speech_ms: default_antagonist_to_speech_ms(),
            hub_welcome_ms: default_hub_welcome_ms(),
        }
    }
}

fn default_alert_to_glitch_ms() -> u64 {
    2000
}

fn default_glitch_to_antagonist_ms() -> u64 {
    1500
}

fn default_antagonist_to_speech_ms() -> u64 {
    800
}

fn default_hub_welcome_ms() -> u64 {
    500
}

/// The whole scene graph plus rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Title and global audio.
    #[serde(default)]
    pub meta: MetaConfig,
    /// Dialogue settings.
    #[serde(default)]
    pub narrator: NarratorConfig,
    /// Scoring rules.
    #[serde(default)]
    pub gameplay: GameplayRules,
    /// Ranks and report wording.
    #[serde(default)]
    pub stats: StatsConfig,
    /// Encounter stage delays.
    #[serde(default)]
    pub encounter_timing: EncounterTiming,
    /// Every scene, hub included.
    #[serde(default)]
    pub scenes: Vec<SceneConfig>,
}

impl GameConfig {
    /// Looks up a scene by id.
    #[must_use]
    pub fn scene(&self, scene_id: &str) -> Option<&SceneConfig> {
        self.scenes.iter().find(|s| s.id == scene_id)
    }

    /// The hub scene, if configured.
    #[must_use]
    pub fn hub(&self) -> Option<&SceneConfig> {
        self.scenes.iter().find(|s| s.kind == SceneKind::Menu)
    }

    /// Module scenes in configuration order.
    pub fn modules(&self) -> impl Iterator<Item = &SceneConfig> {
        self.scenes.iter().filter(|s| s.is_module())
    }

    /// Finds the scene owning a hotspot.
    #[must_use]
    pub fn locate_hotspot(&self, hotspot_id: &str) -> Option<(&SceneConfig, &HotspotConfig)> {
        self.scenes
            .iter()
            .find_map(|scene| scene.hotspot(hotspot_id).map(|h| (scene, h)))
    }

    /// Report wording for a rank, if configured.
    #[must_use]
    pub fn rank_message(&self, rank: &str) -> Option<&RankMessage> {
        self.stats.messages.get(rank)
    }
}
