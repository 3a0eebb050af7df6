//! Configuration loading.
//!
//! Documents are parsed as JSON or YAML, then checked for graph-level
//! consistency the type system cannot express (unique ids, resolvable hub
//! cards, sane thresholds).

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::config::{GameConfig, default_rank_thresholds};
use crate::domain::scene::SceneKind;

/// Errors raised while loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON for the schema.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML for the schema.
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension names no supported format.
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The document parsed but describes an inconsistent scene graph.
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Serialization formats accepted for configuration documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_owned(),
            )),
        }
    }
}

/// Reads, parses and validates a configuration file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed or validated.
pub fn load_from_path(path: &Path) -> Result<GameConfig, ConfigError> {
    let format = ConfigFormat::from_path(path)?;
    let source = std::fs::read_to_string(path)?;
    let config = parse_str(&source, format)?;
    info!(
        path = %path.display(),
        scenes = config.scenes.len(),
        "configuration loaded"
    );
    Ok(config)
}

/// Parses and validates a configuration document.
///
/// # Errors
///
/// Returns `ConfigError` if the document cannot be parsed or validated.
pub fn parse_str(source: &str, format: ConfigFormat) -> Result<GameConfig, ConfigError> {
    let mut config: GameConfig = match format {
        ConfigFormat::Json => serde_json::from_str(source)?,
        ConfigFormat::Yaml => serde_yaml::from_str(source)?,
    };
    validate(&mut config)?;
    Ok(config)
}

/// Checks graph consistency, filling in defaults where a section is empty.
///
/// # Errors
///
/// Returns `ConfigError::Validation` describing the first problem found.
pub fn validate(config: &mut GameConfig) -> Result<(), ConfigError> {
    if config.narrator.typing_speed_ms == 0 {
        return Err(ConfigError::Validation(
            "narrator.typing_speed_ms must be positive".to_owned(),
        ));
    }

    let mut scene_ids = HashSet::new();
    let mut hotspot_ids = HashSet::new();
    for scene in &config.scenes {
        if !scene_ids.insert(scene.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate scene id: {}",
                scene.id
            )));
        }
        for hotspot in &scene.hotspots {
            if !hotspot_ids.insert(hotspot.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate hotspot id: {}",
                    hotspot.id
                )));
            }
            if hotspot.is_quiz() && hotspot.questions.is_empty() {
                warn!(
                    scene_id = %scene.id,
                    hotspot_id = %hotspot.id,
                    "quiz hotspot has no questions and will refuse to open"
                );
            }
        }
    }

    let hubs = config
        .scenes
        .iter()
        .filter(|s| s.kind == SceneKind::Menu)
        .count();
    if hubs > 1 {
        return Err(ConfigError::Validation(format!(
            "expected at most one menu scene, found {hubs}"
        )));
    }

    for card in config.scenes.iter().flat_map(|s| &s.cards) {
        if !scene_ids.contains(card.target_scene.as_str()) {
            return Err(ConfigError::Validation(format!(
                "card '{}' targets unknown scene {}",
                card.label, card.target_scene
            )));
        }
    }

    if config.stats.rank_thresholds.is_empty() {
        config.stats.rank_thresholds = default_rank_thresholds();
    }
    if let Some(tier) = config
        .stats
        .rank_thresholds
        .iter()
        .find(|t| t.min_accuracy > 100)
    {
        return Err(ConfigError::Validation(format!(
            "rank '{}' requires accuracy above 100",
            tier.rank
        )));
    }

    Ok(())
}
