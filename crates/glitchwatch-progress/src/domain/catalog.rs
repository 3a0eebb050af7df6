//! Scene catalog — the slice of the scene graph progress tracking needs.

use std::collections::HashMap;

use glitchwatch_content::domain::config::GameConfig;
use glitchwatch_content::domain::scene::{SceneConfig, SceneKind};

/// Hotspot membership of one scene.
#[derive(Debug, Clone)]
pub(crate) struct CatalogScene {
    pub kind: SceneKind,
    /// Every hotspot id, quiz hotspots included.
    pub hotspots: Vec<String>,
    /// Non-quiz hotspot ids.
    pub exploration: Vec<String>,
}

/// Index of scenes and hotspots by id.
#[derive(Debug, Clone, Default)]
pub struct SceneCatalog {
    scenes: HashMap<String, CatalogScene>,
    hotspot_owner: HashMap<String, String>,
    module_count: usize,
}

impl SceneCatalog {
    /// Builds the catalog from a full configuration.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::from_scenes(&config.scenes)
    }

    /// Builds the catalog from a list of scenes.
    #[must_use]
    pub fn from_scenes(scenes: &[SceneConfig]) -> Self {
        let mut catalog = Self::default();
        for scene in scenes {
            for hotspot in &scene.hotspots {
                catalog
                    .hotspot_owner
                    .insert(hotspot.id.clone(), scene.id.clone());
            }
            catalog.scenes.insert(
                scene.id.clone(),
                CatalogScene {
                    kind: scene.kind,
                    hotspots: scene.hotspots.iter().map(|h| h.id.clone()).collect(),
                    exploration: scene.exploration_hotspots().map(|h| h.id.clone()).collect(),
                },
            );
        }
        catalog.module_count = catalog
            .scenes
            .values()
            .filter(|s| s.kind == SceneKind::Module)
            .count();
        catalog
    }

    pub(crate) fn scene(&self, scene_id: &str) -> Option<&CatalogScene> {
        self.scenes.get(scene_id)
    }

    /// Returns `true` if the scene exists.
    #[must_use]
    pub fn contains_scene(&self, scene_id: &str) -> bool {
        self.scenes.contains_key(scene_id)
    }

    /// Returns `true` if the scene exists and is a module.
    #[must_use]
    pub fn is_module(&self, scene_id: &str) -> bool {
        self.scene(scene_id)
            .is_some_and(|s| s.kind == SceneKind::Module)
    }

    /// The scene owning a hotspot.
    #[must_use]
    pub fn owner_of(&self, hotspot_id: &str) -> Option<&str> {
        self.hotspot_owner.get(hotspot_id).map(String::as_str)
    }

    /// Number of module scenes.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.module_count
    }
}
