//! Scene catalog: fixed prompt templates for the `selfie` command.

use dbot_core::{DbotError, Result};
use rand::Rng;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    pub description: String,
}

#[derive(Deserialize)]
struct SceneFile {
    #[serde(rename = "photoOps")]
    photo_ops: Vec<Scene>,
}

/// Immutable, non-empty list of scenes.
#[derive(Debug, Clone)]
pub struct SceneCatalog {
    scenes: Vec<Scene>,
}

impl SceneCatalog {
    pub fn new(scenes: Vec<Scene>) -> Result<Self> {
        if scenes.is_empty() {
            return Err(DbotError::Config("scene catalog is empty".to_string()));
        }
        Ok(Self { scenes })
    }

    /// Parses `{"photoOps": [{"description": "..."}, ...]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: SceneFile = serde_json::from_str(json)
            .map_err(|e| DbotError::Config(format!("invalid scene catalog: {}", e)))?;
        Self::new(file.photo_ops)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Uniformly random scene description.
    pub fn random_prompt(&self) -> &str {
        let index = rand::rng().random_range(0..self.scenes.len());
        &self.scenes[index].description
    }
}
