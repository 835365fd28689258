use crate::catalog::SkillTree;
use crate::tree::Skill;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Server configuration loaded from a TOML file
///
/// Holds the registry identity and the static skill catalog offered to
/// clients. Plans themselves are never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Registry id, used as prefix for plan ids
    pub registry_id: String,
    /// Registry display name
    pub registry_name: String,
    /// Catalog skills, grouped by `group_id`
    pub skills: Vec<SkillEntry>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            registry_id: "plans".to_string(),
            registry_name: "Skill Plans".to_string(),
            skills: Vec::new(),
        }
    }
}

/// One catalog skill in the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub id: String,
    pub name: String,
    pub group_id: String,
    pub group_name: String,
    #[serde(default = "default_multiplier")]
    pub multiplier: u32,
    /// Trained level, if the skill is already known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

fn default_multiplier() -> u32 {
    1
}

impl ServerConfig {
    /// Load the configuration, falling back to defaults if the file is missing
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: ServerConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Build the skill catalog described by the configuration
    pub fn catalog(&self) -> SkillTree {
        let mut catalog = SkillTree::new(&format!("{}_catalog", self.registry_id), "All Skills");
        for entry in &self.skills {
            let mut skill = Skill::new(&entry.id, &entry.name, entry.multiplier);
            skill.level = entry.level;
            catalog.add_skill(&entry.group_id, &entry.group_name, skill);
        }
        catalog
    }
}
