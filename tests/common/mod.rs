//! Common test utilities for integration tests

#![allow(dead_code)]

use skill_plans::{ItemId, PlanRegistry, ServerConfig, Skill, SkillTree};
use skill_plans::config::SkillEntry;
use std::sync::Arc;

/// Build a small catalog with two groups and three skills
pub fn sample_catalog() -> SkillTree {
    let mut catalog = SkillTree::new("catalog", "All Skills");
    catalog.add_skill("255", "Gunnery", Skill::new("3300", "Gunnery", 1).with_level(5));
    catalog.add_skill("255", "Gunnery", Skill::new("3301", "Small Hybrid Turret", 1));
    catalog.add_skill("275", "Navigation", Skill::new("3449", "Navigation", 1).with_level(2));
    catalog
}

/// Look up a catalog skill that is known to exist
pub fn skill(catalog: &SkillTree, id: &str) -> Arc<Skill> {
    catalog.find_skill(id).unwrap()
}

/// Create a plan holding the given (skill id, level) entries
pub fn plan_with_levels(
    registry: &mut PlanRegistry,
    catalog: &SkillTree,
    name: &str,
    levels: &[(&str, u8)],
) -> ItemId {
    let plan = registry.create_plan(name, true);
    for (id, level) in levels {
        registry.add_skill(plan, &skill(catalog, id), *level);
    }
    plan
}

/// Server configuration matching `sample_catalog`
pub fn sample_config() -> ServerConfig {
    let entry = |id: &str, name: &str, group_id: &str, group_name: &str, level: Option<u8>| {
        SkillEntry {
            id: id.to_string(),
            name: name.to_string(),
            group_id: group_id.to_string(),
            group_name: group_name.to_string(),
            multiplier: 1,
            level,
        }
    };
    ServerConfig {
        skills: vec![
            entry("3300", "Gunnery", "255", "Gunnery", Some(5)),
            entry("3301", "Small Hybrid Turret", "255", "Gunnery", None),
            entry("3449", "Navigation", "275", "Navigation", Some(2)),
        ],
        ..ServerConfig::default()
    }
}
