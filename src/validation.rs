//! Validation helper functions for the skill plan MCP server
//!
//! This module turns client-supplied ids and levels into registry handles
//! and catalog skills, reporting invalid input as MCP errors.

use crate::catalog::SkillTree;
use crate::plans::PlanRegistry;
use crate::tree::{ItemId, Skill};
use mcp_attr::Result as McpResult;
use std::sync::Arc;

/// Highest level a skill can be trained to
pub const MAX_SKILL_LEVEL: u8 = 5;

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Normalize an id by trimming surrounding whitespace
pub fn normalize_id(id: &str) -> String {
    id.trim().to_string()
}

/// Resolve a plan id to a plan in the registry
///
/// # Returns
/// The plan handle, or an error listing the available plans
pub fn resolve_plan(registry: &PlanRegistry, plan_id: &str) -> McpResult<ItemId> {
    let plan_id = normalize_id(plan_id);
    registry
        .find_plan(&plan_id)
        .ok_or_else(|| invalid_params(format_invalid_plan_error(&plan_id, registry)))
}

/// Resolve a skill id against the catalog
pub fn resolve_skill(catalog: &SkillTree, skill_id: &str) -> McpResult<Arc<Skill>> {
    let skill_id = normalize_id(skill_id);
    catalog.find_skill(&skill_id).ok_or_else(|| {
        invalid_params(format!(
            "Skill '{}' does not exist in the catalog. Use list_skills to see available skills.",
            skill_id
        ))
    })
}

/// Validate a wanted skill level
pub fn parse_level(level: u8) -> McpResult<u8> {
    if level > MAX_SKILL_LEVEL {
        return Err(invalid_params(format!(
            "Invalid level {}. Levels range from 0 to {}.",
            level, MAX_SKILL_LEVEL
        )));
    }
    Ok(level)
}

/// Format an error message for an unknown plan id with the available plans
pub fn format_invalid_plan_error(plan_id: &str, registry: &PlanRegistry) -> String {
    let plans: Vec<String> = registry
        .plans()
        .into_iter()
        .filter_map(|plan| registry.plan(plan).map(|p| p.id().to_string()))
        .collect();
    if plans.is_empty() {
        format!(
            "Plan '{}' does not exist. No plans have been created yet. Create one first using create_plan().",
            plan_id
        )
    } else {
        format!(
            "Plan '{}' does not exist.\nAvailable plans: {}",
            plan_id,
            plans.join(", ")
        )
    }
}
