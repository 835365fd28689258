//! Skill handlers: add/remove plan entries and browse the catalog

use crate::PlanServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl PlanServerHandler {
    /// Wants a catalog skill at a level in a plan, replacing any previous level.
    pub async fn handle_add_skill(
        &self,
        plan_id: String,
        skill_id: String,
        level: u8,
    ) -> McpResult<String> {
        let level = validation::parse_level(level)?;
        let skill = validation::resolve_skill(&self.catalog, &skill_id)?;

        let mut registry = self.lock_registry();
        let plan = validation::resolve_plan(&registry, &plan_id)?;
        if !registry.add_skill(plan, &skill, level) {
            drop(registry);
            bail_public!(_, "Failed to add skill '{}' to plan '{}'", skill.id, plan_id);
        }
        Self::publish_notifications(&mut registry);

        Ok(format!(
            "Added {} at {} to plan {}",
            formatting::format_skill_label(&skill.name, skill.multiplier),
            formatting::format_level_info(Some(level)),
            validation::normalize_id(&plan_id)
        ))
    }

    /// Removes a skill entry from a plan.
    pub async fn handle_remove_skill(&self, plan_id: String, skill_id: String) -> McpResult<String> {
        let skill_id = validation::normalize_id(&skill_id);

        let mut registry = self.lock_registry();
        let plan = validation::resolve_plan(&registry, &plan_id)?;
        if !registry.remove_skill(plan, &skill_id) {
            drop(registry);
            bail_public!(
                _,
                "Plan '{}' has no entry for skill '{}'",
                validation::normalize_id(&plan_id),
                skill_id
            );
        }
        Self::publish_notifications(&mut registry);

        Ok(format!(
            "Removed skill {} from plan {}",
            skill_id,
            validation::normalize_id(&plan_id)
        ))
    }

    /// Lists the catalog grouped by skill group.
    pub async fn handle_list_skills(&self) -> McpResult<String> {
        Ok(formatting::format_catalog(&self.catalog))
    }
}
