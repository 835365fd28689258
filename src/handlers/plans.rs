//! Plan handlers: list, show, create, delete and rename

use crate::PlanServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};
use tracing::info;

impl PlanServerHandler {
    /// Lists every plan in display order.
    pub async fn handle_list_plans(&self) -> McpResult<String> {
        let registry = self.lock_registry();
        Ok(formatting::format_plans(&registry))
    }

    /// Shows one plan with its wanted skill levels.
    pub async fn handle_show_plan(&self, plan_id: String) -> McpResult<String> {
        let registry = self.lock_registry();
        let plan = validation::resolve_plan(&registry, &plan_id)?;
        match registry.plan(plan) {
            Some(view) => Ok(formatting::format_plan(&view)),
            None => bail_public!(_, "Plan '{}' could not be read", plan_id),
        }
    }

    /// Creates an empty plan as an undoable user action.
    pub async fn handle_create_plan(&self, name: String) -> McpResult<String> {
        let name = name.trim().to_string();
        if name.is_empty() {
            bail_public!(_, "Plan name must not be empty");
        }

        let mut registry = self.lock_registry();
        let plan = registry.create_plan(&name, true);
        let id = registry
            .plan(plan)
            .map(|p| p.id().to_string())
            .unwrap_or_default();
        Self::publish_notifications(&mut registry);
        info!(plan_id = %id, "plan created");

        Ok(format!("Plan created with ID: {} (name: {})", id, name))
    }

    /// Deletes a plan as an undoable user action.
    pub async fn handle_delete_plan(&self, plan_id: String) -> McpResult<String> {
        let mut registry = self.lock_registry();
        let plan = validation::resolve_plan(&registry, &plan_id)?;
        registry.delete_plan(plan, true);
        Self::publish_notifications(&mut registry);

        Ok(format!(
            "Plan {} deleted (use undo to restore it)",
            validation::normalize_id(&plan_id)
        ))
    }

    /// Renames a plan. The renamed plan gets a new ID; one undo reverts the rename.
    pub async fn handle_rename_plan(&self, plan_id: String, name: String) -> McpResult<String> {
        let name = name.trim().to_string();
        if name.is_empty() {
            bail_public!(_, "Plan name must not be empty");
        }

        let mut registry = self.lock_registry();
        let plan = validation::resolve_plan(&registry, &plan_id)?;
        let next = registry.next_id();
        registry.rename_plan(plan, &name);
        let new_id = format!("{}_plan_{}", registry.id(), next);
        Self::publish_notifications(&mut registry);

        Ok(format!(
            "Plan {} renamed to '{}' with new ID: {}",
            validation::normalize_id(&plan_id),
            name,
            new_id
        ))
    }
}
