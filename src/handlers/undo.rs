//! Undo handler for the skill plan MCP server

use crate::PlanServerHandler;
use mcp_attr::Result as McpResult;

impl PlanServerHandler {
    /// Reverts the most recent user action. A rename counts as one action.
    pub async fn handle_undo(&self) -> McpResult<String> {
        let mut registry = self.lock_registry();
        let Some(action) = registry.undo_actions().last().copied() else {
            return Ok("Nothing to undo".to_string());
        };

        registry.undo();
        Self::publish_notifications(&mut registry);

        Ok(format!(
            "Undid {:?} ({} action(s) left to undo)",
            action,
            registry.undo_depth()
        ))
    }
}
