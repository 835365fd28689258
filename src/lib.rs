//! Skill Plans MCP Server Library
//!
//! This library provides a hierarchical item tree with named groups and a
//! collection of skill training plans with an undo log, exposed through a
//! Model Context Protocol (MCP) server.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `PlanServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `tree`, `catalog` and `plans` modules - Item tree, skill
//!   catalog and the undo-bearing plan registry
//! - **Configuration Layer**: `config` module - TOML server configuration
//!
//! # Example
//!
//! ```
//! use skill_plans::{PlanRegistry, Skill};
//! use std::sync::Arc;
//!
//! let gunnery = Arc::new(Skill::new("3300", "Gunnery", 1));
//! let mut registry = PlanRegistry::new("plans", "Skill Plans");
//! let plan = registry.create_plan("Frigate", true);
//! registry.add_skill(plan, &gunnery, 3);
//!
//! registry.rename_plan(plan, "Destroyer");
//! assert_eq!(registry.plans().len(), 1);
//!
//! // One undo reverts the whole rename
//! registry.undo();
//! assert_eq!(registry.find_plan("plans_plan_0"), Some(plan));
//! ```

mod catalog;
pub mod config;
pub mod formatting;
pub mod handlers;
pub mod plans;
pub mod tree;
pub mod validation;

use anyhow::Result;
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

// Re-export commonly used types
pub use catalog::SkillTree;
pub use config::ServerConfig;
pub use plans::{PlanEditor, PlanRegistry, PlanView, UndoAction};
pub use tree::{ItemId, ItemKind, ItemTree, LevelEntry, Notification, Skill, SkillError};

/// MCP Server handler for skill plan management
///
/// Owns one plan registry and the skill catalog. Every tool call locks the
/// registry, so at most one mutation is in flight at a time.
pub struct PlanServerHandler {
    pub(crate) registry: Mutex<PlanRegistry>,
    pub(crate) catalog: Arc<SkillTree>,
}

impl PlanServerHandler {
    /// Create a new handler from a configuration
    ///
    /// The configured catalog doubles as the registry's known skills.
    pub fn new(config: &ServerConfig) -> Self {
        let catalog = Arc::new(config.catalog());
        let mut registry = PlanRegistry::new(&config.registry_id, &config.registry_name);
        registry.set_known_skills(Some(catalog.clone()));
        Self {
            registry: Mutex::new(registry),
            catalog,
        }
    }

    /// Create a new handler from a configuration file
    ///
    /// # Arguments
    /// * `config_path` - Path to the TOML configuration (missing file = defaults)
    ///
    /// # Example
    /// ```no_run
    /// # use skill_plans::PlanServerHandler;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = PlanServerHandler::from_config_file("plans.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config_file(config_path: impl AsRef<Path>) -> Result<Self> {
        let config = ServerConfig::load(config_path)?;
        info!(
            registry_id = %config.registry_id,
            skills = config.skills.len(),
            "loaded configuration"
        );
        Ok(Self::new(&config))
    }

    /// Lock the registry, recovering it if a previous holder panicked
    pub(crate) fn lock_registry(&self) -> MutexGuard<'_, PlanRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver queued registry notifications to the log
    pub(crate) fn publish_notifications(registry: &mut PlanRegistry) {
        for notification in registry.drain_notifications() {
            debug!(?notification, "registry notification");
        }
    }
}

/// Skill plan server: organize skill training into named plans with undo.
///
/// A plan is a named list of catalog skills, each wanted at a level (0-5).
/// Plans are created, deleted and renamed through this server, and every such
/// action can be reverted with `undo`, most recent first.
///
/// Key concepts:
/// - **catalog**: the skills available to plans (see list_skills)
/// - **plan ID**: assigned on creation, e.g. "plans_plan_0"; never reused
/// - **rename**: produces a plan with a new ID; one undo reverts it
/// - **undo**: reverts create, delete, rename and skill edits
#[mcp_server]
impl McpServer for PlanServerHandler {
    /// **List plans**: Show every plan with its ID and number of skills.
    #[tool]
    async fn list_plans(&self) -> McpResult<String> {
        self.handle_list_plans().await
    }

    /// **Show plan**: Show the skills and levels wanted by one plan.
    #[tool]
    async fn show_plan(
        &self,
        /// Plan ID (e.g., "plans_plan_0")
        plan_id: String,
    ) -> McpResult<String> {
        self.handle_show_plan(plan_id).await
    }

    /// **Create plan**: Create an empty plan. Undoable.
    #[tool]
    async fn create_plan(
        &self,
        /// Display name of the new plan
        name: String,
    ) -> McpResult<String> {
        self.handle_create_plan(name).await
    }

    /// **Delete plan**: Remove a plan. Undoable.
    #[tool]
    async fn delete_plan(
        &self,
        /// Plan ID (e.g., "plans_plan_0")
        plan_id: String,
    ) -> McpResult<String> {
        self.handle_delete_plan(plan_id).await
    }

    /// **Rename plan**: Give a plan a new name. The plan receives a new ID. Undoable as one action.
    #[tool]
    async fn rename_plan(
        &self,
        /// Plan ID (e.g., "plans_plan_0")
        plan_id: String,
        /// New display name
        name: String,
    ) -> McpResult<String> {
        self.handle_rename_plan(plan_id, name).await
    }

    /// **Add skill**: Want a catalog skill at a level in a plan. Replaces an existing level. Undoable.
    #[tool]
    async fn add_skill(
        &self,
        /// Plan ID (e.g., "plans_plan_0")
        plan_id: String,
        /// Catalog skill ID (see list_skills)
        skill_id: String,
        /// Wanted level, 0-5
        level: u8,
    ) -> McpResult<String> {
        self.handle_add_skill(plan_id, skill_id, level).await
    }

    /// **Remove skill**: Drop a skill from a plan. Undoable.
    #[tool]
    async fn remove_skill(
        &self,
        /// Plan ID (e.g., "plans_plan_0")
        plan_id: String,
        /// Catalog skill ID
        skill_id: String,
    ) -> McpResult<String> {
        self.handle_remove_skill(plan_id, skill_id).await
    }

    /// **Undo**: Revert the most recent action.
    #[tool]
    async fn undo(&self) -> McpResult<String> {
        self.handle_undo().await
    }

    /// **List skills**: Show the skill catalog grouped by skill group, with trained levels.
    #[tool]
    async fn list_skills(&self) -> McpResult<String> {
        self.handle_list_skills().await
    }
}
