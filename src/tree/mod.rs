//! Item tree domain models
//!
//! This module contains the arena-backed item hierarchy shared by the skill
//! catalog and the plan registry. It is split into submodules:
//! - `item`: Node kinds (groups, catalog skills, levels, plans) and skill records
//! - `item_tree`: The arena itself, with structural mutation and notifications
//! - `navigation`: Lookup, ordering, search and structural equality over the arena
//! - `events`: Change notifications queued by the arena and the registry

mod events;
mod item;
mod item_tree;
mod navigation;

// Re-export all public types
pub use events::Notification;
pub use item::{ItemKind, LevelEntry, Skill, SkillError};
pub use item_tree::{ItemId, ItemTree};
