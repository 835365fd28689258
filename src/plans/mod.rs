//! Skill plans and the undo-bearing plan registry
//!
//! - `plan`: Plan payload, read-only view and editor (with its own undo history)
//! - `registry`: Collection of plans with id allocation and the undo log

mod plan;
mod registry;

pub use plan::{PlanData, PlanEditor, PlanView};
pub use registry::{PlanRegistry, UndoAction};
