//! MCP tool handlers for the skill plan server
//!
//! This module contains the implementation of all MCP tool handlers.
//! Each handler is in a separate file for better organization.

pub mod plans;
pub mod skills;
pub mod undo;
