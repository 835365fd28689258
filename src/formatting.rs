//! Formatting helper functions for the skill plan MCP server
//!
//! This module renders read-only text views of plans and the catalog. It
//! only reads item attributes; it never mutates anything.

use crate::catalog::SkillTree;
use crate::plans::{PlanRegistry, PlanView};

/// Label shown for a catalog-backed item, e.g. "Gunnery (1x)"
pub fn format_skill_label(name: &str, multiplier: u32) -> String {
    format!("{} ({}x)", name, multiplier)
}

/// Level line shown under a catalog-backed item
pub fn format_level_info(level: Option<u8>) -> String {
    match level {
        Some(level) => format!("Level {}", level),
        None => "Untrained".to_string(),
    }
}

/// Format every plan of a registry into a display string
pub fn format_plans(registry: &PlanRegistry) -> String {
    let plans: Vec<PlanView<'_>> = registry
        .plans()
        .into_iter()
        .filter_map(|plan| registry.plan(plan))
        .collect();
    if plans.is_empty() {
        return "No plans found".to_string();
    }

    let mut result = format!("Found {} plan(s):\n\n", plans.len());
    for plan in plans {
        result.push_str(&format!(
            "- [{}] {} ({} skill(s))\n",
            plan.id(),
            plan.name(),
            plan.levels().len()
        ));
    }
    result
}

/// Format one plan with its entries
///
/// Entries already satisfied by the known skills are marked as trained;
/// entries whose catalog skill disappeared are shown by id.
pub fn format_plan(plan: &PlanView<'_>) -> String {
    let mut result = format!("Plan: {} [{}]\n", plan.name(), plan.id());
    let levels = plan.levels();
    if levels.is_empty() {
        result.push_str("  (empty)\n");
        return result;
    }

    let outstanding = plan.outstanding_levels();
    for entry in levels {
        let label = match entry.resolve() {
            Ok(skill) => format_skill_label(&skill.name, skill.multiplier),
            Err(_) => format!("{} (missing from catalog)", entry.skill_id),
        };
        let trained = if outstanding.contains(&entry) {
            ""
        } else {
            " [trained]"
        };
        result.push_str(&format!(
            "- {}: {}{}\n",
            label,
            format_level_info(Some(entry.level)),
            trained
        ));
    }
    result
}

/// Format the skill catalog grouped by skill group
pub fn format_catalog(catalog: &SkillTree) -> String {
    let groups = catalog.groups();
    if groups.is_empty() {
        return "No skills in catalog".to_string();
    }

    let mut result = String::new();
    for (group, skills) in groups {
        result.push_str(&format!("{}:\n", group));
        for skill in skills {
            result.push_str(&format!(
                "  - [{}] {}: {}\n",
                skill.id,
                format_skill_label(&skill.name, skill.multiplier),
                format_level_info(skill.level)
            ));
        }
    }
    result
}
