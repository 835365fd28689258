//! Plan registry and undo log tests
mod common;

use common::{plan_with_levels, sample_catalog, skill};
use skill_plans::{Notification, PlanRegistry, UndoAction};
use std::sync::Arc;

#[test]
fn test_create_then_undo_restores_previous_state() {
    let catalog = sample_catalog();
    let mut registry = PlanRegistry::new("plans", "Plans");
    plan_with_levels(&mut registry, &catalog, "Existing", &[("3300", 3)]);
    let before = registry.clone();

    let plan = registry.create_plan("X", true);
    assert!(registry != before);

    registry.undo();
    assert!(registry == before);
    assert!(!registry.tree().contains(plan));
}

#[test]
fn test_delete_then_undo_restores_same_plan() {
    let catalog = sample_catalog();
    let mut registry = PlanRegistry::new("plans", "Plans");
    let plan = plan_with_levels(&mut registry, &catalog, "Frigate", &[("3300", 3), ("3449", 1)]);
    let before = registry.clone();

    registry.delete_plan(plan, true);
    assert_eq!(registry.find_plan("plans_plan_0"), None);
    assert!(registry.plans().is_empty());

    registry.undo();
    assert_eq!(registry.find_plan("plans_plan_0"), Some(plan));
    assert!(registry == before);
    let levels = registry.plan(plan).unwrap().levels();
    assert_eq!(levels.len(), 2);
}

#[test]
fn test_rename_is_undone_by_a_single_undo() {
    let catalog = sample_catalog();
    let mut registry = PlanRegistry::new("plans", "Plans");
    let plan = plan_with_levels(&mut registry, &catalog, "Frigate", &[("3300", 3), ("3449", 5)]);
    let before = registry.clone();
    let depth = registry.undo_depth();

    assert!(registry.rename_plan(plan, "NewName"));
    let renamed = registry.find_plan("plans_plan_1").unwrap();
    let view = registry.plan(renamed).unwrap();
    assert_eq!(view.name(), "NewName");
    let levels: Vec<(String, u8)> = view
        .levels()
        .into_iter()
        .map(|l| (l.skill_id, l.level))
        .collect();
    assert_eq!(
        levels,
        vec![("3300".to_string(), 3), ("3449".to_string(), 5)]
    );
    assert_eq!(registry.find_plan("plans_plan_0"), None);
    assert_eq!(registry.plans(), vec![renamed]);

    registry.undo();
    assert_eq!(registry.undo_depth(), depth);
    assert_eq!(registry.find_plan("plans_plan_0"), Some(plan));
    assert_eq!(registry.plan(plan).unwrap().name(), "Frigate");
    assert_eq!(registry.find_plan("plans_plan_1"), None);
    assert!(registry == before);
}

#[test]
fn test_rename_copy_does_not_signal_saves() {
    let catalog = sample_catalog();
    let mut registry = PlanRegistry::new("plans", "Plans");
    let plan = plan_with_levels(&mut registry, &catalog, "Frigate", &[("3300", 3), ("3449", 5)]);
    registry.drain_notifications();

    registry.rename_plan(plan, "Destroyer");
    let saves: Vec<Notification> = registry
        .drain_notifications()
        .into_iter()
        .filter(|n| matches!(n, Notification::WantsToSave(_)))
        .collect();
    let renamed = registry.find_plan("plans_plan_1").unwrap();
    assert_eq!(
        saves,
        vec![
            Notification::WantsToSave(Some(renamed)),
            Notification::WantsToSave(None),
            Notification::WantsToSave(Some(plan)),
            Notification::WantsToSave(Some(renamed)),
        ]
    );
}

#[test]
fn test_undo_on_empty_log_changes_nothing() {
    let catalog = sample_catalog();
    let mut registry = PlanRegistry::new("plans", "Plans");
    plan_with_levels(&mut registry, &catalog, "Frigate", &[("3300", 3)]);
    let mut untouched = PlanRegistry::new("plans", "Plans");
    untouched.undo();
    assert!(untouched.plans().is_empty());
    assert!(untouched.drain_notifications().is_empty());

    while registry.can_undo() {
        registry.undo();
    }
    let before = registry.clone();
    registry.drain_notifications();
    registry.undo();
    assert!(registry == before);
    assert!(registry.drain_notifications().is_empty());
}

#[test]
fn test_modify_undo_restores_plan_entries() {
    let catalog = sample_catalog();
    let mut registry = PlanRegistry::new("plans", "Plans");
    let plan = plan_with_levels(&mut registry, &catalog, "Frigate", &[("3300", 3)]);
    let before = registry.clone();

    registry.add_skill(plan, &skill(&catalog, "3300"), 5);
    registry.add_skill(plan, &skill(&catalog, "3449"), 1);
    registry.remove_skill(plan, "3300");
    assert_eq!(
        registry.undo_actions()[registry.undo_depth() - 3..],
        [UndoAction::ModifyPlan, UndoAction::ModifyPlan, UndoAction::ModifyPlan]
    );

    registry.undo();
    registry.undo();
    registry.undo();
    assert!(registry == before);
}

#[test]
fn test_plan_ids_are_never_reused() {
    let mut registry = PlanRegistry::new("pilot", "Pilot");
    let first = registry.create_plan("A", true);
    registry.undo();
    let second = registry.create_plan("B", true);
    registry.delete_plan(second, true);
    let third = registry.create_plan("C", true);

    assert!(!registry.tree().contains(first));
    assert_eq!(registry.plan(third).unwrap().id(), "pilot_plan_2");
    assert_eq!(registry.next_id(), 3);

    registry.undo();
    registry.undo();
    assert_eq!(registry.plan(second).unwrap().id(), "pilot_plan_1");
    assert_eq!(registry.next_id(), 3);
}

#[test]
fn test_non_user_actions_are_not_recorded() {
    let mut registry = PlanRegistry::new("plans", "Plans");
    let plan = registry.create_plan("A", false);
    registry.delete_plan(plan, false);
    assert!(!registry.can_undo());
}

#[test]
fn test_identical_operations_compare_equal() {
    let catalog = sample_catalog();
    let build = |level: u8| {
        let mut registry = PlanRegistry::new("plans", "Plans");
        let plan = plan_with_levels(&mut registry, &catalog, "Frigate", &[("3300", 3), ("3449", level)]);
        registry.rename_plan(plan, "Destroyer");
        plan_with_levels(&mut registry, &catalog, "Cruiser", &[("3301", 1)]);
        registry
    };

    assert!(build(2) == build(2));
    assert!(build(2) != build(4));
}

#[test]
fn test_known_skills_propagate_to_every_plan() {
    let catalog = sample_catalog();
    let known = Arc::new(sample_catalog());
    let mut registry = PlanRegistry::new("plans", "Plans");
    let early = plan_with_levels(&mut registry, &catalog, "Early", &[("3300", 3)]);
    let deleted = registry.create_plan("Deleted", true);
    registry.delete_plan(deleted, true);

    registry.set_known_skills(Some(known.clone()));
    let late = registry.create_plan("Late", true);
    for plan in [early, late] {
        let view = registry.plan(plan).unwrap();
        assert!(Arc::ptr_eq(view.known_skills().unwrap(), &known));
    }

    // Undo the creation of "Late", then the deletion
    registry.undo();
    registry.undo();
    let restored = registry.plan(deleted).unwrap();
    assert_eq!(registry.tree().parent(deleted), Some(registry.root()));
    assert!(Arc::ptr_eq(restored.known_skills().unwrap(), &known));

    // Gunnery is trained to 5, so the plan has nothing outstanding
    assert!(registry.plan(early).unwrap().outstanding_levels().is_empty());
}

#[test]
fn test_create_notifications_follow_the_mutation() {
    let mut registry = PlanRegistry::new("plans", "Plans");
    let root = registry.root();
    let plan = registry.create_plan("A", true);

    assert_eq!(
        registry.drain_notifications(),
        vec![
            Notification::ChildrenAboutToChange(root),
            Notification::ChildrenChanged(root),
            Notification::WantsToSave(Some(plan)),
            Notification::AvailablePlansChanged,
        ]
    );

    registry.delete_plan(plan, true);
    assert_eq!(
        registry.drain_notifications(),
        vec![
            Notification::ChildrenAboutToChange(root),
            Notification::ChildrenChanged(root),
            Notification::WantsToSave(None),
            Notification::AvailablePlansChanged,
        ]
    );
}

#[test]
fn test_find_skill_item_through_registry_tree() {
    let catalog = sample_catalog();
    let mut registry = PlanRegistry::new("plans", "Plans");
    let plan = plan_with_levels(&mut registry, &catalog, "Frigate", &[("3449", 4)]);

    let found = registry.tree().find_skill_item(registry.root(), "3449").unwrap();
    assert_eq!(registry.tree().parent(found), Some(plan));
    assert_eq!(registry.tree().level(found), Some(4));
    assert!(registry.tree().is_skill(found));
    assert_eq!(registry.tree().find_skill_item(registry.root(), "3300"), None);
}

#[test]
fn test_plans_sharing_a_name_compare_equal() {
    let build = || {
        let mut registry = PlanRegistry::new("plans", "Plans");
        for _ in 0..8 {
            registry.create_plan("Same", true);
        }
        registry
    };

    let first = build();
    for _ in 0..16 {
        assert!(first == build());
    }
    let ids: Vec<String> = first
        .plans()
        .into_iter()
        .map(|p| first.plan(p).unwrap().id().to_string())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[test]
fn test_long_edit_sequence_undoes_completely() {
    let catalog = sample_catalog();
    let gunnery = skill(&catalog, "3300");
    let navigation = skill(&catalog, "3449");
    let mut registry = PlanRegistry::new("plans", "Plans");
    let plan = plan_with_levels(&mut registry, &catalog, "Frigate", &[("3301", 2)]);
    let before = registry.clone();
    let depth = registry.undo_depth();

    for i in 0..150u8 {
        let target = if i % 2 == 0 { &gunnery } else { &navigation };
        assert!(registry.add_skill(plan, target, i % 6));
    }
    assert_eq!(registry.undo_depth(), depth + 150);

    while registry.undo_depth() > depth {
        registry.undo();
    }
    assert!(registry == before);
    let levels = registry.plan(plan).unwrap().levels();
    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].skill_id, "3301");
}
