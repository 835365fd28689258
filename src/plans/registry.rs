use super::plan::{PlanData, PlanEditor, PlanView};
use crate::catalog::SkillTree;
use crate::tree::{ItemId, ItemKind, ItemTree, Notification, Skill};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Kind of a recorded undo action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UndoAction {
    /// A plan's entries were edited; undone by the plan's own history
    ModifyPlan,
    /// A plan was created; undone by deleting it
    CreatePlan,
    /// A plan was deleted; undone by reinserting the retained plan
    DeletePlan,
    /// Marker on top of the create+delete pair recorded by a rename
    RenamePlan,
}

/// A named collection of plans with an undo log
///
/// The registry is itself the root item of its tree; every plan is a direct
/// child. All mutations go through the registry so that undo records and
/// notifications stay consistent.
///
/// Undo records are only appended for user actions and never while an undo
/// is running. A rename is recorded as create + delete with a `RenamePlan`
/// marker on top, and undoing the marker undoes both.
#[derive(Debug, Clone)]
pub struct PlanRegistry {
    tree: ItemTree,
    root: ItemId,
    /// Sequence for plan ids; never reused, even across deletes and undos
    next_id: u64,
    known_skills: Option<Arc<SkillTree>>,
    undo_log: Vec<(UndoAction, Option<ItemId>)>,
    undoing: bool,
    /// Suppresses save handling while a rename copies entries
    renaming: bool,
    /// Plans whose "wants to save" signal is connected to this registry
    subscribed: HashSet<ItemId>,
}

impl PlanRegistry {
    /// Create an empty registry
    ///
    /// # Arguments
    /// * `id` - Registry id, used as prefix for plan ids
    /// * `name` - Display name
    pub fn new(id: &str, name: &str) -> Self {
        let mut tree = ItemTree::new();
        let root = tree.new_item(None, ItemKind::group(id, name));
        Self {
            tree,
            root,
            next_id: 0,
            known_skills: None,
            undo_log: Vec::new(),
            undoing: false,
            renaming: false,
            subscribed: HashSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        self.tree.id(self.root).unwrap_or_default()
    }

    pub fn name(&self) -> String {
        self.tree
            .name(self.root)
            .map(|n| n.into_owned())
            .unwrap_or_default()
    }

    pub fn tree(&self) -> &ItemTree {
        &self.tree
    }

    pub fn root(&self) -> ItemId {
        self.root
    }

    /// Sequence number the next created plan will get
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn known_skills(&self) -> Option<&Arc<SkillTree>> {
        self.known_skills.as_ref()
    }

    /// All plans in display order
    pub fn plans(&self) -> Vec<ItemId> {
        self.tree
            .children(self.root)
            .into_iter()
            .filter(|item| self.tree.kind(*item).is_some_and(|k| k.is_plan()))
            .collect()
    }

    /// View a plan by handle
    ///
    /// Detached plans still retained by the undo log can be viewed too.
    pub fn plan(&self, plan: ItemId) -> Option<PlanView<'_>> {
        PlanView::new(&self.tree, plan)
    }

    /// Find a plan in the registry by its id
    pub fn find_plan(&self, id: &str) -> Option<ItemId> {
        self.tree
            .child(self.root, id)
            .filter(|item| self.tree.kind(*item).is_some_and(|k| k.is_plan()))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_log.is_empty()
    }

    /// Number of records in the undo log
    pub fn undo_depth(&self) -> usize {
        self.undo_log.len()
    }

    /// Recorded actions, oldest first
    pub fn undo_actions(&self) -> Vec<UndoAction> {
        self.undo_log.iter().map(|(action, _)| *action).collect()
    }

    /// Take every queued notification, oldest first
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.tree.drain_notifications()
    }

    /// Create a new empty plan
    ///
    /// # Arguments
    /// * `name` - Display name of the plan
    /// * `user_action` - Whether the creation should be undoable
    ///
    /// # Returns
    /// The new plan, with id `<registry id>_plan_<n>`
    pub fn create_plan(&mut self, name: &str, user_action: bool) -> ItemId {
        let id = format!("{}_plan_{}", self.id(), self.next_id);
        self.next_id += 1;

        let plan = self
            .tree
            .new_item(Some(self.root), ItemKind::Plan(PlanData::new(id, name)));
        self.add_undo_action(UndoAction::CreatePlan, Some(plan), user_action);
        if let Some(known) = self.known_skills.clone()
            && let Some(mut editor) = PlanEditor::new(&mut self.tree, plan)
        {
            editor.set_known_skills(Some(known));
        }
        self.subscribed.insert(plan);
        self.tree.add_child(self.root, plan);
        self.tree.notify(Notification::WantsToSave(Some(plan)));
        self.tree.notify(Notification::AvailablePlansChanged);
        debug!(plan = %plan, name, user_action, "created plan");
        plan
    }

    /// Detach a plan from the registry
    ///
    /// The plan is not destroyed while an undo record still refers to it.
    /// Plans that are not children of this registry are ignored.
    pub fn delete_plan(&mut self, plan: ItemId, user_action: bool) {
        if !self.is_attached(plan) {
            return;
        }
        let Some(id) = self.tree.id(plan).map(str::to_string) else {
            return;
        };

        self.add_undo_action(UndoAction::DeletePlan, Some(plan), user_action);
        self.subscribed.remove(&plan);
        self.tree.remove_child(self.root, &id);
        self.tree.notify(Notification::WantsToSave(None));
        self.tree.notify(Notification::AvailablePlansChanged);
        debug!(plan = %plan, plan_id = %id, user_action, "deleted plan");
        self.release_if_orphaned(plan);
    }

    /// Rename a plan by creating a copy under the new name and deleting the
    /// original
    ///
    /// The new plan gets a fresh id. A single `undo()` reverts the whole
    /// rename. The new name is not validated.
    ///
    /// # Returns
    /// Always `true`
    pub fn rename_plan(&mut self, plan: ItemId, name: &str) -> bool {
        if !self.is_attached(plan) {
            debug!(plan = %plan, "ignoring rename of a plan outside the registry");
            return true;
        }

        let new_plan = self.create_plan(name, true);
        let entries = self.plan(plan).map(|p| p.levels()).unwrap_or_default();
        self.renaming = true;
        for entry in entries {
            if entry.resolve().is_err() {
                warn!(skill_id = %entry.skill_id, "copying expired skill into renamed plan");
            }
            let fired =
                PlanEditor::new(&mut self.tree, new_plan).is_some_and(|mut e| e.insert_entry(entry));
            if fired {
                self.plan_wants_to_save(new_plan);
            }
        }
        self.renaming = false;
        self.delete_plan(plan, true);
        self.add_undo_action(UndoAction::RenamePlan, None, true);
        self.tree.notify(Notification::WantsToSave(Some(plan)));
        self.tree.notify(Notification::WantsToSave(Some(new_plan)));
        debug!(old = %plan, new = %new_plan, name, "renamed plan");
        true
    }

    /// Undo the most recent recorded action
    ///
    /// Does nothing when the log is empty. Nothing done while undoing is
    /// recorded.
    pub fn undo(&mut self) {
        let Some((action, plan)) = self.undo_log.pop() else {
            return;
        };
        let original_state = self.undoing;
        self.undoing = true;
        debug!(?action, "undoing plan action");

        match (action, plan) {
            (UndoAction::ModifyPlan, Some(plan)) => {
                let fired = PlanEditor::new(&mut self.tree, plan).is_some_and(|mut e| e.undo());
                if fired {
                    self.plan_wants_to_save(plan);
                }
                self.release_if_orphaned(plan);
            }
            (UndoAction::CreatePlan, Some(plan)) => self.delete_plan(plan, false),
            (UndoAction::DeletePlan, Some(plan)) => {
                let known = self.known_skills.clone();
                if known.is_some()
                    && let Some(mut editor) = PlanEditor::new(&mut self.tree, plan)
                {
                    editor.set_known_skills(known);
                }
                self.tree.add_child(self.root, plan);
                self.tree.notify(Notification::WantsToSave(Some(plan)));
                self.subscribed.insert(plan);
                self.tree.notify(Notification::AvailablePlansChanged);
            }
            (UndoAction::RenamePlan, _) => {
                // The rename itself changed nothing; undo its delete and create
                self.undo();
                self.undo();
            }
            (action, None) => warn!(?action, "undo record without a plan"),
        }

        self.undoing = original_state;
    }

    /// Set the known skills and propagate them to every plan
    pub fn set_known_skills(&mut self, known_skills: Option<Arc<SkillTree>>) {
        self.known_skills = known_skills;
        let known = self.known_skills.clone();
        for plan in self.plans() {
            if let Some(mut editor) = PlanEditor::new(&mut self.tree, plan) {
                editor.set_known_skills(known.clone());
            }
        }
    }

    /// Want a skill trained to a level in one of the registry's plans
    ///
    /// # Returns
    /// `false` if the plan is not in the registry
    pub fn add_skill(&mut self, plan: ItemId, skill: &Arc<Skill>, level: u8) -> bool {
        if !self.is_attached(plan) {
            return false;
        }
        let fired =
            PlanEditor::new(&mut self.tree, plan).is_some_and(|mut e| e.add_skill(skill, level));
        if fired {
            self.plan_wants_to_save(plan);
        }
        fired
    }

    /// Drop a skill from one of the registry's plans
    ///
    /// # Returns
    /// `false` if the plan is not in the registry or has no such entry
    pub fn remove_skill(&mut self, plan: ItemId, skill_id: &str) -> bool {
        if !self.is_attached(plan) {
            return false;
        }
        let fired =
            PlanEditor::new(&mut self.tree, plan).is_some_and(|mut e| e.remove_skill(skill_id));
        if fired {
            self.plan_wants_to_save(plan);
        }
        fired
    }

    /// Deliver a plan's "wants to save" signal if the registry listens to it
    fn plan_wants_to_save(&mut self, plan: ItemId) {
        if self.subscribed.contains(&plan) {
            self.handle_plan_wants_to_save(plan);
        }
    }

    fn handle_plan_wants_to_save(&mut self, plan: ItemId) {
        if self.renaming {
            return;
        }
        self.tree.notify(Notification::WantsToSave(Some(plan)));
        self.add_undo_action(UndoAction::ModifyPlan, Some(plan), true);
    }

    fn add_undo_action(&mut self, action: UndoAction, plan: Option<ItemId>, user_action: bool) {
        if user_action && !self.undoing {
            self.undo_log.push((action, plan));
        }
    }

    fn is_attached(&self, plan: ItemId) -> bool {
        self.tree.kind(plan).is_some_and(|k| k.is_plan()) && self.tree.parent(plan) == Some(self.root)
    }

    /// Free a detached plan nothing in the undo log refers to anymore
    fn release_if_orphaned(&mut self, plan: ItemId) {
        let referenced = self.undo_log.iter().any(|(_, p)| *p == Some(plan));
        if !referenced && self.tree.parent(plan).is_none() {
            self.tree.free_subtree(plan);
        }
    }
}

impl PartialEq for PlanRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.tree.subtree_eq(self.root, &other.tree, other.root)
    }
}

impl Drop for PlanRegistry {
    fn drop(&mut self) {
        for plan in self.plans() {
            self.delete_plan(plan, false);
        }
    }
}
