use crate::catalog::SkillTree;
use crate::tree::{ItemId, ItemKind, ItemTree, LevelEntry, Skill};
use std::sync::Arc;

/// Payload of a plan item
///
/// The level entries themselves are the plan item's children; this holds
/// everything else a plan owns.
#[derive(Debug, Clone)]
pub struct PlanData {
    /// Unique identifier (e.g., "plans_plan_3")
    pub id: String,
    /// Display name chosen by the user
    pub name: String,
    pub(crate) known_skills: Option<Arc<SkillTree>>,
    /// Entry snapshots taken before each edit, oldest first
    pub(crate) history: Vec<Vec<LevelEntry>>,
}

impl PlanData {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            known_skills: None,
            history: Vec::new(),
        }
    }
}

/// Read-only view of a plan item
#[derive(Debug, Clone, Copy)]
pub struct PlanView<'a> {
    tree: &'a ItemTree,
    item: ItemId,
    data: &'a PlanData,
}

impl<'a> PlanView<'a> {
    /// Resolve a plan item
    ///
    /// # Returns
    /// `None` if the handle is stale or not a plan
    pub fn new(tree: &'a ItemTree, item: ItemId) -> Option<Self> {
        match tree.kind(item)? {
            ItemKind::Plan(data) => Some(Self { tree, item, data }),
            _ => None,
        }
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn id(&self) -> &'a str {
        &self.data.id
    }

    pub fn name(&self) -> &'a str {
        &self.data.name
    }

    pub fn known_skills(&self) -> Option<&'a Arc<SkillTree>> {
        self.data.known_skills.as_ref()
    }

    /// Number of edits the plan can undo on its own
    pub fn history_len(&self) -> usize {
        self.data.history.len()
    }

    /// Level entries in display order
    pub fn levels(&self) -> Vec<LevelEntry> {
        self.tree
            .children(self.item)
            .into_iter()
            .filter_map(|child| match self.tree.kind(child) {
                Some(ItemKind::Level(entry)) => Some(entry.clone()),
                _ => None,
            })
            .collect()
    }

    /// Entries not yet satisfied by the known skills
    ///
    /// Without known skills every entry is outstanding.
    pub fn outstanding_levels(&self) -> Vec<LevelEntry> {
        let known = self.known_skills();
        self.levels()
            .into_iter()
            .filter(|entry| {
                let trained = known
                    .and_then(|k| k.trained_level(&entry.skill_id))
                    .unwrap_or(0);
                known.is_none() || entry.level > trained
            })
            .collect()
    }
}

/// Mutable access to a plan item
///
/// Every editing method returns `true` when the plan emitted its
/// "wants to save" signal; the owner decides what to do with it.
pub struct PlanEditor<'a> {
    tree: &'a mut ItemTree,
    item: ItemId,
}

impl<'a> PlanEditor<'a> {
    /// Resolve a plan item for editing
    ///
    /// # Returns
    /// `None` if the handle is stale or not a plan
    pub fn new(tree: &'a mut ItemTree, item: ItemId) -> Option<Self> {
        if !matches!(tree.kind(item), Some(ItemKind::Plan(_))) {
            return None;
        }
        Some(Self { tree, item })
    }

    fn data_mut(&mut self) -> &mut PlanData {
        match self.tree.kind_mut(self.item) {
            Some(ItemKind::Plan(data)) => data,
            _ => unreachable!("plan editor always points at a plan"),
        }
    }

    fn view(&self) -> PlanView<'_> {
        match self.tree.kind(self.item) {
            Some(ItemKind::Plan(data)) => PlanView {
                tree: &*self.tree,
                item: self.item,
                data,
            },
            _ => unreachable!("plan editor always points at a plan"),
        }
    }

    pub fn set_known_skills(&mut self, known_skills: Option<Arc<SkillTree>>) {
        self.data_mut().known_skills = known_skills;
    }

    /// Want `skill` trained to `level`, replacing any previous entry for it
    pub fn add_skill(&mut self, skill: &Arc<Skill>, level: u8) -> bool {
        self.remember();
        self.insert_entry(LevelEntry::new(skill, level));
        true
    }

    /// Drop the entry for a skill
    ///
    /// # Returns
    /// `false` without recording anything if the plan has no such entry
    pub fn remove_skill(&mut self, skill_id: &str) -> bool {
        if !self.tree.has_child(self.item, skill_id) {
            return false;
        }
        self.remember();
        if let Some(removed) = self.tree.remove_child(self.item, skill_id) {
            self.tree.free_subtree(removed);
        }
        true
    }

    /// Insert an entry without touching the history
    ///
    /// Used when copying entries between plans.
    pub fn insert_entry(&mut self, entry: LevelEntry) -> bool {
        let item = self.tree.new_item(Some(self.item), ItemKind::Level(entry));
        if let Some(displaced) = self.tree.add_child(self.item, item) {
            self.tree.free_subtree(displaced);
        }
        true
    }

    /// Restore the entries as they were before the last edit
    ///
    /// # Returns
    /// `false` if there is nothing to undo
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.data_mut().history.pop() else {
            return false;
        };
        for child in self.tree.children(self.item) {
            let Some(key) = self.tree.id(child).map(str::to_string) else {
                continue;
            };
            if let Some(removed) = self.tree.remove_child(self.item, &key) {
                self.tree.free_subtree(removed);
            }
        }
        for entry in snapshot {
            self.insert_entry(entry);
        }
        true
    }

    fn remember(&mut self) {
        let snapshot = self.view().levels();
        self.data_mut().history.push(snapshot);
    }
}
