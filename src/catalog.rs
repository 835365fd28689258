//! Skill catalog
//!
//! A catalog is an item tree of skill groups whose leaves wrap immutable
//! `Skill` records. The same type describes both the full catalog used for
//! lookups and the "known skills" a plan is checked against.

use crate::tree::{ItemId, ItemKind, ItemTree, Skill};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SkillTree {
    tree: ItemTree,
    root: ItemId,
}

impl SkillTree {
    /// Create an empty catalog
    pub fn new(id: &str, name: &str) -> Self {
        let mut tree = ItemTree::muted();
        let root = tree.new_item(None, ItemKind::group(id, name));
        Self { tree, root }
    }

    /// Add a skill under the given group, creating the group on first use
    ///
    /// # Returns
    /// The shared skill record now owned by the catalog
    pub fn add_skill(&mut self, group_id: &str, group_name: &str, skill: Skill) -> Arc<Skill> {
        let group = self.tree.group(self.root, group_id, group_name);
        let skill = Arc::new(skill);
        let item = self
            .tree
            .new_item(Some(group), ItemKind::Skill(skill.clone()));
        if let Some(replaced) = self.tree.add_child(group, item) {
            self.tree.free_subtree(replaced);
        }
        skill
    }

    /// Find a skill anywhere in the catalog
    pub fn find_skill(&self, id: &str) -> Option<Arc<Skill>> {
        let item = self.tree.find_skill_item(self.root, id)?;
        match self.tree.kind(item)? {
            ItemKind::Skill(skill) => Some(skill.clone()),
            _ => None,
        }
    }

    /// Trained level of a skill, if the catalog knows it as trained
    pub fn trained_level(&self, id: &str) -> Option<u8> {
        self.find_skill(id).and_then(|s| s.level)
    }

    /// All groups in display order, each with its skills in display order
    pub fn groups(&self) -> Vec<(String, Vec<Arc<Skill>>)> {
        self.tree
            .children(self.root)
            .into_iter()
            .map(|group| {
                let name = self.tree.name(group).unwrap_or_default().into_owned();
                let skills = self
                    .tree
                    .children(group)
                    .into_iter()
                    .filter_map(|item| match self.tree.kind(item) {
                        Some(ItemKind::Skill(skill)) => Some(skill.clone()),
                        _ => None,
                    })
                    .collect();
                (name, skills)
            })
            .collect()
    }

    /// All skills, grouped and in display order
    pub fn skills(&self) -> Vec<Arc<Skill>> {
        self.groups()
            .into_iter()
            .flat_map(|(_, skills)| skills)
            .collect()
    }

    pub fn tree(&self) -> &ItemTree {
        &self.tree
    }

    pub fn root(&self) -> ItemId {
        self.root
    }
}

impl PartialEq for SkillTree {
    fn eq(&self, other: &Self) -> bool {
        self.tree.subtree_eq(self.root, &other.tree, other.root)
    }
}
