//! Lookup and traversal methods for ItemTree
//!
//! These are the navigation operations shared by every item kind: direct
//! child lookup, display ordering, find-or-create groups, recursive skill
//! search and structural equality.

use super::item::ItemKind;
use super::item_tree::{ItemId, ItemTree};
use std::borrow::Cow;

impl ItemTree {
    /// Get the id of an item
    pub fn id(&self, item: ItemId) -> Option<&str> {
        self.kind(item).map(|k| k.id())
    }

    /// Get the display name of an item
    pub fn name(&self, item: ItemId) -> Option<Cow<'_, str>> {
        self.kind(item).map(|k| k.name())
    }

    /// Check if an item wraps a catalog skill
    pub fn is_skill(&self, item: ItemId) -> bool {
        self.kind(item).is_some_and(|k| k.is_skill())
    }

    /// Level shown for an item
    ///
    /// Level entries report their wanted level, catalog skills their trained
    /// level. Everything else has no level.
    pub fn level(&self, item: ItemId) -> Option<u8> {
        match self.kind(item)? {
            ItemKind::Level(entry) => Some(entry.level),
            ItemKind::Skill(skill) => skill.level,
            _ => None,
        }
    }

    /// Training multiplier of the catalog skill behind an item
    pub fn multiplier(&self, item: ItemId) -> Option<u32> {
        match self.kind(item)? {
            ItemKind::Skill(skill) => Some(skill.multiplier),
            ItemKind::Level(entry) => entry.skill.upgrade().map(|s| s.multiplier),
            _ => None,
        }
    }

    /// Resolve the parent back-reference
    ///
    /// # Returns
    /// The parent, or `None` for roots, detached items and freed parents
    pub fn parent(&self, item: ItemId) -> Option<ItemId> {
        self.node(item)?.parent.filter(|p| self.contains(*p))
    }

    /// Get all children sorted ascending by display name
    ///
    /// Children sharing a name come out in id order.
    pub fn children(&self, item: ItemId) -> Vec<ItemId> {
        let Some(node) = self.node(item) else {
            return Vec::new();
        };
        let mut children: Vec<(Cow<'_, str>, ItemId)> = node
            .children
            .values()
            .filter_map(|child| Some((self.name(*child)?, *child)))
            .collect();
        // Stable sort over the id-ordered map: equal names keep id order
        children.sort_by(|a, b| a.0.cmp(&b.0));
        children.into_iter().map(|(_, child)| child).collect()
    }

    /// Number of direct children
    pub fn child_count(&self, item: ItemId) -> usize {
        self.node(item).map(|n| n.children.len()).unwrap_or(0)
    }

    /// Look up a direct child by id
    pub fn child(&self, item: ItemId, id: &str) -> Option<ItemId> {
        self.node(item)?.children.get(id).copied()
    }

    pub fn has_child(&self, item: ItemId, id: &str) -> bool {
        self.child(item, id).is_some()
    }

    /// Get a child with the matching id, and if none exists create such a
    /// group with the given name.
    pub fn group(&mut self, parent: ItemId, id: &str, name: &str) -> ItemId {
        if let Some(existing) = self.child(parent, id) {
            return existing;
        }
        self.create_child(parent, ItemKind::group(id, name))
    }

    /// Recurse down until finding a catalog-backed item with the matching id
    ///
    /// A catalog-backed item only matches itself. A container first checks
    /// its direct child with that id and returns it if catalog-backed;
    /// otherwise every child is searched in display order and the first
    /// match wins.
    pub fn find_skill_item(&self, item: ItemId, id: &str) -> Option<ItemId> {
        let kind = self.kind(item)?;
        if kind.is_skill() {
            return (kind.id() == id).then_some(item);
        }

        if let Some(child) = self.child(item, id)
            && self.is_skill(child)
        {
            return Some(child);
        }

        self.children(item)
            .into_iter()
            .find_map(|child| self.find_skill_item(child, id))
    }

    /// Structural equality between two subtrees, possibly of different trees
    ///
    /// Compares identity (id, name, level) and the name-ordered children
    /// pairwise. Parent identity is not part of equality.
    pub fn subtree_eq(&self, item: ItemId, other: &ItemTree, other_item: ItemId) -> bool {
        let (Some(kind), Some(other_kind)) = (self.kind(item), other.kind(other_item)) else {
            return false;
        };
        if !kind.same_identity(other_kind) {
            return false;
        }

        let mine = self.children(item);
        let theirs = other.children(other_item);
        mine.len() == theirs.len()
            && mine
                .iter()
                .zip(theirs.iter())
                .all(|(a, b)| self.subtree_eq(*a, other, *b))
    }
}
