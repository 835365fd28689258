use super::events::Notification;
use super::item::ItemKind;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

/// Stable handle to an item in an [`ItemTree`]
///
/// Handles carry a generation so that a handle to a freed slot never
/// resolves to whatever item later reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId {
    index: u32,
    generation: u32,
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) kind: ItemKind,
    /// Non-owning back-reference, only used for upward navigation
    pub(crate) parent: Option<ItemId>,
    /// Child id → child handle, ordered by id
    pub(crate) children: BTreeMap<String, ItemId>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena owning every item of one hierarchy
///
/// Items are created detached through [`ItemTree::new_item`] and attached
/// with [`ItemTree::add_child`]. A detached item stays alive until it is
/// explicitly freed, which lets undo records keep deleted subtrees around.
#[derive(Debug, Clone, Default)]
pub struct ItemTree {
    slots: Vec<Slot>,
    /// Indices of freed slots available for reuse
    free: Vec<u32>,
    notifications: VecDeque<Notification>,
    /// When set, structural notifications are not queued
    muted: bool,
}

impl ItemTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree that never queues notifications
    ///
    /// Used for catalogs, which have no observers.
    pub fn muted() -> Self {
        Self {
            muted: true,
            ..Self::default()
        }
    }

    /// Allocate a detached item
    ///
    /// # Arguments
    /// * `parent` - Back-reference recorded on the item (not attached yet)
    /// * `kind` - The item kind and its payload
    ///
    /// # Returns
    /// The handle of the new item
    pub fn new_item(&mut self, parent: Option<ItemId>, kind: ItemKind) -> ItemId {
        let node = Node {
            kind,
            parent,
            children: BTreeMap::new(),
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            ItemId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            ItemId {
                index,
                generation: 0,
            }
        }
    }

    /// Create an item and attach it to `parent` in one step
    pub fn create_child(&mut self, parent: ItemId, kind: ItemKind) -> ItemId {
        let child = self.new_item(Some(parent), kind);
        self.add_child(parent, child);
        child
    }

    /// Check if the handle resolves to a live item
    pub fn contains(&self, item: ItemId) -> bool {
        self.node(item).is_some()
    }

    /// Number of live items in the arena, attached or not
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn node(&self, item: ItemId) -> Option<&Node> {
        self.slots
            .get(item.index as usize)
            .filter(|slot| slot.generation == item.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn node_mut(&mut self, item: ItemId) -> Option<&mut Node> {
        self.slots
            .get_mut(item.index as usize)
            .filter(|slot| slot.generation == item.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Get the kind of an item
    pub fn kind(&self, item: ItemId) -> Option<&ItemKind> {
        self.node(item).map(|n| &n.kind)
    }

    pub fn kind_mut(&mut self, item: ItemId) -> Option<&mut ItemKind> {
        self.node_mut(item).map(|n| &mut n.kind)
    }

    /// Attach `child` under its own id
    ///
    /// An existing child with the same id is silently replaced
    /// (last write wins). The replaced item is detached but not freed.
    /// A child still attached elsewhere is first detached from its old
    /// parent.
    ///
    /// # Returns
    /// The displaced child, if a different item held the id
    pub fn add_child(&mut self, parent: ItemId, child: ItemId) -> Option<ItemId> {
        let key = self.kind(child)?.id().to_string();
        if !self.contains(parent) {
            return None;
        }
        if let Some(old_parent) = self.node(child)?.parent
            && old_parent != parent
            && self.child(old_parent, &key) == Some(child)
        {
            self.remove_child(old_parent, &key);
        }

        self.notify(Notification::ChildrenAboutToChange(parent));
        let displaced = self
            .node_mut(parent)
            .and_then(|n| n.children.insert(key, child))
            .filter(|old| *old != child);
        if let Some(old) = displaced
            && let Some(node) = self.node_mut(old)
        {
            node.parent = None;
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        self.notify(Notification::ChildrenChanged(parent));
        displaced
    }

    /// Detach the child stored under `key`
    ///
    /// The child is not freed; its parent back-reference is cleared.
    ///
    /// # Returns
    /// The detached child, or `None` if no child has that id
    pub fn remove_child(&mut self, parent: ItemId, key: &str) -> Option<ItemId> {
        if !self.node(parent)?.children.contains_key(key) {
            return None;
        }

        self.notify(Notification::ChildrenAboutToChange(parent));
        let removed = self.node_mut(parent)?.children.remove(key);
        if let Some(child) = removed
            && let Some(node) = self.node_mut(child)
        {
            node.parent = None;
        }
        self.notify(Notification::ChildrenChanged(parent));
        removed
    }

    /// Free an item and its whole subtree
    ///
    /// The item must already be detached; handles into the freed subtree
    /// resolve to nothing afterwards.
    pub fn free_subtree(&mut self, item: ItemId) {
        let mut pending = vec![item];
        while let Some(current) = pending.pop() {
            let Some(slot) = self.slots.get_mut(current.index as usize) else {
                continue;
            };
            if slot.generation != current.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                pending.extend(node.children.into_values());
            }
        }
    }

    /// Queue a notification unless the tree is muted
    pub(crate) fn notify(&mut self, notification: Notification) {
        if self.muted && notification.is_structural() {
            return;
        }
        self.notifications.push_back(notification);
    }

    /// Take every queued notification, oldest first
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }
}
