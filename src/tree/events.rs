use super::item_tree::ItemId;

/// Change notifications observed by the presentation layer
///
/// Notifications are queued strictly after the state change they describe
/// (except `ChildrenAboutToChange`, which precedes it) and are delivered in the
/// order: about-to-change, mutate, changed, then save/available-changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The children of the given item are about to change
    ChildrenAboutToChange(ItemId),
    /// The children of the given item have changed
    ChildrenChanged(ItemId),
    /// The registry has unsaved changes, optionally attributed to one plan
    WantsToSave(Option<ItemId>),
    /// The set of plans in the registry has changed
    AvailablePlansChanged,
}

impl Notification {
    /// Check if this notification describes a structural tree change
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Notification::ChildrenAboutToChange(_) | Notification::ChildrenChanged(_)
        )
    }
}
