use crate::plans::PlanData;
use std::borrow::Cow;
use std::sync::{Arc, Weak};

/// An immutable catalog skill
///
/// Skills are owned by a catalog (`SkillTree`) and shared through `Arc`.
/// Plans only hold weak references, so a skill that disappears from the
/// catalog leaves behind level entries that resolve to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    /// Stable catalog identifier (e.g., "3300")
    pub id: String,
    /// Display name (e.g., "Gunnery")
    pub name: String,
    /// Training time multiplier shown next to the name
    pub multiplier: u32,
    /// Trained level, if the catalog describes known skills
    pub level: Option<u8>,
}

impl Skill {
    /// Create a new untrained skill
    pub fn new(id: impl Into<String>, name: impl Into<String>, multiplier: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            multiplier,
            level: None,
        }
    }

    /// Mark the skill as trained to the given level
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }
}

/// Errors raised when resolving catalog references
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("catalog skill '{0}' no longer exists")]
    Expired(String),
}

/// A wanted skill level: weak catalog reference plus the level
#[derive(Debug, Clone)]
pub struct LevelEntry {
    /// Id of the referenced skill, kept even after the skill expires
    pub skill_id: String,
    /// Non-owning reference to the catalog skill
    pub skill: Weak<Skill>,
    /// Wanted level (0 or greater)
    pub level: u8,
}

impl LevelEntry {
    pub fn new(skill: &Arc<Skill>, level: u8) -> Self {
        Self {
            skill_id: skill.id.clone(),
            skill: Arc::downgrade(skill),
            level,
        }
    }

    /// Resolve the catalog skill
    ///
    /// # Returns
    /// The skill, or `SkillError::Expired` if the catalog dropped it
    pub fn resolve(&self) -> Result<Arc<Skill>, SkillError> {
        self.skill
            .upgrade()
            .ok_or_else(|| SkillError::Expired(self.skill_id.clone()))
    }

    /// Display name of the referenced skill, empty once it expired
    pub fn name(&self) -> String {
        self.skill
            .upgrade()
            .map(|s| s.name.clone())
            .unwrap_or_default()
    }
}

impl PartialEq for LevelEntry {
    fn eq(&self, other: &Self) -> bool {
        self.skill_id == other.skill_id && self.level == other.level
    }
}

/// Node kind of an item in the tree
///
/// Groups and plans carry their own id and name. Skill and level nodes are
/// catalog-backed: their id and name derive from the referenced skill and
/// they are always leaves.
#[derive(Debug, Clone)]
pub enum ItemKind {
    /// A named container
    Group { id: String, name: String },
    /// A leaf wrapping a catalog skill
    Skill(Arc<Skill>),
    /// A leaf annotating a catalog skill with a wanted level
    Level(LevelEntry),
    /// A named collection of level entries
    Plan(PlanData),
}

impl ItemKind {
    pub fn group(id: impl Into<String>, name: impl Into<String>) -> Self {
        ItemKind::Group {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Identifier under which the item is stored in its parent
    pub fn id(&self) -> &str {
        match self {
            ItemKind::Group { id, .. } => id,
            ItemKind::Skill(skill) => &skill.id,
            ItemKind::Level(entry) => &entry.skill_id,
            ItemKind::Plan(plan) => &plan.id,
        }
    }

    /// Display name
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            ItemKind::Group { name, .. } => Cow::Borrowed(name),
            ItemKind::Skill(skill) => Cow::Borrowed(&skill.name),
            ItemKind::Level(entry) => Cow::Owned(entry.name()),
            ItemKind::Plan(plan) => Cow::Borrowed(&plan.name),
        }
    }

    /// Check if this item wraps a catalog skill (a leaf for display purposes)
    pub fn is_skill(&self) -> bool {
        matches!(self, ItemKind::Skill(_) | ItemKind::Level(_))
    }

    /// Check if this item is a plan
    pub fn is_plan(&self) -> bool {
        matches!(self, ItemKind::Plan(_))
    }

    /// Identity comparison used by structural equality
    ///
    /// Kinds must match; levels also compare their level value.
    pub(crate) fn same_identity(&self, other: &ItemKind) -> bool {
        match (self, other) {
            (ItemKind::Group { id: a, name: an }, ItemKind::Group { id: b, name: bn }) => {
                a == b && an == bn
            }
            (ItemKind::Skill(a), ItemKind::Skill(b)) => a.id == b.id && a.name == b.name,
            (ItemKind::Level(a), ItemKind::Level(b)) => a == b && a.name() == b.name(),
            (ItemKind::Plan(a), ItemKind::Plan(b)) => a.id == b.id && a.name == b.name,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_entry_expires_with_catalog_skill() {
        let skill = Arc::new(Skill::new("3300", "Gunnery", 1));
        let entry = LevelEntry::new(&skill, 3);
        assert_eq!(entry.name(), "Gunnery");
        assert!(entry.resolve().is_ok());

        drop(skill);
        assert_eq!(entry.name(), "");
        assert_eq!(entry.skill_id, "3300");
        assert!(matches!(entry.resolve(), Err(SkillError::Expired(id)) if id == "3300"));
    }

    #[test]
    fn test_catalog_backed_kinds_are_skills() {
        let skill = Arc::new(Skill::new("3300", "Gunnery", 1));
        assert!(ItemKind::Skill(skill.clone()).is_skill());
        assert!(ItemKind::Level(LevelEntry::new(&skill, 1)).is_skill());
        assert!(!ItemKind::group("255", "Gunnery").is_skill());
    }

    #[test]
    fn test_level_identity_includes_level_value() {
        let skill = Arc::new(Skill::new("3300", "Gunnery", 1));
        let a = ItemKind::Level(LevelEntry::new(&skill, 3));
        let b = ItemKind::Level(LevelEntry::new(&skill, 3));
        let c = ItemKind::Level(LevelEntry::new(&skill, 4));
        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&c));
        assert!(!a.same_identity(&ItemKind::group("3300", "Gunnery")));
    }
}
