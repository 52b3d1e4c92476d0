use crate::{
    core::selection::TagSelectionSet,
    models::{Project, TagId},
};

/// Tags to associate with and disassociate from a project being
/// created or edited.
///
/// The two sets are tracked independently and are never forced to be
/// disjoint; an id present in both is sent as-is and [`conflicts`]
/// reports it.
///
/// [`conflicts`]: TagsEditor::conflicts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagsEditor {
    to_add: TagSelectionSet,
    to_remove: TagSelectionSet,
}

impl TagsEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the add set with the project's current tags so an unchanged
    /// save resends them; the backend treats re-adding as a no-op.
    pub fn for_project(project: &Project) -> Self {
        Self {
            to_add: project.tag_ids.iter().copied().collect(),
            to_remove: TagSelectionSet::new(),
        }
    }

    pub fn toggle_add(&mut self, id: TagId) {
        self.to_add.toggle(id);
    }

    pub fn toggle_remove(&mut self, id: TagId) {
        self.to_remove.toggle(id);
    }

    pub fn select_add(&mut self, id: TagId) {
        self.to_add.insert(id);
    }

    pub fn select_remove(&mut self, id: TagId) {
        self.to_remove.insert(id);
    }

    pub fn clear_add(&mut self) {
        self.to_add.clear();
    }

    pub fn clear_remove(&mut self) {
        self.to_remove.clear();
    }

    pub fn to_add(&self) -> &TagSelectionSet {
        &self.to_add
    }

    pub fn to_remove(&self) -> &TagSelectionSet {
        &self.to_remove
    }

    /// Ids that are queued both for addition and removal.
    pub fn conflicts(&self) -> Vec<TagId> {
        self.to_add.intersection(&self.to_remove).copied().collect()
    }
}
