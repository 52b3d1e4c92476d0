use std::collections::BTreeSet;

use crate::models::TagId;

/// Set of tag ids chosen by the user, either as listing filters or as
/// tags to associate with a project.
///
/// Ordering carries no meaning; views display chips in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelectionSet {
    ids: BTreeSet<TagId>,
}

impl TagSelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` when absent, removes it when present.
    pub fn toggle(&mut self, id: TagId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn insert(&mut self, id: TagId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: &TagId) -> bool {
        self.ids.remove(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &TagId) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagId> {
        self.ids.iter()
    }

    pub fn is_subset_of(&self, other: &BTreeSet<TagId>) -> bool {
        self.ids.is_subset(other)
    }

    pub fn intersection<'a>(
        &'a self,
        other: &'a TagSelectionSet,
    ) -> impl Iterator<Item = &'a TagId> {
        self.ids.intersection(&other.ids)
    }

    pub fn to_vec(&self) -> Vec<TagId> {
        self.ids.iter().copied().collect()
    }
}

impl FromIterator<TagId> for TagSelectionSet {
    fn from_iter<I: IntoIterator<Item = TagId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TagSelectionSet {
    type Item = &'a TagId;
    type IntoIter = std::collections::btree_set::Iter<'a, TagId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
