use std::collections::HashMap;

use serde::Deserialize;

use crate::models::{Center, CenterId, Project, Tag, TagId};

/// Response body that is either one record or an array of them.
///
/// The backend sends a bare object when exactly one record exists.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        value.into_vec()
    }
}

/// Every selectable tag, in the order the backend returned them.
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    tags: Vec<Tag>,
    index: HashMap<TagId, usize>,
}

impl TagCatalog {
    pub fn new(tags: Vec<Tag>) -> Self {
        let index = tags.iter().enumerate().map(|(i, tag)| (tag.id, i)).collect();
        Self { tags, index }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn get(&self, id: &TagId) -> Option<&Tag> {
        self.index.get(id).map(|&i| &self.tags[i])
    }

    pub fn contains(&self, id: &TagId) -> bool {
        self.index.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Looks a tag up by id or, failing that, by case-insensitive name.
    pub fn resolve(&self, key: &str) -> Option<&Tag> {
        if let Ok(id) = key.parse::<TagId>()
            && let Some(tag) = self.get(&id)
        {
            return Some(tag);
        }
        self.tags.iter().find(|tag| tag.name.eq_ignore_ascii_case(key))
    }

    /// Tags of `project` in catalog order; ids unknown to the catalog are dropped.
    pub fn tags_of(&self, project: &Project) -> Vec<&Tag> {
        self.tags.iter().filter(|tag| project.has_tag(&tag.id)).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CenterCatalog {
    centers: Vec<Center>,
}

impl CenterCatalog {
    pub fn new(centers: Vec<Center>) -> Self {
        Self { centers }
    }

    pub fn centers(&self) -> &[Center] {
        &self.centers
    }

    pub fn get(&self, id: &CenterId) -> Option<&Center> {
        self.centers.iter().find(|center| &center.id == id)
    }

    pub fn resolve(&self, key: &str) -> Option<&Center> {
        if let Ok(id) = key.parse::<CenterId>()
            && let Some(center) = self.get(&id)
        {
            return Some(center);
        }
        self.centers.iter().find(|center| center.name.eq_ignore_ascii_case(key))
    }
}
