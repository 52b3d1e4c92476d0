use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub type TagId = Uuid;
pub type CenterId = Uuid;
pub type ProjectId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color_hex: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Center {
    pub id: CenterId,
    pub name: String,
    pub center_url: String,
}

impl fmt::Display for Center {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub center_id: CenterId,
    pub owner_id: Uuid,
    pub open_for_applications: bool,
    pub img_url: String,
    pub team_size: u32,
    /// Backend may omit the field or repeat ids; both collapse into a set.
    #[serde(default, deserialize_with = "tag_id_set")]
    pub tag_ids: BTreeSet<TagId>,
}

impl Project {
    pub fn has_tag(&self, id: &TagId) -> bool {
        self.tag_ids.contains(id)
    }
}

fn tag_id_set<'de, D>(deserializer: D) -> Result<BTreeSet<TagId>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids: Option<Vec<TagId>> = Option::deserialize(deserializer)?;
    Ok(ids.unwrap_or_default().into_iter().collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    ProjectAdmin,
    SuperAdmin,
    User,
}

/// Account as echoed back by the backend. Every field is optional since the
/// response shape is not relied upon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "lenient")]
    pub role: Option<Role>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
