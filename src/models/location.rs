use serde::{Deserialize, Serialize};

use super::impl_entity;

/// A physical branch or store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "super::default_active")]
    pub active: bool,
    #[serde(default)]
    pub date_created: String,
}

impl_entity!(Location, "location", "Location");
