//! Categories (shown as client tags) and the client-category junction.

use serde::{Deserialize, Serialize};

use super::impl_entity;

/// Module value of categories that tag clients.
pub const CLIENT_MODULE: &str = "client";

/// A category scoped to one module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub module: String,
    #[serde(default = "super::default_active")]
    pub active: bool,
    #[serde(default)]
    pub date_created: String,
}

impl_entity!(Category, "category", "Tag");

impl Category {
    pub fn is_client_tag(&self) -> bool {
        self.module == CLIENT_MODULE
    }
}

/// Junction row tagging a client with a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCategory {
    #[serde(default)]
    pub id: String,
    pub client_id: String,
    pub category_id: String,
    #[serde(default = "super::default_active")]
    pub active: bool,
    #[serde(default)]
    pub date_created: String,
}

impl_entity!(ClientCategory, "client_category", "Client tag");
