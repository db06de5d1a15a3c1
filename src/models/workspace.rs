//! Workspaces and the membership junctions that carry user roles.

use serde::{Deserialize, Serialize};

use super::impl_entity;

/// A tenant workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default = "super::default_active")]
    pub active: bool,
    #[serde(default)]
    pub date_created: String,
}

impl_entity!(Workspace, "workspace", "Workspace");

/// Membership of a user in a workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub workspace_id: String,
    pub user_id: String,
    #[serde(default = "super::default_active")]
    pub active: bool,
    #[serde(default)]
    pub date_created: String,
}

impl_entity!(WorkspaceUser, "workspace_user", "Workspace user");

/// Junction row assigning a role to a workspace membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceUserRole {
    #[serde(default)]
    pub id: String,
    pub workspace_user_id: String,
    pub role_id: String,
    #[serde(default = "super::default_active")]
    pub active: bool,
    #[serde(default)]
    pub date_created: String,
}

impl_entity!(WorkspaceUserRole, "workspace_user_role", "Workspace-User-Role");
