//! Roles, permissions and the role-permission junction.

use serde::{Deserialize, Serialize};

use super::impl_entity;

/// A named bundle of permissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default = "super::default_active")]
    pub active: bool,
    #[serde(default)]
    pub date_created: String,
}

impl_entity!(Role, "role", "Role");

/// Whether a permission grants or denies its code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionType {
    #[default]
    #[serde(rename = "PERMISSION_TYPE_ALLOW")]
    Allow,
    #[serde(rename = "PERMISSION_TYPE_DENY")]
    Deny,
}

impl PermissionType {
    /// Parse the form value; anything but the deny value means allow.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "PERMISSION_TYPE_DENY" => PermissionType::Deny,
            _ => PermissionType::Allow,
        }
    }

    /// Value posted by the drawer form select.
    pub fn form_value(self) -> &'static str {
        match self {
            PermissionType::Allow => "PERMISSION_TYPE_ALLOW",
            PermissionType::Deny => "PERMISSION_TYPE_DENY",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PermissionType::Allow => "Allow",
            PermissionType::Deny => "Deny",
        }
    }

    /// Badge variant for the type column.
    pub fn variant(self) -> &'static str {
        match self {
            PermissionType::Allow => "success",
            PermissionType::Deny => "danger",
        }
    }
}

/// A single grantable capability, e.g. `clients:write`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permission_code: String,
    #[serde(default)]
    pub permission_type: PermissionType,
    #[serde(default)]
    pub description: String,
    #[serde(default = "super::default_active")]
    pub active: bool,
    #[serde(default)]
    pub date_created: String,
}

impl_entity!(Permission, "permission", "Permission");

/// Junction row assigning a permission to a role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermission {
    #[serde(default)]
    pub id: String,
    pub role_id: String,
    pub permission_id: String,
    #[serde(default = "super::default_active")]
    pub active: bool,
    #[serde(default)]
    pub date_created: String,
}

impl_entity!(RolePermission, "role_permission", "Role-Permission");
