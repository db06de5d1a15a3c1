//! Users of the back-office and the person fields embedded in clients.

use serde::{Deserialize, Serialize};

use super::impl_entity;

/// A person record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default = "super::default_active")]
    pub active: bool,
    #[serde(default)]
    pub date_created: String,
}

impl_entity!(User, "user", "User");

impl User {
    /// "First Last", as the list tables show it.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Full name, or the email when both name parts are blank.
    pub fn display_name(&self) -> String {
        if self.first_name.is_empty() && self.last_name.is_empty() {
            self.email_address.clone()
        } else {
            self.full_name()
        }
    }
}
