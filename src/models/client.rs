//! Client records: a person plus optional CRM fields.

use serde::{Deserialize, Serialize};

use super::{Entity, User};

/// A customer of the business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user: User,
    #[serde(default = "super::default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub date_created: String,
}

impl Entity for Client {
    const COLLECTION: &'static str = "client";
    const LABEL: &'static str = "Client";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn date_created(&self) -> &str {
        &self.date_created
    }

    fn set_date_created(&mut self, date_created: String) {
        self.date_created = date_created;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
        self.user.active = active;
    }
}

impl Client {
    /// "First Last", else the email, else the record id.
    pub fn display_name(&self) -> String {
        let user = &self.user;
        if !user.first_name.is_empty() || !user.last_name.is_empty() {
            return user.full_name();
        }
        if !user.email_address.is_empty() {
            return user.email_address.clone();
        }
        self.id.clone()
    }

    /// Non-empty address parts joined with ", ".
    pub fn full_address(&self) -> String {
        [
            &self.street_address,
            &self.city,
            &self.province,
            &self.postal_code,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{STATUS_ACTIVE, STATUS_INACTIVE};

    fn client(first: &str, last: &str, email: &str) -> Client {
        Client {
            id: "c1".to_string(),
            user: User {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email_address: email.to_string(),
                ..Default::default()
            },
            active: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(client("Ana", "Cruz", "ana@x.ph").display_name(), "Ana Cruz");
        assert_eq!(client("", "", "ana@x.ph").display_name(), "ana@x.ph");
        assert_eq!(client("", "", "").display_name(), "c1");
    }

    #[test]
    fn test_full_address_skips_blank_parts() {
        let mut c = client("Ana", "Cruz", "");
        c.street_address = Some("12 Mabini St".to_string());
        c.city = Some(String::new());
        c.province = Some("Cebu".to_string());
        c.postal_code = Some("6000".to_string());

        assert_eq!(c.full_address(), "12 Mabini St, Cebu, 6000");
    }

    #[test]
    fn test_prospect_type_keeps_record_status() {
        let mut c = client("Ana", "Cruz", "");
        c.customer_type = Some("Prospect".to_string());
        assert_eq!(c.status(), STATUS_ACTIVE);

        c.set_active(false);
        assert_eq!(c.status(), STATUS_INACTIVE);
        assert!(!c.user.active);
    }
}
