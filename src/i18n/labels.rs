//! Typed label trees deserialized from the labels JSON.
//!
//! Every struct defaults missing keys to empty strings so a partial translation still loads.

use serde::{Deserialize, Serialize};

use crate::models::{STATUS_ACTIVE, STATUS_INACTIVE, STATUS_PROSPECT};
use crate::views::TableLabels;

/// Root of the labels document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Labels {
    pub common: CommonLabels,
    pub client: ModuleLabels,
    pub client_tag: ModuleLabels,
    pub user: ModuleLabels,
    pub location: ModuleLabels,
    pub role: ModuleLabels,
    pub permission: ModuleLabels,
    pub workspace: ModuleLabels,
    pub role_permission: ModuleLabels,
    pub role_user: ModuleLabels,
    pub user_role: ModuleLabels,
    pub dashboard: DashboardLabels,
    pub login: LoginLabels,
    pub login02: Login02Labels,
}

/// Labels shared by every page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommonLabels {
    pub table: TableLabels,
    pub bulk: BulkLabels,
    pub status: StatusLabels,
    pub yes: String,
    pub no: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BulkLabels {
    pub select_all: String,
    pub selected: String,
    pub clear_selection: String,
    pub delete: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusLabels {
    pub active: String,
    pub inactive: String,
    pub prospect: String,
}

/// Labels for one entity module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModuleLabels {
    pub page: PageLabels,
    pub buttons: ButtonLabels,
    pub columns: ColumnLabels,
    pub empty: EmptyLabels,
    pub form: FormLabels,
    pub actions: ActionLabels,
    pub detail: DetailLabels,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageLabels {
    pub heading: String,
    pub heading_active: String,
    pub heading_inactive: String,
    pub heading_prospect: String,
    pub caption: String,
    pub caption_active: String,
    pub caption_inactive: String,
    pub caption_prospect: String,
}

impl PageLabels {
    /// Heading for a status list; unknown statuses get the generic heading.
    pub fn heading_for(&self, status: &str) -> &str {
        match status {
            STATUS_ACTIVE => &self.heading_active,
            STATUS_INACTIVE => &self.heading_inactive,
            STATUS_PROSPECT => &self.heading_prospect,
            _ => &self.heading,
        }
    }

    pub fn caption_for(&self, status: &str) -> &str {
        match status {
            STATUS_ACTIVE => &self.caption_active,
            STATUS_INACTIVE => &self.caption_inactive,
            STATUS_PROSPECT => &self.caption_prospect,
            _ => &self.caption,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonLabels {
    pub add: String,
    pub assign: String,
}

/// Column headers; each table reads the keys it shows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnLabels {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub mobile: String,
    pub address: String,
    pub description: String,
    pub color: String,
    pub code: String,
    pub permission_code: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub private: String,
    pub roles: String,
    pub tags: String,
    pub customers: String,
    pub status: String,
    pub permission_name: String,
    pub user_name: String,
    pub role_name: String,
    pub date_assigned: String,
}

/// Empty-state text; the active variant doubles as the fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmptyLabels {
    pub title: String,
    pub message: String,
    pub active_title: String,
    pub active_message: String,
    pub inactive_title: String,
    pub inactive_message: String,
    pub prospect_title: String,
    pub prospect_message: String,
}

impl EmptyLabels {
    pub fn title_for(&self, status: &str) -> &str {
        match status {
            STATUS_INACTIVE => &self.inactive_title,
            STATUS_PROSPECT => &self.prospect_title,
            _ => &self.active_title,
        }
    }

    pub fn message_for(&self, status: &str) -> &str {
        match status {
            STATUS_INACTIVE => &self.inactive_message,
            STATUS_PROSPECT => &self.prospect_message,
            _ => &self.active_message,
        }
    }
}

/// Drawer form field labels and placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormLabels {
    pub first_name: String,
    pub first_name_placeholder: String,
    pub last_name: String,
    pub last_name_placeholder: String,
    pub email: String,
    pub email_placeholder: String,
    pub mobile: String,
    pub mobile_placeholder: String,
    pub name: String,
    pub name_placeholder: String,
    pub description: String,
    pub description_placeholder: String,
    pub address: String,
    pub address_placeholder: String,
    pub color: String,
    pub color_placeholder: String,
    pub code: String,
    pub code_placeholder: String,
    pub permission_code: String,
    pub permission_code_placeholder: String,
    pub permission_type: String,
    pub private: String,
    pub active: String,
    pub company_name: String,
    pub company_name_placeholder: String,
    pub customer_type: String,
    pub date_of_birth: String,
    pub street_address: String,
    pub street_address_placeholder: String,
    pub city: String,
    pub city_placeholder: String,
    pub province: String,
    pub province_placeholder: String,
    pub postal_code: String,
    pub postal_code_placeholder: String,
    pub notes: String,
    pub notes_placeholder: String,
    pub tags: String,
    pub tags_placeholder: String,
    pub tags_search_placeholder: String,
    pub tags_no_results: String,
    pub permission: String,
    pub user: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionLabels {
    pub view: String,
    pub edit: String,
    pub delete: String,
    pub activate: String,
    pub deactivate: String,
    pub assign: String,
    pub remove: String,
    pub manage_permissions: String,
    pub manage_roles: String,
    pub manage_users: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailLabels {
    pub tabs: TabLabels,
    pub sections: SectionLabels,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TabLabels {
    pub info: String,
    pub basic: String,
    pub history: String,
    pub permissions: String,
    pub users: String,
    pub roles: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionLabels {
    pub company: String,
    pub personal: String,
    pub address: String,
    pub notes: String,
    pub tags: String,
    pub lifetime_spend: String,
    pub total_orders: String,
    pub avg_order_value: String,
    pub last_purchase: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardLabels {
    pub clients_title: String,
    pub users_title: String,
    pub total_users: String,
    pub active_users: String,
    pub inactive_users: String,
    pub total_roles: String,
    pub recent_activity: String,
    pub new_user: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginLabels {
    pub title: String,
    pub email: String,
    pub password: String,
    pub submit: String,
    pub forgot_link: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Login02Labels {
    pub title: String,
    pub heading: String,
    pub subheading: String,
    pub email_label: String,
    pub email_placeholder: String,
    pub password_label: String,
    pub password_placeholder: String,
    pub remember_me: String,
    pub forgot_password: String,
    pub sign_in_button: String,
    pub no_account: String,
    pub sign_up_link: String,
    pub social_divider: String,
    pub error: String,
}
