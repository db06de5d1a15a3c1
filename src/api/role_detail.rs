//! Role detail page: info, permissions and users tabs.

use axum::extract::{Path, Query, State};
use serde::Serialize;

use super::crud::Resource;
use super::{permissions_for_role, role_permissions_table, role_users_table, users_for_role};
use crate::i18n::ModuleLabels;
use crate::models::{Entity, Role, STATUS_ACTIVE};
use crate::views::routes::{ROLES, ROLE_PERMISSIONS, ROLE_USERS};
use crate::views::{
    activate_tab, status_variant, Page, PageData, PageResult, TabItem, TabQuery, TableConfig,
    ViewContext,
};
use crate::AppState;

const TAB_INFO: &str = "info";
const TAB_PERMISSIONS: &str = "permissions";
const TAB_USERS: &str = "users";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDetail {
    #[serde(flatten)]
    pub page: PageData,
    pub content_template: String,
    pub labels: ModuleLabels,
    pub active_tab: String,
    pub tab_items: Vec<TabItem>,
    pub role_id: String,
    pub role_name: String,
    pub role_description: String,
    pub role_color: String,
    pub role_status: String,
    pub status_variant: String,
    pub edit_url: String,
    pub back_url: String,
    pub permissions_url: String,
    pub users_url: String,
    pub permission_count: usize,
    pub user_count: usize,
    /// Table of the permissions or users tab; absent on the info tab.
    pub table: Option<TableConfig>,
}

fn resource(state: &AppState) -> Resource<'_, Role> {
    Resource::new(state.stores.roles.as_ref(), &ROLES)
}

fn tab_items(
    id: &str,
    l: &ModuleLabels,
    active: &str,
    permissions: usize,
    users: usize,
) -> Vec<TabItem> {
    let tabs = &l.detail.tabs;
    let tab = |key: &str, label: &str, icon: &str| {
        TabItem::new(
            key,
            label,
            ROLES.detail_tab(id, key),
            ROLES.tab_action(id, key),
            icon,
        )
    };

    let mut items = vec![
        tab(TAB_INFO, &tabs.info, "icon-info"),
        tab(TAB_PERMISSIONS, &tabs.permissions, "icon-key").count(permissions),
        tab(TAB_USERS, &tabs.users, "icon-users").count(users),
    ];
    activate_tab(&mut items, active);
    items
}

async fn count_permissions(state: &AppState, role_id: &str) -> usize {
    match permissions_for_role(state, role_id).await {
        Ok(items) => items.len(),
        Err(e) => {
            tracing::warn!(role_id = %role_id, error = %e, "Failed to count role permissions");
            0
        }
    }
}

async fn count_users(state: &AppState, role_id: &str) -> usize {
    match users_for_role(state, role_id).await {
        Ok(items) => items.len(),
        Err(e) => {
            tracing::warn!(role_id = %role_id, error = %e, "Failed to count role users");
            0
        }
    }
}

/// Table for the permissions or users tab. Load failures leave it empty.
async fn tab_table(
    state: &AppState,
    ctx: &ViewContext,
    role_id: &str,
    tab: &str,
) -> Option<TableConfig> {
    let result = match tab {
        TAB_PERMISSIONS => role_permissions_table(state, ctx, role_id).await,
        TAB_USERS => role_users_table(state, ctx, role_id).await,
        _ => return None,
    };

    match result {
        Ok(table) => Some(table),
        Err(e) => {
            tracing::error!(role_id = %role_id, tab = %tab, error = %e, "Failed to build role tab");
            None
        }
    }
}

async fn build_detail(state: &AppState, ctx: &ViewContext, role: Role, tab: String) -> RoleDetail {
    let l = &ctx.i18n.labels().role;
    let status = role.status();
    let permission_count = count_permissions(state, &role.id).await;
    let user_count = count_users(state, &role.id).await;
    let table = tab_table(state, ctx, &role.id, &tab).await;

    let page = ctx
        .page(&role.name, "users", "roles-active")
        .subtitle(&role.description)
        .icon("icon-shield");

    RoleDetail {
        page,
        content_template: "role-detail-content".to_string(),
        labels: l.clone(),
        tab_items: tab_items(&role.id, l, &tab, permission_count, user_count),
        active_tab: tab,
        permissions_url: ROLE_PERMISSIONS.page(&role.id),
        users_url: ROLE_USERS.page(&role.id),
        edit_url: ROLES.edit(&role.id),
        back_url: ROLES.list(STATUS_ACTIVE),
        role_status: status.to_string(),
        status_variant: status_variant(status).to_string(),
        role_id: role.id,
        role_name: role.name,
        role_description: role.description,
        role_color: role.color,
        permission_count,
        user_count,
        table,
    }
}

/// GET /app/roles/detail/{id}?tab=info|permissions|users
pub async fn role_detail(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
    Query(query): Query<TabQuery>,
) -> PageResult<RoleDetail> {
    let role = resource(&state).read_for_page(&id).await?;
    let detail = build_detail(&state, &ctx, role, query.or(TAB_INFO)).await;
    Ok(Page::new("role-detail", detail))
}

/// GET /action/roles/{id}/tab/{tab}
pub async fn role_tab(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path((id, tab)): Path<(String, String)>,
) -> PageResult<RoleDetail> {
    let role = resource(&state).read_for_page(&id).await?;
    let template = format!("role-tab-{}", tab);
    let detail = build_detail(&state, &ctx, role, tab).await;
    Ok(Page::new(template, detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_items_carry_counts() {
        let items = tab_items("r1", &ModuleLabels::default(), TAB_USERS, 4, 2);

        let keys: Vec<_> = items.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, ["info", "permissions", "users"]);
        assert_eq!(items[1].count, 4);
        assert_eq!(items[2].count, 2);
        assert!(items[2].active);
        assert_eq!(items[1].hx_get, "/action/roles/r1/tab/permissions");
    }

    #[test]
    fn test_unknown_tab_activates_nothing() {
        let items = tab_items("r1", &ModuleLabels::default(), "audit", 0, 0);
        assert!(items.iter().all(|t| !t.active));
    }
}
