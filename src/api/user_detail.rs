//! User detail page: info and roles tabs.

use axum::extract::{Path, Query, State};
use serde::Serialize;

use super::crud::Resource;
use super::{roles_for_user, user_roles_table};
use crate::i18n::ModuleLabels;
use crate::models::{Entity, User, STATUS_ACTIVE};
use crate::views::routes::{USERS, USER_ROLES};
use crate::views::{
    activate_tab, format_date, status_variant, Page, PageData, PageResult, TabItem, TabQuery,
    TableConfig, ViewContext,
};
use crate::AppState;

const TAB_INFO: &str = "info";
const TAB_ROLES: &str = "roles";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    #[serde(flatten)]
    pub page: PageData,
    pub content_template: String,
    pub labels: ModuleLabels,
    pub active_tab: String,
    pub tab_items: Vec<TabItem>,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_mobile: String,
    pub user_status: String,
    pub status_variant: String,
    pub date_created: String,
    pub role_names: Vec<String>,
    pub edit_url: String,
    pub back_url: String,
    pub roles_url: String,
    pub table: Option<TableConfig>,
}

fn resource(state: &AppState) -> Resource<'_, User> {
    Resource::new(state.stores.users.as_ref(), &USERS)
}

fn tab_items(id: &str, l: &ModuleLabels, active: &str, roles: usize) -> Vec<TabItem> {
    let tabs = &l.detail.tabs;
    let mut items = vec![
        TabItem::new(
            TAB_INFO,
            &tabs.info,
            USERS.detail_tab(id, TAB_INFO),
            USERS.tab_action(id, TAB_INFO),
            "icon-info",
        ),
        TabItem::new(
            TAB_ROLES,
            &tabs.roles,
            USERS.detail_tab(id, TAB_ROLES),
            USERS.tab_action(id, TAB_ROLES),
            "icon-shield",
        )
        .count(roles),
    ];
    activate_tab(&mut items, active);
    items
}

/// Sorted, de-duplicated names of the roles the user holds.
async fn role_names(state: &AppState, user_id: &str) -> Vec<String> {
    match roles_for_user(state, user_id).await {
        Ok(items) => {
            let mut names: Vec<String> = items.into_iter().map(|item| item.role.name).collect();
            names.sort();
            names.dedup();
            names
        }
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to load user roles");
            Vec::new()
        }
    }
}

async fn build_detail(state: &AppState, ctx: &ViewContext, user: User, tab: String) -> UserDetail {
    let l = &ctx.i18n.labels().user;
    let status = user.status();
    let name = user.display_name();
    let role_names = role_names(state, &user.id).await;

    let table = if tab == TAB_ROLES {
        match user_roles_table(state, ctx, &user.id).await {
            Ok(table) => Some(table),
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Failed to build user roles tab");
                None
            }
        }
    } else {
        None
    };

    let page = ctx
        .page(&name, "users", "users-active")
        .subtitle(&user.email_address)
        .icon("icon-user");

    UserDetail {
        page,
        content_template: "user-detail-content".to_string(),
        labels: l.clone(),
        tab_items: tab_items(&user.id, l, &tab, role_names.len()),
        active_tab: tab,
        user_status: status.to_string(),
        status_variant: status_variant(status).to_string(),
        edit_url: USERS.edit(&user.id),
        back_url: USERS.list(STATUS_ACTIVE),
        roles_url: USER_ROLES.page(&user.id),
        date_created: format_date(&user.date_created),
        user_id: user.id,
        user_name: name,
        user_email: user.email_address,
        user_mobile: user.mobile_number,
        role_names,
        table,
    }
}

/// GET /app/users/detail/{id}?tab=info|roles
pub async fn user_detail(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
    Query(query): Query<TabQuery>,
) -> PageResult<UserDetail> {
    let user = resource(&state).read_for_page(&id).await?;
    let detail = build_detail(&state, &ctx, user, query.or(TAB_INFO)).await;
    Ok(Page::new("user-detail", detail))
}

/// GET /action/users/{id}/tab/{tab}
pub async fn user_tab(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path((id, tab)): Path<(String, String)>,
) -> PageResult<UserDetail> {
    let user = resource(&state).read_for_page(&id).await?;
    let template = format!("user-tab-{}", tab);
    let detail = build_detail(&state, &ctx, user, tab).await;
    Ok(Page::new(template, detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_tab_count() {
        let items = tab_items("u1", &ModuleLabels::default(), TAB_ROLES, 3);

        assert_eq!(items[1].count, 3);
        assert!(items[1].active);
        assert_eq!(items[1].href, "/app/users/detail/u1?tab=roles");
    }
}
