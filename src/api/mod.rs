//! Page builders and action handlers.
//!
//! One module per entity; shared delete/status actions live in [`crud`].

mod client_detail;
mod client_tags;
mod clients;
pub mod crud;
mod dashboards;
mod junction;
mod locations;
mod login;
mod permissions;
mod role_detail;
mod role_permissions;
mod role_users;
mod roles;
mod user_detail;
mod user_roles;
mod users;
mod workspaces;

pub use client_detail::*;
pub use client_tags::*;
pub use clients::*;
pub use dashboards::*;
pub use locations::*;
pub use login::*;
pub use permissions::*;
pub use role_detail::*;
pub use role_permissions::*;
pub use role_users::*;
pub use roles::*;
pub use user_detail::*;
pub use user_roles::*;
pub use users::*;
pub use workspaces::*;

use crate::i18n::ModuleLabels;
use crate::views::routes::EntityRoutes;
use crate::views::{
    status_bulk_actions, EmptyState, ListPage, Page, PrimaryAction, TableColumn, TableConfig,
    TableRow, ViewContext,
};

/// Template prefix and navigation for a status list page.
pub struct ListChrome {
    /// `role` renders `role-list` with `role-list-content`.
    pub template: &'static str,
    pub nav: &'static str,
    /// Sub-nav is `<prefix>-<status>`, or the bare status when empty.
    pub sub_nav_prefix: &'static str,
    pub icon: &'static str,
}

/// Full-toolbar table for a status list, with add button and status bulk actions.
pub fn status_table(
    ctx: &ViewContext,
    routes: &EntityRoutes,
    labels: &ModuleLabels,
    status: &str,
    columns: Vec<TableColumn>,
    rows: Vec<TableRow>,
) -> TableConfig {
    let common = ctx.common();

    TableConfig {
        empty_state: EmptyState::new(
            labels.empty.title_for(status),
            labels.empty.message_for(status),
        ),
        primary_action: Some(PrimaryAction::new(&labels.buttons.add, routes.add())),
        bulk_actions: Some(status_bulk_actions(
            routes,
            &labels.actions,
            common,
            status,
        )),
        ..TableConfig::full(routes.table_id, routes.table(status), &common.table)
    }
    .with_rows(columns, rows)
}

/// Wrap a status table in page chrome.
pub fn status_list_page(
    ctx: &ViewContext,
    chrome: &ListChrome,
    labels: &ModuleLabels,
    status: &str,
    table: TableConfig,
) -> Page<ListPage> {
    let sub_nav = if chrome.sub_nav_prefix.is_empty() {
        status.to_string()
    } else {
        format!("{}-{}", chrome.sub_nav_prefix, status)
    };

    let page = ctx
        .page(labels.page.heading_for(status), chrome.nav, &sub_nav)
        .subtitle(labels.page.caption_for(status))
        .icon(chrome.icon);

    Page::new(
        format!("{}-list", chrome.template),
        ListPage {
            page,
            content_template: format!("{}-list-content", chrome.template),
            table,
        },
    )
}
