//! Role list page and drawer actions.

use axum::extract::{Path, State};
use serde::Serialize;

use super::crud::Resource;
use super::{status_list_page, status_table, ListChrome};
use crate::errors::{AppError, PageError};
use crate::i18n::{CommonLabels, FormLabels, ModuleLabels};
use crate::models::{Entity, Role};
use crate::views::routes::ROLES;
use crate::views::{
    normalize_status, status_row_actions, status_variant, ActionResult, FormFields, HxSuccess,
    ListPage, Page, PageResult, TableCell, TableColumn, TableConfig, TableRow, ViewContext,
    TABLE_CARD,
};
use crate::AppState;

const CHROME: ListChrome = ListChrome {
    template: "role",
    nav: "users",
    sub_nav_prefix: "roles",
    icon: "icon-shield",
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleForm {
    pub form_action: String,
    pub is_edit: bool,
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub active: bool,
    pub labels: FormLabels,
    pub common_labels: CommonLabels,
}

fn resource(state: &AppState) -> Resource<'_, Role> {
    Resource::new(state.stores.roles.as_ref(), &ROLES)
}

fn columns(l: &ModuleLabels) -> Vec<TableColumn> {
    vec![
        TableColumn::new("name", &l.columns.name, true),
        TableColumn::new("description", &l.columns.description, true),
        TableColumn::new("color", &l.columns.color, true).width("120px"),
        TableColumn::new("status", &l.columns.status, true).width("120px"),
    ]
}

fn row(role: &Role, l: &ModuleLabels) -> TableRow {
    let status = role.status();

    TableRow::new(&role.id)
        .cell(TableCell::text(&role.name))
        .cell(TableCell::text(&role.description))
        .cell(TableCell::text(&role.color))
        .cell(TableCell::badge(status, status_variant(status)))
        .attr("name", &role.name)
        .attr("description", &role.description)
        .attr("color", &role.color)
        .attr("status", status)
        .actions(status_row_actions(
            &ROLES,
            &l.actions,
            &role.id,
            &role.name,
            role.active,
        ))
}

async fn build_table(
    state: &AppState,
    ctx: &ViewContext,
    status: &str,
) -> Result<TableConfig, PageError> {
    let roles = resource(state).list_by_status(status).await?;
    let l = &ctx.i18n.labels().role;
    let rows = roles.iter().map(|r| row(r, l)).collect();

    Ok(status_table(ctx, &ROLES, l, status, columns(l), rows).sorted_by("name"))
}

/// GET /app/roles/list/{status} - Roles filtered by status.
pub async fn role_list(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(status): Path<String>,
) -> PageResult<ListPage> {
    let status = normalize_status(&status);
    let table = build_table(&state, &ctx, &status).await?;
    Ok(status_list_page(
        &ctx,
        &CHROME,
        &ctx.i18n.labels().role,
        &status,
        table,
    ))
}

/// GET /action/roles/table/{status} - Table-only refresh.
pub async fn role_table(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(status): Path<String>,
) -> PageResult<TableConfig> {
    let status = normalize_status(&status);
    let table = build_table(&state, &ctx, &status).await?;
    Ok(Page::new(TABLE_CARD, table))
}

const FORM_TEMPLATE: &str = "role-drawer-form";

/// GET /action/roles/add - Empty drawer form.
pub async fn role_add_form(ctx: ViewContext) -> Page<RoleForm> {
    Page::new(
        FORM_TEMPLATE,
        RoleForm {
            form_action: ROLES.add(),
            is_edit: false,
            id: String::new(),
            name: String::new(),
            description: String::new(),
            color: String::new(),
            active: true,
            labels: ctx.i18n.labels().role.form.clone(),
            common_labels: ctx.common().clone(),
        },
    )
}

/// POST /action/roles/add - Create a role.
pub async fn role_add(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).create(record_from(&form, String::new())).await?;
    Ok(HxSuccess::refresh(ROLES.table_id))
}

/// GET /action/roles/edit/{id} - Drawer form filled from the stored role.
pub async fn role_edit_form(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> Result<Page<RoleForm>, AppError> {
    let role = resource(&state).read_for_edit(&id).await?;

    Ok(Page::new(
        FORM_TEMPLATE,
        RoleForm {
            form_action: ROLES.edit(&id),
            is_edit: true,
            id,
            name: role.name,
            description: role.description,
            color: role.color,
            active: role.active,
            labels: ctx.i18n.labels().role.form.clone(),
            common_labels: ctx.common().clone(),
        },
    ))
}

/// POST /action/roles/edit/{id} - Update a role.
pub async fn role_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormFields,
) -> ActionResult {
    resource(&state).update(record_from(&form, id)).await
}

/// POST /action/roles/delete
pub async fn role_delete(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).delete(&form).await
}

/// POST /action/roles/bulk-delete
pub async fn role_bulk_delete(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).bulk_delete(&form).await
}

/// POST /action/roles/set-status
pub async fn role_set_status(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).set_status(&form).await
}

/// POST /action/roles/bulk-set-status
pub async fn role_bulk_set_status(
    State(state): State<AppState>,
    form: FormFields,
) -> ActionResult {
    resource(&state).bulk_set_status(&form).await
}

fn record_from(form: &FormFields, id: String) -> Role {
    Role {
        id,
        name: form.value("name"),
        description: form.value("description"),
        color: form.value("color"),
        active: form.checkbox("active"),
        date_created: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_actions_follow_state() {
        let l = ModuleLabels::default();
        let role = Role {
            id: "r1".to_string(),
            name: "Cashier".to_string(),
            active: false,
            ..Default::default()
        };

        let row = row(&role, &l);
        assert_eq!(row.cells[3].value, "inactive");
        assert_eq!(row.cells[3].variant, "warning");
        assert_eq!(row.actions[2].kind, "activate");
        assert_eq!(row.data_attrs["status"], "inactive");
    }

    #[test]
    fn test_record_from_form() {
        let form = FormFields::from_pairs(
            &[],
            &[("name", "Auditor"), ("color", "#ff0000"), ("active", "on")],
        );

        let role = record_from(&form, "r9".to_string());
        assert_eq!(role.id, "r9");
        assert_eq!(role.name, "Auditor");
        assert_eq!(role.color, "#ff0000");
        assert!(!role.active);
    }
}
