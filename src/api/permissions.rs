//! Permission list page and drawer actions.

use axum::extract::{Path, State};
use serde::Serialize;

use super::crud::Resource;
use super::{status_list_page, status_table, ListChrome};
use crate::errors::{AppError, PageError};
use crate::i18n::{CommonLabels, FormLabels, ModuleLabels};
use crate::models::{Entity, Permission, PermissionType};
use crate::views::routes::PERMISSIONS;
use crate::views::{
    normalize_status, status_row_actions, status_variant, ActionResult, FormFields, HxSuccess,
    ListPage, Page, PageResult, SelectOption, TableCell, TableColumn, TableConfig, TableRow,
    ViewContext, TABLE_CARD,
};
use crate::AppState;

const CHROME: ListChrome = ListChrome {
    template: "permission",
    nav: "admin",
    sub_nav_prefix: "permissions",
    icon: "icon-key",
};

const FORM_TEMPLATE: &str = "permission-drawer-form";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionForm {
    pub form_action: String,
    pub is_edit: bool,
    pub id: String,
    pub name: String,
    pub permission_code: String,
    pub permission_type: String,
    pub description: String,
    pub active: bool,
    pub permission_type_options: Vec<SelectOption>,
    pub labels: FormLabels,
    pub common_labels: CommonLabels,
}

impl PermissionForm {
    fn new(ctx: &ViewContext, form_action: String, kind: PermissionType) -> Self {
        Self {
            form_action,
            is_edit: false,
            id: String::new(),
            name: String::new(),
            permission_code: String::new(),
            permission_type: kind.form_value().to_string(),
            description: String::new(),
            active: true,
            permission_type_options: type_options(kind),
            labels: ctx.i18n.labels().permission.form.clone(),
            common_labels: ctx.common().clone(),
        }
    }
}

fn type_options(current: PermissionType) -> Vec<SelectOption> {
    [PermissionType::Allow, PermissionType::Deny]
        .into_iter()
        .map(|kind| SelectOption {
            selected: kind == current,
            ..SelectOption::new(kind.form_value(), kind.label())
        })
        .collect()
}

fn resource(state: &AppState) -> Resource<'_, Permission> {
    Resource::new(state.stores.permissions.as_ref(), &PERMISSIONS)
}

fn columns(l: &ModuleLabels) -> Vec<TableColumn> {
    vec![
        TableColumn::new("name", &l.columns.name, true),
        TableColumn::new("permission_code", &l.columns.permission_code, true),
        TableColumn::new("permission_type", &l.columns.kind, true).width("120px"),
        TableColumn::new("status", &l.columns.status, true).width("120px"),
    ]
}

fn row(permission: &Permission, l: &ModuleLabels) -> TableRow {
    let status = permission.status();
    let kind = permission.permission_type;

    TableRow::new(&permission.id)
        .cell(TableCell::text(&permission.name))
        .cell(TableCell::text(&permission.permission_code))
        .cell(TableCell::badge(kind.label(), kind.variant()))
        .cell(TableCell::badge(status, status_variant(status)))
        .attr("name", &permission.name)
        .attr("permission_code", &permission.permission_code)
        .attr("permission_type", kind.label())
        .attr("status", status)
        .actions(status_row_actions(
            &PERMISSIONS,
            &l.actions,
            &permission.id,
            &permission.name,
            permission.active,
        ))
}

async fn build_table(
    state: &AppState,
    ctx: &ViewContext,
    status: &str,
) -> Result<TableConfig, PageError> {
    let permissions = resource(state).list_by_status(status).await?;
    let l = &ctx.i18n.labels().permission;
    let rows = permissions.iter().map(|p| row(p, l)).collect();

    Ok(status_table(ctx, &PERMISSIONS, l, status, columns(l), rows).sorted_by("name"))
}

/// GET /app/permissions/list/{status} - Permissions filtered by status.
pub async fn permission_list(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(status): Path<String>,
) -> PageResult<ListPage> {
    let status = normalize_status(&status);
    let table = build_table(&state, &ctx, &status).await?;
    Ok(status_list_page(
        &ctx,
        &CHROME,
        &ctx.i18n.labels().permission,
        &status,
        table,
    ))
}

/// GET /action/permissions/table/{status} - Table-only refresh.
pub async fn permission_table(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(status): Path<String>,
) -> PageResult<TableConfig> {
    let status = normalize_status(&status);
    let table = build_table(&state, &ctx, &status).await?;
    Ok(Page::new(TABLE_CARD, table))
}

/// GET /action/permissions/add
pub async fn permission_add_form(ctx: ViewContext) -> Page<PermissionForm> {
    Page::new(
        FORM_TEMPLATE,
        PermissionForm::new(&ctx, PERMISSIONS.add(), PermissionType::Allow),
    )
}

/// POST /action/permissions/add
pub async fn permission_add(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state)
        .create(record_from(&form, String::new()))
        .await?;
    Ok(HxSuccess::refresh(PERMISSIONS.table_id))
}

/// GET /action/permissions/edit/{id}
pub async fn permission_edit_form(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> Result<Page<PermissionForm>, AppError> {
    let permission = resource(&state).read_for_edit(&id).await?;

    Ok(Page::new(
        FORM_TEMPLATE,
        PermissionForm {
            is_edit: true,
            id: id.clone(),
            name: permission.name,
            permission_code: permission.permission_code,
            description: permission.description,
            active: permission.active,
            ..PermissionForm::new(&ctx, PERMISSIONS.edit(&id), permission.permission_type)
        },
    ))
}

/// POST /action/permissions/edit/{id}
pub async fn permission_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormFields,
) -> ActionResult {
    resource(&state).update(record_from(&form, id)).await
}

/// POST /action/permissions/delete
pub async fn permission_delete(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).delete(&form).await
}

/// POST /action/permissions/bulk-delete
pub async fn permission_bulk_delete(
    State(state): State<AppState>,
    form: FormFields,
) -> ActionResult {
    resource(&state).bulk_delete(&form).await
}

/// POST /action/permissions/set-status
pub async fn permission_set_status(
    State(state): State<AppState>,
    form: FormFields,
) -> ActionResult {
    resource(&state).set_status(&form).await
}

/// POST /action/permissions/bulk-set-status
pub async fn permission_bulk_set_status(
    State(state): State<AppState>,
    form: FormFields,
) -> ActionResult {
    resource(&state).bulk_set_status(&form).await
}

fn record_from(form: &FormFields, id: String) -> Permission {
    Permission {
        id,
        name: form.value("name"),
        permission_code: form.value("permission_code"),
        permission_type: PermissionType::parse(&form.value("permission_type")),
        description: form.value("description"),
        active: form.checkbox("active"),
        date_created: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_options_mark_current() {
        let options = type_options(PermissionType::Deny);

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "PERMISSION_TYPE_ALLOW");
        assert!(!options[0].selected);
        assert_eq!(options[1].label, "Deny");
        assert!(options[1].selected);
    }

    #[test]
    fn test_unknown_type_defaults_to_allow() {
        let form = FormFields::from_pairs(&[], &[("permission_type", "bogus")]);
        assert_eq!(
            record_from(&form, String::new()).permission_type,
            PermissionType::Allow
        );
    }

    #[test]
    fn test_row_type_badge() {
        let permission = Permission {
            id: "p1".to_string(),
            name: "Refunds".to_string(),
            permission_type: PermissionType::Deny,
            active: true,
            ..Default::default()
        };

        let row = row(&permission, &ModuleLabels::default());
        assert_eq!(row.cells[2].value, "Deny");
        assert_eq!(row.cells[2].variant, "danger");
        assert_eq!(row.actions[0].kind, "edit");
    }
}
