//! Workspace list page and drawer actions.

use axum::extract::{Path, State};
use serde::Serialize;

use super::crud::Resource;
use super::{status_list_page, status_table, ListChrome};
use crate::errors::{AppError, PageError};
use crate::i18n::{CommonLabels, FormLabels, ModuleLabels};
use crate::models::{Entity, Workspace};
use crate::views::routes::WORKSPACES;
use crate::views::{
    normalize_status, status_row_actions, status_variant, ActionResult, FormFields, HxSuccess,
    ListPage, Page, PageResult, TableCell, TableColumn, TableConfig, TableRow, ViewContext,
    TABLE_CARD,
};
use crate::AppState;

const CHROME: ListChrome = ListChrome {
    template: "workspace",
    nav: "admin",
    sub_nav_prefix: "workspaces",
    icon: "icon-briefcase",
};

const FORM_TEMPLATE: &str = "workspace-drawer-form";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceForm {
    pub form_action: String,
    pub is_edit: bool,
    pub id: String,
    pub name: String,
    pub description: String,
    pub private: bool,
    pub active: bool,
    pub labels: FormLabels,
    pub common_labels: CommonLabels,
}

fn resource(state: &AppState) -> Resource<'_, Workspace> {
    Resource::new(state.stores.workspaces.as_ref(), &WORKSPACES)
}

fn columns(l: &ModuleLabels) -> Vec<TableColumn> {
    vec![
        TableColumn::new("name", &l.columns.name, true),
        TableColumn::new("description", &l.columns.description, true),
        TableColumn::new("private", &l.columns.private, true).width("120px"),
        TableColumn::new("status", &l.columns.status, true).width("120px"),
    ]
}

fn row(workspace: &Workspace, ctx: &ViewContext) -> TableRow {
    let l = &ctx.i18n.labels().workspace;
    let common = ctx.common();
    let status = workspace.status();
    let (private_label, private_variant) = if workspace.private {
        (common.yes.as_str(), "info")
    } else {
        (common.no.as_str(), "default")
    };

    TableRow::new(&workspace.id)
        .cell(TableCell::text(&workspace.name))
        .cell(TableCell::text(&workspace.description))
        .cell(TableCell::badge(private_label, private_variant))
        .cell(TableCell::badge(status, status_variant(status)))
        .attr("name", &workspace.name)
        .attr("description", &workspace.description)
        .attr("private", if workspace.private { "true" } else { "false" })
        .attr("status", status)
        .actions(status_row_actions(
            &WORKSPACES,
            &l.actions,
            &workspace.id,
            &workspace.name,
            workspace.active,
        ))
}

async fn build_table(
    state: &AppState,
    ctx: &ViewContext,
    status: &str,
) -> Result<TableConfig, PageError> {
    let workspaces = resource(state).list_by_status(status).await?;
    let l = &ctx.i18n.labels().workspace;
    let rows = workspaces.iter().map(|w| row(w, ctx)).collect();

    Ok(status_table(ctx, &WORKSPACES, l, status, columns(l), rows).sorted_by("name"))
}

/// GET /app/workspaces/list/{status}
pub async fn workspace_list(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(status): Path<String>,
) -> PageResult<ListPage> {
    let status = normalize_status(&status);
    let table = build_table(&state, &ctx, &status).await?;
    Ok(status_list_page(
        &ctx,
        &CHROME,
        &ctx.i18n.labels().workspace,
        &status,
        table,
    ))
}

/// GET /action/workspaces/table/{status}
pub async fn workspace_table(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(status): Path<String>,
) -> PageResult<TableConfig> {
    let status = normalize_status(&status);
    let table = build_table(&state, &ctx, &status).await?;
    Ok(Page::new(TABLE_CARD, table))
}

/// GET /action/workspaces/add
pub async fn workspace_add_form(ctx: ViewContext) -> Page<WorkspaceForm> {
    Page::new(
        FORM_TEMPLATE,
        WorkspaceForm {
            form_action: WORKSPACES.add(),
            is_edit: false,
            id: String::new(),
            name: String::new(),
            description: String::new(),
            private: false,
            active: true,
            labels: ctx.i18n.labels().workspace.form.clone(),
            common_labels: ctx.common().clone(),
        },
    )
}

/// POST /action/workspaces/add
pub async fn workspace_add(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state)
        .create(record_from(&form, String::new()))
        .await?;
    Ok(HxSuccess::refresh(WORKSPACES.table_id))
}

/// GET /action/workspaces/edit/{id}
pub async fn workspace_edit_form(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> Result<Page<WorkspaceForm>, AppError> {
    let workspace = resource(&state).read_for_edit(&id).await?;

    Ok(Page::new(
        FORM_TEMPLATE,
        WorkspaceForm {
            form_action: WORKSPACES.edit(&id),
            is_edit: true,
            id,
            name: workspace.name,
            description: workspace.description,
            private: workspace.private,
            active: workspace.active,
            labels: ctx.i18n.labels().workspace.form.clone(),
            common_labels: ctx.common().clone(),
        },
    ))
}

/// POST /action/workspaces/edit/{id}
pub async fn workspace_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormFields,
) -> ActionResult {
    resource(&state).update(record_from(&form, id)).await
}

/// POST /action/workspaces/delete
pub async fn workspace_delete(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).delete(&form).await
}

/// POST /action/workspaces/bulk-delete
pub async fn workspace_bulk_delete(
    State(state): State<AppState>,
    form: FormFields,
) -> ActionResult {
    resource(&state).bulk_delete(&form).await
}

/// POST /action/workspaces/set-status
pub async fn workspace_set_status(
    State(state): State<AppState>,
    form: FormFields,
) -> ActionResult {
    resource(&state).set_status(&form).await
}

/// POST /action/workspaces/bulk-set-status
pub async fn workspace_bulk_set_status(
    State(state): State<AppState>,
    form: FormFields,
) -> ActionResult {
    resource(&state).bulk_set_status(&form).await
}

fn record_from(form: &FormFields, id: String) -> Workspace {
    Workspace {
        id,
        name: form.value("name"),
        description: form.value("description"),
        private: form.checkbox("private"),
        active: form.checkbox("active"),
        date_created: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkboxes_need_literal_true() {
        let form = FormFields::from_pairs(&[], &[("private", "1"), ("active", "true")]);

        let workspace = record_from(&form, "w1".to_string());
        assert!(!workspace.private);
        assert!(workspace.active);
    }
}
