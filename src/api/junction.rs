//! Pieces shared by the role-permission, role-user and user-role pages.

use serde::Serialize;

use super::crud::resolve_id;
use crate::db::Store;
use crate::errors::AppError;
use crate::i18n::{CommonLabels, FormLabels, ModuleLabels};
use crate::models::Entity;
use crate::views::routes::JunctionRoutes;
use crate::views::{
    ActionResult, EmptyState, FormFields, HxSuccess, PageData, PrimaryAction, SelectOption,
    TableAction, TableColumn, TableConfig, TableRow, ViewContext,
};

/// Full junction page: parent header plus the assignment table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JunctionPage {
    #[serde(flatten)]
    pub page: PageData,
    pub content_template: String,
    pub table: TableConfig,
    pub parent_id: String,
    pub parent_name: String,
}

/// Drawer form with a single select of assignable records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignForm {
    pub form_action: String,
    pub parent_id: String,
    pub field: String,
    pub options: Vec<SelectOption>,
    pub labels: FormLabels,
    pub common_labels: CommonLabels,
}

impl AssignForm {
    pub fn new(
        ctx: &ViewContext,
        routes: &JunctionRoutes,
        labels: &ModuleLabels,
        parent_id: &str,
        field: &str,
        options: Vec<SelectOption>,
    ) -> Self {
        Self {
            form_action: routes.assign(parent_id),
            parent_id: parent_id.to_string(),
            field: field.to_string(),
            options,
            labels: labels.form.clone(),
            common_labels: ctx.common().clone(),
        }
    }
}

/// Assignment table: search and sort on, filters and export off.
pub fn junction_table(
    ctx: &ViewContext,
    routes: &JunctionRoutes,
    labels: &ModuleLabels,
    parent_id: &str,
    columns: Vec<TableColumn>,
    rows: Vec<TableRow>,
) -> TableConfig {
    TableConfig {
        empty_state: EmptyState::new(&labels.empty.title, &labels.empty.message),
        primary_action: Some(PrimaryAction::new(
            &labels.buttons.assign,
            routes.assign(parent_id),
        )),
        ..TableConfig::assignment(routes.table_id, routes.table(parent_id), &ctx.common().table)
    }
    .with_rows(columns, rows)
}

/// Remove button for one junction row.
pub fn remove_action(
    routes: &JunctionRoutes,
    labels: &ModuleLabels,
    parent_id: &str,
    item_name: &str,
    from: &str,
) -> Vec<TableAction> {
    vec![TableAction::remove(
        &labels.actions.remove,
        routes.remove(parent_id),
        item_name,
        from,
    )]
}

/// Page chrome titled "<heading> - <parent>".
pub fn junction_page_data(
    ctx: &ViewContext,
    labels: &ModuleLabels,
    parent_name: &str,
    nav: (&str, &str),
    icon: &str,
) -> PageData {
    let heading = &labels.page.heading;
    ctx.page(&format!("{} - {}", heading, parent_name), nav.0, nav.1)
        .header(&format!("{}: {}", heading, parent_name))
        .subtitle(&labels.page.caption)
        .icon(icon)
}

/// Delete the junction row named by `?id=` or the `id` field.
pub async fn remove_assignment<E: Entity>(
    store: &dyn Store<E>,
    form: &FormFields,
    noun: &str,
    table_id: &str,
) -> ActionResult {
    let id = resolve_id(form)
        .ok_or_else(|| AppError::Validation(format!("{} ID is required", E::LABEL)))?;

    if let Err(e) = store.delete(&id).await {
        tracing::error!(id = %id, error = %e, "Failed to remove {}", noun);
        return Err(AppError::Backend(format!("Failed to remove {}", noun)));
    }

    tracing::info!(id = %id, "Removed {}", noun);
    Ok(HxSuccess::refresh(table_id))
}

/// Non-empty value of a required select, else "<Label> is required".
pub fn required(form: &FormFields, key: &str, label: &str) -> Result<String, AppError> {
    let value = form.value(key);
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", label)));
    }
    Ok(value)
}
