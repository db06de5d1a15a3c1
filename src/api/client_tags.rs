//! Client tag settings: categories scoped to the client module.

use std::collections::HashMap;

use axum::extract::{Path, State};
use serde::Serialize;

use super::crud::Resource;
use crate::errors::{AppError, PageError};
use crate::i18n::{CommonLabels, FormLabels, ModuleLabels};
use crate::models::{Category, Entity, CLIENT_MODULE};
use crate::views::routes::{
    client_tag_edit_url, CLIENT_TAG_ADD, CLIENT_TAG_BULK_DELETE, CLIENT_TAG_DELETE,
    CLIENT_TAG_TABLE_ID,
};
use crate::views::{
    status_variant, ActionResult, BulkAction, BulkActionsConfig, EmptyState, FormFields,
    HxSuccess, ListPage, Page, PageResult, PrimaryAction, TableAction, TableCell, TableColumn,
    TableConfig, TableRow, ViewContext,
};
use crate::AppState;

const FORM_TEMPLATE: &str = "client-tag-drawer-form";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientTagForm {
    pub form_action: String,
    pub is_edit: bool,
    pub id: String,
    pub name: String,
    pub code: String,
    pub description: String,
    pub active: bool,
    pub labels: FormLabels,
    pub common_labels: CommonLabels,
}

fn resource(state: &AppState) -> Resource<'_, Category> {
    Resource {
        store: state.stores.categories.as_ref(),
        noun: "tag",
        table_id: CLIENT_TAG_TABLE_ID,
    }
}

/// Lowercase, collapse runs of anything outside `[a-z0-9]` into `-`, trim `-` at both ends.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Slug of the explicit code, or of the name when no code was given.
pub fn resolve_code(code: &str, name: &str) -> String {
    let code = code.trim();
    if code.is_empty() {
        slugify(name)
    } else {
        slugify(code)
    }
}

/// Case-insensitive name clash among client tags, ignoring `exclude_id`.
///
/// A failed lookup is logged and treated as no clash.
async fn is_duplicate_name(state: &AppState, name: &str, exclude_id: Option<&str>) -> bool {
    let categories = match state.stores.categories.list().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list categories for duplicate check");
            return false;
        }
    };

    let name = name.to_lowercase();
    categories
        .iter()
        .filter(|c| c.is_client_tag())
        .filter(|c| exclude_id != Some(c.id.as_str()))
        .any(|c| c.name.to_lowercase() == name)
}

fn columns(l: &ModuleLabels) -> Vec<TableColumn> {
    vec![
        TableColumn::new("name", &l.columns.name, true),
        TableColumn::new("customers", &l.columns.customers, true).width("120px"),
        TableColumn::new("description", &l.columns.description, false),
        TableColumn::new("status", &l.columns.status, true).width("120px"),
    ]
}

fn row(tag: &Category, customers: usize, l: &ModuleLabels) -> TableRow {
    let status = tag.status();

    TableRow::new(&tag.id)
        .cell(TableCell::text(&tag.name))
        .cell(TableCell::text(customers.to_string()))
        .cell(TableCell::text(&tag.description))
        .cell(TableCell::badge(status, status_variant(status)))
        .attr("name", &tag.name)
        .attr("status", status)
        .actions(vec![
            TableAction::edit(&l.actions.edit, client_tag_edit_url(&tag.id)),
            TableAction::delete(&l.actions.delete, CLIENT_TAG_DELETE.to_string(), &tag.name),
        ])
}

async fn build_table(state: &AppState, ctx: &ViewContext) -> Result<TableConfig, PageError> {
    let categories = state.stores.categories.list().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list client tags");
        PageError(AppError::Backend("Failed to load tags".to_string()))
    })?;

    // A failed junction read shows zero counts.
    let mut customers: HashMap<String, usize> = HashMap::new();
    match state.stores.client_categories.list().await {
        Ok(rows) => {
            for cc in rows {
                *customers.entry(cc.category_id).or_default() += 1;
            }
        }
        Err(e) => tracing::warn!(error = %e, "Failed to count tagged clients"),
    }

    let l = &ctx.i18n.labels().client_tag;
    let common = ctx.common();
    let rows = categories
        .iter()
        .filter(|c| c.is_client_tag())
        .map(|c| row(c, customers.get(&c.id).copied().unwrap_or(0), l))
        .collect();

    let bulk = BulkActionsConfig::new(
        &common.bulk,
        vec![BulkAction::delete(
            &common.bulk.delete,
            CLIENT_TAG_BULK_DELETE.to_string(),
            "tag",
        )],
    );

    Ok(TableConfig {
        id: CLIENT_TAG_TABLE_ID.to_string(),
        show_search: true,
        show_actions: true,
        labels: common.table.clone(),
        empty_state: EmptyState::new(&l.empty.active_title, &l.empty.active_message),
        primary_action: Some(PrimaryAction::new(
            &l.buttons.add,
            CLIENT_TAG_ADD.to_string(),
        )),
        bulk_actions: Some(bulk),
        ..Default::default()
    }
    .sorted_by("name")
    .with_rows(columns(l), rows))
}

/// GET /app/clients/settings/tags/list
pub async fn client_tag_list(
    State(state): State<AppState>,
    ctx: ViewContext,
) -> PageResult<ListPage> {
    let table = build_table(&state, &ctx).await?;
    let l = &ctx.i18n.labels().client_tag;

    let page = ctx
        .page(&l.page.heading, "clients", "tags")
        .subtitle(&l.page.caption)
        .icon("icon-tag");

    Ok(Page::new(
        "client-tag-list",
        ListPage {
            page,
            content_template: "client-tag-list-content".to_string(),
            table,
        },
    ))
}

/// GET /action/clients/tags/add
pub async fn client_tag_add_form(ctx: ViewContext) -> Page<ClientTagForm> {
    Page::new(
        FORM_TEMPLATE,
        ClientTagForm {
            form_action: CLIENT_TAG_ADD.to_string(),
            is_edit: false,
            id: String::new(),
            name: String::new(),
            code: String::new(),
            description: String::new(),
            active: true,
            labels: ctx.i18n.labels().client_tag.form.clone(),
            common_labels: ctx.common().clone(),
        },
    )
}

/// POST /action/clients/tags/add
pub async fn client_tag_add(State(state): State<AppState>, form: FormFields) -> ActionResult {
    let name = form.value("name");
    if is_duplicate_name(&state, &name, None).await {
        return Err(AppError::Validation("Tag name already exists".to_string()));
    }

    resource(&state)
        .create(record_from(&form, String::new()))
        .await?;
    Ok(HxSuccess::refresh(CLIENT_TAG_TABLE_ID))
}

/// GET /action/clients/tags/edit/{id}
pub async fn client_tag_edit_form(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> Result<Page<ClientTagForm>, AppError> {
    let tag = resource(&state).read_for_edit(&id).await?;

    Ok(Page::new(
        FORM_TEMPLATE,
        ClientTagForm {
            form_action: client_tag_edit_url(&id),
            is_edit: true,
            id,
            name: tag.name,
            code: tag.code,
            description: tag.description,
            active: tag.active,
            labels: ctx.i18n.labels().client_tag.form.clone(),
            common_labels: ctx.common().clone(),
        },
    ))
}

/// POST /action/clients/tags/edit/{id}
pub async fn client_tag_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormFields,
) -> ActionResult {
    let name = form.value("name");
    if is_duplicate_name(&state, &name, Some(&id)).await {
        return Err(AppError::Validation("Tag name already exists".to_string()));
    }

    resource(&state).update(record_from(&form, id)).await
}

/// POST /action/clients/tags/delete
pub async fn client_tag_delete(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).delete(&form).await
}

/// POST /action/clients/tags/bulk-delete
pub async fn client_tag_bulk_delete(
    State(state): State<AppState>,
    form: FormFields,
) -> ActionResult {
    resource(&state).bulk_delete(&form).await
}

fn record_from(form: &FormFields, id: String) -> Category {
    let name = form.value("name");
    Category {
        id,
        code: resolve_code(&form.value("code"), &name),
        name,
        description: form.value("description"),
        module: CLIENT_MODULE.to_string(),
        active: form.checkbox("active"),
        date_created: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("VIP Customer"), "vip-customer");
        assert_eq!(slugify("  --Hello, World!--  "), "hello-world");
        assert_eq!(slugify("a__b  c"), "a-b-c");
        assert_eq!(slugify("Café 2024"), "caf-2024");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_resolve_code_prefers_explicit_code() {
        assert_eq!(resolve_code("  Gold Tier ", "VIP"), "gold-tier");
        assert_eq!(resolve_code("   ", "VIP Customer"), "vip-customer");
    }

    #[test]
    fn test_record_is_client_scoped() {
        let form = FormFields::from_pairs(
            &[],
            &[("name", "Wholesale Buyer"), ("code", ""), ("active", "true")],
        );

        let tag = record_from(&form, String::new());
        assert_eq!(tag.code, "wholesale-buyer");
        assert_eq!(tag.module, CLIENT_MODULE);
        assert!(tag.active);
    }

    #[test]
    fn test_row_actions_are_edit_and_delete() {
        let tag = Category {
            id: "t1".to_string(),
            name: "VIP".to_string(),
            module: CLIENT_MODULE.to_string(),
            active: true,
            ..Default::default()
        };

        let row = row(&tag, 3, &ModuleLabels::default());
        assert_eq!(row.cells[1].value, "3");
        assert_eq!(row.actions[0].url, "/action/clients/tags/edit/t1");
        assert_eq!(row.actions[1].url, "/action/clients/tags/delete");
    }
}
