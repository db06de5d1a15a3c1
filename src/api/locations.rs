//! Location list page and drawer actions.

use axum::extract::{Path, State};
use serde::Serialize;

use super::crud::Resource;
use super::{status_list_page, status_table, ListChrome};
use crate::errors::{AppError, PageError};
use crate::i18n::{CommonLabels, FormLabels, ModuleLabels};
use crate::models::{Entity, Location};
use crate::views::routes::LOCATIONS;
use crate::views::{
    normalize_status, status_row_actions, status_variant, ActionResult, FormFields, HxSuccess,
    ListPage, Page, PageResult, TableCell, TableColumn, TableConfig, TableRow, ViewContext,
    TABLE_CARD,
};
use crate::AppState;

const CHROME: ListChrome = ListChrome {
    template: "location",
    nav: "admin",
    sub_nav_prefix: "locations",
    icon: "icon-map-pin",
};

const FORM_TEMPLATE: &str = "location-drawer-form";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationForm {
    pub form_action: String,
    pub is_edit: bool,
    pub id: String,
    pub name: String,
    pub address: String,
    pub description: String,
    pub active: bool,
    pub labels: FormLabels,
    pub common_labels: CommonLabels,
}

fn resource(state: &AppState) -> Resource<'_, Location> {
    Resource::new(state.stores.locations.as_ref(), &LOCATIONS)
}

fn columns(l: &ModuleLabels) -> Vec<TableColumn> {
    vec![
        TableColumn::new("name", &l.columns.name, true),
        TableColumn::new("address", &l.columns.address, true),
        TableColumn::new("status", &l.columns.status, true).width("120px"),
    ]
}

fn row(location: &Location, l: &ModuleLabels) -> TableRow {
    let status = location.status();

    TableRow::new(&location.id)
        .cell(TableCell::text(&location.name))
        .cell(TableCell::text(&location.address))
        .cell(TableCell::badge(status, status_variant(status)))
        .attr("name", &location.name)
        .attr("address", &location.address)
        .attr("status", status)
        .actions(status_row_actions(
            &LOCATIONS,
            &l.actions,
            &location.id,
            &location.name,
            location.active,
        ))
}

async fn build_table(
    state: &AppState,
    ctx: &ViewContext,
    status: &str,
) -> Result<TableConfig, PageError> {
    let locations = resource(state).list_by_status(status).await?;
    let l = &ctx.i18n.labels().location;
    let rows = locations.iter().map(|loc| row(loc, l)).collect();

    Ok(status_table(ctx, &LOCATIONS, l, status, columns(l), rows).sorted_by("name"))
}

/// GET /app/locations/list/{status}
pub async fn location_list(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(status): Path<String>,
) -> PageResult<ListPage> {
    let status = normalize_status(&status);
    let table = build_table(&state, &ctx, &status).await?;
    Ok(status_list_page(
        &ctx,
        &CHROME,
        &ctx.i18n.labels().location,
        &status,
        table,
    ))
}

/// GET /action/locations/table/{status}
pub async fn location_table(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(status): Path<String>,
) -> PageResult<TableConfig> {
    let status = normalize_status(&status);
    let table = build_table(&state, &ctx, &status).await?;
    Ok(Page::new(TABLE_CARD, table))
}

/// GET /action/locations/add
pub async fn location_add_form(ctx: ViewContext) -> Page<LocationForm> {
    Page::new(
        FORM_TEMPLATE,
        LocationForm {
            form_action: LOCATIONS.add(),
            is_edit: false,
            id: String::new(),
            name: String::new(),
            address: String::new(),
            description: String::new(),
            active: true,
            labels: ctx.i18n.labels().location.form.clone(),
            common_labels: ctx.common().clone(),
        },
    )
}

/// POST /action/locations/add
pub async fn location_add(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state)
        .create(record_from(&form, String::new()))
        .await?;
    Ok(HxSuccess::refresh(LOCATIONS.table_id))
}

/// GET /action/locations/edit/{id}
pub async fn location_edit_form(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> Result<Page<LocationForm>, AppError> {
    let location = resource(&state).read_for_edit(&id).await?;

    Ok(Page::new(
        FORM_TEMPLATE,
        LocationForm {
            form_action: LOCATIONS.edit(&id),
            is_edit: true,
            id,
            name: location.name,
            address: location.address,
            description: location.description.unwrap_or_default(),
            active: location.active,
            labels: ctx.i18n.labels().location.form.clone(),
            common_labels: ctx.common().clone(),
        },
    ))
}

/// POST /action/locations/edit/{id}
pub async fn location_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormFields,
) -> ActionResult {
    resource(&state).update(record_from(&form, id)).await
}

/// POST /action/locations/delete
pub async fn location_delete(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).delete(&form).await
}

/// POST /action/locations/bulk-delete
pub async fn location_bulk_delete(
    State(state): State<AppState>,
    form: FormFields,
) -> ActionResult {
    resource(&state).bulk_delete(&form).await
}

/// POST /action/locations/set-status
pub async fn location_set_status(
    State(state): State<AppState>,
    form: FormFields,
) -> ActionResult {
    resource(&state).set_status(&form).await
}

/// POST /action/locations/bulk-set-status
pub async fn location_bulk_set_status(
    State(state): State<AppState>,
    form: FormFields,
) -> ActionResult {
    resource(&state).bulk_set_status(&form).await
}

fn record_from(form: &FormFields, id: String) -> Location {
    Location {
        id,
        name: form.value("name"),
        address: form.value("address"),
        description: form.optional("description"),
        active: form.checkbox("active"),
        date_created: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_description_is_absent() {
        let form = FormFields::from_pairs(
            &[],
            &[("name", "Makati"), ("description", ""), ("active", "true")],
        );

        let location = record_from(&form, String::new());
        assert_eq!(location.description, None);
        assert!(location.active);
    }
}
