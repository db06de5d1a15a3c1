//! User list page and drawer actions.

use axum::extract::{Path, State};
use serde::Serialize;

use super::crud::Resource;
use super::{status_list_page, status_table, ListChrome};
use crate::errors::{AppError, PageError};
use crate::i18n::{CommonLabels, FormLabels, ModuleLabels};
use crate::models::{Entity, User};
use crate::views::routes::USERS;
use crate::views::{
    normalize_status, status_row_actions, status_variant, ActionResult, FormFields, HxSuccess,
    ListPage, Page, PageResult, TableCell, TableColumn, TableConfig, TableRow, ViewContext,
    TABLE_CARD,
};
use crate::AppState;

const CHROME: ListChrome = ListChrome {
    template: "user",
    nav: "users",
    sub_nav_prefix: "users",
    icon: "icon-users",
};

const FORM_TEMPLATE: &str = "user-drawer-form";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    pub form_action: String,
    pub is_edit: bool,
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub active: bool,
    pub labels: FormLabels,
    pub common_labels: CommonLabels,
}

impl UserForm {
    fn new(ctx: &ViewContext, form_action: String) -> Self {
        Self {
            form_action,
            is_edit: false,
            id: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            mobile: String::new(),
            active: true,
            labels: ctx.i18n.labels().user.form.clone(),
            common_labels: ctx.common().clone(),
        }
    }
}

fn resource(state: &AppState) -> Resource<'_, User> {
    Resource::new(state.stores.users.as_ref(), &USERS)
}

fn columns(l: &ModuleLabels) -> Vec<TableColumn> {
    vec![
        TableColumn::new("name", &l.columns.name, true),
        TableColumn::new("email", &l.columns.email, true),
        TableColumn::new("mobile", &l.columns.mobile, true).width("150px"),
        TableColumn::new("status", &l.columns.status, true).width("120px"),
    ]
}

fn row(user: &User, l: &ModuleLabels) -> TableRow {
    let status = user.status();
    let name = user.full_name();

    TableRow::new(&user.id)
        .cell(TableCell::text(&name))
        .cell(TableCell::text(&user.email_address))
        .cell(TableCell::text(&user.mobile_number))
        .cell(TableCell::badge(status, status_variant(status)))
        .attr("name", &name)
        .attr("email", &user.email_address)
        .attr("mobile", &user.mobile_number)
        .attr("status", status)
        .actions(status_row_actions(
            &USERS,
            &l.actions,
            &user.id,
            &name,
            user.active,
        ))
}

async fn build_table(
    state: &AppState,
    ctx: &ViewContext,
    status: &str,
) -> Result<TableConfig, PageError> {
    let users = resource(state).list_by_status(status).await?;
    let l = &ctx.i18n.labels().user;
    let rows = users.iter().map(|u| row(u, l)).collect();

    Ok(status_table(ctx, &USERS, l, status, columns(l), rows).sorted_by("name"))
}

/// GET /app/users/list/{status} - Users filtered by status.
pub async fn user_list(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(status): Path<String>,
) -> PageResult<ListPage> {
    let status = normalize_status(&status);
    let table = build_table(&state, &ctx, &status).await?;
    Ok(status_list_page(
        &ctx,
        &CHROME,
        &ctx.i18n.labels().user,
        &status,
        table,
    ))
}

/// GET /action/users/table/{status} - Table-only refresh.
pub async fn user_table(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(status): Path<String>,
) -> PageResult<TableConfig> {
    let status = normalize_status(&status);
    let table = build_table(&state, &ctx, &status).await?;
    Ok(Page::new(TABLE_CARD, table))
}

/// GET /action/users/add
pub async fn user_add_form(ctx: ViewContext) -> Page<UserForm> {
    Page::new(FORM_TEMPLATE, UserForm::new(&ctx, USERS.add()))
}

/// POST /action/users/add
pub async fn user_add(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).create(user_from(&form, String::new())).await?;
    Ok(HxSuccess::refresh(USERS.table_id))
}

/// GET /action/users/edit/{id}
pub async fn user_edit_form(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> Result<Page<UserForm>, AppError> {
    let user = resource(&state).read_for_edit(&id).await?;

    Ok(Page::new(
        FORM_TEMPLATE,
        UserForm {
            is_edit: true,
            id: id.clone(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email_address,
            mobile: user.mobile_number,
            active: user.active,
            ..UserForm::new(&ctx, USERS.edit(&id))
        },
    ))
}

/// POST /action/users/edit/{id}
pub async fn user_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormFields,
) -> ActionResult {
    resource(&state).update(user_from(&form, id)).await
}

/// POST /action/users/delete
pub async fn user_delete(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).delete(&form).await
}

/// POST /action/users/bulk-delete
pub async fn user_bulk_delete(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).bulk_delete(&form).await
}

/// POST /action/users/set-status
pub async fn user_set_status(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).set_status(&form).await
}

/// POST /action/users/bulk-set-status
pub async fn user_bulk_set_status(
    State(state): State<AppState>,
    form: FormFields,
) -> ActionResult {
    resource(&state).bulk_set_status(&form).await
}

/// User fields shared by the user and client forms.
pub(crate) fn user_from(form: &FormFields, id: String) -> User {
    User {
        id,
        first_name: form.value("first_name"),
        last_name: form.value("last_name"),
        email_address: form.value("email_address"),
        mobile_number: form.value("mobile_number"),
        active: form.checkbox("active"),
        date_created: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_uses_full_name() {
        let user = User {
            id: "u1".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            email_address: "ana@example.com".to_string(),
            active: true,
            ..Default::default()
        };

        let row = row(&user, &ModuleLabels::default());
        assert_eq!(row.cells[0].value, "Ana Reyes");
        assert_eq!(row.cells[3].variant, "success");
        assert_eq!(row.actions[0].href, "/app/users/detail/u1");
    }
}
