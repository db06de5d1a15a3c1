//! Client list page, drawer actions and tag assignment.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use axum::extract::{Path, State};
use serde::Serialize;

use super::crud::Resource;
use super::users::user_from;
use super::{status_list_page, status_table, ListChrome};
use crate::db::Store;
use crate::errors::{AppError, PageError};
use crate::i18n::{CommonLabels, FormLabels, ModuleLabels};
use crate::models::{Client, ClientCategory, Entity};
use crate::views::routes::CLIENTS;
use crate::views::{
    normalize_status, status_row_actions, status_variant, ActionResult, FormFields, HxSuccess,
    ListPage, Page, PageResult, SelectOption, TableCell, TableColumn, TableConfig, TableRow,
    ViewContext, TABLE_CARD,
};
use crate::AppState;

const CHROME: ListChrome = ListChrome {
    template: "client",
    nav: "clients",
    sub_nav_prefix: "",
    icon: "icon-users",
};

const FORM_TEMPLATE: &str = "client-drawer-form";

/// Pre-selected tag rendered as a chip in the multi-select.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedTag {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientForm {
    pub form_action: String,
    pub is_edit: bool,
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub active: bool,
    pub company_name: String,
    pub customer_type: String,
    pub date_of_birth: String,
    pub street_address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub notes: String,
    pub tag_options: Vec<SelectOption>,
    pub selected_tags: Vec<SelectedTag>,
    pub labels: FormLabels,
    pub common_labels: CommonLabels,
}

impl ClientForm {
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
            company_name: String::new(),
            customer_type: String::new(),
            date_of_birth: String::new(),
            street_address: String::new(),
            city: String::new(),
            province: String::new(),
            postal_code: String::new(),
            notes: String::new(),
            tag_options: Vec::new(),
            selected_tags: Vec::new(),
            labels: ctx.i18n.labels().client.form.clone(),
            common_labels: ctx.common().clone(),
        }
    }
}

fn resource(state: &AppState) -> Resource<'_, Client> {
    Resource::new(state.stores.clients.as_ref(), &CLIENTS)
}

fn columns(l: &ModuleLabels) -> Vec<TableColumn> {
    vec![
        TableColumn::new("name", &l.columns.name, true),
        TableColumn::new("email", &l.columns.email, true),
        TableColumn::new("phone", &l.columns.phone, false),
        TableColumn::new("status", &l.columns.status, true).width("120px"),
    ]
}

fn row(client: &Client, l: &ModuleLabels) -> TableRow {
    let status = client.status();
    let name = client.display_name();
    let user = &client.user;

    TableRow::new(&client.id)
        .cell(TableCell::text(&name))
        .cell(TableCell::text(&user.email_address))
        .cell(TableCell::text(&user.mobile_number))
        .cell(TableCell::badge(status, status_variant(status)))
        .attr("name", &name)
        .attr("email", &user.email_address)
        .attr("phone", &user.mobile_number)
        .attr("status", status)
        .actions(status_row_actions(
            &CLIENTS,
            &l.actions,
            &client.id,
            &name,
            client.active,
        ))
}

async fn build_table(
    state: &AppState,
    ctx: &ViewContext,
    status: &str,
) -> Result<TableConfig, PageError> {
    let clients = resource(state).list_by_status(status).await?;
    let l = &ctx.i18n.labels().client;
    let rows = clients.iter().map(|c| row(c, l)).collect();

    Ok(status_table(ctx, &CLIENTS, l, status, columns(l), rows).sorted_by("name"))
}

/// GET /app/clients/list/{status} - Active, inactive or prospect clients.
pub async fn client_list(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(status): Path<String>,
) -> PageResult<ListPage> {
    let status = normalize_status(&status);
    let table = build_table(&state, &ctx, &status).await?;
    Ok(status_list_page(
        &ctx,
        &CHROME,
        &ctx.i18n.labels().client,
        &status,
        table,
    ))
}

/// GET /action/clients/table/{status}
pub async fn client_table(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(status): Path<String>,
) -> PageResult<TableConfig> {
    let status = normalize_status(&status);
    let table = build_table(&state, &ctx, &status).await?;
    Ok(Page::new(TABLE_CARD, table))
}

/// GET /action/clients/add
pub async fn client_add_form(State(state): State<AppState>, ctx: ViewContext) -> Page<ClientForm> {
    let (tag_options, _) = load_tag_data(&state, None).await;

    Page::new(
        FORM_TEMPLATE,
        ClientForm {
            tag_options,
            ..ClientForm::new(&ctx, CLIENTS.add())
        },
    )
}

/// POST /action/clients/add
pub async fn client_add(State(state): State<AppState>, form: FormFields) -> ActionResult {
    let client = resource(&state)
        .create(client_from(&form, String::new()))
        .await?;

    let tag_ids = parse_tag_ids(&form.value("tags"));
    if !tag_ids.is_empty() {
        sync_client_tags(state.stores.client_categories.as_ref(), &client.id, &tag_ids).await;
    }

    Ok(HxSuccess::refresh(CLIENTS.table_id))
}

/// GET /action/clients/edit/{id}
pub async fn client_edit_form(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> Result<Page<ClientForm>, AppError> {
    let client = resource(&state).read_for_edit(&id).await?;
    let (tag_options, selected_tags) = load_tag_data(&state, Some(&id)).await;
    let user = client.user;

    Ok(Page::new(
        FORM_TEMPLATE,
        ClientForm {
            is_edit: true,
            id: id.clone(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email_address,
            mobile: user.mobile_number,
            active: client.active,
            company_name: client.company_name.unwrap_or_default(),
            customer_type: client.customer_type.unwrap_or_default(),
            date_of_birth: client.date_of_birth.unwrap_or_default(),
            street_address: client.street_address.unwrap_or_default(),
            city: client.city.unwrap_or_default(),
            province: client.province.unwrap_or_default(),
            postal_code: client.postal_code.unwrap_or_default(),
            notes: client.notes.unwrap_or_default(),
            tag_options,
            selected_tags,
            ..ClientForm::new(&ctx, CLIENTS.edit(&id))
        },
    ))
}

/// POST /action/clients/edit/{id}
///
/// Tags are always reconciled, so an empty `tags` field clears them.
pub async fn client_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormFields,
) -> ActionResult {
    let success = resource(&state)
        .update(client_from(&form, id.clone()))
        .await?;

    let tag_ids = parse_tag_ids(&form.value("tags"));
    sync_client_tags(state.stores.client_categories.as_ref(), &id, &tag_ids).await;

    Ok(success)
}

/// POST /action/clients/delete
pub async fn client_delete(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).delete(&form).await
}

/// POST /action/clients/bulk-delete
pub async fn client_bulk_delete(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).bulk_delete(&form).await
}

/// POST /action/clients/set-status
pub async fn client_set_status(State(state): State<AppState>, form: FormFields) -> ActionResult {
    resource(&state).set_status(&form).await
}

/// POST /action/clients/bulk-set-status
pub async fn client_bulk_set_status(
    State(state): State<AppState>,
    form: FormFields,
) -> ActionResult {
    resource(&state).bulk_set_status(&form).await
}

fn client_from(form: &FormFields, id: String) -> Client {
    Client {
        id,
        user: user_from(form, String::new()),
        active: form.checkbox("active"),
        company_name: form.optional("company_name"),
        customer_type: form.optional("customer_type"),
        date_of_birth: form.optional("date_of_birth"),
        street_address: form.optional("street_address"),
        city: form.optional("city"),
        province: form.optional("province"),
        postal_code: form.optional("postal_code"),
        notes: form.optional("notes"),
        date_created: String::new(),
    }
}

/// Split the multi-select's comma-separated hidden value into trimmed ids.
pub fn parse_tag_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Active client tags as options, with the ones assigned to `client_id` selected.
///
/// Load failures are logged and yield no options.
async fn load_tag_data(
    state: &AppState,
    client_id: Option<&str>,
) -> (Vec<SelectOption>, Vec<SelectedTag>) {
    let categories = match state.stores.categories.list().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load tag options");
            return (Vec::new(), Vec::new());
        }
    };

    let mut assigned = HashSet::new();
    if let Some(client_id) = client_id {
        match state.stores.client_categories.list().await {
            Ok(rows) => assigned.extend(
                rows.into_iter()
                    .filter(|cc| cc.client_id == client_id)
                    .map(|cc| cc.category_id),
            ),
            Err(e) => tracing::error!(client_id = %client_id, error = %e, "Failed to load client tags"),
        }
    }

    let mut options = Vec::new();
    let mut selected = Vec::new();
    for category in categories
        .into_iter()
        .filter(|c| c.is_client_tag() && c.active)
    {
        let is_assigned = assigned.contains(&category.id);
        if is_assigned {
            selected.push(SelectedTag {
                value: category.id.clone(),
                label: category.name.clone(),
            });
        }
        options.push(SelectOption {
            selected: is_assigned,
            ..SelectOption::new(&category.id, category.name)
        });
    }

    (options, selected)
}

/// Make the client's tag junction rows match `tag_ids`.
///
/// Missing rows are created and extra rows deleted. Each failure is logged and the
/// remaining work continues; a second call with the same ids makes no writes.
pub async fn sync_client_tags(
    store: &dyn Store<ClientCategory>,
    client_id: &str,
    tag_ids: &[String],
) {
    let rows = match store.list().await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(client_id = %client_id, error = %e, "Failed to list client tags for sync");
            return;
        }
    };

    let current: BTreeMap<String, String> = rows
        .into_iter()
        .filter(|cc| cc.client_id == client_id)
        .map(|cc| (cc.category_id, cc.id))
        .collect();
    let desired: BTreeSet<&str> = tag_ids.iter().map(String::as_str).collect();

    for tag_id in desired.iter().filter(|id| !current.contains_key(**id)) {
        let row = ClientCategory {
            client_id: client_id.to_string(),
            category_id: tag_id.to_string(),
            active: true,
            ..Default::default()
        };
        if let Err(e) = store.create(row).await {
            tracing::warn!(client_id = %client_id, tag_id = %tag_id, error = %e, "Failed to assign tag");
        }
    }

    for (tag_id, junction_id) in &current {
        if desired.contains(tag_id.as_str()) {
            continue;
        }
        if let Err(e) = store.delete(junction_id).await {
            tracing::warn!(client_id = %client_id, tag_id = %tag_id, error = %e, "Failed to remove tag");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn junction(id: &str, client_id: &str, category_id: &str) -> ClientCategory {
        ClientCategory {
            id: id.to_string(),
            client_id: client_id.to_string(),
            category_id: category_id.to_string(),
            active: true,
            ..Default::default()
        }
    }

    fn tags(store: &MemoryStore<ClientCategory>, client_id: &str) -> Vec<String> {
        let mut ids: Vec<String> = store
            .records()
            .into_iter()
            .filter(|cc| cc.client_id == client_id)
            .map(|cc| cc.category_id)
            .collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_parse_tag_ids() {
        assert_eq!(parse_tag_ids(" a, ,b,,c "), vec!["a", "b", "c"]);
        assert!(parse_tag_ids("").is_empty());
    }

    #[tokio::test]
    async fn test_sync_adds_and_removes() {
        let store = MemoryStore::with_records(vec![
            junction("j1", "c1", "vip"),
            junction("j2", "c1", "wholesale"),
            junction("j3", "c2", "vip"),
        ]);

        sync_client_tags(&store, "c1", &["vip".to_string(), "new".to_string()]).await;

        assert_eq!(tags(&store, "c1"), vec!["new", "vip"]);
        assert_eq!(tags(&store, "c2"), vec!["vip"]);
        assert_eq!(store.calls().creates, 1);
        assert_eq!(store.calls().deletes, 1);
    }

    #[tokio::test]
    async fn test_sync_is_idempotent() {
        let store = MemoryStore::<ClientCategory>::new();
        let ids = vec!["a".to_string(), "b".to_string()];

        sync_client_tags(&store, "c1", &ids).await;
        let after_first = store.calls();
        sync_client_tags(&store, "c1", &ids).await;
        let after_second = store.calls();

        assert_eq!(after_second.creates, after_first.creates);
        assert_eq!(after_second.deletes, after_first.deletes);
        assert_eq!(tags(&store, "c1"), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_empty_tags_clear_assignments() {
        let store = MemoryStore::with_records(vec![
            junction("j1", "c1", "a"),
            junction("j2", "c1", "b"),
        ]);

        sync_client_tags(&store, "c1", &parse_tag_ids("")).await;

        assert!(tags(&store, "c1").is_empty());
        assert_eq!(store.calls().creates, 0);
        assert_eq!(store.calls().deletes, 2);
    }

    #[tokio::test]
    async fn test_sync_continues_past_failures() {
        let store = MemoryStore::with_records(vec![
            junction("j1", "c1", "a"),
            junction("j2", "c1", "b"),
        ]);
        store.fail_on("j1");

        sync_client_tags(&store, "c1", &[]).await;

        assert_eq!(store.calls().deletes, 2);
        assert_eq!(tags(&store, "c1"), vec!["a"]);
    }

    #[tokio::test]
    async fn test_sync_skips_writes_when_list_fails() {
        let store = MemoryStore::<ClientCategory>::new();
        store.fail_list();

        sync_client_tags(&store, "c1", &["a".to_string()]).await;

        assert_eq!(store.calls().creates, 0);
    }

    #[test]
    fn test_client_from_form() {
        let form = FormFields::from_pairs(
            &[],
            &[
                ("first_name", "Ana"),
                ("email_address", "ana@example.com"),
                ("customer_type", "prospect"),
                ("city", ""),
                ("active", "true"),
            ],
        );

        let client = client_from(&form, "c1".to_string());
        assert_eq!(client.user.first_name, "Ana");
        assert!(client.user.active);
        assert_eq!(client.city, None);
        assert_eq!(client.customer_type.as_deref(), Some("prospect"));
        assert_eq!(client.status(), "active");
    }
}
