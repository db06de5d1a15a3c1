//! Client detail page with the basic-information and purchase-history tabs.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use serde::Serialize;

use super::crud::Resource;
use crate::i18n::ModuleLabels;
use crate::models::{Client, Entity, Revenue, STATUS_ACTIVE};
use crate::views::routes::CLIENTS;
use crate::views::{
    activate_tab, status_variant, Chip, Page, PageData, PageResult, TabItem, TabQuery,
    ViewContext,
};
use crate::AppState;

const TAB_BASIC: &str = "basic";
const TAB_HISTORY: &str = "history";

/// Currency shown when a revenue record carries none.
const DEFAULT_CURRENCY: &str = "PHP";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetail {
    #[serde(flatten)]
    pub page: PageData,
    pub content_template: String,
    pub labels: ModuleLabels,
    pub active_tab: String,
    pub tab_items: Vec<TabItem>,
    pub client_id: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub client_status: String,
    pub status_variant: String,
    pub edit_url: String,
    pub back_url: String,
    pub basic: BasicInfo,
    pub history: PurchaseHistory,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub company_name: String,
    pub customer_type: String,
    pub date_of_birth: String,
    pub street_address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub notes: String,
    pub full_address: String,
    pub tags: Vec<Chip>,
    pub has_company: bool,
    pub has_personal: bool,
    pub has_address: bool,
    pub has_notes: bool,
    pub has_tags: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseHistory {
    pub stats: PurchaseStats,
    pub orders: Vec<OrderRow>,
    pub has_orders: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseStats {
    pub lifetime_spend: String,
    pub total_orders: usize,
    pub avg_order_value: String,
    pub last_purchase: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: String,
    pub reference: String,
    pub date: String,
    pub amount: String,
    pub status: String,
    pub variant: String,
}

fn resource(state: &AppState) -> Resource<'_, Client> {
    Resource::new(state.stores.clients.as_ref(), &CLIENTS)
}

fn tab_items(id: &str, l: &ModuleLabels, active: &str) -> Vec<TabItem> {
    let tabs = &l.detail.tabs;
    let mut items = vec![
        TabItem::new(
            TAB_BASIC,
            &tabs.basic,
            CLIENTS.detail_tab(id, TAB_BASIC),
            CLIENTS.tab_action(id, TAB_BASIC),
            "icon-info",
        ),
        TabItem::new(
            TAB_HISTORY,
            &tabs.history,
            CLIENTS.detail_tab(id, TAB_HISTORY),
            CLIENTS.tab_action(id, TAB_HISTORY),
            "icon-shopping-bag",
        ),
    ];
    activate_tab(&mut items, active);
    items
}

/// Header fields plus the data of `tab`; unknown tabs leave both sections empty.
async fn build_detail(
    state: &AppState,
    ctx: &ViewContext,
    client: Client,
    tab: String,
) -> ClientDetail {
    let l = &ctx.i18n.labels().client;
    let name = client.display_name();
    let status = client.status();

    let page = ctx
        .page(&name, "clients", "")
        .subtitle(&client.user.email_address)
        .icon("icon-user");

    let mut detail = ClientDetail {
        page,
        content_template: "client-detail-content".to_string(),
        labels: l.clone(),
        tab_items: tab_items(&client.id, l, &tab),
        active_tab: tab,
        client_id: client.id.clone(),
        client_name: name,
        client_email: client.user.email_address.clone(),
        client_phone: client.user.mobile_number.clone(),
        client_status: status.to_string(),
        status_variant: status_variant(status).to_string(),
        edit_url: CLIENTS.edit(&client.id),
        back_url: CLIENTS.list(STATUS_ACTIVE),
        basic: BasicInfo::default(),
        history: PurchaseHistory::default(),
    };

    match detail.active_tab.as_str() {
        TAB_BASIC => {
            let tags = load_client_tags(state, &client.id).await;
            detail.basic = basic_info(client, tags);
        }
        TAB_HISTORY => {
            let revenues = load_revenues(state, &client.id).await;
            detail.history = purchase_history(&revenues);
        }
        _ => {}
    }

    detail
}

fn basic_info(client: Client, tags: Vec<Chip>) -> BasicInfo {
    let full_address = client.full_address();
    let info = BasicInfo {
        company_name: client.company_name.unwrap_or_default(),
        customer_type: client.customer_type.unwrap_or_default(),
        date_of_birth: client.date_of_birth.unwrap_or_default(),
        street_address: client.street_address.unwrap_or_default(),
        city: client.city.unwrap_or_default(),
        province: client.province.unwrap_or_default(),
        postal_code: client.postal_code.unwrap_or_default(),
        notes: client.notes.unwrap_or_default(),
        has_address: !full_address.is_empty(),
        has_tags: !tags.is_empty(),
        full_address,
        tags,
        ..Default::default()
    };

    BasicInfo {
        has_company: !info.company_name.is_empty() || !info.customer_type.is_empty(),
        has_personal: !info.date_of_birth.is_empty(),
        has_notes: !info.notes.is_empty(),
        ..info
    }
}

/// Names of the client-module tags assigned to the client. Load failures yield none.
async fn load_client_tags(state: &AppState, client_id: &str) -> Vec<Chip> {
    let categories = match state.stores.categories.list().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!(client_id = %client_id, error = %e, "Failed to load categories for client detail");
            return Vec::new();
        }
    };
    let names: HashMap<String, String> = categories
        .into_iter()
        .filter(|c| c.is_client_tag())
        .map(|c| (c.id, c.name))
        .collect();

    match state.stores.client_categories.list().await {
        Ok(rows) => rows
            .iter()
            .filter(|cc| cc.client_id == client_id)
            .filter_map(|cc| names.get(&cc.category_id))
            .map(|name| Chip {
                label: name.clone(),
                variant: String::new(),
            })
            .collect(),
        Err(e) => {
            tracing::error!(client_id = %client_id, error = %e, "Failed to load client tags for detail");
            Vec::new()
        }
    }
}

async fn load_revenues(state: &AppState, client_id: &str) -> Vec<Revenue> {
    match state.stores.revenues.list().await {
        Ok(revenues) => revenues
            .into_iter()
            .filter(|r| r.client_id == client_id)
            .collect(),
        Err(e) => {
            tracing::error!(client_id = %client_id, error = %e, "Failed to load revenues");
            Vec::new()
        }
    }
}

/// Badge variant for a revenue status.
pub fn revenue_variant(status: &str) -> &'static str {
    match status {
        "active" => "info",
        "completed" => "success",
        "cancelled" => "warning",
        _ => "default",
    }
}

/// Order rows, newest date first, with lifetime stats.
pub fn purchase_history(revenues: &[Revenue]) -> PurchaseHistory {
    let currency = revenues
        .iter()
        .map(|r| r.currency.as_str())
        .find(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CURRENCY);

    let mut orders: Vec<OrderRow> = revenues
        .iter()
        .map(|r| {
            let cur = if r.currency.is_empty() {
                DEFAULT_CURRENCY
            } else {
                r.currency.as_str()
            };
            OrderRow {
                id: r.id.clone(),
                reference: r.reference_number.clone(),
                date: r.revenue_date_string.clone(),
                amount: format!("{} {:.2}", cur, r.amount()),
                status: r.status.clone(),
                variant: revenue_variant(&r.status).to_string(),
            }
        })
        .collect();
    orders.sort_by(|a, b| b.date.cmp(&a.date));

    let total = revenues.iter().fold(0.0, |acc, r| acc + r.amount());
    let count = revenues.len();
    let average = if count > 0 { total / count as f64 } else { 0.0 };
    let last_purchase = orders
        .first()
        .map(|o| o.date.clone())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "N/A".to_string());

    PurchaseHistory {
        stats: PurchaseStats {
            lifetime_spend: format!("{} {:.2}", currency, total),
            total_orders: count,
            avg_order_value: format!("{} {:.2}", currency, average),
            last_purchase,
        },
        has_orders: !orders.is_empty(),
        orders,
    }
}

/// GET /app/clients/detail/{id}?tab=basic|history
pub async fn client_detail(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
    Query(query): Query<TabQuery>,
) -> PageResult<ClientDetail> {
    let client = resource(&state).read_for_page(&id).await?;
    let detail = build_detail(&state, &ctx, client, query.or(TAB_BASIC)).await;
    Ok(Page::new("client-detail", detail))
}

/// GET /action/clients/{id}/tab/{tab} - One tab partial.
pub async fn client_tab(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path((id, tab)): Path<(String, String)>,
) -> PageResult<ClientDetail> {
    let client = resource(&state).read_for_page(&id).await?;
    let template = format!("client-tab-{}", tab);
    let detail = build_detail(&state, &ctx, client, tab).await;
    Ok(Page::new(template, detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;

    fn revenue(id: &str, date: &str, amount: Amount, status: &str) -> Revenue {
        Revenue {
            id: id.to_string(),
            client_id: "c1".to_string(),
            reference_number: format!("REF-{}", id),
            revenue_date_string: date.to_string(),
            status: status.to_string(),
            currency: "PHP".to_string(),
            total_amount: Some(amount),
            active: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_purchase_history_sorted_with_stats() {
        let history = purchase_history(&[
            revenue("r1", "2024-01-10", Amount::Number(100.0), "completed"),
            revenue("r2", "2024-03-02", Amount::Text("50.5".to_string()), "active"),
            revenue("r3", "2023-12-25", Amount::Number(49.5), "cancelled"),
        ]);

        let dates: Vec<_> = history.orders.iter().map(|o| o.date.as_str()).collect();
        assert_eq!(dates, ["2024-03-02", "2024-01-10", "2023-12-25"]);
        assert_eq!(history.orders[0].amount, "PHP 50.50");
        assert_eq!(history.orders[0].variant, "info");
        assert_eq!(history.orders[2].variant, "warning");
        assert_eq!(history.stats.lifetime_spend, "PHP 200.00");
        assert_eq!(history.stats.total_orders, 3);
        assert_eq!(history.stats.avg_order_value, "PHP 66.67");
        assert_eq!(history.stats.last_purchase, "2024-03-02");
        assert!(history.has_orders);
    }

    #[test]
    fn test_empty_history() {
        let history = purchase_history(&[]);

        assert_eq!(history.stats.lifetime_spend, "PHP 0.00");
        assert_eq!(history.stats.avg_order_value, "PHP 0.00");
        assert_eq!(history.stats.last_purchase, "N/A");
        assert!(!history.has_orders);
    }

    #[test]
    fn test_revenue_variant() {
        assert_eq!(revenue_variant("completed"), "success");
        assert_eq!(revenue_variant("refunded"), "default");
    }

    #[test]
    fn test_basic_info_flags() {
        let client = Client {
            id: "c1".to_string(),
            city: Some("Cebu".to_string()),
            notes: Some(String::new()),
            ..Default::default()
        };

        let info = basic_info(client, Vec::new());
        assert_eq!(info.full_address, "Cebu");
        assert!(info.has_address);
        assert!(!info.has_company);
        assert!(!info.has_notes);
        assert!(!info.has_tags);
    }

    #[test]
    fn test_tab_items_mark_active() {
        let items = tab_items("c1", &ModuleLabels::default(), TAB_HISTORY);

        assert!(!items[0].active);
        assert!(items[1].active);
        assert_eq!(items[1].href, "/app/clients/detail/c1?tab=history");
        assert_eq!(items[1].hx_get, "/action/clients/c1/tab/history");
    }
}
