//! Table view models consumed by the client-side table widget.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::i18n::{ActionLabels, BulkLabels, CommonLabels};
use crate::models::{STATUS_ACTIVE, STATUS_INACTIVE};

use super::routes::EntityRoutes;

/// Rows per page when a table does not set one.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Flat label set for the table toolbar and pager.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableLabels {
    pub search: String,
    pub search_placeholder: String,
    pub filters: String,
    pub filter_conditions: String,
    pub clear_all: String,
    pub add_condition: String,
    pub clear: String,
    pub apply_filters: String,
    pub sort: String,
    pub columns: String,
    pub export: String,
    pub density_default: String,
    pub density_comfortable: String,
    pub density_compact: String,
    pub show: String,
    pub entries: String,
    pub showing: String,
    pub to: String,
    pub of: String,
    pub entries_label: String,
    pub select_all: String,
    pub actions: String,
    pub prev: String,
    pub next: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub refresh_url: String,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
    pub show_search: bool,
    pub show_actions: bool,
    pub show_filters: bool,
    pub show_sort: bool,
    pub show_columns: bool,
    pub show_export: bool,
    pub show_density: bool,
    pub show_entries: bool,
    pub default_sort_column: String,
    pub default_sort_direction: String,
    pub page_size: usize,
    pub density: String,
    pub labels: TableLabels,
    pub empty_state: EmptyState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_action: Option<PrimaryAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_actions: Option<BulkActionsConfig>,
}

impl TableConfig {
    /// Table with every toolbar control switched on.
    pub fn full(id: &str, refresh_url: String, labels: &TableLabels) -> Self {
        Self {
            id: id.to_string(),
            refresh_url,
            show_search: true,
            show_actions: true,
            show_filters: true,
            show_sort: true,
            show_columns: true,
            show_export: true,
            show_density: true,
            show_entries: true,
            labels: labels.clone(),
            ..Default::default()
        }
    }

    /// Table for junction rows: no filters, no export.
    pub fn assignment(id: &str, refresh_url: String, labels: &TableLabels) -> Self {
        Self {
            show_filters: false,
            show_export: false,
            ..Self::full(id, refresh_url, labels)
        }
    }

    /// Attach rows, copying column widths onto cells, then fill defaults.
    pub fn with_rows(mut self, columns: Vec<TableColumn>, mut rows: Vec<TableRow>) -> Self {
        apply_column_styles(&columns, &mut rows);
        self.columns = columns;
        self.rows = rows;
        apply_table_settings(&mut self);
        self
    }

    pub fn sorted_by(mut self, column: &str) -> Self {
        self.default_sort_column = column.to_string();
        self.default_sort_direction = "asc".to_string();
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub width: String,
}

impl TableColumn {
    pub fn new(key: &str, label: &str, sortable: bool) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable,
            width: String::new(),
        }
    }

    pub fn width(mut self, width: &str) -> Self {
        self.width = width.to_string();
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<TableCell>,
    pub actions: Vec<TableAction>,
    pub data_attrs: BTreeMap<String, String>,
}

impl TableRow {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    pub fn cell(mut self, cell: TableCell) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.data_attrs.insert(key.to_string(), value.to_string());
        self
    }

    pub fn actions(mut self, actions: Vec<TableAction>) -> Self {
        self.actions = actions;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    #[default]
    Text,
    Badge,
    Chips,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    #[serde(rename = "type")]
    pub kind: CellKind,
    pub value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub variant: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub width: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chips: Vec<Chip>,
}

impl TableCell {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn badge(value: impl Into<String>, variant: &str) -> Self {
        Self {
            kind: CellKind::Badge,
            value: value.into(),
            variant: variant.to_string(),
            ..Default::default()
        }
    }

    pub fn chips(chips: Vec<Chip>) -> Self {
        let value = chips
            .iter()
            .map(|chip| chip.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            kind: CellKind::Chips,
            value,
            chips,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chip {
    pub label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub variant: String,
}

/// Per-row action button. Drawer actions set `url`, navigation sets `href`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub action: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub drawer_title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub item_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub confirm_title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub confirm_message: String,
}

impl TableAction {
    fn new(kind: &str, label: &str) -> Self {
        Self {
            kind: kind.to_string(),
            label: label.to_string(),
            action: kind.to_string(),
            ..Default::default()
        }
    }

    pub fn view(label: &str, href: String) -> Self {
        Self {
            href,
            ..Self::new("view", label)
        }
    }

    pub fn edit(label: &str, url: String) -> Self {
        Self {
            url,
            drawer_title: label.to_string(),
            ..Self::new("edit", label)
        }
    }

    pub fn delete(label: &str, url: String, item_name: &str) -> Self {
        Self {
            url,
            item_name: item_name.to_string(),
            ..Self::new("delete", label)
        }
    }

    /// Junction removal, confirmed by name.
    pub fn remove(label: &str, url: String, item_name: &str, from: &str) -> Self {
        Self {
            confirm_title: label.to_string(),
            confirm_message: format!(
                "Are you sure you want to remove {} from this {}?",
                item_name, from
            ),
            ..Self::delete(label, url, item_name)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryAction {
    pub label: String,
    pub action_url: String,
    pub icon: String,
}

impl PrimaryAction {
    pub fn new(label: &str, action_url: String) -> Self {
        Self {
            label: label.to_string(),
            action_url,
            icon: "icon-plus".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionsConfig {
    pub enabled: bool,
    pub select_all_label: String,
    pub selected_label: String,
    pub cancel_label: String,
    pub actions: Vec<BulkAction>,
}

impl BulkActionsConfig {
    pub fn new(bulk: &BulkLabels, actions: Vec<BulkAction>) -> Self {
        Self {
            enabled: true,
            select_all_label: bulk.select_all.clone(),
            selected_label: bulk.selected.clone(),
            cancel_label: bulk.clear_selection.clone(),
            actions,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAction {
    pub key: String,
    pub label: String,
    pub icon: String,
    pub variant: String,
    pub endpoint: String,
    pub confirm_title: String,
    pub confirm_message: String,
    #[serde(rename = "extraParamsJSON", skip_serializing_if = "String::is_empty")]
    pub extra_params_json: String,
}

impl BulkAction {
    /// Bulk delete with the irreversible-action warning.
    pub fn delete(label: &str, endpoint: String, noun: &str) -> Self {
        Self {
            key: "delete".to_string(),
            label: label.to_string(),
            icon: "icon-trash-2".to_string(),
            variant: "danger".to_string(),
            endpoint,
            confirm_title: label.to_string(),
            confirm_message: format!(
                "Are you sure you want to delete {{{{count}}}} {}(s)? This action cannot be undone.",
                noun
            ),
            extra_params_json: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyState {
    pub title: String,
    pub message: String,
}

impl EmptyState {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

/// Option in a select or multi-select.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: &str, label: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            label: label.into(),
            selected: false,
        }
    }
}

/// Tab in a detail page.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabItem {
    pub key: String,
    pub label: String,
    pub href: String,
    pub hx_get: String,
    pub icon: String,
    pub count: usize,
    pub active: bool,
}

impl TabItem {
    pub fn new(key: &str, label: &str, href: String, hx_get: String, icon: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            href,
            hx_get,
            icon: icon.to_string(),
            ..Default::default()
        }
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// Mark the tab matching `active`.
pub fn activate_tab(tabs: &mut [TabItem], active: &str) {
    for tab in tabs {
        tab.active = tab.key == active;
    }
}

/// Copy each column's width onto the matching cell of every row.
pub fn apply_column_styles(columns: &[TableColumn], rows: &mut [TableRow]) {
    for row in rows {
        for (cell, column) in row.cells.iter_mut().zip(columns) {
            if !column.width.is_empty() {
                cell.width = column.width.clone();
            }
        }
    }
}

/// Fill unset page size, density and default sort.
pub fn apply_table_settings(config: &mut TableConfig) {
    if config.page_size == 0 {
        config.page_size = DEFAULT_PAGE_SIZE;
    }
    if config.density.is_empty() {
        config.density = "default".to_string();
    }
    if config.default_sort_column.is_empty() {
        if let Some(column) = config.columns.iter().find(|c| c.sortable) {
            config.default_sort_column = column.key.clone();
        }
    }
    if !config.default_sort_column.is_empty() && config.default_sort_direction.is_empty() {
        config.default_sort_direction = "asc".to_string();
    }
}

/// Badge variant for a record status.
pub fn status_variant(status: &str) -> &'static str {
    match status {
        STATUS_ACTIVE => "success",
        STATUS_INACTIVE => "warning",
        _ => "default",
    }
}

/// Row actions for a status-managed entity; the view action only when a detail page exists.
pub fn status_row_actions(
    routes: &EntityRoutes,
    labels: &ActionLabels,
    id: &str,
    name: &str,
    active: bool,
) -> Vec<TableAction> {
    let (kind, label, target) = if active {
        ("deactivate", &labels.deactivate, STATUS_INACTIVE)
    } else {
        ("activate", &labels.activate, STATUS_ACTIVE)
    };

    let toggle = TableAction {
        url: routes.set_status(target),
        item_name: name.to_string(),
        confirm_title: label.clone(),
        confirm_message: format!("Are you sure you want to {} {}?", kind, name),
        ..TableAction::new(kind, label)
    };

    let mut actions = Vec::with_capacity(4);
    if routes.has_detail {
        actions.push(TableAction::view(&labels.view, routes.detail(id)));
    }
    actions.push(TableAction::edit(&labels.edit, routes.edit(id)));
    actions.push(toggle);
    actions.push(TableAction::delete(&labels.delete, routes.delete(), name));
    actions
}

/// Bulk actions for a status list: deactivate on active, activate on inactive, always delete.
pub fn status_bulk_actions(
    routes: &EntityRoutes,
    labels: &ActionLabels,
    common: &CommonLabels,
    status: &str,
) -> BulkActionsConfig {
    let noun = routes.noun;
    let mut actions = Vec::new();

    match status {
        STATUS_ACTIVE => actions.push(BulkAction {
            key: "deactivate".to_string(),
            label: labels.deactivate.clone(),
            icon: "icon-x-circle".to_string(),
            variant: "warning".to_string(),
            endpoint: routes.bulk_set_status(),
            confirm_title: labels.deactivate.clone(),
            confirm_message: format!(
                "Are you sure you want to deactivate {{{{count}}}} {}(s)?",
                noun
            ),
            extra_params_json: r#"{"target_status":"inactive"}"#.to_string(),
        }),
        STATUS_INACTIVE => actions.push(BulkAction {
            key: "activate".to_string(),
            label: labels.activate.clone(),
            icon: "icon-check-circle".to_string(),
            variant: "primary".to_string(),
            endpoint: routes.bulk_set_status(),
            confirm_title: labels.activate.clone(),
            confirm_message: format!(
                "Are you sure you want to activate {{{{count}}}} {}(s)?",
                noun
            ),
            extra_params_json: r#"{"target_status":"active"}"#.to_string(),
        }),
        _ => {}
    }

    actions.push(BulkAction::delete(
        &common.bulk.delete,
        routes.bulk_delete(),
        noun,
    ));

    BulkActionsConfig::new(&common.bulk, actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::routes::{PERMISSIONS, ROLES};

    fn labels() -> ActionLabels {
        ActionLabels {
            view: "View".to_string(),
            edit: "Edit".to_string(),
            delete: "Delete".to_string(),
            activate: "Activate".to_string(),
            deactivate: "Deactivate".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_column_styles_copies_widths() {
        let columns = vec![
            TableColumn::new("name", "Name", true),
            TableColumn::new("status", "Status", true).width("120px"),
        ];
        let mut rows = vec![TableRow::new("r1")
            .cell(TableCell::text("Admin"))
            .cell(TableCell::badge("active", "success"))];

        apply_column_styles(&columns, &mut rows);

        assert_eq!(rows[0].cells[0].width, "");
        assert_eq!(rows[0].cells[1].width, "120px");
    }

    #[test]
    fn test_apply_table_settings_fills_defaults() {
        let mut config = TableConfig {
            columns: vec![
                TableColumn::new("phone", "Phone", false),
                TableColumn::new("email", "Email", true),
            ],
            ..Default::default()
        };

        apply_table_settings(&mut config);

        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.density, "default");
        assert_eq!(config.default_sort_column, "email");
        assert_eq!(config.default_sort_direction, "asc");
    }

    #[test]
    fn test_status_row_actions_toggle_matches_state() {
        let active = status_row_actions(&ROLES, &labels(), "r1", "Admin", true);
        assert_eq!(active[2].kind, "deactivate");
        assert_eq!(active[2].url, "/action/roles/set-status?status=inactive");
        assert_eq!(
            active[2].confirm_message,
            "Are you sure you want to deactivate Admin?"
        );

        let inactive = status_row_actions(&ROLES, &labels(), "r1", "Admin", false);
        assert_eq!(inactive[2].kind, "activate");
        assert_eq!(inactive[2].url, "/action/roles/set-status?status=active");
        assert_eq!(inactive[1].drawer_title, "Edit");
        assert_eq!(inactive[0].href, "/app/roles/detail/r1");

        let no_detail = status_row_actions(&PERMISSIONS, &labels(), "p1", "Export", true);
        let kinds: Vec<_> = no_detail.iter().map(|a| a.kind.as_str()).collect();
        assert_eq!(kinds, ["edit", "deactivate", "delete"]);
    }

    #[test]
    fn test_status_bulk_actions_depend_on_status() {
        let common = CommonLabels::default();

        let active = status_bulk_actions(&ROLES, &labels(), &common, "active");
        let keys: Vec<_> = active.actions.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, ["deactivate", "delete"]);
        assert_eq!(
            active.actions[0].extra_params_json,
            r#"{"target_status":"inactive"}"#
        );
        assert_eq!(
            active.actions[0].confirm_message,
            "Are you sure you want to deactivate {{count}} role(s)?"
        );
        assert_eq!(
            active.actions[1].confirm_message,
            "Are you sure you want to delete {{count}} role(s)? This action cannot be undone."
        );

        let inactive = status_bulk_actions(&ROLES, &labels(), &common, "inactive");
        let keys: Vec<_> = inactive.actions.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, ["activate", "delete"]);

        let prospect = status_bulk_actions(&ROLES, &labels(), &common, "prospect");
        assert_eq!(prospect.actions.len(), 1);
    }

    #[test]
    fn test_chips_cell_joins_labels() {
        let cell = TableCell::chips(vec![
            Chip {
                label: "Admin".to_string(),
                variant: "info".to_string(),
            },
            Chip {
                label: "Cashier".to_string(),
                variant: String::new(),
            },
        ]);

        assert_eq!(cell.kind, CellKind::Chips);
        assert_eq!(cell.value, "Admin, Cashier");
    }
}
