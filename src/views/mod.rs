//! View models and the renderer hand-off.
//!
//! Every page handler returns a [`Page`]: a template name plus the data the
//! external renderer fills it with. Action handlers return [`HxSuccess`] or an
//! [`AppError`], which both travel as headers only.

mod chart;
mod form;
pub mod routes;
mod table;

pub use chart::*;
pub use form::*;
pub use table::*;

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, PageError};
use crate::i18n::{CommonLabels, Translator};
use crate::models::STATUS_ACTIVE;
use crate::AppState;

pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// Template for table-only refreshes.
pub const TABLE_CARD: &str = "table-card";

/// Renderer hand-off: `{ "template": ..., "data": ... }`.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub template: String,
    pub data: T,
}

impl<T: Serialize> Page<T> {
    pub fn new(template: impl Into<String>, data: T) -> Self {
        Self {
            template: template.into(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Header-only success: closes the drawer and refreshes `table_id`.
#[derive(Debug, Clone)]
pub struct HxSuccess {
    pub table_id: String,
}

impl HxSuccess {
    pub fn refresh(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
        }
    }

    pub fn trigger(&self) -> String {
        serde_json::json!({
            "formSuccess": true,
            "refreshTable": self.table_id,
        })
        .to_string()
    }
}

impl IntoResponse for HxSuccess {
    fn into_response(self) -> Response {
        let value = HeaderValue::from_str(&self.trigger())
            .unwrap_or_else(|_| HeaderValue::from_static(r#"{"formSuccess":true}"#));

        let mut response = StatusCode::OK.into_response();
        response.headers_mut().insert(HX_TRIGGER, value);
        response
    }
}

pub type PageResult<T> = Result<Page<T>, PageError>;
pub type ActionResult = Result<HxSuccess, AppError>;

/// Per-request rendering context.
#[derive(Clone)]
pub struct ViewContext {
    pub cache_version: String,
    pub current_path: String,
    pub i18n: Arc<Translator>,
}

impl FromRequestParts<AppState> for ViewContext {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self {
            cache_version: state.config.cache_version.clone(),
            current_path: parts.uri.path().to_string(),
            i18n: state.i18n.clone(),
        })
    }
}

impl ViewContext {
    pub fn t(&self, key: &str) -> String {
        self.i18n.t(key)
    }

    pub fn common(&self) -> &CommonLabels {
        &self.i18n.labels().common
    }

    /// Page chrome with navigation already set.
    pub fn page(&self, title: &str, active_nav: &str, active_sub_nav: &str) -> PageData {
        PageData {
            cache_version: self.cache_version.clone(),
            title: title.to_string(),
            current_path: self.current_path.clone(),
            active_nav: active_nav.to_string(),
            active_sub_nav: active_sub_nav.to_string(),
            header_title: title.to_string(),
            header_subtitle: String::new(),
            header_icon: String::new(),
            common_labels: self.common().clone(),
        }
    }
}

/// Chrome shared by every full page.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub cache_version: String,
    pub title: String,
    pub current_path: String,
    pub active_nav: String,
    pub active_sub_nav: String,
    pub header_title: String,
    pub header_subtitle: String,
    pub header_icon: String,
    pub common_labels: CommonLabels,
}

impl PageData {
    pub fn subtitle(mut self, subtitle: &str) -> Self {
        self.header_subtitle = subtitle.to_string();
        self
    }

    pub fn header(mut self, title: &str) -> Self {
        self.header_title = title.to_string();
        self
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.header_icon = icon.to_string();
        self
    }
}

/// Full list page: chrome plus one table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    #[serde(flatten)]
    pub page: PageData,
    pub content_template: String,
    pub table: TableConfig,
}

/// `?tab=` on detail pages.
#[derive(Debug, Default, Deserialize)]
pub struct TabQuery {
    #[serde(default)]
    pub tab: String,
}

impl TabQuery {
    /// Requested tab, or `default` when none was given.
    pub fn or(self, default: &str) -> String {
        if self.tab.is_empty() {
            default.to_string()
        } else {
            self.tab
        }
    }
}

/// Empty path status means "active".
pub fn normalize_status(status: &str) -> String {
    if status.is_empty() {
        STATUS_ACTIVE.to_string()
    } else {
        status.to_string()
    }
}

/// Render an RFC 3339 timestamp as `YYYY-MM-DD HH:MM`; anything else passes through.
pub fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hx_success_header() {
        let response = HxSuccess::refresh("roles-table").into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let trigger = response.headers().get(HX_TRIGGER).unwrap().to_str().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(trigger).unwrap();
        assert_eq!(parsed["formSuccess"], true);
        assert_eq!(parsed["refreshTable"], "roles-table");
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status(""), "active");
        assert_eq!(normalize_status("prospect"), "prospect");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05T08:09:10+00:00"), "2024-03-05 08:09");
        assert_eq!(format_date("March 5"), "March 5");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_list_page_flattens_chrome() {
        let page = ListPage {
            page: PageData {
                title: "Active Roles".to_string(),
                ..Default::default()
            },
            content_template: "role-list-content".to_string(),
            table: TableConfig::default(),
        };

        let json = serde_json::to_value(Page::new("role-list", page)).unwrap();
        assert_eq!(json["template"], "role-list");
        assert_eq!(json["data"]["title"], "Active Roles");
        assert_eq!(json["data"]["contentTemplate"], "role-list-content");
        assert!(json["data"]["table"].is_object());
    }
}
