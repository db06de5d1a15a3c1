//! Translation lookup.
//!
//! One JSON document backs both the dotted-key [`Translator::t`] lookup and the typed
//! [`Labels`] tree handed to templates.

mod labels;

pub use labels::*;

use std::path::Path;

use serde_json::Value;

use crate::errors::AppError;

/// English labels compiled into the binary.
const EMBEDDED_LABELS: &str = include_str!("../../labels/en.json");

/// Loaded labels, shared read-only across requests.
#[derive(Debug, Clone)]
pub struct Translator {
    tree: Value,
    labels: Labels,
}

impl Translator {
    /// Parse a labels document.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let tree: Value = serde_json::from_str(raw)?;
        let labels: Labels = serde_json::from_value(tree.clone())?;
        Ok(Self { tree, labels })
    }

    /// The English labels shipped with the crate.
    pub fn embedded() -> Result<Self, AppError> {
        Self::from_json(EMBEDDED_LABELS)
    }

    /// Load from a file, or fall back to the embedded labels when no path is configured.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            return Self::embedded();
        };

        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Internal(format!("Failed to read labels {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// Look up a dotted key such as `client.page.headingActive`.
    ///
    /// Missing keys and non-string values return the key itself.
    pub fn t(&self, key: &str) -> String {
        key.split('.')
            .try_fold(&self.tree, |node, part| node.get(part))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_missing_key() {
        let translator =
            Translator::from_json(r#"{"client":{"page":{"heading":"Clients"}}}"#).unwrap();

        assert_eq!(translator.t("client.page.heading"), "Clients");
        assert_eq!(translator.t("client.page.missing"), "client.page.missing");
        assert_eq!(translator.t("client.page"), "client.page");
    }

    #[test]
    fn test_typed_labels_share_the_document() {
        let translator = Translator::from_json(
            r#"{"role":{"page":{"headingActive":"Active Roles"},"columns":{"type":"Kind"}}}"#,
        )
        .unwrap();

        let role = &translator.labels().role;
        assert_eq!(role.page.heading_for("active"), "Active Roles");
        assert_eq!(role.columns.kind, "Kind");
        assert_eq!(role.page.heading_for("archived"), "");
    }

    #[test]
    fn test_embedded_labels_load() {
        let translator = Translator::embedded().unwrap();

        assert_eq!(translator.labels().role.page.heading_active, "Active Roles");
        assert_eq!(translator.t("client.buttons.add"), "Add Client");
        assert!(!translator.labels().common.table.search.is_empty());
    }

    #[test]
    fn test_invalid_document_is_an_error() {
        assert!(Translator::from_json("not json").is_err());
    }
}
