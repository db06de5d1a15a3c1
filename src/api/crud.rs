//! Delete and status actions shared by every entity.
//!
//! The row id arrives as `?id=` (appended by the table widget) or as a form field.
//! Bulk actions are best-effort: a failed item is logged and the loop moves on.

use crate::db::Store;
use crate::errors::{AppError, PageError};
use crate::models::{Entity, STATUS_ACTIVE, STATUS_INACTIVE};
use crate::views::routes::EntityRoutes;
use crate::views::{ActionResult, FormFields, HxSuccess};

/// A store plus the names its actions report with.
pub struct Resource<'a, E: Entity> {
    pub store: &'a dyn Store<E>,
    /// Lowercase noun for messages ("No role IDs provided").
    pub noun: &'static str,
    pub table_id: &'static str,
}

impl<'a, E: Entity> Resource<'a, E> {
    pub fn new(store: &'a dyn Store<E>, routes: &EntityRoutes) -> Self {
        Self {
            store,
            noun: routes.noun,
            table_id: routes.table_id,
        }
    }

    fn success(&self) -> ActionResult {
        Ok(HxSuccess::refresh(self.table_id))
    }

    fn id_required() -> AppError {
        AppError::Validation(format!("{} ID is required", E::LABEL))
    }

    /// Read a record for an edit form; a miss or failed read is "<Entity> not found".
    pub async fn read_for_edit(&self, id: &str) -> Result<E, AppError> {
        match self.store.read(id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                tracing::warn!(id = %id, "{} not found", E::LABEL);
                Err(AppError::NotFound(format!("{} not found", E::LABEL)))
            }
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Failed to read {}", self.noun);
                Err(AppError::NotFound(format!("{} not found", E::LABEL)))
            }
        }
    }

    /// Parent record of a detail page. A miss is a 404, a failed read a 500.
    pub async fn read_for_page(&self, id: &str) -> Result<E, PageError> {
        match self.store.read(id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                tracing::warn!(id = %id, "{} not found", E::LABEL);
                Err(PageError(AppError::NotFound(format!("{} not found", E::LABEL))))
            }
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Failed to load {}", self.noun);
                Err(PageError(AppError::Backend(format!(
                    "Failed to load {}",
                    self.noun
                ))))
            }
        }
    }

    pub async fn create(&self, record: E) -> Result<E, AppError> {
        self.store.create(record).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create {}", self.noun);
            AppError::Backend(format!("Failed to create {}", self.noun))
        })
    }

    pub async fn update(&self, record: E) -> ActionResult {
        let id = record.id().to_string();
        if let Err(e) = self.store.update(record).await {
            tracing::error!(id = %id, error = %e, "Failed to update {}", self.noun);
            return Err(AppError::Backend(format!("Failed to update {}", self.noun)));
        }
        self.success()
    }

    pub async fn delete(&self, form: &FormFields) -> ActionResult {
        let id = resolve_id(form).ok_or_else(Self::id_required)?;

        if let Err(e) = self.store.delete(&id).await {
            tracing::error!(id = %id, error = %e, "Failed to delete {}", self.noun);
            return Err(AppError::Backend(format!("Failed to delete {}", self.noun)));
        }

        tracing::info!(id = %id, "Deleted {}", self.noun);
        self.success()
    }

    pub async fn bulk_delete(&self, form: &FormFields) -> ActionResult {
        let ids = self.require_ids(form)?;

        for id in &ids {
            if let Err(e) = self.store.delete(id).await {
                tracing::warn!(id = %id, error = %e, "Failed to delete {}", self.noun);
            }
        }

        self.success()
    }

    pub async fn set_status(&self, form: &FormFields) -> ActionResult {
        let (id, status) = match form.query_value("id") {
            id if !id.is_empty() => (id, form.query_value("status")),
            _ => (form.value("id"), form.value("status")),
        };

        if id.is_empty() {
            return Err(Self::id_required());
        }
        let active = parse_target(&status)
            .ok_or_else(|| AppError::InvalidStatus("Invalid status".to_string()))?;

        if let Err(e) = self.store.set_active(&id, active).await {
            tracing::error!(id = %id, error = %e, "Failed to update {} status", self.noun);
            return Err(AppError::Backend(format!(
                "Failed to update {} status",
                self.noun
            )));
        }

        self.success()
    }

    pub async fn bulk_set_status(&self, form: &FormFields) -> ActionResult {
        let ids = self.require_ids(form)?;
        let active = parse_target(&form.value("target_status"))
            .ok_or_else(|| AppError::InvalidStatus("Invalid target status".to_string()))?;

        for id in &ids {
            if let Err(e) = self.store.set_active(id, active).await {
                tracing::warn!(id = %id, error = %e, "Failed to update {} status", self.noun);
            }
        }

        self.success()
    }

    /// Whole collection filtered to one computed status.
    pub async fn list_by_status(&self, status: &str) -> Result<Vec<E>, PageError> {
        let records = self.store.list().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list {}s", self.noun);
            PageError(AppError::Backend(format!("Failed to load {}s", self.noun)))
        })?;

        Ok(records
            .into_iter()
            .filter(|record| record.status() == status)
            .collect())
    }

    fn require_ids(&self, form: &FormFields) -> Result<Vec<String>, AppError> {
        let ids: Vec<String> = form
            .all("id")
            .into_iter()
            .filter(|id| !id.is_empty())
            .collect();
        if ids.is_empty() {
            return Err(AppError::Validation(format!(
                "No {} IDs provided",
                self.noun
            )));
        }
        Ok(ids)
    }
}

/// Row id from `?id=`, else from the form body.
pub fn resolve_id(form: &FormFields) -> Option<String> {
    let id = form.query_value("id");
    let id = if id.is_empty() { form.value("id") } else { id };
    (!id.is_empty()).then_some(id)
}

fn parse_target(status: &str) -> Option<bool> {
    match status {
        STATUS_ACTIVE => Some(true),
        STATUS_INACTIVE => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::Role;
    use crate::views::routes::ROLES;

    fn role(id: &str, active: bool) -> Role {
        Role {
            id: id.to_string(),
            name: id.to_uppercase(),
            active,
            ..Default::default()
        }
    }

    fn message(result: ActionResult) -> String {
        result.unwrap_err().message()
    }

    #[tokio::test]
    async fn test_delete_requires_id() {
        let store = MemoryStore::<Role>::new();
        let resource = Resource::new(&store, &ROLES);

        let result = resource.delete(&FormFields::default()).await;
        assert_eq!(message(result), "Role ID is required");
        assert_eq!(store.calls().deletes, 0);
    }

    #[tokio::test]
    async fn test_delete_prefers_query_id() {
        let store = MemoryStore::with_records(vec![role("a", true), role("b", true)]);
        let resource = Resource::new(&store, &ROLES);

        let form = FormFields::from_pairs(&[("id", "a")], &[("id", "b")]);
        let success = resource.delete(&form).await.unwrap();

        assert_eq!(success.table_id, "roles-table");
        let left: Vec<_> = store.records().into_iter().map(|r| r.id).collect();
        assert_eq!(left, vec!["b"]);
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        let store = MemoryStore::with_records(vec![role("a", true)]);
        store.fail_on("a");
        let resource = Resource::new(&store, &ROLES);

        let form = FormFields::from_pairs(&[], &[("id", "a")]);
        assert_eq!(message(resource.delete(&form).await), "Failed to delete role");
    }

    #[tokio::test]
    async fn test_set_status_rejects_unknown_status_without_backend_call() {
        let store = MemoryStore::with_records(vec![role("a", true)]);
        let resource = Resource::new(&store, &ROLES);

        let form = FormFields::from_pairs(&[("id", "a"), ("status", "pending")], &[]);
        assert_eq!(message(resource.set_status(&form).await), "Invalid status");
        assert_eq!(store.calls().set_actives, 0);
    }

    #[tokio::test]
    async fn test_set_status_reads_form_when_query_id_missing() {
        let store = MemoryStore::with_records(vec![role("a", true)]);
        let resource = Resource::new(&store, &ROLES);

        let form = FormFields::from_pairs(&[], &[("id", "a"), ("status", "inactive")]);
        resource.set_status(&form).await.unwrap();

        assert!(!store.records()[0].active);
    }

    #[tokio::test]
    async fn test_bulk_delete_continues_past_failures() {
        let store = MemoryStore::with_records(vec![
            role("a", true),
            role("b", true),
            role("c", true),
        ]);
        store.fail_on("b");
        let resource = Resource::new(&store, &ROLES);

        let form = FormFields::from_pairs(&[], &[("id", "a"), ("id", "b"), ("id", "c")]);
        resource.bulk_delete(&form).await.unwrap();

        assert_eq!(store.calls().deletes, 3);
        let left: Vec<_> = store.records().into_iter().map(|r| r.id).collect();
        assert_eq!(left, vec!["b"]);
    }

    #[tokio::test]
    async fn test_bulk_delete_without_ids() {
        let store = MemoryStore::<Role>::new();
        let resource = Resource::new(&store, &ROLES);

        let result = resource.bulk_delete(&FormFields::default()).await;
        assert_eq!(message(result), "No role IDs provided");
    }

    #[tokio::test]
    async fn test_bulk_set_status_checks_ids_then_target() {
        let store = MemoryStore::with_records(vec![role("a", true)]);
        let resource = Resource::new(&store, &ROLES);

        let no_ids = FormFields::from_pairs(&[], &[("target_status", "archived")]);
        assert_eq!(
            message(resource.bulk_set_status(&no_ids).await),
            "No role IDs provided"
        );

        let bad_target = FormFields::from_pairs(&[], &[("id", "a"), ("target_status", "archived")]);
        assert_eq!(
            message(resource.bulk_set_status(&bad_target).await),
            "Invalid target status"
        );
        assert_eq!(store.calls().set_actives, 0);
    }

    #[tokio::test]
    async fn test_bulk_set_status_is_best_effort() {
        let store = MemoryStore::with_records(vec![
            role("a", true),
            role("b", true),
            role("c", true),
        ]);
        store.fail_on("a");
        let resource = Resource::new(&store, &ROLES);

        let form = FormFields::from_pairs(
            &[],
            &[("id", "a"), ("id", "b"), ("id", "c"), ("target_status", "inactive")],
        );
        resource.bulk_set_status(&form).await.unwrap();

        assert_eq!(store.calls().set_actives, 3);
        let active: Vec<_> = store.records().into_iter().map(|r| r.active).collect();
        assert_eq!(active, vec![true, false, false]);
    }

    #[tokio::test]
    async fn test_list_by_status_filters() {
        let store = MemoryStore::with_records(vec![
            role("a", true),
            role("b", false),
            role("c", true),
        ]);
        let resource = Resource::new(&store, &ROLES);

        let active: Vec<_> = resource
            .list_by_status("active")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(active, vec!["a", "c"]);

        let inactive = resource.list_by_status("inactive").await.unwrap();
        assert_eq!(inactive.len(), 1);
        assert!(resource.list_by_status("prospect").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_is_page_error() {
        let store = MemoryStore::<Role>::new();
        store.fail_list();
        let resource = Resource::new(&store, &ROLES);

        let err = resource.list_by_status("active").await.unwrap_err();
        assert_eq!(err.0.status_code(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_resolve_id() {
        assert_eq!(resolve_id(&FormFields::default()), None);
        let form = FormFields::from_pairs(&[("id", "")], &[("id", "b")]);
        assert_eq!(resolve_id(&form), Some("b".to_string()));
    }
}
