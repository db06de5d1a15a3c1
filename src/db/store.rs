//! Entity storage seam and its SQLite implementation.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::Entity;

/// CRUD backend for one entity collection.
#[async_trait]
pub trait Store<E: Entity>: Send + Sync {
    /// Insert a record, assigning an id and creation time when blank.
    async fn create(&self, record: E) -> Result<E, AppError>;

    async fn read(&self, id: &str) -> Result<Option<E>, AppError>;

    /// Replace an existing record. Keeps the stored creation time when the input has none.
    async fn update(&self, record: E) -> Result<E, AppError>;

    async fn delete(&self, id: &str) -> Result<(), AppError>;

    /// All records in creation order.
    async fn list(&self) -> Result<Vec<E>, AppError>;

    /// Flip the `active` flag of one record.
    async fn set_active(&self, id: &str, active: bool) -> Result<(), AppError> {
        let mut record = self
            .read(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", E::LABEL, id)))?;
        record.set_active(active);
        self.update(record).await?;
        Ok(())
    }
}

/// Fill in the id and creation time of a new record.
pub fn stamp_new<E: Entity>(record: &mut E) {
    if record.id().is_empty() {
        record.set_id(uuid::Uuid::new_v4().to_string());
    }
    if record.date_created().is_empty() {
        record.set_date_created(Utc::now().to_rfc3339());
    }
}

/// Document store over the shared `records` table.
pub struct SqliteStore<E> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> SqliteStore<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: Entity> Store<E> for SqliteStore<E> {
    async fn create(&self, mut record: E) -> Result<E, AppError> {
        stamp_new(&mut record);
        let now = Utc::now().to_rfc3339();
        let data = serde_json::to_string(&record)?;

        sqlx::query(
            "INSERT INTO records (collection, id, data, date_created, date_modified) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(E::COLLECTION)
        .bind(record.id())
        .bind(&data)
        .bind(record.date_created())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::debug!(collection = E::COLLECTION, id = record.id(), "Record created");
        Ok(record)
    }

    async fn read(&self, id: &str) -> Result<Option<E>, AppError> {
        let row = sqlx::query("SELECT data FROM records WHERE collection = ? AND id = ?")
            .bind(E::COLLECTION)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let data: String = row.get("data");
                Ok(Some(serde_json::from_str(&data)?))
            }
            None => Ok(None),
        }
    }

    async fn update(&self, mut record: E) -> Result<E, AppError> {
        let existing = self.read(record.id()).await?.ok_or_else(|| {
            AppError::NotFound(format!("{} {} not found", E::LABEL, record.id()))
        })?;
        if record.date_created().is_empty() {
            record.set_date_created(existing.date_created().to_string());
        }

        let now = Utc::now().to_rfc3339();
        let data = serde_json::to_string(&record)?;

        sqlx::query(
            "UPDATE records SET data = ?, date_created = ?, date_modified = ? WHERE collection = ? AND id = ?",
        )
        .bind(&data)
        .bind(record.date_created())
        .bind(&now)
        .bind(E::COLLECTION)
        .bind(record.id())
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM records WHERE collection = ? AND id = ?")
            .bind(E::COLLECTION)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} {} not found", E::LABEL, id)));
        }

        tracing::debug!(collection = E::COLLECTION, id, "Record deleted");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<E>, AppError> {
        let rows = sqlx::query(
            "SELECT data FROM records WHERE collection = ? ORDER BY date_created, id",
        )
        .bind(E::COLLECTION)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let data: String = row.get("data");
                serde_json::from_str(&data).map_err(AppError::from)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use crate::models::{Role, User};
    use tempfile::TempDir;

    async fn pool() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("store.sqlite"))
            .await
            .unwrap();
        (pool, temp_dir)
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let (pool, _dir) = pool().await;
        let store: SqliteStore<Role> = SqliteStore::new(pool);

        let created = store
            .create(Role {
                name: "Cashier".to_string(),
                active: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(!created.id.is_empty());
        assert!(!created.date_created.is_empty());

        let mut edited = created.clone();
        edited.date_created = String::new();
        edited.description = "Front counter".to_string();
        let updated = store.update(edited).await.unwrap();
        assert_eq!(updated.date_created, created.date_created);

        let fetched = store.read(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.description, "Front counter");

        store.delete(&created.id).await.unwrap();
        assert!(store.read(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_active_false_persists() {
        let (pool, _dir) = pool().await;
        let store: SqliteStore<Role> = SqliteStore::new(pool);

        let role = store
            .create(Role {
                name: "Auditor".to_string(),
                active: true,
                ..Default::default()
            })
            .await
            .unwrap();

        store.set_active(&role.id, false).await.unwrap();
        assert!(!store.read(&role.id).await.unwrap().unwrap().active);

        store.set_active(&role.id, true).await.unwrap();
        assert!(store.read(&role.id).await.unwrap().unwrap().active);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let (pool, _dir) = pool().await;
        let roles: SqliteStore<Role> = SqliteStore::new(pool.clone());
        let users: SqliteStore<User> = SqliteStore::new(pool);

        roles
            .create(Role {
                id: "shared-id".to_string(),
                name: "Admin".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(roles.list().await.unwrap().len(), 1);
        assert!(users.list().await.unwrap().is_empty());
        assert!(users.read("shared-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_records_are_not_found() {
        let (pool, _dir) = pool().await;
        let store: SqliteStore<Role> = SqliteStore::new(pool);

        assert!(matches!(
            store.delete("missing").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.set_active("missing", false).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store
                .update(Role {
                    id: "missing".to_string(),
                    ..Default::default()
                })
                .await,
            Err(AppError::NotFound(_))
        ));
    }
}
