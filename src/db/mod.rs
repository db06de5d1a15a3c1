//! Database module for SQLite persistence.
//!
//! Every entity collection lives in one `records` table as JSON documents.

#[cfg(test)]
mod memory;
mod store;

#[cfg(test)]
pub use memory::*;
pub use store::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::models::{
    Category, Client, ClientCategory, Location, Permission, Revenue, Role, RolePermission, User,
    Workspace, WorkspaceUser, WorkspaceUserRole,
};

/// One store handle per collection, shared by every handler.
#[derive(Clone)]
pub struct Stores {
    pub clients: Arc<dyn Store<Client>>,
    pub users: Arc<dyn Store<User>>,
    pub roles: Arc<dyn Store<Role>>,
    pub permissions: Arc<dyn Store<Permission>>,
    pub locations: Arc<dyn Store<Location>>,
    pub workspaces: Arc<dyn Store<Workspace>>,
    pub categories: Arc<dyn Store<Category>>,
    pub client_categories: Arc<dyn Store<ClientCategory>>,
    pub role_permissions: Arc<dyn Store<RolePermission>>,
    pub workspace_users: Arc<dyn Store<WorkspaceUser>>,
    pub workspace_user_roles: Arc<dyn Store<WorkspaceUserRole>>,
    pub revenues: Arc<dyn Store<Revenue>>,
}

impl Stores {
    pub fn sqlite(pool: SqlitePool) -> Self {
        Self {
            clients: Arc::new(SqliteStore::new(pool.clone())),
            users: Arc::new(SqliteStore::new(pool.clone())),
            roles: Arc::new(SqliteStore::new(pool.clone())),
            permissions: Arc::new(SqliteStore::new(pool.clone())),
            locations: Arc::new(SqliteStore::new(pool.clone())),
            workspaces: Arc::new(SqliteStore::new(pool.clone())),
            categories: Arc::new(SqliteStore::new(pool.clone())),
            client_categories: Arc::new(SqliteStore::new(pool.clone())),
            role_permissions: Arc::new(SqliteStore::new(pool.clone())),
            workspace_users: Arc::new(SqliteStore::new(pool.clone())),
            workspace_user_roles: Arc::new(SqliteStore::new(pool.clone())),
            revenues: Arc::new(SqliteStore::new(pool)),
        }
    }

    /// Empty in-memory stores; tests swap in the ones they inspect.
    #[cfg(test)]
    pub fn memory() -> Self {
        Self {
            clients: Arc::new(MemoryStore::new()),
            users: Arc::new(MemoryStore::new()),
            roles: Arc::new(MemoryStore::new()),
            permissions: Arc::new(MemoryStore::new()),
            locations: Arc::new(MemoryStore::new()),
            workspaces: Arc::new(MemoryStore::new()),
            categories: Arc::new(MemoryStore::new()),
            client_categories: Arc::new(MemoryStore::new()),
            role_permissions: Arc::new(MemoryStore::new()),
            workspace_users: Arc::new(MemoryStore::new()),
            workspace_user_roles: Arc::new(MemoryStore::new()),
            revenues: Arc::new(MemoryStore::new()),
        }
    }
}

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            data TEXT NOT NULL,
            date_created TEXT NOT NULL,
            date_modified TEXT NOT NULL,
            PRIMARY KEY (collection, id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_records_collection_created
            ON records(collection, date_created);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
