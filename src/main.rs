//! Back-office admin server
//!
//! Server-rendered admin pages for clients, users, roles and workspaces, backed by SQLite.
//! Pages are handed to the renderer as `{template, data}` JSON; drawer actions answer with
//! HTMX headers.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod i18n;
mod models;
mod views;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Stores;
use i18n::Translator;
use views::routes;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub i18n: Arc<Translator>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting back-office admin");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (BACKOFFICE_API_PSK). Authentication is disabled!");
    }

    let i18n = Translator::load(config.labels_path.as_deref())?;
    let pool = db::init_database(&config.db_path).await?;

    let state = AppState {
        stores: Stores::sqlite(pool),
        i18n: Arc::new(i18n),
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let psk = state.config.api_psk.clone();

    let protected = Router::new()
        // Clients
        .route(routes::CLIENT_DASHBOARD, get(api::client_dashboard))
        .route("/app/clients/list/{status}", get(api::client_list))
        .route("/app/clients/detail/{id}", get(api::client_detail))
        .route("/action/clients/table/{status}", get(api::client_table))
        .route(
            "/action/clients/add",
            get(api::client_add_form).post(api::client_add),
        )
        .route(
            "/action/clients/edit/{id}",
            get(api::client_edit_form).post(api::client_edit),
        )
        .route("/action/clients/delete", post(api::client_delete))
        .route("/action/clients/bulk-delete", post(api::client_bulk_delete))
        .route("/action/clients/set-status", post(api::client_set_status))
        .route(
            "/action/clients/bulk-set-status",
            post(api::client_bulk_set_status),
        )
        .route("/action/clients/{id}/tab/{tab}", get(api::client_tab))
        // Client tags
        .route(routes::CLIENT_TAG_LIST, get(api::client_tag_list))
        .route(
            "/action/clients/tags/add",
            get(api::client_tag_add_form).post(api::client_tag_add),
        )
        .route(
            "/action/clients/tags/edit/{id}",
            get(api::client_tag_edit_form).post(api::client_tag_edit),
        )
        .route("/action/clients/tags/delete", post(api::client_tag_delete))
        .route(
            "/action/clients/tags/bulk-delete",
            post(api::client_tag_bulk_delete),
        )
        // Users
        .route(routes::USER_DASHBOARD, get(api::user_dashboard))
        .route("/app/users/list/{status}", get(api::user_list))
        .route("/app/users/detail/{id}", get(api::user_detail))
        .route("/action/users/table/{status}", get(api::user_table))
        .route(
            "/action/users/add",
            get(api::user_add_form).post(api::user_add),
        )
        .route(
            "/action/users/edit/{id}",
            get(api::user_edit_form).post(api::user_edit),
        )
        .route("/action/users/delete", post(api::user_delete))
        .route("/action/users/bulk-delete", post(api::user_bulk_delete))
        .route("/action/users/set-status", post(api::user_set_status))
        .route(
            "/action/users/bulk-set-status",
            post(api::user_bulk_set_status),
        )
        .route("/action/users/{id}/tab/{tab}", get(api::user_tab))
        // User roles
        .route("/app/users/detail/{id}/roles", get(api::user_roles_page))
        .route("/app/manage/users/{id}/roles", get(api::user_roles_page))
        .route(
            "/action/users/detail/{id}/roles/table",
            get(api::user_roles_table_view),
        )
        .route(
            "/action/manage/users/{id}/roles/table",
            get(api::user_roles_table_view),
        )
        .route(
            "/action/users/detail/{id}/roles/assign",
            get(api::user_role_assign_form).post(api::user_role_assign),
        )
        .route(
            "/action/manage/users/{id}/roles/assign",
            get(api::user_role_assign_form).post(api::user_role_assign),
        )
        .route(
            "/action/users/detail/{id}/roles/remove",
            post(api::user_role_remove),
        )
        .route(
            "/action/manage/users/{id}/roles/remove",
            post(api::user_role_remove),
        )
        // Roles
        .route("/app/roles/list/{status}", get(api::role_list))
        .route("/app/roles/detail/{id}", get(api::role_detail))
        .route("/action/roles/table/{status}", get(api::role_table))
        .route(
            "/action/roles/add",
            get(api::role_add_form).post(api::role_add),
        )
        .route(
            "/action/roles/edit/{id}",
            get(api::role_edit_form).post(api::role_edit),
        )
        .route("/action/roles/delete", post(api::role_delete))
        .route("/action/roles/bulk-delete", post(api::role_bulk_delete))
        .route("/action/roles/set-status", post(api::role_set_status))
        .route(
            "/action/roles/bulk-set-status",
            post(api::role_bulk_set_status),
        )
        .route("/action/roles/{id}/tab/{tab}", get(api::role_tab))
        // Role permissions
        .route(
            "/app/roles/detail/{id}/permissions",
            get(api::role_permissions_page),
        )
        .route(
            "/app/manage/roles/{id}/permissions",
            get(api::role_permissions_page),
        )
        .route(
            "/action/roles/detail/{id}/permissions/table",
            get(api::role_permissions_table_view),
        )
        .route(
            "/action/manage/roles/{id}/permissions/table",
            get(api::role_permissions_table_view),
        )
        .route(
            "/action/roles/detail/{id}/permissions/assign",
            get(api::role_permission_assign_form).post(api::role_permission_assign),
        )
        .route(
            "/action/manage/roles/{id}/permissions/assign",
            get(api::role_permission_assign_form).post(api::role_permission_assign),
        )
        .route(
            "/action/roles/detail/{id}/permissions/remove",
            post(api::role_permission_remove),
        )
        .route(
            "/action/manage/roles/{id}/permissions/remove",
            post(api::role_permission_remove),
        )
        // Role users
        .route("/app/roles/detail/{id}/users", get(api::role_users_page))
        .route(
            "/action/roles/detail/{id}/users/table",
            get(api::role_users_table_view),
        )
        .route(
            "/action/roles/detail/{id}/users/assign",
            get(api::role_user_assign_form).post(api::role_user_assign),
        )
        .route(
            "/action/roles/detail/{id}/users/remove",
            post(api::role_user_remove),
        )
        // Permissions
        .route("/app/permissions/list/{status}", get(api::permission_list))
        .route(
            "/action/permissions/table/{status}",
            get(api::permission_table),
        )
        .route(
            "/action/permissions/add",
            get(api::permission_add_form).post(api::permission_add),
        )
        .route(
            "/action/permissions/edit/{id}",
            get(api::permission_edit_form).post(api::permission_edit),
        )
        .route("/action/permissions/delete", post(api::permission_delete))
        .route(
            "/action/permissions/bulk-delete",
            post(api::permission_bulk_delete),
        )
        .route(
            "/action/permissions/set-status",
            post(api::permission_set_status),
        )
        .route(
            "/action/permissions/bulk-set-status",
            post(api::permission_bulk_set_status),
        )
        // Locations
        .route("/app/locations/list/{status}", get(api::location_list))
        .route("/action/locations/table/{status}", get(api::location_table))
        .route(
            "/action/locations/add",
            get(api::location_add_form).post(api::location_add),
        )
        .route(
            "/action/locations/edit/{id}",
            get(api::location_edit_form).post(api::location_edit),
        )
        .route("/action/locations/delete", post(api::location_delete))
        .route(
            "/action/locations/bulk-delete",
            post(api::location_bulk_delete),
        )
        .route(
            "/action/locations/set-status",
            post(api::location_set_status),
        )
        .route(
            "/action/locations/bulk-set-status",
            post(api::location_bulk_set_status),
        )
        // Workspaces
        .route("/app/workspaces/list/{status}", get(api::workspace_list))
        .route(
            "/action/workspaces/table/{status}",
            get(api::workspace_table),
        )
        .route(
            "/action/workspaces/add",
            get(api::workspace_add_form).post(api::workspace_add),
        )
        .route(
            "/action/workspaces/edit/{id}",
            get(api::workspace_edit_form).post(api::workspace_edit),
        )
        .route("/action/workspaces/delete", post(api::workspace_delete))
        .route(
            "/action/workspaces/bulk-delete",
            post(api::workspace_bulk_delete),
        )
        .route(
            "/action/workspaces/set-status",
            post(api::workspace_set_status),
        )
        .route(
            "/action/workspaces/bulk-set-status",
            post(api::workspace_bulk_set_status),
        )
        // Apply PSK guard
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_guard(psk.clone(), req, next)
        }));

    // Login and health stay open
    let public_routes = Router::new()
        .route(routes::LOGIN, get(api::login_form).post(api::login_submit))
        .route("/health", get(health_check));

    Router::new()
        .merge(protected)
        .merge(public_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
