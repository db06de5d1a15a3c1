//! Roles held by one user through their workspace membership.

use std::collections::{HashMap, HashSet};

use axum::extract::{Path, State};

use super::crud::Resource;
use super::junction::{
    junction_page_data, junction_table, remove_action, remove_assignment, required, AssignForm,
    JunctionPage,
};
use crate::errors::{AppError, PageError};
use crate::i18n::ModuleLabels;
use crate::models::{Role, User, WorkspaceUserRole};
use crate::views::routes::{USERS, USER_ROLES};
use crate::views::{
    format_date, ActionResult, FormFields, HxSuccess, Page, PageResult, SelectOption, TableCell,
    TableColumn, TableConfig, TableRow, ViewContext, TABLE_CARD,
};
use crate::AppState;

#[derive(Debug, Clone)]
pub struct AssignedRole {
    pub assignment: WorkspaceUserRole,
    pub role: Role,
}

/// Id of the user's first workspace membership, if any.
pub async fn membership_for_user(
    state: &AppState,
    user_id: &str,
) -> Result<Option<String>, AppError> {
    Ok(state
        .stores
        .workspace_users
        .list()
        .await?
        .into_iter()
        .find(|wu| wu.user_id == user_id)
        .map(|wu| wu.id))
}

/// Ids of every membership the user holds.
async fn memberships_of(state: &AppState, user_id: &str) -> Result<HashSet<String>, AppError> {
    Ok(state
        .stores
        .workspace_users
        .list()
        .await?
        .into_iter()
        .filter(|wu| wu.user_id == user_id)
        .map(|wu| wu.id)
        .collect())
}

/// Roles assigned to any of the user's memberships. Dangling role ids are skipped.
pub async fn roles_for_user(
    state: &AppState,
    user_id: &str,
) -> Result<Vec<AssignedRole>, AppError> {
    let memberships = memberships_of(state, user_id).await?;
    if memberships.is_empty() {
        return Ok(Vec::new());
    }

    let roles: HashMap<String, Role> = state
        .stores
        .roles
        .list()
        .await?
        .into_iter()
        .map(|r| (r.id.clone(), r))
        .collect();

    Ok(state
        .stores
        .workspace_user_roles
        .list()
        .await?
        .into_iter()
        .filter(|wur| memberships.contains(&wur.workspace_user_id))
        .filter_map(|wur| {
            let role = roles.get(&wur.role_id)?.clone();
            Some(AssignedRole {
                assignment: wur,
                role,
            })
        })
        .collect())
}

fn columns(l: &ModuleLabels) -> Vec<TableColumn> {
    vec![
        TableColumn::new("roleName", &l.columns.role_name, true),
        TableColumn::new("description", &l.columns.description, false),
        TableColumn::new("color", &l.columns.color, false).width("120px"),
        TableColumn::new("dateAssigned", &l.columns.date_assigned, true).width("180px"),
    ]
}

fn color_variant(color: &str) -> &'static str {
    if color.is_empty() {
        "default"
    } else {
        "info"
    }
}

fn row(item: &AssignedRole, user_id: &str, l: &ModuleLabels) -> TableRow {
    let role = &item.role;

    TableRow::new(&item.assignment.id)
        .cell(TableCell::text(&role.name))
        .cell(TableCell::text(&role.description))
        .cell(TableCell::badge(&role.color, color_variant(&role.color)))
        .cell(TableCell::text(format_date(&item.assignment.date_created)))
        .attr("roleName", &role.name)
        .actions(remove_action(&USER_ROLES, l, user_id, &role.name, "user"))
}

/// Assignment table for a user's roles, shared with the user detail roles tab.
pub async fn user_roles_table(
    state: &AppState,
    ctx: &ViewContext,
    user_id: &str,
) -> Result<TableConfig, AppError> {
    let items = roles_for_user(state, user_id).await?;
    let l = &ctx.i18n.labels().user_role;
    let rows = items.iter().map(|item| row(item, user_id, l)).collect();

    Ok(junction_table(ctx, &USER_ROLES, l, user_id, columns(l), rows).sorted_by("roleName"))
}

async fn load_table(
    state: &AppState,
    ctx: &ViewContext,
    user_id: &str,
) -> Result<TableConfig, PageError> {
    user_roles_table(state, ctx, user_id).await.map_err(|e| {
        tracing::error!(user_id = %user_id, error = %e, "Failed to load user roles");
        PageError(AppError::Backend("Failed to load user roles".to_string()))
    })
}

fn users(state: &AppState) -> Resource<'_, User> {
    Resource::new(state.stores.users.as_ref(), &USERS)
}

/// GET /app/users/detail/{id}/roles
pub async fn user_roles_page(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> PageResult<JunctionPage> {
    let user = users(&state).read_for_page(&id).await?;
    let table = load_table(&state, &ctx, &id).await?;
    let l = &ctx.i18n.labels().user_role;
    let name = user.display_name();

    Ok(Page::new(
        "user-roles",
        JunctionPage {
            page: junction_page_data(&ctx, l, &name, ("users", "users-active"), "icon-shield"),
            content_template: "user-roles-content".to_string(),
            table,
            parent_id: id,
            parent_name: name,
        },
    ))
}

/// GET /action/users/detail/{id}/roles/table
pub async fn user_roles_table_view(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> PageResult<TableConfig> {
    users(&state).read_for_page(&id).await?;
    let table = load_table(&state, &ctx, &id).await?;
    Ok(Page::new(TABLE_CARD, table))
}

/// Active roles not yet held by the user.
fn assignable_options(roles: Vec<Role>, assigned: &HashSet<String>) -> Vec<SelectOption> {
    roles
        .into_iter()
        .filter(|r| r.active && !assigned.contains(&r.id))
        .map(|r| SelectOption::new(&r.id, r.name))
        .collect()
}

/// GET /action/users/detail/{id}/roles/assign
pub async fn user_role_assign_form(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> Result<Page<AssignForm>, AppError> {
    let load = async {
        let roles = state.stores.roles.list().await?;
        let assigned: HashSet<String> = roles_for_user(&state, &id)
            .await?
            .into_iter()
            .map(|item| item.role.id)
            .collect();
        Ok::<_, AppError>(assignable_options(roles, &assigned))
    };

    let options = load.await.map_err(|e| {
        tracing::error!(user_id = %id, error = %e, "Failed to load assignable roles");
        AppError::Backend("Failed to load roles".to_string())
    })?;

    let l = &ctx.i18n.labels().user_role;
    Ok(Page::new(
        "user-role-assign-form",
        AssignForm::new(&ctx, &USER_ROLES, l, &id, "role_id", options),
    ))
}

/// POST /action/users/detail/{id}/roles/assign
///
/// The role goes on the user's first workspace membership.
pub async fn user_role_assign(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormFields,
) -> ActionResult {
    let role_id = required(&form, "role_id", "Role")?;

    let membership = match membership_for_user(&state, &id).await {
        Ok(Some(membership)) => membership,
        Ok(None) => {
            return Err(AppError::Validation(
                "Failed to find workspace membership for this user".to_string(),
            ))
        }
        Err(e) => {
            tracing::error!(user_id = %id, error = %e, "Failed to look up workspace membership");
            return Err(AppError::Backend(
                "Failed to find workspace membership for this user".to_string(),
            ));
        }
    };

    let assignment = WorkspaceUserRole {
        workspace_user_id: membership,
        role_id,
        active: true,
        ..Default::default()
    };
    if let Err(e) = state.stores.workspace_user_roles.create(assignment).await {
        tracing::error!(user_id = %id, error = %e, "Failed to assign role");
        return Err(AppError::Backend("Failed to assign role".to_string()));
    }

    Ok(HxSuccess::refresh(USER_ROLES.table_id))
}

/// POST /action/users/detail/{id}/roles/remove
pub async fn user_role_remove(
    State(state): State<AppState>,
    Path(_id): Path<String>,
    form: FormFields,
) -> ActionResult {
    remove_assignment(
        state.stores.workspace_user_roles.as_ref(),
        &form,
        "role",
        USER_ROLES.table_id,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(id: &str, color: &str, active: bool) -> Role {
        Role {
            id: id.to_string(),
            name: id.to_uppercase(),
            color: color.to_string(),
            active,
            ..Default::default()
        }
    }

    #[test]
    fn test_assignable_options_skip_held_and_inactive() {
        let assigned: HashSet<String> = ["r2".to_string()].into_iter().collect();
        let options = assignable_options(
            vec![role("r1", "", true), role("r2", "", true), role("r3", "", false)],
            &assigned,
        );

        assert_eq!(options, vec![SelectOption::new("r1", "R1")]);
    }

    #[test]
    fn test_color_badge() {
        let item = AssignedRole {
            assignment: WorkspaceUserRole {
                id: "wur1".to_string(),
                workspace_user_id: "wu1".to_string(),
                role_id: "r1".to_string(),
                ..Default::default()
            },
            role: role("r1", "#ff0000", true),
        };

        let row = row(&item, "u1", &ModuleLabels::default());
        assert_eq!(row.cells[2].value, "#ff0000");
        assert_eq!(row.cells[2].variant, "info");
        assert_eq!(color_variant(""), "default");
        assert_eq!(row.actions[0].url, "/action/users/detail/u1/roles/remove");
    }
}
