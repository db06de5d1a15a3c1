//! Users holding one role through their workspace membership.

use std::collections::{HashMap, HashSet};

use axum::extract::{Path, State};

use super::crud::Resource;
use super::junction::{
    junction_page_data, junction_table, remove_action, remove_assignment, required, AssignForm,
    JunctionPage,
};
use crate::errors::{AppError, PageError};
use crate::i18n::ModuleLabels;
use crate::models::{Role, User, WorkspaceUser, WorkspaceUserRole};
use crate::views::routes::{ROLES, ROLE_USERS};
use crate::views::{
    format_date, ActionResult, FormFields, HxSuccess, Page, PageResult, SelectOption, TableCell,
    TableColumn, TableConfig, TableRow, ViewContext, TABLE_CARD,
};
use crate::AppState;

#[derive(Debug, Clone)]
pub struct AssignedUser {
    pub assignment: WorkspaceUserRole,
    pub user: User,
}

/// Users whose membership carries `role_id`. Dangling membership or user ids are skipped.
pub async fn users_for_role(
    state: &AppState,
    role_id: &str,
) -> Result<Vec<AssignedUser>, AppError> {
    let assignments = state.stores.workspace_user_roles.list().await?;
    let memberships: HashMap<String, WorkspaceUser> = state
        .stores
        .workspace_users
        .list()
        .await?
        .into_iter()
        .map(|wu| (wu.id.clone(), wu))
        .collect();
    let users: HashMap<String, User> = state
        .stores
        .users
        .list()
        .await?
        .into_iter()
        .map(|u| (u.id.clone(), u))
        .collect();

    Ok(assignments
        .into_iter()
        .filter(|wur| wur.role_id == role_id)
        .filter_map(|wur| {
            let membership = memberships.get(&wur.workspace_user_id)?;
            let user = users.get(&membership.user_id)?.clone();
            Some(AssignedUser {
                assignment: wur,
                user,
            })
        })
        .collect())
}

fn columns(l: &ModuleLabels) -> Vec<TableColumn> {
    vec![
        TableColumn::new("userName", &l.columns.user_name, true),
        TableColumn::new("email", &l.columns.email, true),
        TableColumn::new("dateAssigned", &l.columns.date_assigned, true).width("180px"),
    ]
}

fn row(item: &AssignedUser, role_id: &str, l: &ModuleLabels) -> TableRow {
    let name = item.user.full_name();

    TableRow::new(&item.assignment.id)
        .cell(TableCell::text(&name))
        .cell(TableCell::text(&item.user.email_address))
        .cell(TableCell::text(format_date(&item.assignment.date_created)))
        .attr("userName", &name)
        .attr("email", &item.user.email_address)
        .actions(remove_action(&ROLE_USERS, l, role_id, &name, "role"))
}

/// Assignment table for a role's users, shared with the role detail users tab.
pub async fn role_users_table(
    state: &AppState,
    ctx: &ViewContext,
    role_id: &str,
) -> Result<TableConfig, AppError> {
    let items = users_for_role(state, role_id).await?;
    let l = &ctx.i18n.labels().role_user;
    let rows = items.iter().map(|item| row(item, role_id, l)).collect();

    Ok(junction_table(ctx, &ROLE_USERS, l, role_id, columns(l), rows).sorted_by("userName"))
}

async fn load_table(
    state: &AppState,
    ctx: &ViewContext,
    role_id: &str,
) -> Result<TableConfig, PageError> {
    role_users_table(state, ctx, role_id).await.map_err(|e| {
        tracing::error!(role_id = %role_id, error = %e, "Failed to load role users");
        PageError(AppError::Backend("Failed to load role users".to_string()))
    })
}

fn roles(state: &AppState) -> Resource<'_, Role> {
    Resource::new(state.stores.roles.as_ref(), &ROLES)
}

/// GET /app/roles/detail/{id}/users
pub async fn role_users_page(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> PageResult<JunctionPage> {
    let role = roles(&state).read_for_page(&id).await?;
    let table = load_table(&state, &ctx, &id).await?;
    let l = &ctx.i18n.labels().role_user;

    Ok(Page::new(
        "role-users",
        JunctionPage {
            page: junction_page_data(&ctx, l, &role.name, ("users", "roles-active"), "icon-users"),
            content_template: "role-users-content".to_string(),
            table,
            parent_id: id,
            parent_name: role.name,
        },
    ))
}

/// GET /action/roles/detail/{id}/users/table
pub async fn role_users_table_view(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> PageResult<TableConfig> {
    roles(&state).read_for_page(&id).await?;
    let table = load_table(&state, &ctx, &id).await?;
    Ok(Page::new(TABLE_CARD, table))
}

/// Active memberships not yet holding the role, labelled "First Last (email)".
fn assignable_options(
    memberships: Vec<WorkspaceUser>,
    users: &HashMap<String, User>,
    assigned: &HashSet<String>,
) -> Vec<SelectOption> {
    memberships
        .into_iter()
        .filter(|wu| wu.active && !assigned.contains(&wu.id))
        .filter_map(|wu| {
            let user = users.get(&wu.user_id)?;
            let label = format!("{} ({})", user.full_name(), user.email_address);
            Some(SelectOption::new(&wu.id, label))
        })
        .collect()
}

/// GET /action/roles/detail/{id}/users/assign
pub async fn role_user_assign_form(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> Result<Page<AssignForm>, AppError> {
    let load = async {
        let memberships = state.stores.workspace_users.list().await?;
        let users: HashMap<String, User> = state
            .stores
            .users
            .list()
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();
        let assigned: HashSet<String> = state
            .stores
            .workspace_user_roles
            .list()
            .await?
            .into_iter()
            .filter(|wur| wur.role_id == id)
            .map(|wur| wur.workspace_user_id)
            .collect();
        Ok::<_, AppError>(assignable_options(memberships, &users, &assigned))
    };

    let options = load.await.map_err(|e| {
        tracing::error!(role_id = %id, error = %e, "Failed to load assignable users");
        AppError::Backend("Failed to load users".to_string())
    })?;

    let l = &ctx.i18n.labels().role_user;
    Ok(Page::new(
        "role-user-assign-form",
        AssignForm::new(&ctx, &ROLE_USERS, l, &id, "workspace_user_id", options),
    ))
}

/// POST /action/roles/detail/{id}/users/assign
pub async fn role_user_assign(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormFields,
) -> ActionResult {
    let workspace_user_id = required(&form, "workspace_user_id", "User")?;

    let assignment = WorkspaceUserRole {
        workspace_user_id,
        role_id: id.clone(),
        active: true,
        ..Default::default()
    };
    if let Err(e) = state.stores.workspace_user_roles.create(assignment).await {
        tracing::error!(role_id = %id, error = %e, "Failed to assign user");
        return Err(AppError::Backend("Failed to assign user".to_string()));
    }

    Ok(HxSuccess::refresh(ROLE_USERS.table_id))
}

/// POST /action/roles/detail/{id}/users/remove
pub async fn role_user_remove(
    State(state): State<AppState>,
    Path(_id): Path<String>,
    form: FormFields,
) -> ActionResult {
    remove_assignment(
        state.stores.workspace_user_roles.as_ref(),
        &form,
        "user",
        ROLE_USERS.table_id,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, first: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: "Cruz".to_string(),
            email_address: email.to_string(),
            active: true,
            ..Default::default()
        }
    }

    fn membership(id: &str, user_id: &str, active: bool) -> WorkspaceUser {
        WorkspaceUser {
            id: id.to_string(),
            user_id: user_id.to_string(),
            active,
            ..Default::default()
        }
    }

    #[test]
    fn test_assignable_options() {
        let users: HashMap<String, User> = [
            ("u1".to_string(), user("u1", "Ana", "ana@example.com")),
            ("u2".to_string(), user("u2", "Ben", "ben@example.com")),
        ]
        .into_iter()
        .collect();
        let assigned: HashSet<String> = ["wu2".to_string()].into_iter().collect();

        let options = assignable_options(
            vec![
                membership("wu1", "u1", true),
                membership("wu2", "u2", true),
                membership("wu3", "u1", false),
                membership("wu4", "missing", true),
            ],
            &users,
            &assigned,
        );

        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "wu1");
        assert_eq!(options[0].label, "Ana Cruz (ana@example.com)");
    }

    #[test]
    fn test_row_confirms_removal_from_role() {
        let item = AssignedUser {
            assignment: WorkspaceUserRole {
                id: "wur1".to_string(),
                workspace_user_id: "wu1".to_string(),
                role_id: "r1".to_string(),
                ..Default::default()
            },
            user: user("u1", "Ana", "ana@example.com"),
        };

        let row = row(&item, "r1", &ModuleLabels::default());
        assert_eq!(row.cells[0].value, "Ana Cruz");
        assert_eq!(row.actions[0].url, "/action/roles/detail/r1/users/remove");
        assert_eq!(
            row.actions[0].confirm_message,
            "Are you sure you want to remove Ana Cruz from this role?"
        );
    }
}
