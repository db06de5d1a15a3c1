//! Permissions granted to one role.

use std::collections::{HashMap, HashSet};

use axum::extract::{Path, State};

use super::crud::Resource;
use super::junction::{
    junction_page_data, junction_table, remove_action, remove_assignment, required, AssignForm,
    JunctionPage,
};
use crate::errors::{AppError, PageError};
use crate::i18n::ModuleLabels;
use crate::models::{Permission, Role, RolePermission};
use crate::views::routes::{ROLES, ROLE_PERMISSIONS};
use crate::views::{
    format_date, ActionResult, FormFields, HxSuccess, Page, PageResult, SelectOption, TableCell,
    TableColumn, TableConfig, TableRow, ViewContext, TABLE_CARD,
};
use crate::AppState;

/// A junction row joined with its permission.
#[derive(Debug, Clone)]
pub struct AssignedPermission {
    pub assignment: RolePermission,
    pub permission: Permission,
}

/// Permissions assigned to `role_id`; junction rows whose permission is gone are skipped.
pub async fn permissions_for_role(
    state: &AppState,
    role_id: &str,
) -> Result<Vec<AssignedPermission>, AppError> {
    let assignments = state.stores.role_permissions.list().await?;
    let permissions: HashMap<String, Permission> = state
        .stores
        .permissions
        .list()
        .await?
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

    Ok(assignments
        .into_iter()
        .filter(|rp| rp.role_id == role_id)
        .filter_map(|rp| {
            let permission = permissions.get(&rp.permission_id)?.clone();
            Some(AssignedPermission {
                assignment: rp,
                permission,
            })
        })
        .collect())
}

fn columns(l: &ModuleLabels) -> Vec<TableColumn> {
    vec![
        TableColumn::new("permissionName", &l.columns.permission_name, true),
        TableColumn::new("code", &l.columns.code, true),
        TableColumn::new("type", &l.columns.kind, true).width("120px"),
        TableColumn::new("dateAssigned", &l.columns.date_assigned, true).width("180px"),
    ]
}

fn row(item: &AssignedPermission, role_id: &str, l: &ModuleLabels) -> TableRow {
    let permission = &item.permission;
    let kind = permission.permission_type;

    TableRow::new(&item.assignment.id)
        .cell(TableCell::text(&permission.name))
        .cell(TableCell::text(&permission.permission_code))
        .cell(TableCell::badge(kind.label(), kind.variant()))
        .cell(TableCell::text(format_date(&item.assignment.date_created)))
        .attr("permissionName", &permission.name)
        .attr("code", &permission.permission_code)
        .attr("type", kind.label())
        .actions(remove_action(
            &ROLE_PERMISSIONS,
            l,
            role_id,
            &permission.name,
            "role",
        ))
}

/// Assignment table for a role, shared with the role detail permissions tab.
pub async fn role_permissions_table(
    state: &AppState,
    ctx: &ViewContext,
    role_id: &str,
) -> Result<TableConfig, AppError> {
    let items = permissions_for_role(state, role_id).await?;
    let l = &ctx.i18n.labels().role_permission;
    let rows = items.iter().map(|item| row(item, role_id, l)).collect();

    Ok(junction_table(ctx, &ROLE_PERMISSIONS, l, role_id, columns(l), rows)
        .sorted_by("permissionName"))
}

async fn load_table(
    state: &AppState,
    ctx: &ViewContext,
    role_id: &str,
) -> Result<TableConfig, PageError> {
    role_permissions_table(state, ctx, role_id).await.map_err(|e| {
        tracing::error!(role_id = %role_id, error = %e, "Failed to load role permissions");
        PageError(AppError::Backend("Failed to load role permissions".to_string()))
    })
}

fn roles(state: &AppState) -> Resource<'_, Role> {
    Resource::new(state.stores.roles.as_ref(), &ROLES)
}

/// GET /app/roles/detail/{id}/permissions
pub async fn role_permissions_page(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> PageResult<JunctionPage> {
    let role = roles(&state).read_for_page(&id).await?;
    let table = load_table(&state, &ctx, &id).await?;
    let l = &ctx.i18n.labels().role_permission;

    Ok(Page::new(
        "role-permissions",
        JunctionPage {
            page: junction_page_data(&ctx, l, &role.name, ("users", "roles-active"), "icon-key"),
            content_template: "role-permissions-content".to_string(),
            table,
            parent_id: id,
            parent_name: role.name,
        },
    ))
}

/// GET /action/roles/detail/{id}/permissions/table
pub async fn role_permissions_table_view(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> PageResult<TableConfig> {
    roles(&state).read_for_page(&id).await?;
    let table = load_table(&state, &ctx, &id).await?;
    Ok(Page::new(TABLE_CARD, table))
}

/// Active permissions not yet on the role, labelled "Name (code)".
fn assignable_options(
    permissions: Vec<Permission>,
    assigned: &HashSet<String>,
) -> Vec<SelectOption> {
    permissions
        .into_iter()
        .filter(|p| p.active && !assigned.contains(&p.id))
        .map(|p| {
            let label = if p.permission_code.is_empty() {
                p.name
            } else {
                format!("{} ({})", p.name, p.permission_code)
            };
            SelectOption::new(&p.id, label)
        })
        .collect()
}

/// GET /action/roles/detail/{id}/permissions/assign
pub async fn role_permission_assign_form(
    State(state): State<AppState>,
    ctx: ViewContext,
    Path(id): Path<String>,
) -> Result<Page<AssignForm>, AppError> {
    let permissions = state.stores.permissions.list().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list permissions");
        AppError::Backend("Failed to load permissions".to_string())
    })?;
    let assigned: HashSet<String> = state
        .stores
        .role_permissions
        .list()
        .await
        .map_err(|e| {
            tracing::error!(role_id = %id, error = %e, "Failed to load role");
            AppError::Backend("Failed to load role".to_string())
        })?
        .into_iter()
        .filter(|rp| rp.role_id == id)
        .map(|rp| rp.permission_id)
        .collect();

    let l = &ctx.i18n.labels().role_permission;
    let options = assignable_options(permissions, &assigned);

    Ok(Page::new(
        "role-permission-assign-form",
        AssignForm::new(&ctx, &ROLE_PERMISSIONS, l, &id, "permission_id", options),
    ))
}

/// POST /action/roles/detail/{id}/permissions/assign
pub async fn role_permission_assign(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormFields,
) -> ActionResult {
    let permission_id = required(&form, "permission_id", "Permission")?;

    let assignment = RolePermission {
        role_id: id.clone(),
        permission_id,
        active: true,
        ..Default::default()
    };
    if let Err(e) = state.stores.role_permissions.create(assignment).await {
        tracing::error!(role_id = %id, error = %e, "Failed to assign permission");
        return Err(AppError::Backend("Failed to assign permission".to_string()));
    }

    Ok(HxSuccess::refresh(ROLE_PERMISSIONS.table_id))
}

/// POST /action/roles/detail/{id}/permissions/remove
pub async fn role_permission_remove(
    State(state): State<AppState>,
    Path(_id): Path<String>,
    form: FormFields,
) -> ActionResult {
    remove_assignment(
        state.stores.role_permissions.as_ref(),
        &form,
        "permission",
        ROLE_PERMISSIONS.table_id,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PermissionType;

    fn permission(id: &str, code: &str, active: bool) -> Permission {
        Permission {
            id: id.to_string(),
            name: id.to_uppercase(),
            permission_code: code.to_string(),
            permission_type: PermissionType::Allow,
            active,
            ..Default::default()
        }
    }

    #[test]
    fn test_assignable_options_skip_assigned_and_inactive() {
        let assigned: HashSet<String> = ["p2".to_string()].into_iter().collect();
        let options = assignable_options(
            vec![
                permission("p1", "clients:read", true),
                permission("p2", "clients:write", true),
                permission("p3", "", true),
                permission("p4", "x", false),
            ],
            &assigned,
        );

        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["P1 (clients:read)", "P3"]);
    }

    #[test]
    fn test_row_has_remove_confirmation() {
        let item = AssignedPermission {
            assignment: RolePermission {
                id: "rp1".to_string(),
                role_id: "r1".to_string(),
                permission_id: "p1".to_string(),
                date_created: "2024-05-01T10:00:00+00:00".to_string(),
                ..Default::default()
            },
            permission: Permission {
                name: "Refunds".to_string(),
                permission_type: PermissionType::Deny,
                ..Default::default()
            },
        };

        let row = row(&item, "r1", &ModuleLabels::default());
        assert_eq!(row.id, "rp1");
        assert_eq!(row.cells[2].variant, "danger");
        assert_eq!(row.cells[3].value, "2024-05-01 10:00");
        assert_eq!(row.actions[0].url, "/action/roles/detail/r1/permissions/remove");
        assert_eq!(
            row.actions[0].confirm_message,
            "Are you sure you want to remove Refunds from this role?"
        );
    }
}
