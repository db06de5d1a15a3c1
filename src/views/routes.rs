//! URL builders for every page and action.

/// Route set for a status-managed entity living under `/app/<segment>` and `/action/<segment>`.
#[derive(Debug, Clone, Copy)]
pub struct EntityRoutes {
    /// URL segment, e.g. `roles`.
    pub segment: &'static str,
    /// Singular noun used in confirmations, e.g. `role`.
    pub noun: &'static str,
    /// DOM id of the list table, refreshed after every action.
    pub table_id: &'static str,
    /// Whether `/app/<segment>/detail/{id}` exists.
    pub has_detail: bool,
}

impl EntityRoutes {
    pub fn list(&self, status: &str) -> String {
        format!("/app/{}/list/{}", self.segment, status)
    }

    pub fn table(&self, status: &str) -> String {
        format!("/action/{}/table/{}", self.segment, status)
    }

    pub fn add(&self) -> String {
        format!("/action/{}/add", self.segment)
    }

    pub fn edit(&self, id: &str) -> String {
        format!("/action/{}/edit/{}", self.segment, id)
    }

    pub fn delete(&self) -> String {
        format!("/action/{}/delete", self.segment)
    }

    pub fn bulk_delete(&self) -> String {
        format!("/action/{}/bulk-delete", self.segment)
    }

    /// Row toggle; the table widget appends `&id=`.
    pub fn set_status(&self, target: &str) -> String {
        format!("/action/{}/set-status?status={}", self.segment, target)
    }

    pub fn bulk_set_status(&self) -> String {
        format!("/action/{}/bulk-set-status", self.segment)
    }

    pub fn detail(&self, id: &str) -> String {
        format!("/app/{}/detail/{}", self.segment, id)
    }

    pub fn detail_tab(&self, id: &str, tab: &str) -> String {
        format!("/app/{}/detail/{}?tab={}", self.segment, id, tab)
    }

    pub fn tab_action(&self, id: &str, tab: &str) -> String {
        format!("/action/{}/{}/tab/{}", self.segment, id, tab)
    }
}

pub const CLIENTS: EntityRoutes = EntityRoutes {
    segment: "clients",
    noun: "client",
    table_id: "clients-table",
    has_detail: true,
};

pub const USERS: EntityRoutes = EntityRoutes {
    segment: "users",
    noun: "user",
    table_id: "users-table",
    has_detail: true,
};

pub const ROLES: EntityRoutes = EntityRoutes {
    segment: "roles",
    noun: "role",
    table_id: "roles-table",
    has_detail: true,
};

pub const PERMISSIONS: EntityRoutes = EntityRoutes {
    segment: "permissions",
    noun: "permission",
    table_id: "permissions-table",
    has_detail: false,
};

pub const LOCATIONS: EntityRoutes = EntityRoutes {
    segment: "locations",
    noun: "location",
    table_id: "locations-table",
    has_detail: false,
};

pub const WORKSPACES: EntityRoutes = EntityRoutes {
    segment: "workspaces",
    noun: "workspace",
    table_id: "workspaces-table",
    has_detail: false,
};

pub const CLIENT_DASHBOARD: &str = "/app/clients/dashboard";
pub const USER_DASHBOARD: &str = "/app/users/dashboard";

pub const CLIENT_TAG_LIST: &str = "/app/clients/settings/tags/list";
pub const CLIENT_TAG_ADD: &str = "/action/clients/tags/add";
pub const CLIENT_TAG_DELETE: &str = "/action/clients/tags/delete";
pub const CLIENT_TAG_BULK_DELETE: &str = "/action/clients/tags/bulk-delete";
pub const CLIENT_TAG_TABLE_ID: &str = "client-tags-table";

pub fn client_tag_edit_url(id: &str) -> String {
    format!("/action/clients/tags/edit/{}", id)
}

pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const RESET_PASSWORD: &str = "/auth/reset-password";

/// Route set for a junction page hanging off a parent detail page,
/// e.g. `/app/roles/detail/{id}/permissions`.
#[derive(Debug, Clone, Copy)]
pub struct JunctionRoutes {
    pub parent: &'static str,
    pub child: &'static str,
    pub table_id: &'static str,
}

impl JunctionRoutes {
    pub fn page(&self, id: &str) -> String {
        format!("/app/{}/detail/{}/{}", self.parent, id, self.child)
    }

    pub fn table(&self, id: &str) -> String {
        format!("/action/{}/detail/{}/{}/table", self.parent, id, self.child)
    }

    pub fn assign(&self, id: &str) -> String {
        format!("/action/{}/detail/{}/{}/assign", self.parent, id, self.child)
    }

    pub fn remove(&self, id: &str) -> String {
        format!("/action/{}/detail/{}/{}/remove", self.parent, id, self.child)
    }
}

pub const ROLE_PERMISSIONS: JunctionRoutes = JunctionRoutes {
    parent: "roles",
    child: "permissions",
    table_id: "role-permissions-table",
};

pub const ROLE_USERS: JunctionRoutes = JunctionRoutes {
    parent: "roles",
    child: "users",
    table_id: "role-users-table",
};

pub const USER_ROLES: JunctionRoutes = JunctionRoutes {
    parent: "users",
    child: "roles",
    table_id: "user-roles-table",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_routes() {
        assert_eq!(CLIENTS.list("prospect"), "/app/clients/list/prospect");
        assert_eq!(USERS.table("inactive"), "/action/users/table/inactive");
        assert_eq!(ROLES.edit("r1"), "/action/roles/edit/r1");
        assert_eq!(
            WORKSPACES.set_status("active"),
            "/action/workspaces/set-status?status=active"
        );
        assert_eq!(CLIENTS.tab_action("c1", "history"), "/action/clients/c1/tab/history");
    }

    #[test]
    fn test_junction_routes_use_detail_form() {
        assert_eq!(ROLE_PERMISSIONS.page("r1"), "/app/roles/detail/r1/permissions");
        assert_eq!(
            USER_ROLES.assign("u1"),
            "/action/users/detail/u1/roles/assign"
        );
        assert_eq!(ROLE_USERS.remove("r1"), "/action/roles/detail/r1/users/remove");
    }
}
