//! Client and user dashboards.

use axum::extract::{Query, State};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;
use crate::views::{build_chart_paths, Page, PageData, ViewContext};
use crate::AppState;

const RECENT_LIMIT: usize = 5;
const CHART_MONTHS: i32 = 12;
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDashboard {
    #[serde(flatten)]
    pub page: PageData,
    pub content_template: String,
}

/// GET /app/clients/dashboard
pub async fn client_dashboard(ctx: ViewContext) -> Page<ClientDashboard> {
    let title = ctx.t("dashboard.clientsTitle");
    let page = ctx.page(&title, "clients", "dashboard").icon("icon-users");

    Page::new(
        "client-dashboard",
        ClientDashboard {
            page,
            content_template: "client-dashboard-content".to_string(),
        },
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub active_users: usize,
    pub inactive_users: usize,
    pub total_roles: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub time_ago: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    pub period: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboard {
    #[serde(flatten)]
    pub page: PageData,
    pub content_template: String,
    pub stats: DashboardStats,
    pub recent_activity: Vec<ActivityItem>,
    pub chart_data: ChartData,
    pub active_period: String,
    pub chart_svg_path: String,
    pub chart_fill_path: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    #[serde(default)]
    pub period: String,
}

fn created_at(user: &User) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&user.date_created)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// "just now", "5m ago", "3h ago", "2d ago", else the date.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_days() < 30 {
        format!("{}d ago", elapsed.num_days())
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}

/// The newest users, one activity entry each.
pub fn recent_activity(users: &[User], new_user: &str, now: DateTime<Utc>) -> Vec<ActivityItem> {
    let mut dated: Vec<(DateTime<Utc>, &User)> =
        users.iter().filter_map(|u| Some((created_at(u)?, u))).collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    dated
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|(created, user)| ActivityItem {
            icon: "icon-user-plus".to_string(),
            title: new_user.to_string(),
            description: user.display_name(),
            time_ago: time_ago(created, now),
        })
        .collect()
}

/// Users created in each of the twelve months ending with `now`'s month, oldest first.
pub fn monthly_signups(users: &[User], now: DateTime<Utc>) -> (Vec<String>, Vec<usize>) {
    let current = now.year() * 12 + now.month0() as i32;
    let first = current - (CHART_MONTHS - 1);

    let labels = (first..=current)
        .map(|m| MONTHS[m.rem_euclid(12) as usize].to_string())
        .collect();

    let mut values = vec![0; CHART_MONTHS as usize];
    for created in users.iter().filter_map(created_at) {
        let month = created.year() * 12 + created.month0() as i32;
        if (first..=current).contains(&month) {
            values[(month - first) as usize] += 1;
        }
    }

    (labels, values)
}

fn stats(users: &[User], total_roles: usize) -> DashboardStats {
    let active = users.iter().filter(|u| u.active).count();
    DashboardStats {
        total_users: users.len(),
        active_users: active,
        inactive_users: users.len() - active,
        total_roles,
    }
}

/// GET /app/users/dashboard?period=
///
/// Store failures are logged and render zeroed cards.
pub async fn user_dashboard(
    State(state): State<AppState>,
    ctx: ViewContext,
    Query(query): Query<PeriodQuery>,
) -> Page<UserDashboard> {
    let l = &ctx.i18n.labels().dashboard;
    let period = if query.period.is_empty() {
        "year".to_string()
    } else {
        query.period
    };

    let users = match state.stores.users.list().await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load users for dashboard");
            Vec::new()
        }
    };
    let total_roles = match state.stores.roles.list().await {
        Ok(roles) => roles.len(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load roles for dashboard");
            0
        }
    };

    let now = Utc::now();
    let (labels, values) = monthly_signups(&users, now);
    let paths = build_chart_paths(&values);

    let page = ctx.page(&l.users_title, "users", "dashboard").icon("icon-shield");

    Page::new(
        "user-dashboard",
        UserDashboard {
            page,
            content_template: "user-dashboard-content".to_string(),
            stats: stats(&users, total_roles),
            recent_activity: recent_activity(&users, &l.new_user, now),
            chart_data: ChartData {
                labels,
                values,
                period: period.clone(),
            },
            active_period: period,
            chart_svg_path: paths.line,
            chart_fill_path: paths.fill,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user(id: &str, created: &str, active: bool) -> User {
        User {
            id: id.to_string(),
            first_name: id.to_uppercase(),
            last_name: "Reyes".to_string(),
            active,
            date_created: created.to_string(),
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_monthly_signups_window() {
        let users = vec![
            user("a", "2024-03-01T00:00:00Z", true),
            user("b", "2024-03-10T00:00:00Z", true),
            user("c", "2023-04-20T00:00:00Z", true),
            user("d", "2023-03-31T00:00:00Z", true),
            user("e", "not a date", true),
        ];

        let (labels, values) = monthly_signups(&users, now());
        assert_eq!(labels.first().unwrap(), "Apr");
        assert_eq!(labels.last().unwrap(), "Mar");
        assert_eq!(values.len(), 12);
        assert_eq!(values[0], 1);
        assert_eq!(values[11], 2);
        assert_eq!(values.iter().sum::<usize>(), 3);
    }

    #[test]
    fn test_recent_activity_newest_five() {
        let users: Vec<User> = (1..=7)
            .map(|d| user(&format!("u{}", d), &format!("2024-03-0{}T08:00:00Z", d), true))
            .collect();

        let items = recent_activity(&users, "New user", now());
        let names: Vec<_> = items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(names, ["U7 Reyes", "U6 Reyes", "U5 Reyes", "U4 Reyes", "U3 Reyes"]);
        assert_eq!(items[0].title, "New user");
        assert_eq!(items[0].time_ago, "8d ago");
    }

    #[test]
    fn test_time_ago() {
        let now = now();
        assert_eq!(time_ago(now, now), "just now");
        assert_eq!(time_ago(now - chrono::Duration::minutes(5), now), "5m ago");
        assert_eq!(time_ago(now - chrono::Duration::hours(3), now), "3h ago");
        assert_eq!(time_ago(now - chrono::Duration::days(45), now), "2024-01-30");
    }

    #[test]
    fn test_stats() {
        let users = vec![
            user("a", "", true),
            user("b", "", false),
            user("c", "", true),
        ];

        assert_eq!(
            stats(&users, 4),
            DashboardStats {
                total_users: 3,
                active_users: 2,
                inactive_users: 1,
                total_roles: 4,
            }
        );
    }
}
