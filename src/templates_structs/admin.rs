use askama::Template;

use super::{PageContext, SelectOption, enum_options};
use crate::models::audit::{AuditAction, AuditEntry};
use crate::models::profile::{RoleStats, UserWithRoles};
use crate::models::role::AppRole;

pub struct UserRow {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub role: &'static str,
    pub role_label: String,
    pub roles_display: String,
    pub is_self: bool,
    /// False for the signed-in user's own row.
    pub can_change_role: bool,
    pub role_options: Vec<SelectOption>,
}

impl UserRow {
    pub fn new(u: &UserWithRoles, ctx: &PageContext, current_user_id: i64) -> Self {
        let highest = u.roles.highest();
        let is_self = u.profile.user_id == current_user_id;
        UserRow {
            user_id: u.profile.user_id,
            full_name: u.profile.full_name.clone(),
            email: u.profile.email.clone(),
            department: u.profile.department.clone().unwrap_or_default(),
            role: highest.as_str(),
            role_label: ctx.label(&highest),
            roles_display: u.roles.iter().map(|r| ctx.label(&r)).collect::<Vec<_>>().join(", "),
            is_self,
            can_change_role: !is_self,
            role_options: enum_options(ctx, AppRole::ALL, highest.as_str()),
        }
    }
}

pub struct AuditRow {
    pub actor: String,
    pub action: String,
    pub action_label: String,
    pub entity_label: String,
    pub entity_id: String,
    pub created: String,
    pub ip_address: String,
    pub changes: String,
}

impl AuditRow {
    pub fn new(e: &AuditEntry, ctx: &PageContext) -> Self {
        let action_label = e
            .action
            .parse::<AuditAction>()
            .map(|a| ctx.label(&a))
            .unwrap_or_else(|_| e.action.clone());
        let entity_key = format!("audit.entity.{}", e.entity_type);
        let entity_label = match ctx.t(&entity_key) {
            label if label == entity_key => e.entity_type.clone(),
            label => label.to_string(),
        };
        let changes = e
            .new_values
            .as_ref()
            .or(e.old_values.as_ref())
            .map(|v| v.to_string())
            .unwrap_or_default();
        AuditRow {
            actor: e.actor_name.clone().unwrap_or_else(|| "-".to_string()),
            action: e.action.clone(),
            action_label,
            entity_label,
            entity_id: e.entity_id.map(|id| id.to_string()).unwrap_or_default(),
            created: ctx.datetime(&e.created_at),
            ip_address: e.ip_address.clone().unwrap_or_default(),
            changes,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/index.html")]
pub struct AdminTemplate {
    pub ctx: PageContext,
    /// `users` or `audit`.
    pub tab: String,
    pub users: Vec<UserRow>,
    pub stats: RoleStats,
    pub user_search: String,
    pub role_options: Vec<SelectOption>,
    pub audit: Vec<AuditRow>,
    pub audit_search: String,
    pub entity_options: Vec<SelectOption>,
}
