use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::contains_ci;

/// The audit page shows at most this many rows.
pub const RECENT_LIMIT: i64 = 100;

text_enum! {
    pub enum AuditAction {
        Create = "create" => "audit.action.create",
        Update = "update" => "audit.action.update",
        Delete = "delete" => "audit.action.delete",
        Login = "login" => "audit.action.login",
        Logout = "logout" => "audit.action.logout",
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AuditEntry {
    pub id: i64,
    pub user_id: Option<i64>,
    pub actor_name: Option<String>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    pub old_values: Option<serde_json::Value>,
    pub new_values: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Newest first, capped at `limit`.
pub async fn find_recent(pool: &PgPool, limit: i64) -> Result<Vec<AuditEntry>, AppError> {
    let rows = sqlx::query_as::<_, AuditEntry>(
        "SELECT a.id, a.user_id, p.full_name AS actor_name, a.action, a.entity_type, a.entity_id, \
                a.old_values, a.new_values, a.ip_address, a.user_agent, a.created_at \
         FROM audit_logs a \
         LEFT JOIN profiles p ON p.user_id = a.user_id \
         ORDER BY a.created_at DESC, a.id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Search over action and entity type, plus an exact entity-type filter.
pub fn filter_entries<'a>(
    entries: &'a [AuditEntry],
    search: &str,
    entity_type: Option<&str>,
) -> Vec<&'a AuditEntry> {
    entries
        .iter()
        .filter(|e| contains_ci(&e.action, search) || contains_ci(&e.entity_type, search))
        .filter(|e| entity_type.is_none_or(|t| e.entity_type == t))
        .collect()
}

/// Distinct entity types present, sorted, for the filter dropdown.
pub fn entity_types(entries: &[AuditEntry]) -> Vec<String> {
    let mut types: Vec<String> = entries.iter().map(|e| e.entity_type.clone()).collect();
    types.sort();
    types.dedup();
    types
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, action: &str, entity: &str) -> AuditEntry {
        AuditEntry {
            id,
            user_id: Some(1),
            actor_name: Some("Admin".into()),
            action: action.into(),
            entity_type: entity.into(),
            entity_id: Some(id),
            old_values: None,
            new_values: None,
            ip_address: None,
            user_agent: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn filter_by_search_and_entity() {
        let rows = vec![
            entry(1, "create", "meetings"),
            entry(2, "update", "complaints"),
            entry(3, "delete", "meetings"),
        ];
        assert_eq!(filter_entries(&rows, "meet", None).len(), 2);
        assert_eq!(filter_entries(&rows, "", Some("complaints")).len(), 1);
        assert_eq!(filter_entries(&rows, "delete", Some("meetings")).len(), 1);
    }

    #[test]
    fn entity_types_are_distinct_and_sorted() {
        let rows = vec![entry(1, "create", "meetings"), entry(2, "x", "complaints"), entry(3, "y", "meetings")];
        assert_eq!(entity_types(&rows), vec!["complaints".to_string(), "meetings".to_string()]);
    }
}
