//! Append-only audit trail written by handlers after each mutation and on
//! sign-in/sign-out.

use actix_web::HttpRequest;
use serde_json::Value;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::audit::AuditAction;

/// Client details captured alongside each entry.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestMeta {
    pub fn from_request(req: &HttpRequest) -> Self {
        RequestMeta {
            ip_address: req.connection_info().realip_remote_addr().map(String::from),
            user_agent: req
                .headers()
                .get(actix_web::http::header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(String::from),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub user_id: Option<i64>,
    pub action: AuditAction,
    pub entity_type: &'static str,
    pub entity_id: Option<i64>,
    pub old_values: Option<Value>,
    pub new_values: Option<Value>,
}

impl AuditEvent {
    pub fn new(user_id: i64, action: AuditAction, entity_type: &'static str) -> Self {
        AuditEvent {
            user_id: Some(user_id),
            action,
            entity_type,
            entity_id: None,
            old_values: None,
            new_values: None,
        }
    }

    pub fn entity(mut self, id: i64) -> Self {
        self.entity_id = Some(id);
        self
    }

    pub fn old(mut self, values: Value) -> Self {
        self.old_values = Some(values);
        self
    }

    pub fn new_values(mut self, values: Value) -> Self {
        self.new_values = Some(values);
        self
    }
}

pub async fn log(pool: &PgPool, event: AuditEvent, meta: &RequestMeta) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO audit_logs (user_id, action, entity_type, entity_id, old_values, new_values, ip_address, user_agent) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(event.user_id)
    .bind(event.action.as_str())
    .bind(event.entity_type)
    .bind(event.entity_id)
    .bind(&event.old_values)
    .bind(&event.new_values)
    .bind(&meta.ip_address)
    .bind(&meta.user_agent)
    .execute(pool)
    .await
    .map_err(|e| {
        log::warn!("Audit write failed for {} {}: {e}", event.action, event.entity_type);
        AppError::Db(e)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use serde_json::json;

    #[test]
    fn builder_sets_fields() {
        let event = AuditEvent::new(5, AuditAction::Update, "complaints")
            .entity(9)
            .old(json!({"status": "pending"}))
            .new_values(json!({"status": "resolved"}));
        assert_eq!(event.user_id, Some(5));
        assert_eq!(event.entity_id, Some(9));
        assert_eq!(event.new_values.unwrap()["status"], "resolved");
    }

    #[test]
    fn meta_reads_user_agent_and_peer() {
        let req = TestRequest::default()
            .insert_header(("User-Agent", "Mozilla/5.0"))
            .peer_addr("10.1.2.3:5555".parse().unwrap())
            .to_http_request();
        let meta = RequestMeta::from_request(&req);
        assert_eq!(meta.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(meta.ip_address.as_deref(), Some("10.1.2.3"));
    }
}
