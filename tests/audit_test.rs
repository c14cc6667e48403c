//! Audit trail writes and the dashboard summary.

mod common;

use serde_json::json;

use mbj_portal::audit::{self, AuditEvent, RequestMeta};
use mbj_portal::models::Priority;
use mbj_portal::models::audit::{self as audit_log, AuditAction, RECENT_LIMIT};
use mbj_portal::models::complaint::{self, ComplaintCategory, ComplaintInput, ComplaintType};
use mbj_portal::models::dashboard;
use mbj_portal::models::role::AppRole;
use common::*;

#[tokio::test]
async fn test_audit_entries_keep_json_and_actor() {
    let Some(db) = setup_test_db().await else { return };
    let chair = create_user(&db.pool, "pengerusi@jpj.gov.my", "Pengerusi", AppRole::Chairman).await;

    let meta = RequestMeta {
        ip_address: Some("10.1.2.3".to_string()),
        user_agent: Some("test-agent".to_string()),
    };
    audit::log(&db.pool, AuditEvent::new(chair, AuditAction::Login, "accounts").entity(chair), &meta)
        .await
        .expect("Failed to write audit entry");
    audit::log(
        &db.pool,
        AuditEvent::new(chair, AuditAction::Update, "user_roles")
            .entity(42)
            .old(json!({ "roles": ["staff"] }))
            .new_values(json!({ "roles": ["committee"] })),
        &meta,
    )
    .await
    .unwrap();

    let entries = audit_log::find_recent(&db.pool, RECENT_LIMIT).await.unwrap();
    assert_eq!(entries.len(), 2);
    let newest = &entries[0];
    assert_eq!(newest.action, "update");
    assert_eq!(newest.entity_type, "user_roles");
    assert_eq!(newest.entity_id, Some(42));
    assert_eq!(newest.actor_name.as_deref(), Some("Pengerusi"));
    assert_eq!(newest.ip_address.as_deref(), Some("10.1.2.3"));
    assert_eq!(newest.old_values, Some(json!({ "roles": ["staff"] })));
    assert_eq!(newest.new_values, Some(json!({ "roles": ["committee"] })));

    assert_eq!(audit_log::entity_types(&entries), vec!["accounts", "user_roles"]);
    assert_eq!(audit_log::find_recent(&db.pool, 1).await.unwrap().len(), 1);

    db.cleanup().await;
}

#[tokio::test]
async fn test_dashboard_scopes_complaints_for_staff() {
    let Some(db) = setup_test_db().await else { return };
    let staff = create_user(&db.pool, "staf@jpj.gov.my", "Staf", AppRole::Staff).await;
    let other = create_user(&db.pool, "lain@jpj.gov.my", "Lain", AppRole::Staff).await;
    create_user(&db.pool, "ajk@jpj.gov.my", "AJK", AppRole::Committee).await;

    let complaint = ComplaintInput {
        kind: ComplaintType::Complaint,
        category: ComplaintCategory::Welfare,
        subject: "Kemudahan taska".to_string(),
        description: "Mohon kemudahan taska di pejabat".to_string(),
        priority: Priority::Normal,
    };
    complaint::create(&db.pool, &complaint, staff, 2026).await.unwrap();
    complaint::create(&db.pool, &complaint, other, 2026).await.unwrap();

    let mine = dashboard::load(&db.pool, Some(staff)).await.unwrap();
    assert_eq!(mine.counts.total_staff, 3);
    assert_eq!(mine.counts.pending_complaints, 1);
    assert_eq!(mine.complaints.len(), 1);
    assert_eq!(mine.counts.scheduled_meetings, 0);
    assert!(mine.announcements.is_empty());

    let everyone = dashboard::load(&db.pool, None).await.unwrap();
    assert_eq!(everyone.counts.pending_complaints, 2);
    assert_eq!(everyone.complaints.len(), 2);

    db.cleanup().await;
}
