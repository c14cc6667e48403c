//! Complaint submission, visibility and the status lifecycle.

mod common;

use mbj_portal::models::Priority;
use mbj_portal::models::complaint::{
    self, ComplaintCategory, ComplaintInput, ComplaintStatus, ComplaintType,
};
use mbj_portal::models::role::AppRole;
use common::*;

fn input(kind: ComplaintType, subject: &str) -> ComplaintInput {
    ComplaintInput {
        kind,
        category: ComplaintCategory::Facilities,
        subject: subject.to_string(),
        description: "Penghawa dingin di bilik mesyuarat tidak berfungsi".to_string(),
        priority: Priority::High,
    }
}

#[tokio::test]
async fn test_reference_numbers_follow_type_and_sequence() {
    let Some(db) = setup_test_db().await else { return };
    let staff = create_user(&db.pool, "staf@jpj.gov.my", "Staf", AppRole::Staff).await;

    let (_, first) = complaint::create(&db.pool, &input(ComplaintType::Complaint, "Aircond rosak"), staff, 2026)
        .await
        .expect("Failed to create complaint");
    let (_, second) = complaint::create(&db.pool, &input(ComplaintType::Suggestion, "Tambah parkir"), staff, 2026)
        .await
        .expect("Failed to create suggestion");

    assert_eq!(first, "ADU-2026-00001");
    assert_eq!(second, "CDG-2026-00002");

    db.cleanup().await;
}

#[tokio::test]
async fn test_staff_only_see_their_own_complaints() {
    let Some(db) = setup_test_db().await else { return };
    let alice = create_user(&db.pool, "alice@jpj.gov.my", "Alice", AppRole::Staff).await;
    let bob = create_user(&db.pool, "bob@jpj.gov.my", "Bob", AppRole::Staff).await;

    complaint::create(&db.pool, &input(ComplaintType::Complaint, "Lif rosak"), alice, 2026).await.unwrap();
    complaint::create(&db.pool, &input(ComplaintType::Complaint, "Tandas bocor"), bob, 2026).await.unwrap();
    complaint::create(&db.pool, &input(ComplaintType::Suggestion, "Kafeteria"), bob, 2026).await.unwrap();

    let mine = complaint::find_visible(&db.pool, Some(alice), None).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].subject, "Lif rosak");
    assert_eq!(mine[0].submitter_name.as_deref(), Some("Alice"));

    let all = complaint::find_visible(&db.pool, None, None).await.unwrap();
    assert_eq!(all.len(), 3);
    let limited = complaint::find_visible(&db.pool, None, Some(2)).await.unwrap();
    assert_eq!(limited.len(), 2);

    assert_eq!(complaint::count_pending(&db.pool, Some(bob)).await.unwrap(), 2);
    assert_eq!(complaint::count_pending(&db.pool, None).await.unwrap(), 3);

    db.cleanup().await;
}

#[tokio::test]
async fn test_resolving_records_resolver_and_closes_complaint() {
    let Some(db) = setup_test_db().await else { return };
    let staff = create_user(&db.pool, "staf@jpj.gov.my", "Staf", AppRole::Staff).await;
    let committee = create_user(&db.pool, "ajk@jpj.gov.my", "AJK", AppRole::Committee).await;
    let (id, _) = complaint::create(&db.pool, &input(ComplaintType::Complaint, "Kipas rosak"), staff, 2026)
        .await
        .unwrap();

    let moved = complaint::update_status(&db.pool, id, ComplaintStatus::InProgress, None, committee)
        .await
        .unwrap();
    assert!(moved);
    let c = complaint::find_by_id(&db.pool, id).await.unwrap().unwrap();
    assert_eq!(c.status, ComplaintStatus::InProgress);
    assert!(c.resolved_at.is_none());

    let closed = complaint::update_status(
        &db.pool,
        id,
        ComplaintStatus::Resolved,
        Some("Kipas telah diganti"),
        committee,
    )
    .await
    .unwrap();
    assert!(closed);
    let c = complaint::find_by_id(&db.pool, id).await.unwrap().unwrap();
    assert_eq!(c.status, ComplaintStatus::Resolved);
    assert_eq!(c.resolution.as_deref(), Some("Kipas telah diganti"));
    assert_eq!(c.resolved_by, Some(committee));
    assert!(c.resolved_at.is_some());
    assert_eq!(complaint::count_pending(&db.pool, None).await.unwrap(), 0);

    // Terminal rows accept no further updates
    let reopened = complaint::update_status(&db.pool, id, ComplaintStatus::Pending, None, committee)
        .await
        .unwrap();
    assert!(!reopened);
    let c = complaint::find_by_id(&db.pool, id).await.unwrap().unwrap();
    assert_eq!(c.status, ComplaintStatus::Resolved);

    db.cleanup().await;
}

#[tokio::test]
async fn test_closing_without_resolution_is_rejected_by_database() {
    let Some(db) = setup_test_db().await else { return };
    let staff = create_user(&db.pool, "staf@jpj.gov.my", "Staf", AppRole::Staff).await;
    let (id, _) = complaint::create(&db.pool, &input(ComplaintType::Complaint, "Bumbung bocor"), staff, 2026)
        .await
        .unwrap();

    let result = complaint::update_status(&db.pool, id, ComplaintStatus::Rejected, None, staff).await;
    assert!(result.is_err());

    let c = complaint::find_by_id(&db.pool, id).await.unwrap().unwrap();
    assert_eq!(c.status, ComplaintStatus::Pending);

    db.cleanup().await;
}

#[tokio::test]
async fn test_missing_complaint_is_none() {
    let Some(db) = setup_test_db().await else { return };
    assert!(complaint::find_by_id(&db.pool, 999).await.unwrap().is_none());
    db.cleanup().await;
}
