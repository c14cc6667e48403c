//! Meetings, their decisions, and minutes links.

mod common;

use chrono::NaiveDate;

use mbj_portal::models::dashboard;
use mbj_portal::models::decision::{self, DecisionInput, DecisionStatus};
use mbj_portal::models::meeting::{self, MeetingInput, MeetingStatus};
use mbj_portal::models::role::AppRole;
use common::*;

fn meeting_input(title: &str, days: i64, status: MeetingStatus) -> MeetingInput {
    MeetingInput {
        title: title.to_string(),
        title_en: Some(format!("{title} (EN)")),
        description: None,
        description_en: None,
        meeting_date: days_from_now(days),
        location: Some("Bilik Mesyuarat Utama".to_string()),
        status,
    }
}

fn decision_input(meeting_id: Option<i64>, number: &str) -> DecisionInput {
    DecisionInput {
        meeting_id,
        decision_number: number.to_string(),
        title: "Naik taraf surau".to_string(),
        title_en: None,
        description: "Kerja naik taraf surau tingkat 2".to_string(),
        description_en: None,
        responsible_party: Some("Unit Fasiliti".to_string()),
        due_date: NaiveDate::from_ymd_opt(2026, 12, 31),
        status: DecisionStatus::Pending,
    }
}

#[tokio::test]
async fn test_create_update_and_list_meetings() {
    let Some(db) = setup_test_db().await else { return };
    let chair = create_user(&db.pool, "pengerusi@jpj.gov.my", "Pengerusi", AppRole::Chairman).await;

    let older = meeting::create(&db.pool, &meeting_input("MBJ Bil. 1/2026", -30, MeetingStatus::Completed), chair)
        .await
        .expect("Failed to create meeting");
    let newer = meeting::create(&db.pool, &meeting_input("MBJ Bil. 2/2026", 14, MeetingStatus::Scheduled), chair)
        .await
        .expect("Failed to create meeting");

    let all = meeting::find_all(&db.pool).await.unwrap();
    assert_eq!(all.iter().map(|m| m.id).collect::<Vec<_>>(), vec![newer, older]);
    assert_eq!(meeting::count_scheduled(&db.pool).await.unwrap(), 1);

    let mut changed = meeting_input("MBJ Bil. 2/2026 (Dipinda)", 14, MeetingStatus::Cancelled);
    changed.title_en = None;
    meeting::update(&db.pool, newer, &changed).await.unwrap();
    let m = meeting::find_by_id(&db.pool, newer).await.unwrap().unwrap();
    assert_eq!(m.title, "MBJ Bil. 2/2026 (Dipinda)");
    assert_eq!(m.title_en, None);
    assert_eq!(m.status, MeetingStatus::Cancelled);
    assert_eq!(m.created_by, Some(chair));
    assert_eq!(meeting::count_scheduled(&db.pool).await.unwrap(), 0);

    db.cleanup().await;
}

#[tokio::test]
async fn test_dashboard_counts_scheduled_meetings_past_and_future() {
    let Some(db) = setup_test_db().await else { return };
    let chair = create_user(&db.pool, "pengerusi@jpj.gov.my", "Pengerusi", AppRole::Chairman).await;

    for (title, days, status) in [
        ("MBJ Bil. 4/2026", -3, MeetingStatus::Scheduled),
        ("MBJ Bil. 5/2026", 5, MeetingStatus::Scheduled),
        ("MBJ Bil. 6/2026", -10, MeetingStatus::Completed),
        ("MBJ Bil. 7/2026", 20, MeetingStatus::Cancelled),
    ] {
        meeting::create(&db.pool, &meeting_input(title, days, status), chair).await.unwrap();
    }

    let data = dashboard::load(&db.pool, None).await.unwrap();
    assert_eq!(data.counts.scheduled_meetings, 2);

    db.cleanup().await;
}

#[tokio::test]
async fn test_minutes_url_can_be_set_and_cleared() {
    let Some(db) = setup_test_db().await else { return };
    let chair = create_user(&db.pool, "pengerusi@jpj.gov.my", "Pengerusi", AppRole::Chairman).await;
    let id = meeting::create(&db.pool, &meeting_input("MBJ Bil. 3/2026", -1, MeetingStatus::Completed), chair)
        .await
        .unwrap();

    let url = "/uploads/meeting-minutes/1/1760581234567.pdf";
    meeting::set_minutes_url(&db.pool, id, Some(url)).await.unwrap();
    assert_eq!(meeting::find_by_id(&db.pool, id).await.unwrap().unwrap().minutes_url.as_deref(), Some(url));

    meeting::set_minutes_url(&db.pool, id, None).await.unwrap();
    assert!(meeting::find_by_id(&db.pool, id).await.unwrap().unwrap().minutes_url.is_none());

    db.cleanup().await;
}

#[tokio::test]
async fn test_deleting_meeting_removes_its_decisions() {
    let Some(db) = setup_test_db().await else { return };
    let chair = create_user(&db.pool, "pengerusi@jpj.gov.my", "Pengerusi", AppRole::Chairman).await;
    let meeting_id = meeting::create(&db.pool, &meeting_input("MBJ Bil. 4/2026", -7, MeetingStatus::Completed), chair)
        .await
        .unwrap();

    let linked = decision::create(&db.pool, &decision_input(Some(meeting_id), "KEP/1/2026"), chair).await.unwrap();
    let standalone = decision::create(&db.pool, &decision_input(None, "KEP/2/2026"), chair).await.unwrap();

    let for_meeting = decision::find_by_meeting(&db.pool, meeting_id).await.unwrap();
    assert_eq!(for_meeting.len(), 1);
    assert_eq!(for_meeting[0].meeting_title.as_deref(), Some("MBJ Bil. 4/2026"));

    meeting::delete(&db.pool, meeting_id).await.unwrap();

    assert!(meeting::find_by_id(&db.pool, meeting_id).await.unwrap().is_none());
    assert!(decision::find_by_id(&db.pool, linked).await.unwrap().is_none());
    assert!(decision::find_by_id(&db.pool, standalone).await.unwrap().is_some());
    assert_eq!(decision::count(&db.pool).await.unwrap(), 1);

    db.cleanup().await;
}

#[tokio::test]
async fn test_decision_update_changes_status_and_link() {
    let Some(db) = setup_test_db().await else { return };
    let chair = create_user(&db.pool, "pengerusi@jpj.gov.my", "Pengerusi", AppRole::Chairman).await;
    let meeting_id = meeting::create(&db.pool, &meeting_input("MBJ Bil. 5/2026", 3, MeetingStatus::Scheduled), chair)
        .await
        .unwrap();
    let id = decision::create(&db.pool, &decision_input(None, "KEP/9/2026"), chair).await.unwrap();

    let mut changed = decision_input(Some(meeting_id), "KEP/9/2026");
    changed.status = DecisionStatus::Completed;
    changed.due_date = None;
    decision::update(&db.pool, id, &changed).await.unwrap();

    let d = decision::find_by_id(&db.pool, id).await.unwrap().unwrap();
    assert_eq!(d.status, DecisionStatus::Completed);
    assert_eq!(d.meeting_id, Some(meeting_id));
    assert_eq!(d.due_date, None);

    decision::delete(&db.pool, id).await.unwrap();
    assert!(decision::find_all(&db.pool).await.unwrap().is_empty());

    db.cleanup().await;
}
