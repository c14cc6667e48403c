//! Announcement persistence and the active listing.

mod common;

use mbj_portal::models::Priority;
use mbj_portal::models::announcement::{self, AnnouncementCategory, AnnouncementInput};
use mbj_portal::models::role::AppRole;
use common::*;

fn input(title: &str, pinned: bool, published_days: i64, expires_days: Option<i64>) -> AnnouncementInput {
    AnnouncementInput {
        title: title.to_string(),
        title_en: None,
        content: "Makluman kepada semua warga kerja".to_string(),
        content_en: Some("Notice to all staff".to_string()),
        category: AnnouncementCategory::General,
        priority: Priority::Normal,
        is_pinned: pinned,
        published_at: days_from_now(published_days),
        expires_at: expires_days.map(days_from_now),
    }
}

#[tokio::test]
async fn test_recent_active_skips_expired_and_puts_pinned_first() {
    let Some(db) = setup_test_db().await else { return };
    let chair = create_user(&db.pool, "pengerusi@jpj.gov.my", "Pengerusi", AppRole::Chairman).await;

    announcement::create(&db.pool, &input("Lama tetapi disemat", true, -20, None), chair).await.unwrap();
    announcement::create(&db.pool, &input("Terbaru", false, -1, Some(10)), chair).await.unwrap();
    announcement::create(&db.pool, &input("Sudah tamat", false, -5, Some(-1)), chair).await.unwrap();
    announcement::create(&db.pool, &input("Minggu lepas", false, -7, None), chair).await.unwrap();

    let recent = announcement::find_recent_active(&db.pool, 3).await.unwrap();
    let titles: Vec<&str> = recent.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Lama tetapi disemat", "Terbaru", "Minggu lepas"]);

    assert_eq!(announcement::find_all(&db.pool).await.unwrap().len(), 4);

    db.cleanup().await;
}

#[tokio::test]
async fn test_update_and_delete_announcement() {
    let Some(db) = setup_test_db().await else { return };
    let chair = create_user(&db.pool, "pengerusi@jpj.gov.my", "Pengerusi", AppRole::Chairman).await;
    let id = announcement::create(&db.pool, &input("Hari Keluarga", false, 0, None), chair).await.unwrap();

    let mut changed = input("Hari Keluarga 2026", true, 0, Some(30));
    changed.category = AnnouncementCategory::Event;
    changed.priority = Priority::Urgent;
    announcement::update(&db.pool, id, &changed).await.unwrap();

    let a = announcement::find_by_id(&db.pool, id).await.unwrap().unwrap();
    assert_eq!(a.title, "Hari Keluarga 2026");
    assert_eq!(a.category, AnnouncementCategory::Event);
    assert!(a.is_pinned);
    assert!(a.is_urgent());
    assert!(a.expires_at.is_some());

    announcement::delete(&db.pool, id).await.unwrap();
    assert!(announcement::find_by_id(&db.pool, id).await.unwrap().is_none());

    db.cleanup().await;
}
