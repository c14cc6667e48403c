use chrono::{DateTime, Datelike, FixedOffset, Utc};

use crate::i18n::{Language, resolve_localized_text};
use crate::models::contains_ci;
use super::types::{Announcement, AnnouncementCategory, AnnouncementStats};

/// Unexpired rows, pinned first, then newest `published_at`.
pub fn active_sorted(announcements: &[Announcement], now: DateTime<Utc>) -> Vec<&Announcement> {
    let mut active: Vec<&Announcement> = announcements.iter().filter(|a| !a.is_expired(now)).collect();
    active.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| b.published_at.cmp(&a.published_at))
    });
    active
}

/// Search runs over the title as shown in `lang`.
pub fn filter_announcements<'a>(
    announcements: &'a [Announcement],
    search: &str,
    category: Option<AnnouncementCategory>,
    lang: Language,
    now: DateTime<Utc>,
) -> Vec<&'a Announcement> {
    active_sorted(announcements, now)
        .into_iter()
        .filter(|a| contains_ci(resolve_localized_text(&a.title, a.title_en.as_deref(), lang), search))
        .filter(|a| category.is_none_or(|c| a.category == c))
        .collect()
}

/// Stats over every fetched row, expired ones included; "this month" is the
/// portal-local calendar month.
pub fn stats(announcements: &[Announcement], now: DateTime<Utc>, offset: &FixedOffset) -> AnnouncementStats {
    let local_now = now.with_timezone(offset);
    AnnouncementStats {
        total: announcements.len(),
        pinned: announcements.iter().filter(|a| a.is_pinned).count(),
        urgent: announcements.iter().filter(|a| a.is_urgent()).count(),
        this_month: announcements
            .iter()
            .filter(|a| {
                let p = a.published_at.with_timezone(offset);
                p.year() == local_now.year() && p.month() == local_now.month()
            })
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::announcement::types::sample;
    use chrono::{Duration, TimeZone};

    #[test]
    fn expired_announcements_never_listed() {
        let now = Utc::now();
        let mut old = sample(1, now - Duration::days(10));
        old.expires_at = Some(now - Duration::seconds(1));
        let fresh = sample(2, now - Duration::days(1));
        let rows = vec![old, fresh];

        let listed = filter_announcements(&rows, "", None, Language::Ms, now);
        assert_eq!(listed.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn pinned_sorts_first_regardless_of_timestamp() {
        let now = Utc::now();
        let mut pinned_old = sample(1, now - Duration::days(30));
        pinned_old.is_pinned = true;
        let newest = sample(2, now);
        let middle = sample(3, now - Duration::days(2));
        let rows = vec![newest, middle, pinned_old];

        let order: Vec<i64> = active_sorted(&rows, now).iter().map(|a| a.id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn search_uses_displayed_title() {
        let now = Utc::now();
        let mut a = sample(1, now);
        a.title = "Hari Keluarga".into();
        a.title_en = Some("Family Day".into());
        let rows = vec![a];

        assert_eq!(filter_announcements(&rows, "family", None, Language::En, now).len(), 1);
        assert_eq!(filter_announcements(&rows, "family", None, Language::Ms, now).len(), 0);
        assert_eq!(filter_announcements(&rows, "keluarga", None, Language::Ms, now).len(), 1);
    }

    #[test]
    fn category_filter() {
        let now = Utc::now();
        let mut event = sample(1, now);
        event.category = AnnouncementCategory::Event;
        let rows = vec![event, sample(2, now)];
        let events = filter_announcements(&rows, "", Some(AnnouncementCategory::Event), Language::Ms, now);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn stats_count_this_month_in_portal_time() {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 4, 0, 0).unwrap();
        // 30 Sep 17:00 UTC is already 1 Oct in UTC+8.
        let mut edge = sample(1, Utc.with_ymd_and_hms(2026, 9, 30, 17, 0, 0).unwrap());
        edge.is_pinned = true;
        let last_month = sample(2, Utc.with_ymd_and_hms(2026, 9, 20, 0, 0, 0).unwrap());
        let mut urgent = sample(3, now);
        urgent.category = AnnouncementCategory::Urgent;

        let s = stats(&[edge, last_month, urgent], now, &offset);
        assert_eq!(s, AnnouncementStats { total: 3, pinned: 1, urgent: 1, this_month: 2 });
    }

    #[test]
    fn stats_include_expired_rows() {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 4, 0, 0).unwrap();
        let mut expired = sample(1, Utc.with_ymd_and_hms(2026, 10, 2, 0, 0, 0).unwrap());
        expired.is_pinned = true;
        expired.expires_at = Some(Utc.with_ymd_and_hms(2026, 10, 10, 0, 0, 0).unwrap());
        let current = sample(2, now);
        let rows = vec![expired, current];

        assert_eq!(active_sorted(&rows, now).len(), 1);
        assert_eq!(stats(&rows, now, &offset), AnnouncementStats { total: 2, pinned: 1, urgent: 0, this_month: 2 });
    }
}
