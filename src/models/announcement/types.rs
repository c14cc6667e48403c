use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::validate::{non_empty, validate_choice, validate_length, validate_optional};
use crate::clock;
use crate::i18n::Language;
use crate::models::Priority;

text_enum! {
    pub enum AnnouncementCategory {
        General = "general" => "announcements.category.general",
        Urgent = "urgent" => "announcements.category.urgent",
        Event = "event" => "announcements.category.event",
        Policy = "policy" => "announcements.category.policy",
        Welfare = "welfare" => "announcements.category.welfare",
        Hr = "hr" => "announcements.category.hr",
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub title_en: Option<String>,
    pub content: String,
    pub content_en: Option<String>,
    #[sqlx(try_from = "String")]
    pub category: AnnouncementCategory,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    pub is_pinned: bool,
    pub published_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Announcement {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    pub fn is_urgent(&self) -> bool {
        self.priority == Priority::Urgent || self.category == AnnouncementCategory::Urgent
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementForm {
    pub title: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub content_en: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub is_pinned: Option<String>,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub expires_at: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncementInput {
    pub title: String,
    pub title_en: Option<String>,
    pub content: String,
    pub content_en: Option<String>,
    pub category: AnnouncementCategory,
    pub priority: Priority,
    pub is_pinned: bool,
    pub published_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

pub const TITLE_MIN: usize = 5;
pub const TITLE_MAX: usize = 200;
pub const CONTENT_MIN: usize = 10;
pub const CONTENT_MAX: usize = 5000;

impl AnnouncementForm {
    pub fn blank(now: DateTime<Utc>, offset: &FixedOffset) -> Self {
        AnnouncementForm {
            category: AnnouncementCategory::General.as_str().to_string(),
            priority: Priority::Normal.as_str().to_string(),
            published_at: clock::to_local_input(&now, offset),
            ..AnnouncementForm::default()
        }
    }

    pub fn from_announcement(a: &Announcement, offset: &FixedOffset) -> Self {
        AnnouncementForm {
            title: a.title.clone(),
            title_en: a.title_en.clone().unwrap_or_default(),
            content: a.content.clone(),
            content_en: a.content_en.clone().unwrap_or_default(),
            category: a.category.as_str().to_string(),
            priority: a.priority.as_str().to_string(),
            is_pinned: a.is_pinned.then(|| "on".to_string()),
            published_at: clock::to_local_input(&a.published_at, offset),
            expires_at: a.expires_at.map(|e| clock::to_local_input(&e, offset)).unwrap_or_default(),
            csrf_token: String::new(),
        }
    }

    pub fn pinned(&self) -> bool {
        self.is_pinned.as_deref().is_some_and(|v| !v.is_empty() && v != "0")
    }

    /// A blank publish date means `now`.
    pub fn validate(
        &self,
        lang: Language,
        offset: &FixedOffset,
        now: DateTime<Utc>,
    ) -> Result<AnnouncementInput, Vec<String>> {
        let mut errors: Vec<String> = [
            validate_length(&self.title, lang.t("announcements.titleMs"), TITLE_MIN, TITLE_MAX, lang),
            validate_optional(&self.title_en, lang.t("announcements.titleEn"), TITLE_MAX, lang),
            validate_length(&self.content, lang.t("announcements.contentMs"), CONTENT_MIN, CONTENT_MAX, lang),
            validate_optional(&self.content_en, lang.t("announcements.contentEn"), CONTENT_MAX, lang),
            validate_choice(&self.category, AnnouncementCategory::CODES, lang.t("common.category"), lang),
            validate_choice(&self.priority, Priority::CODES, lang.t("common.priority"), lang),
        ]
        .into_iter()
        .flatten()
        .collect();

        let published_at = match self.published_at.trim() {
            "" => Some(now),
            raw => clock::parse_local_datetime(raw, offset),
        };
        if published_at.is_none() {
            errors.push(format!("{}: {}", lang.t("announcements.publishedAt"), lang.t("common.error")));
        }

        let expires_at = match self.expires_at.trim() {
            "" => None,
            raw => {
                let parsed = clock::parse_local_datetime(raw, offset);
                if parsed.is_none() {
                    errors.push(format!("{}: {}", lang.t("announcements.expires"), lang.t("common.error")));
                }
                parsed
            }
        };

        if matches!((published_at, expires_at), (Some(published), Some(expires)) if expires <= published) {
            errors.push(lang.t("announcements.expiryAfterPublish").to_string());
        }

        match (published_at, self.category.parse(), self.priority.parse()) {
            (Some(published_at), Ok(category), Ok(priority)) if errors.is_empty() => Ok(AnnouncementInput {
                title: self.title.trim().to_string(),
                title_en: non_empty(&self.title_en),
                content: self.content.trim().to_string(),
                content_en: non_empty(&self.content_en),
                category,
                priority,
                is_pinned: self.pinned(),
                published_at,
                expires_at,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnouncementStats {
    pub total: usize,
    pub pinned: usize,
    pub urgent: usize,
    pub this_month: usize,
}

#[cfg(test)]
pub(crate) fn sample(id: i64, published_at: DateTime<Utc>) -> Announcement {
    Announcement {
        id,
        title: format!("Pengumuman {id}"),
        title_en: None,
        content: "Kandungan pengumuman".into(),
        content_en: None,
        category: AnnouncementCategory::General,
        priority: Priority::Normal,
        is_pinned: false,
        published_at,
        expires_at: None,
        created_by: None,
        created_at: published_at,
        updated_at: published_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn myt() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn form() -> AnnouncementForm {
        AnnouncementForm {
            title: "Hari Keluarga".into(),
            content: "Hari Keluarga JPJ akan diadakan".into(),
            category: "event".into(),
            priority: "normal".into(),
            published_at: "2026-10-16T08:00".into(),
            ..AnnouncementForm::default()
        }
    }

    #[test]
    fn expiry_must_follow_publish_date() {
        let now = Utc::now();
        let bad = AnnouncementForm { expires_at: "2026-10-15T08:00".into(), ..form() };
        let errors = bad.validate(Language::En, &myt(), now).unwrap_err();
        assert_eq!(errors, vec!["Expiry date must be after the publish date".to_string()]);
        let errors = bad.validate(Language::Ms, &myt(), now).unwrap_err();
        assert_eq!(errors, vec!["Tarikh tamat mesti selepas tarikh terbit".to_string()]);

        let good = AnnouncementForm { expires_at: "2026-10-30T08:00".into(), ..form() };
        let input = good.validate(Language::En, &myt(), now).unwrap();
        assert!(input.expires_at.is_some());
        assert!(!input.is_pinned);
    }

    #[test]
    fn blank_publish_date_defaults_to_now() {
        let now = Utc::now();
        let input = AnnouncementForm { published_at: "".into(), ..form() }
            .validate(Language::Ms, &myt(), now)
            .unwrap();
        assert_eq!(input.published_at, now);
    }

    #[test]
    fn expired_when_expiry_has_passed() {
        let now = Utc::now();
        let mut a = sample(1, now - Duration::days(3));
        assert!(!a.is_expired(now));
        a.expires_at = Some(now - Duration::hours(1));
        assert!(a.is_expired(now));
        a.expires_at = Some(now + Duration::hours(1));
        assert!(!a.is_expired(now));
    }

    #[test]
    fn urgent_by_priority_or_category() {
        let mut a = sample(1, Utc::now());
        assert!(!a.is_urgent());
        a.category = AnnouncementCategory::Urgent;
        assert!(a.is_urgent());
        a.category = AnnouncementCategory::General;
        a.priority = Priority::Urgent;
        assert!(a.is_urgent());
    }
}
