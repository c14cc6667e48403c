//! JSON shapes served by `/api/v1`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::i18n::{Language, resolve_localized_text};
use crate::models::Priority;
use crate::models::announcement::{Announcement, AnnouncementCategory};
use crate::models::complaint::{Complaint, ComplaintCategory, ComplaintStatus, ComplaintType};
use crate::models::decision::{Decision, DecisionStatus, DisplayStatus};
use crate::models::meeting::{Meeting, MeetingStatus};

#[derive(Debug, Serialize)]
pub struct ApiMeeting {
    pub id: i64,
    pub title: String,
    pub title_en: Option<String>,
    pub display_title: String,
    pub meeting_date: DateTime<Utc>,
    pub location: Option<String>,
    pub status: MeetingStatus,
    pub minutes_url: Option<String>,
    pub upcoming: bool,
}

impl ApiMeeting {
    pub fn new(m: &Meeting, lang: Language, now: DateTime<Utc>) -> Self {
        ApiMeeting {
            id: m.id,
            display_title: resolve_localized_text(&m.title, m.title_en.as_deref(), lang).to_string(),
            title: m.title.clone(),
            title_en: m.title_en.clone(),
            meeting_date: m.meeting_date,
            location: m.location.clone(),
            status: m.status,
            minutes_url: m.minutes_url.clone(),
            upcoming: m.meeting_date >= now,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiDecision {
    pub id: i64,
    pub meeting_id: Option<i64>,
    pub decision_number: String,
    pub title: String,
    pub title_en: Option<String>,
    pub display_title: String,
    pub responsible_party: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: DecisionStatus,
    pub display_status: DisplayStatus,
}

impl ApiDecision {
    pub fn new(d: &Decision, lang: Language, today: NaiveDate) -> Self {
        ApiDecision {
            id: d.id,
            meeting_id: d.meeting_id,
            decision_number: d.decision_number.clone(),
            display_title: resolve_localized_text(&d.title, d.title_en.as_deref(), lang).to_string(),
            title: d.title.clone(),
            title_en: d.title_en.clone(),
            responsible_party: d.responsible_party.clone(),
            due_date: d.due_date,
            status: d.status,
            display_status: d.display_status(today),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiAnnouncement {
    pub id: i64,
    pub title: String,
    pub display_title: String,
    pub content: String,
    pub category: AnnouncementCategory,
    pub priority: Priority,
    pub is_pinned: bool,
    pub published_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ApiAnnouncement {
    pub fn new(a: &Announcement, lang: Language) -> Self {
        ApiAnnouncement {
            id: a.id,
            title: a.title.clone(),
            display_title: resolve_localized_text(&a.title, a.title_en.as_deref(), lang).to_string(),
            content: resolve_localized_text(&a.content, a.content_en.as_deref(), lang).to_string(),
            category: a.category,
            priority: a.priority,
            is_pinned: a.is_pinned,
            published_at: a.published_at,
            expires_at: a.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiComplaint {
    pub id: i64,
    pub reference_number: String,
    #[serde(rename = "type")]
    pub kind: ComplaintType,
    pub category: ComplaintCategory,
    pub subject: String,
    pub priority: Priority,
    pub status: ComplaintStatus,
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<&Complaint> for ApiComplaint {
    fn from(c: &Complaint) -> Self {
        ApiComplaint {
            id: c.id,
            reference_number: c.reference_number.clone(),
            kind: c.kind,
            category: c.category,
            subject: c.subject.clone(),
            priority: c.priority,
            status: c.status,
            resolution: c.resolution.clone(),
            created_at: c.created_at,
            resolved_at: c.resolved_at,
        }
    }
}
