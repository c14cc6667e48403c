use askama::Template;
use chrono::{DateTime, Utc};

use super::{DecisionRow, PageContext, SelectOption};
use crate::models::meeting::{Meeting, MeetingForm};

/// A meeting ready for display in the active language.
pub struct MeetingRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub status: &'static str,
    pub status_label: String,
    pub minutes_url: Option<String>,
    pub upcoming: bool,
}

impl MeetingRow {
    pub fn new(m: &Meeting, ctx: &PageContext, now: DateTime<Utc>) -> Self {
        MeetingRow {
            id: m.id,
            title: ctx.localized(&m.title, m.title_en.as_deref()),
            description: ctx.localized(
                m.description.as_deref().unwrap_or_default(),
                m.description_en.as_deref(),
            ),
            location: m.location.clone().unwrap_or_default(),
            date: ctx.datetime(&m.meeting_date),
            status: m.status.as_str(),
            status_label: ctx.label(&m.status),
            minutes_url: m.minutes_url.clone(),
            upcoming: m.meeting_date >= now,
        }
    }
}

#[derive(Template)]
#[template(path = "meetings/list.html")]
pub struct MeetingsListTemplate {
    pub ctx: PageContext,
    pub upcoming: Vec<MeetingRow>,
    pub past: Vec<MeetingRow>,
    pub search: String,
}

#[derive(Template)]
#[template(path = "meetings/form.html")]
pub struct MeetingFormTemplate {
    pub ctx: PageContext,
    pub meeting_id: Option<i64>,
    pub form: MeetingForm,
    pub statuses: Vec<SelectOption>,
    pub existing_minutes: Option<String>,
    pub max_minutes_mb: usize,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "meetings/detail.html")]
pub struct MeetingDetailTemplate {
    pub ctx: PageContext,
    pub meeting: MeetingRow,
    pub decisions: Vec<DecisionRow>,
}
