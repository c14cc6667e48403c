use askama::Template;

use super::{PageContext, SelectOption};
use crate::models::announcement::{Announcement, AnnouncementForm, AnnouncementStats};

pub struct AnnouncementRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: &'static str,
    pub category_label: String,
    pub priority: &'static str,
    pub priority_label: String,
    pub is_pinned: bool,
    pub urgent: bool,
    pub published: String,
    pub expires: Option<String>,
}

impl AnnouncementRow {
    pub fn new(a: &Announcement, ctx: &PageContext) -> Self {
        AnnouncementRow {
            id: a.id,
            title: ctx.localized(&a.title, a.title_en.as_deref()),
            content: ctx.localized(&a.content, a.content_en.as_deref()),
            category: a.category.as_str(),
            category_label: ctx.label(&a.category),
            priority: a.priority.as_str(),
            priority_label: ctx.label(&a.priority),
            is_pinned: a.is_pinned,
            urgent: a.is_urgent(),
            published: ctx.date(&a.published_at),
            expires: a.expires_at.as_ref().map(|e| ctx.date(e)),
        }
    }
}

#[derive(Template)]
#[template(path = "announcements/list.html")]
pub struct AnnouncementsListTemplate {
    pub ctx: PageContext,
    pub rows: Vec<AnnouncementRow>,
    pub stats: AnnouncementStats,
    pub search: String,
    pub category_options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "announcements/form.html")]
pub struct AnnouncementFormTemplate {
    pub ctx: PageContext,
    pub announcement_id: Option<i64>,
    pub form: AnnouncementForm,
    pub categories: Vec<SelectOption>,
    pub priorities: Vec<SelectOption>,
    pub errors: Vec<String>,
}
