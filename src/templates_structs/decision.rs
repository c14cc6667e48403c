use askama::Template;
use chrono::NaiveDate;

use super::{PageContext, SelectOption};
use crate::models::decision::{Decision, DecisionForm};

pub struct DecisionRow {
    pub id: i64,
    pub number: String,
    pub title: String,
    pub description: String,
    pub responsible_party: String,
    pub due_date: String,
    /// Display status code, `overdue` included.
    pub status: &'static str,
    pub status_label: String,
    pub overdue: bool,
    pub meeting_id: Option<i64>,
    pub meeting_title: String,
}

impl DecisionRow {
    pub fn new(d: &Decision, ctx: &PageContext, today: NaiveDate) -> Self {
        let display = d.display_status(today);
        DecisionRow {
            id: d.id,
            number: d.decision_number.clone(),
            title: ctx.localized(&d.title, d.title_en.as_deref()),
            description: ctx.localized(&d.description, d.description_en.as_deref()),
            responsible_party: d.responsible_party.clone().unwrap_or_default(),
            due_date: d.due_date.map(|due| ctx.day(due)).unwrap_or_default(),
            status: display.as_str(),
            status_label: ctx.label(&display),
            overdue: d.is_overdue(today),
            meeting_id: d.meeting_id,
            meeting_title: d
                .meeting_title
                .as_deref()
                .map(|t| ctx.localized(t, d.meeting_title_en.as_deref()))
                .unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "decisions/list.html")]
pub struct DecisionsListTemplate {
    pub ctx: PageContext,
    pub rows: Vec<DecisionRow>,
    pub search: String,
    pub status_options: Vec<SelectOption>,
    pub total: usize,
}

#[derive(Template)]
#[template(path = "decisions/form.html")]
pub struct DecisionFormTemplate {
    pub ctx: PageContext,
    pub decision_id: Option<i64>,
    pub form: DecisionForm,
    pub meetings: Vec<SelectOption>,
    pub statuses: Vec<SelectOption>,
    pub errors: Vec<String>,
}
