use askama::Template;

use super::{PageContext, SelectOption};
use crate::models::complaint::{Complaint, ComplaintForm, ComplaintStats};

pub struct ComplaintRow {
    pub id: i64,
    pub reference: String,
    pub kind: &'static str,
    pub kind_label: String,
    pub category_label: String,
    pub subject: String,
    pub description: String,
    pub priority: &'static str,
    pub priority_label: String,
    pub status: &'static str,
    pub status_label: String,
    pub resolution: Option<String>,
    pub resolved_at: Option<String>,
    pub submitter: String,
    pub created: String,
    pub closed: bool,
}

impl ComplaintRow {
    pub fn new(c: &Complaint, ctx: &PageContext) -> Self {
        ComplaintRow {
            id: c.id,
            reference: c.reference_number.clone(),
            kind: c.kind.as_str(),
            kind_label: ctx.label(&c.kind),
            category_label: ctx.label(&c.category),
            subject: c.subject.clone(),
            description: c.description.clone(),
            priority: c.priority.as_str(),
            priority_label: ctx.label(&c.priority),
            status: c.status.as_str(),
            status_label: ctx.label(&c.status),
            resolution: c.resolution.clone(),
            resolved_at: c.resolved_at.as_ref().map(|t| ctx.datetime(t)),
            submitter: c.submitter_name.clone().unwrap_or_default(),
            created: ctx.datetime(&c.created_at),
            closed: c.status.is_terminal(),
        }
    }
}

#[derive(Template)]
#[template(path = "complaints/list.html")]
pub struct ComplaintsListTemplate {
    pub ctx: PageContext,
    pub rows: Vec<ComplaintRow>,
    pub stats: ComplaintStats,
    pub search: String,
    pub status_options: Vec<SelectOption>,
    pub type_options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "complaints/form.html")]
pub struct ComplaintFormTemplate {
    pub ctx: PageContext,
    pub form: ComplaintForm,
    pub types: Vec<SelectOption>,
    pub categories: Vec<SelectOption>,
    pub priorities: Vec<SelectOption>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "complaints/detail.html")]
pub struct ComplaintDetailTemplate {
    pub ctx: PageContext,
    pub complaint: ComplaintRow,
    /// Admin and the complaint is still open.
    pub can_update: bool,
    pub status_options: Vec<SelectOption>,
    pub resolution: String,
    pub errors: Vec<String>,
}
