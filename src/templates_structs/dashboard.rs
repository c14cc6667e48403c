use askama::Template;

use super::{AnnouncementRow, ComplaintRow, PageContext};
use crate::models::dashboard::DashboardCounts;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub counts: DashboardCounts,
    pub announcements: Vec<AnnouncementRow>,
    pub complaints: Vec<ComplaintRow>,
}
