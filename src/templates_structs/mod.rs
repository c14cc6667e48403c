// Template context structures for Askama templates, organized by domain.

use actix_session::Session;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::auth::csrf;
use crate::auth::session::{AuthContext, get_language, take_flash};
use crate::i18n::{self, Language};
use crate::models::Labelled;

/// Common context shared by all pages. Templates access these as
/// `ctx.full_name`, `ctx.t("nav.dashboard")`, etc.
pub struct PageContext {
    pub lang: Language,
    pub offset: FixedOffset,
    pub signed_in: bool,
    pub full_name: String,
    pub avatar_initial: String,
    pub role_label: String,
    pub is_admin: bool,
    pub flash: Option<String>,
    pub csrf_token: String,
    pub current_path: String,
}

impl PageContext {
    /// Context for a signed-in page.
    pub fn build(session: &Session, auth: &AuthContext, offset: FixedOffset, current_path: &str) -> Self {
        let lang = auth.language;
        let full_name = auth.profile.full_name.clone();
        let avatar_initial = full_name.chars().next().unwrap_or('?').to_uppercase().to_string();
        Self {
            lang,
            offset,
            signed_in: true,
            role_label: lang.t(auth.roles.highest().label_key()).to_string(),
            is_admin: auth.is_admin(),
            full_name,
            avatar_initial,
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
            current_path: current_path.to_string(),
        }
    }

    /// Context for the landing and sign-in pages.
    pub fn public(session: &Session, offset: FixedOffset, current_path: &str) -> Self {
        Self {
            lang: get_language(session),
            offset,
            signed_in: false,
            full_name: String::new(),
            avatar_initial: String::new(),
            role_label: String::new(),
            is_admin: false,
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
            current_path: current_path.to_string(),
        }
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        self.lang.t(key)
    }

    pub fn lang_code(&self) -> &'static str {
        self.lang.code()
    }

    pub fn nav_active(&self, prefix: &str) -> bool {
        self.current_path.starts_with(prefix)
    }

    pub fn label<L: Labelled>(&self, value: &L) -> String {
        self.lang.t(value.label_key()).to_string()
    }

    pub fn localized(&self, primary: &str, translated: Option<&str>) -> String {
        i18n::resolve_localized_text(primary, translated, self.lang).to_string()
    }

    pub fn date(&self, ts: &DateTime<Utc>) -> String {
        i18n::format_date(ts, &self.offset, self.lang)
    }

    pub fn datetime(&self, ts: &DateTime<Utc>) -> String {
        i18n::format_datetime(ts, &self.offset, self.lang)
    }

    pub fn day(&self, date: NaiveDate) -> String {
        i18n::format_day(date, self.lang)
    }
}

/// One `<option>` in a select.
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self { value: value.into(), label: label.into(), selected }
    }
}

/// Options for every variant, marking `selected` by its code.
pub fn enum_options<L: Labelled>(ctx: &PageContext, all: &[L], selected: &str) -> Vec<SelectOption> {
    all.iter()
        .map(|v| SelectOption::new(v.code(), ctx.label(v), v.code() == selected))
        .collect()
}

/// Same as `enum_options` with a leading "all" entry for list filters.
pub fn filter_options<L: Labelled>(ctx: &PageContext, all: &[L], selected: &str) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::new("all", ctx.t("common.all"), selected.is_empty() || selected == "all")];
    options.extend(enum_options(ctx, all, selected));
    options
}

mod admin;
mod announcement;
mod common;
mod complaint;
mod dashboard;
mod decision;
mod meeting;
pub mod api;

pub use self::admin::{AdminTemplate, AuditRow, UserRow};
pub use self::announcement::{AnnouncementFormTemplate, AnnouncementRow, AnnouncementsListTemplate};
pub use self::common::{AuthTemplate, ConfirmTemplate, HiddenField, LandingTemplate, ProfileTemplate};
pub use self::complaint::{ComplaintDetailTemplate, ComplaintFormTemplate, ComplaintRow, ComplaintsListTemplate};
pub use self::dashboard::DashboardTemplate;
pub use self::decision::{DecisionFormTemplate, DecisionRow, DecisionsListTemplate};
pub use self::meeting::{MeetingDetailTemplate, MeetingFormTemplate, MeetingRow, MeetingsListTemplate};

#[cfg(test)]
pub(crate) fn test_context(lang: Language, is_admin: bool) -> PageContext {
    PageContext {
        lang,
        offset: FixedOffset::east_opt(8 * 3600).unwrap(),
        signed_in: true,
        full_name: "Siti Aisyah".into(),
        avatar_initial: "S".into(),
        role_label: String::new(),
        is_admin,
        flash: None,
        csrf_token: "token".into(),
        current_path: "/dashboard".into(),
    }
}
