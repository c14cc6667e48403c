use askama::Template;

use super::{PageContext, SelectOption};

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub ctx: PageContext,
}

#[derive(Template)]
#[template(path = "auth.html")]
pub struct AuthTemplate {
    pub ctx: PageContext,
    /// `sign-in` or `sign-up`.
    pub mode: String,
    pub email: String,
    pub full_name: String,
    pub errors: Vec<String>,
}

pub struct HiddenField {
    pub name: String,
    pub value: String,
}

/// Generic "are you sure?" page posting to `action`.
#[derive(Template)]
#[template(path = "confirm.html")]
pub struct ConfirmTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub message: String,
    pub detail: String,
    pub action: String,
    pub confirm_label: String,
    pub cancel_url: String,
    pub danger: bool,
    pub hidden: Vec<HiddenField>,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub ctx: PageContext,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub role_label: String,
    pub member_since: String,
    pub languages: Vec<SelectOption>,
    pub errors: Vec<String>,
}
