pub mod admin_handlers;
pub mod announcement_handlers;
pub mod api_v1;
pub mod auth_handlers;
pub mod complaint_handlers;
pub mod dashboard;
pub mod decision_handlers;
pub mod meeting_handlers;
pub mod profile_handlers;

use actix_session::Session;
use actix_web::HttpResponse;
use serde::Deserialize;

use crate::auth::session::set_flash;
use crate::errors::{AppError, flash_message};

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

/// Query string shared by the list pages; each page reads the keys it knows.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub entity: String,
    #[serde(default)]
    pub tab: String,
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// Backend failures on a mutation are reported through the flash and the
/// browser is sent back to `back`. Other errors propagate.
pub fn mutation_failed(session: &Session, err: AppError, back: &str) -> Result<HttpResponse, AppError> {
    match err {
        AppError::Db(_) | AppError::Storage(_) => {
            log::error!("{err}");
            set_flash(session, flash_message(&err));
            Ok(see_other(back))
        }
        other => Err(other),
    }
}
