use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::validate::{non_empty, validate_choice, validate_optional, validate_required};
use crate::clock;
use crate::i18n::Language;

text_enum! {
    pub enum MeetingStatus {
        Scheduled = "scheduled" => "meetings.scheduled",
        Completed = "completed" => "meetings.completed",
        Cancelled = "cancelled" => "meetings.cancelled",
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Meeting {
    pub id: i64,
    pub title: String,
    pub title_en: Option<String>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub meeting_date: DateTime<Utc>,
    pub location: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: MeetingStatus,
    pub minutes_url: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw form body. Minutes arrive as a data URI produced in the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeetingForm {
    pub title: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub meeting_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub minutes_data: String,
    #[serde(default)]
    pub minutes_name: String,
    #[serde(default)]
    pub remove_minutes: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

/// Validated meeting fields; English variants stay `None` when left blank.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingInput {
    pub title: String,
    pub title_en: Option<String>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub meeting_date: DateTime<Utc>,
    pub location: Option<String>,
    pub status: MeetingStatus,
}

pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 5000;
pub const LOCATION_MAX: usize = 200;

impl MeetingForm {
    pub fn validate(&self, lang: Language, offset: &FixedOffset) -> Result<MeetingInput, Vec<String>> {
        let mut errors: Vec<String> = [
            validate_required(&self.title, lang.t("meetings.titleMs"), TITLE_MAX, lang),
            validate_optional(&self.title_en, lang.t("meetings.titleEn"), TITLE_MAX, lang),
            validate_optional(&self.description, lang.t("meetings.descriptionMs"), DESCRIPTION_MAX, lang),
            validate_optional(&self.description_en, lang.t("meetings.descriptionEn"), DESCRIPTION_MAX, lang),
            validate_optional(&self.location, lang.t("meetings.location"), LOCATION_MAX, lang),
            validate_choice(&self.status, MeetingStatus::CODES, lang.t("common.status"), lang),
        ]
        .into_iter()
        .flatten()
        .collect();

        let meeting_date = clock::parse_local_datetime(&self.meeting_date, offset);
        if meeting_date.is_none() {
            errors.push(format!("{}: {}", lang.t("meetings.date"), lang.t("validation.required")));
        }

        match (meeting_date, self.status.parse::<MeetingStatus>()) {
            (Some(meeting_date), Ok(status)) if errors.is_empty() => Ok(MeetingInput {
                title: self.title.trim().to_string(),
                title_en: non_empty(&self.title_en),
                description: non_empty(&self.description),
                description_en: non_empty(&self.description_en),
                meeting_date,
                location: non_empty(&self.location),
                status,
            }),
            _ => Err(errors),
        }
    }

    /// Pre-filled form for editing an existing meeting.
    pub fn from_meeting(m: &Meeting, offset: &FixedOffset) -> Self {
        MeetingForm {
            title: m.title.clone(),
            title_en: m.title_en.clone().unwrap_or_default(),
            description: m.description.clone().unwrap_or_default(),
            description_en: m.description_en.clone().unwrap_or_default(),
            meeting_date: clock::to_local_input(&m.meeting_date, offset),
            location: m.location.clone().unwrap_or_default(),
            status: m.status.as_str().to_string(),
            ..MeetingForm::default()
        }
    }

    pub fn blank() -> Self {
        MeetingForm {
            status: MeetingStatus::Scheduled.as_str().to_string(),
            ..MeetingForm::default()
        }
    }

    pub fn wants_minutes_removed(&self) -> bool {
        self.remove_minutes.as_deref().is_some_and(|v| !v.is_empty() && v != "0")
    }
}
