use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::validate::{validate_choice, validate_length};
use crate::i18n::Language;
use crate::models::Priority;

text_enum! {
    pub enum ComplaintType {
        Complaint = "complaint" => "complaints.complaint",
        Suggestion = "suggestion" => "complaints.suggestion",
    }
}

impl ComplaintType {
    /// Prefix of the generated reference number.
    pub fn reference_prefix(self) -> &'static str {
        match self {
            ComplaintType::Complaint => "ADU",
            ComplaintType::Suggestion => "CDG",
        }
    }
}

text_enum! {
    pub enum ComplaintCategory {
        Welfare = "welfare" => "complaints.category.welfare",
        Facilities = "facilities" => "complaints.category.facilities",
        Hr = "hr" => "complaints.category.hr",
        Finance = "finance" => "complaints.category.finance",
        Safety = "safety" => "complaints.category.safety",
        Others = "others" => "complaints.category.others",
    }
}

text_enum! {
    pub enum ComplaintStatus {
        Pending = "pending" => "complaints.pending",
        InProgress = "in_progress" => "complaints.inProgress",
        Resolved = "resolved" => "complaints.resolved",
        Rejected = "rejected" => "complaints.rejected",
    }
}

impl ComplaintStatus {
    /// Resolved and rejected complaints are closed for good.
    pub fn is_terminal(self) -> bool {
        matches!(self, ComplaintStatus::Resolved | ComplaintStatus::Rejected)
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Complaint {
    pub id: i64,
    pub reference_number: String,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub kind: ComplaintType,
    #[sqlx(try_from = "String")]
    pub category: ComplaintCategory,
    pub subject: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    #[sqlx(try_from = "String")]
    pub status: ComplaintStatus,
    pub resolution: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<i64>,
    pub submitted_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Joined from the submitter's profile.
    pub submitter_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplaintForm {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplaintInput {
    pub kind: ComplaintType,
    pub category: ComplaintCategory,
    pub subject: String,
    pub description: String,
    pub priority: Priority,
}

pub const SUBJECT_MIN: usize = 5;
pub const SUBJECT_MAX: usize = 200;
pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 5000;

impl ComplaintForm {
    pub fn blank() -> Self {
        ComplaintForm {
            kind: ComplaintType::Complaint.as_str().to_string(),
            category: ComplaintCategory::Welfare.as_str().to_string(),
            priority: Priority::Normal.as_str().to_string(),
            ..ComplaintForm::default()
        }
    }

    pub fn validate(&self, lang: Language) -> Result<ComplaintInput, Vec<String>> {
        let errors: Vec<String> = [
            validate_choice(&self.kind, ComplaintType::CODES, lang.t("common.type"), lang),
            validate_choice(&self.category, ComplaintCategory::CODES, lang.t("complaints.category"), lang),
            validate_length(&self.subject, lang.t("complaints.subject"), SUBJECT_MIN, SUBJECT_MAX, lang),
            validate_length(
                &self.description,
                lang.t("complaints.description"),
                DESCRIPTION_MIN,
                DESCRIPTION_MAX,
                lang,
            ),
            validate_choice(&self.priority, Priority::CODES, lang.t("complaints.priority"), lang),
        ]
        .into_iter()
        .flatten()
        .collect();

        match (self.kind.parse(), self.category.parse(), self.priority.parse()) {
            (Ok(kind), Ok(category), Ok(priority)) if errors.is_empty() => Ok(ComplaintInput {
                kind,
                category,
                subject: self.subject.trim().to_string(),
                description: self.description.trim().to_string(),
                priority,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusForm {
    pub status: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Why a status update was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdateError {
    AlreadyClosed,
    ResolutionRequired,
}

impl StatusUpdateError {
    pub fn message_key(self) -> &'static str {
        match self {
            StatusUpdateError::AlreadyClosed => "complaints.alreadyClosed",
            StatusUpdateError::ResolutionRequired => "complaints.resolutionRequired",
        }
    }
}

/// A terminal complaint accepts no further updates, and moving into a
/// terminal status needs non-blank resolution text.
pub fn validate_status_update(
    current: ComplaintStatus,
    next: ComplaintStatus,
    resolution: &str,
) -> Result<(), StatusUpdateError> {
    if current.is_terminal() {
        return Err(StatusUpdateError::AlreadyClosed);
    }
    if next.is_terminal() && resolution.trim().is_empty() {
        return Err(StatusUpdateError::ResolutionRequired);
    }
    Ok(())
}

/// `ADU-2026-00042`
pub fn format_reference(kind: ComplaintType, year: i32, seq: i64) -> String {
    format!("{}-{year}-{seq:05}", kind.reference_prefix())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplaintStats {
    pub total: usize,
    pub complaints: usize,
    pub suggestions: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub rejected: usize,
}
