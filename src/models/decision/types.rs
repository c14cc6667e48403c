use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::validate::{non_empty, validate_choice, validate_length, validate_optional, validate_required};
use crate::clock;
use crate::i18n::Language;

text_enum! {
    pub enum DecisionStatus {
        Pending = "pending" => "decisions.pending",
        InProgress = "in_progress" => "decisions.inProgress",
        Completed = "completed" => "decisions.completed",
    }
}

text_enum! {
    /// What the list shows: the stored status, or `overdue` when past due.
    pub enum DisplayStatus {
        Pending = "pending" => "decisions.pending",
        InProgress = "in_progress" => "decisions.inProgress",
        Completed = "completed" => "decisions.completed",
        Overdue = "overdue" => "decisions.overdue",
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Decision {
    pub id: i64,
    pub meeting_id: Option<i64>,
    pub decision_number: String,
    pub title: String,
    pub title_en: Option<String>,
    pub description: String,
    pub description_en: Option<String>,
    pub responsible_party: Option<String>,
    pub due_date: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub status: DecisionStatus,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Joined from the linked meeting.
    pub meeting_title: Option<String>,
    pub meeting_title_en: Option<String>,
}

impl Decision {
    /// Past its due date on the portal clock and not completed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != DecisionStatus::Completed && self.due_date.is_some_and(|due| due < today)
    }

    pub fn display_status(&self, today: NaiveDate) -> DisplayStatus {
        if self.is_overdue(today) {
            return DisplayStatus::Overdue;
        }
        match self.status {
            DecisionStatus::Pending => DisplayStatus::Pending,
            DecisionStatus::InProgress => DisplayStatus::InProgress,
            DecisionStatus::Completed => DisplayStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecisionForm {
    #[serde(default)]
    pub meeting_id: String,
    pub decision_number: String,
    pub title: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub responsible_party: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionInput {
    pub meeting_id: Option<i64>,
    pub decision_number: String,
    pub title: String,
    pub title_en: Option<String>,
    pub description: String,
    pub description_en: Option<String>,
    pub responsible_party: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: DecisionStatus,
}

pub const NUMBER_MAX: usize = 50;
pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 5000;
pub const PARTY_MAX: usize = 200;

impl DecisionForm {
    pub fn validate(&self, lang: Language) -> Result<DecisionInput, Vec<String>> {
        let mut errors: Vec<String> = [
            validate_required(&self.decision_number, lang.t("decisions.number"), NUMBER_MAX, lang),
            validate_required(&self.title, lang.t("decisions.titleMs"), TITLE_MAX, lang),
            validate_optional(&self.title_en, lang.t("decisions.titleEn"), TITLE_MAX, lang),
            validate_length(&self.description, lang.t("decisions.descriptionMs"), 1, DESCRIPTION_MAX, lang),
            validate_optional(&self.description_en, lang.t("decisions.descriptionEn"), DESCRIPTION_MAX, lang),
            validate_optional(&self.responsible_party, lang.t("decisions.responsibleParty"), PARTY_MAX, lang),
            validate_choice(&self.status, DecisionStatus::CODES, lang.t("common.status"), lang),
        ]
        .into_iter()
        .flatten()
        .collect();

        let due_date = match self.due_date.trim() {
            "" => None,
            raw => {
                let parsed = clock::parse_date(raw);
                if parsed.is_none() {
                    errors.push(format!("{}: {}", lang.t("decisions.dueDate"), lang.t("common.error")));
                }
                parsed
            }
        };

        let meeting_id = match self.meeting_id.trim() {
            "" | "none" => None,
            raw => match raw.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(format!("{}: {}", lang.t("decisions.meeting"), lang.t("common.error")));
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        let status = self.status.parse::<DecisionStatus>().map_err(|e| vec![e.to_string()])?;

        Ok(DecisionInput {
            meeting_id,
            decision_number: self.decision_number.trim().to_string(),
            title: self.title.trim().to_string(),
            title_en: non_empty(&self.title_en),
            description: self.description.trim().to_string(),
            description_en: non_empty(&self.description_en),
            responsible_party: non_empty(&self.responsible_party),
            due_date,
            status,
        })
    }

    pub fn from_decision(d: &Decision) -> Self {
        DecisionForm {
            meeting_id: d.meeting_id.map(|id| id.to_string()).unwrap_or_default(),
            decision_number: d.decision_number.clone(),
            title: d.title.clone(),
            title_en: d.title_en.clone().unwrap_or_default(),
            description: d.description.clone(),
            description_en: d.description_en.clone().unwrap_or_default(),
            responsible_party: d.responsible_party.clone().unwrap_or_default(),
            due_date: d.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            status: d.status.as_str().to_string(),
            csrf_token: String::new(),
        }
    }

    /// Empty form, optionally pre-linked to a meeting.
    pub fn blank(meeting_id: Option<i64>) -> Self {
        DecisionForm {
            meeting_id: meeting_id.map(|id| id.to_string()).unwrap_or_default(),
            status: DecisionStatus::Pending.as_str().to_string(),
            ..DecisionForm::default()
        }
    }
}

#[cfg(test)]
pub(crate) fn sample(id: i64, status: DecisionStatus, due: Option<NaiveDate>) -> Decision {
    let now = Utc::now();
    Decision {
        id,
        meeting_id: None,
        decision_number: format!("KEP/{id}/2026"),
        title: format!("Keputusan {id}"),
        title_en: None,
        description: "Butiran".into(),
        description_en: None,
        responsible_party: Some("Bahagian Pentadbiran".into()),
        due_date: due,
        status,
        created_by: None,
        created_at: now,
        updated_at: now,
        meeting_title: None,
        meeting_title_en: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn past_due_and_not_completed_displays_overdue() {
        let today = day(2026, 10, 16);
        let d = sample(1, DecisionStatus::InProgress, Some(day(2026, 10, 15)));
        assert_eq!(d.display_status(today), DisplayStatus::Overdue);
        assert_eq!(d.status, DecisionStatus::InProgress);
    }

    #[test]
    fn due_today_is_not_overdue() {
        let today = day(2026, 10, 16);
        let d = sample(1, DecisionStatus::Pending, Some(today));
        assert_eq!(d.display_status(today), DisplayStatus::Pending);
    }

    #[test]
    fn completed_is_never_overdue() {
        let d = sample(1, DecisionStatus::Completed, Some(day(2020, 1, 1)));
        assert_eq!(d.display_status(day(2026, 10, 16)), DisplayStatus::Completed);
    }

    #[test]
    fn no_due_date_is_never_overdue() {
        let d = sample(1, DecisionStatus::Pending, None);
        assert!(!d.is_overdue(day(2030, 1, 1)));
    }

    #[test]
    fn form_validation_parses_optional_fields() {
        let form = DecisionForm {
            meeting_id: "12".into(),
            decision_number: "KEP/01/2026".into(),
            title: "Naik taraf surau".into(),
            description: "Kerja naik taraf".into(),
            due_date: "2026-12-31".into(),
            status: "pending".into(),
            ..DecisionForm::default()
        };
        let input = form.validate(Language::Ms).unwrap();
        assert_eq!(input.meeting_id, Some(12));
        assert_eq!(input.due_date, Some(day(2026, 12, 31)));
        assert_eq!(input.title_en, None);
    }

    #[test]
    fn form_validation_collects_errors() {
        let form = DecisionForm {
            decision_number: "".into(),
            title: "".into(),
            due_date: "31/12/2026".into(),
            status: "pending".into(),
            ..DecisionForm::default()
        };
        let errors = form.validate(Language::En).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
