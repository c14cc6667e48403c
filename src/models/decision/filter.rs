use chrono::NaiveDate;

use crate::models::contains_ci;
use super::types::{Decision, DisplayStatus};

pub fn matches_search(d: &Decision, search: &str) -> bool {
    contains_ci(&d.decision_number, search)
        || contains_ci(&d.title, search)
        || d.title_en.as_deref().is_some_and(|t| contains_ci(t, search))
        || d.responsible_party.as_deref().is_some_and(|p| contains_ci(p, search))
}

/// Search plus a filter on the displayed status, so `overdue` is filterable.
pub fn filter_decisions<'a>(
    decisions: &'a [Decision],
    search: &str,
    status: Option<DisplayStatus>,
    today: NaiveDate,
) -> Vec<&'a Decision> {
    decisions
        .iter()
        .filter(|d| matches_search(d, search))
        .filter(|d| status.is_none_or(|s| d.display_status(today) == s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::decision::DecisionStatus;
    use crate::models::decision::types::sample;

    #[test]
    fn overdue_filter_uses_display_status() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let rows = vec![
            sample(1, DecisionStatus::Pending, Some(yesterday)),
            sample(2, DecisionStatus::Pending, None),
            sample(3, DecisionStatus::Completed, Some(yesterday)),
        ];

        let overdue = filter_decisions(&rows, "", Some(DisplayStatus::Overdue), today);
        assert_eq!(overdue.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1]);

        let pending = filter_decisions(&rows, "", Some(DisplayStatus::Pending), today);
        assert_eq!(pending.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2]);

        assert_eq!(filter_decisions(&rows, "", None, today).len(), 3);
    }

    #[test]
    fn search_matches_number_and_responsible_party() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let rows = vec![sample(7, DecisionStatus::Pending, None)];
        assert_eq!(filter_decisions(&rows, "kep/7", None, today).len(), 1);
        assert_eq!(filter_decisions(&rows, "pentadbiran", None, today).len(), 1);
        assert_eq!(filter_decisions(&rows, "kewangan", None, today).len(), 0);
    }
}
