use crate::models::contains_ci;
use super::types::{Complaint, ComplaintStats, ComplaintStatus, ComplaintType};

#[derive(Debug, Clone, Default)]
pub struct ComplaintFilter {
    pub search: String,
    pub status: Option<ComplaintStatus>,
    pub kind: Option<ComplaintType>,
}

pub fn filter_complaints<'a>(complaints: &'a [Complaint], f: &ComplaintFilter) -> Vec<&'a Complaint> {
    complaints
        .iter()
        .filter(|c| contains_ci(&c.subject, &f.search) || contains_ci(&c.reference_number, &f.search))
        .filter(|c| f.status.is_none_or(|s| c.status == s))
        .filter(|c| f.kind.is_none_or(|k| c.kind == k))
        .collect()
}

pub fn stats(complaints: &[Complaint]) -> ComplaintStats {
    let mut s = ComplaintStats { total: complaints.len(), ..ComplaintStats::default() };
    for c in complaints {
        match c.kind {
            ComplaintType::Complaint => s.complaints += 1,
            ComplaintType::Suggestion => s.suggestions += 1,
        }
        match c.status {
            ComplaintStatus::Pending => s.pending += 1,
            ComplaintStatus::InProgress => s.in_progress += 1,
            ComplaintStatus::Resolved => s.resolved += 1,
            ComplaintStatus::Rejected => s.rejected += 1,
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use crate::models::complaint::ComplaintCategory;
    use chrono::Utc;

    fn complaint(id: i64, kind: ComplaintType, status: ComplaintStatus, subject: &str) -> Complaint {
        let now = Utc::now();
        Complaint {
            id,
            reference_number: format!("{}-2026-{id:05}", kind.reference_prefix()),
            kind,
            category: ComplaintCategory::Facilities,
            subject: subject.to_string(),
            description: "Butiran lanjut".into(),
            priority: Priority::Normal,
            status,
            resolution: None,
            resolved_at: None,
            resolved_by: None,
            submitted_by: Some(1),
            created_at: now,
            updated_at: now,
            submitter_name: None,
        }
    }

    #[test]
    fn filters_combine() {
        let rows = vec![
            complaint(1, ComplaintType::Complaint, ComplaintStatus::Pending, "Tandas rosak"),
            complaint(2, ComplaintType::Suggestion, ComplaintStatus::Pending, "Tambah parkir"),
            complaint(3, ComplaintType::Complaint, ComplaintStatus::Resolved, "Lampu rosak"),
        ];

        let f = ComplaintFilter { search: "rosak".into(), ..Default::default() };
        assert_eq!(filter_complaints(&rows, &f).len(), 2);

        let f = ComplaintFilter { status: Some(ComplaintStatus::Pending), kind: Some(ComplaintType::Complaint), ..Default::default() };
        assert_eq!(filter_complaints(&rows, &f).iter().map(|c| c.id).collect::<Vec<_>>(), vec![1]);

        let f = ComplaintFilter { search: "cdg-2026".into(), ..Default::default() };
        assert_eq!(filter_complaints(&rows, &f).iter().map(|c| c.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn stats_count_kinds_and_statuses() {
        let rows = vec![
            complaint(1, ComplaintType::Complaint, ComplaintStatus::Pending, "a"),
            complaint(2, ComplaintType::Suggestion, ComplaintStatus::InProgress, "b"),
            complaint(3, ComplaintType::Complaint, ComplaintStatus::Rejected, "c"),
        ];
        let s = stats(&rows);
        assert_eq!(s.total, 3);
        assert_eq!(s.complaints, 2);
        assert_eq!(s.suggestions, 1);
        assert_eq!((s.pending, s.in_progress, s.resolved, s.rejected), (1, 1, 0, 1));
    }
}
