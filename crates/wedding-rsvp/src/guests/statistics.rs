use super::domain::GuestResponse;
use serde::Serialize;
use std::collections::BTreeMap;

/// Attendance counts for one wedding's response list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatisticsSummary {
    pub total: usize,
    pub attending: usize,
    pub not_attending: usize,
    pub guest_count: u64,
    pub connection_breakdown: BTreeMap<String, usize>,
}

impl StatisticsSummary {
    pub fn from_responses(responses: &[GuestResponse]) -> Self {
        let mut summary = Self::default();

        for response in responses {
            summary.total += 1;
            if response.attending {
                summary.attending += 1;
            }
            summary.guest_count += u64::from(response.effective_guest_count());
            if let Some(label) = response.connection() {
                *summary
                    .connection_breakdown
                    .entry(label.to_string())
                    .or_insert(0) += 1;
            }
        }

        summary.not_attending = summary.total - summary.attending;
        summary
    }

    /// Breakdown entries ordered by descending count, ties by label.
    pub fn ranked_connections(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .connection_breakdown
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}
