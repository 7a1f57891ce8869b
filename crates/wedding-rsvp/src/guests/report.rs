use super::domain::{GuestResponse, ResponseFilter, DEFAULT_CONNECTION_OPTIONS};
use super::duplicates::{DuplicateDetector, DuplicateReport};
use super::statistics::StatisticsSummary;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GuestRow {
    #[serde(flatten)]
    pub response: GuestResponse,
    pub possible_duplicate: bool,
}

/// Dashboard payload: counts and duplicates over every response, rows narrowed by filter.
#[derive(Debug, Clone, Serialize)]
pub struct GuestListReport {
    pub filter: String,
    /// Labels a connection filter can select: the defaults, then any other label in use.
    pub connection_options: Vec<String>,
    pub statistics: StatisticsSummary,
    pub duplicates: DuplicateReport,
    pub guests: Vec<GuestRow>,
}

impl GuestListReport {
    pub fn build(
        responses: &[GuestResponse],
        filter: &ResponseFilter,
        detector: &DuplicateDetector,
    ) -> Self {
        let statistics = StatisticsSummary::from_responses(responses);
        let duplicates = detector.detect(responses);
        let guests = responses
            .iter()
            .filter(|response| filter.matches(response))
            .map(|response| GuestRow {
                possible_duplicate: duplicates.is_flagged(&response.id),
                response: response.clone(),
            })
            .collect();

        let connection_options = connection_options(&statistics);

        Self {
            filter: filter.label().to_string(),
            connection_options,
            statistics,
            duplicates,
            guests,
        }
    }
}

fn connection_options(statistics: &StatisticsSummary) -> Vec<String> {
    let mut options: Vec<String> = DEFAULT_CONNECTION_OPTIONS
        .iter()
        .map(|label| label.to_string())
        .collect();
    for label in statistics.connection_breakdown.keys() {
        if !options.contains(label) {
            options.push(label.clone());
        }
    }
    options
}
