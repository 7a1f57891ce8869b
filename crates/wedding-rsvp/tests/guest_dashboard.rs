//! Integration specifications for the guest dashboard.
//!
//! Scenarios run through the public crate surface: responses come in the way the storage
//! collaborator hands them over and leave as the views the dashboard renders.

use std::collections::BTreeMap;
use std::io::Cursor;

use wedding_rsvp::guests::{
    find_duplicates, DuplicateDetector, GuestListFormat, GuestListImporter, GuestListReport,
    GuestResponse, NameAlias, ResponseFilter, ResponseId, StatisticsSummary,
};

fn response(
    id: u32,
    first: &str,
    last: &str,
    attending: bool,
    connection: Option<&str>,
) -> GuestResponse {
    GuestResponse {
        id: ResponseId(id.to_string()),
        first_name: first.to_string(),
        last_name: last.to_string(),
        attending,
        connection_type: connection.map(str::to_string),
        guest_count: if attending { Some(2) } else { None },
        submitted_at: None,
    }
}

fn id(value: u32) -> ResponseId {
    ResponseId(value.to_string())
}

#[test]
fn attendance_counts_always_add_up() {
    let responses = vec![
        response(1, "Avi", "Ben", true, Some("Friend of the Bride")),
        response(2, "Lior", "Gat", false, None),
        response(3, "Shir", "Paz", true, Some("Family of the Bride")),
        response(4, "Ido", "Ron", false, None),
        response(5, "Maya", "Tal", true, Some("Friend of the Groom")),
    ];

    let summary = StatisticsSummary::from_responses(&responses);

    assert_eq!(summary.attending + summary.not_attending, summary.total);
    assert_eq!(summary.total, 5);
    assert_eq!(summary.guest_count, 8);
    assert!(summary.guest_count >= summary.total as u64);
}

#[test]
fn connection_breakdown_ignores_missing_labels() {
    let responses = vec![
        response(1, "Avi", "Ben", true, Some("Friend of the Bride")),
        response(2, "Shir", "Paz", true, Some("Friend of the Bride")),
        response(3, "Maya", "Tal", true, Some("Family of the Groom")),
        response(4, "Ido", "Ron", false, None),
    ];

    let summary = StatisticsSummary::from_responses(&responses);

    let expected: BTreeMap<String, usize> = BTreeMap::from([
        ("Friend of the Bride".to_string(), 2),
        ("Family of the Groom".to_string(), 1),
    ]);
    assert_eq!(summary.connection_breakdown, expected);
}

#[test]
fn case_only_duplicates_flag_both_guests_in_any_order() {
    let john = response(1, "John", "Smith", true, Some("Friend of the Bride"));
    let lower = response(2, "john", "smith", true, Some("Friend of the Bride"));

    let forward = find_duplicates(&[john.clone(), lower.clone()]);
    let backward = find_duplicates(&[lower, john]);

    for report in [&forward, &backward] {
        assert_eq!(report.flags().get(&id(1)), Some(&true));
        assert_eq!(report.flags().get(&id(2)), Some(&true));
        assert_eq!(report.duplicate_groups().count(), 1);
    }
}

#[test]
fn unrelated_names_are_not_flagged() {
    let report = find_duplicates(&[
        response(1, "Alice", "Lee", true, Some("Friend of the Groom")),
        response(2, "Bob", "Chen", false, None),
    ]);

    assert!(report.flags().is_empty());
}

#[test]
fn empty_guest_list_produces_empty_views() {
    let report = GuestListReport::build(&[], &ResponseFilter::All, &DuplicateDetector::default());

    assert_eq!(report.statistics, StatisticsSummary::default());
    assert!(report.statistics.connection_breakdown.is_empty());
    assert!(report.duplicates.flags().is_empty());
    assert!(report.guests.is_empty());
}

#[test]
fn repeated_reports_are_identical() {
    let responses = vec![
        response(1, "Noa", "Katz", true, Some("Family of the Bride")),
        response(2, "NOA", "KATZ ", true, Some("Family of the Bride")),
        response(3, "Eli", "Dor", false, None),
    ];
    let detector = DuplicateDetector::new(vec![NameAlias::new("eli", "elie")]);

    let first = serde_json::to_value(GuestListReport::build(
        &responses,
        &ResponseFilter::All,
        &detector,
    ))
    .expect("serializes");
    let second = serde_json::to_value(GuestListReport::build(
        &responses,
        &ResponseFilter::All,
        &detector,
    ))
    .expect("serializes");

    assert_eq!(first, second);
}

#[test]
fn imported_export_feeds_the_dashboard() {
    let csv = "ID,First Name,Last Name,Attending,Connection Type,Guest Count,Submitted At\n\
        11,Dana,Levi,Yes,Friend of the Bride,2,2025-04-02 09:15:00\n\
        12,Omer,Azulay,No,,1,2025-04-03 11:00:00\n\
        13,dana,levi,Yes,Friend of the Bride,1,2025-04-05 20:45:00\n";

    let responses =
        GuestListImporter::from_reader(Cursor::new(csv), GuestListFormat::Csv).expect("csv parses");
    let report = GuestListReport::build(
        &responses,
        &ResponseFilter::parse("Friend of the Bride"),
        &DuplicateDetector::default(),
    );

    assert_eq!(report.statistics.total, 3);
    assert_eq!(report.statistics.guest_count, 4);
    assert_eq!(report.duplicates.flagged_ids(), &[id(11), id(13)]);
    assert_eq!(report.guests.len(), 2);
    assert!(report.guests.iter().all(|row| row.possible_duplicate));
}
