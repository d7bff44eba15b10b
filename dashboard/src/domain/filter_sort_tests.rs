//! Tests for the client-side filter and sort pipeline.

use super::*;
use crate::domain::{UserId, ViewStateUpdate};
use pagination::PageNumber;
use rstest::{fixture, rstest};

fn record(id: u64, first: &str, last: &str, email: &str) -> UserRecord {
    UserRecord::new(UserId::new(id), first, last, email, None)
}

fn page_of(records: Vec<UserRecord>) -> UsersPage {
    let total = records.len() as u64;
    UsersPage::new(records, PageNumber::FIRST, 6, total, 1)
}

fn view(query: &str) -> ViewState {
    ViewState::from_query(query)
}

fn ids(records: &[UserRecord]) -> Vec<u64> {
    records.iter().map(|record| record.id().get()).collect()
}

#[fixture]
fn two_domains() -> UsersPage {
    page_of(vec![
        record(1, "Zed", "Zeta", "a@x.com"),
        record(2, "Zed", "Zeta", "b@y.com"),
    ])
}

#[fixture]
fn mixed_case() -> UsersPage {
    page_of(vec![
        record(9, "charles", "Morris", "charles.morris@reqres.in"),
        record(3, "Emma", "Baker", "emma.wong@reqres.in"),
        record(4, "eve", "adams", "eve.holt@example.org"),
        record(1, "George", "Bluth", "george.bluth@reqres.in"),
        record(7, "Tracey", "baker", "tracey.ramos@reqres.in"),
    ])
}

#[rstest]
fn search_matches_email_only_when_names_do_not(two_domains: UsersPage) {
    let shown = compute(&two_domains, &view("search=a"));
    assert_eq!(ids(&shown), vec![1]);
}

#[rstest]
fn domain_filter_is_a_substring_match(two_domains: UsersPage) {
    let shown = compute(&two_domains, &view("domain=y.com"));
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].email(), "b@y.com");
}

#[rstest]
fn search_is_case_insensitive_across_all_three_fields(mixed_case: UsersPage) {
    assert_eq!(ids(&compute(&mixed_case, &view("search=GEORGE"))), vec![1]);
    assert_eq!(ids(&compute(&mixed_case, &view("search=baker"))), vec![3, 7]);
    assert_eq!(ids(&compute(&mixed_case, &view("search=EXAMPLE.ORG"))), vec![4]);
}

#[rstest]
fn domain_filter_is_case_sensitive(mixed_case: UsersPage) {
    assert!(compute(&mixed_case, &view("domain=REQRES")).is_empty());
    assert_eq!(compute(&mixed_case, &view("domain=reqres")).len(), 4);
}

#[rstest]
fn search_and_domain_combine(mixed_case: UsersPage) {
    let shown = compute(&mixed_case, &view("search=e&domain=example.org"));
    assert_eq!(ids(&shown), vec![4]);
}

#[rstest]
fn id_ascending_is_non_decreasing(mixed_case: UsersPage) {
    let shown = compute(&mixed_case, &view("sortBy=id&sortOrder=asc"));
    assert_eq!(ids(&shown), vec![1, 3, 4, 7, 9]);
}

#[rstest]
fn last_name_sort_ignores_case(mixed_case: UsersPage) {
    let shown = compute(&mixed_case, &view("sortBy=last_name&sortOrder=asc"));
    let last_names: Vec<&str> = shown.iter().map(UserRecord::last_name).collect();
    assert_eq!(last_names, vec!["adams", "Baker", "baker", "Bluth", "Morris"]);
}

#[rstest]
fn ties_keep_page_order(mixed_case: UsersPage) {
    // "Baker" (id 3) precedes "baker" (id 7) on the page.
    let asc = compute(&mixed_case, &view("sortBy=last_name&sortOrder=asc"));
    let desc = compute(&mixed_case, &view("sortBy=last_name&sortOrder=desc"));
    assert_eq!(ids(&asc), vec![4, 3, 7, 1, 9]);
    assert_eq!(ids(&desc), vec![9, 1, 3, 7, 4]);
}

#[rstest]
#[case("id")]
#[case("first_name")]
#[case("last_name")]
#[case("email")]
fn descending_reverses_ascending_up_to_ties(mixed_case: UsersPage, #[case] field: &str) {
    let asc = compute(&mixed_case, &view(&format!("sortBy={field}&sortOrder=asc")));
    let desc = compute(&mixed_case, &view(&format!("sortBy={field}&sortOrder=desc")));
    let field = SortField::from_query_value(field).expect("known field");

    let mut reversed = asc;
    reversed.reverse();
    for (expected, actual) in reversed.iter().zip(&desc) {
        assert_eq!(
            compare(field, expected, actual),
            Ordering::Equal,
            "descending order must mirror ascending order by key"
        );
    }
}

#[rstest]
fn compute_is_idempotent(mixed_case: UsersPage) {
    let state = view("search=e&sortBy=email&sortOrder=desc");
    assert_eq!(compute(&mixed_case, &state), compute(&mixed_case, &state));
}

#[test]
fn empty_page_yields_no_records_outcome() {
    let displayed = DisplayedSet::from_page(&page_of(Vec::new()), &ViewState::default());
    assert!(displayed.records().is_empty());
    assert_eq!(displayed.outcome(), DisplayOutcome::NoRecords);
}

#[rstest]
fn filtering_everything_out_is_distinct_from_no_records(two_domains: UsersPage) {
    let mut state = ViewState::default();
    state.apply(ViewStateUpdate::Search("nobody".to_owned()));
    let displayed = DisplayedSet::from_page(&two_domains, &state);
    assert_eq!(displayed.source_len(), 2);
    assert_eq!(displayed.outcome(), DisplayOutcome::NoMatches);
}

#[rstest]
fn matches_report_records_outcome(two_domains: UsersPage) {
    let displayed = DisplayedSet::from_page(&two_domains, &ViewState::default());
    assert_eq!(displayed.outcome(), DisplayOutcome::Records);
}
