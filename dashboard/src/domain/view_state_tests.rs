//! Tests for query-string parsing and serialisation of the view state.

use super::*;
use rstest::rstest;

#[test]
fn empty_query_yields_defaults() {
    let state = ViewState::from_query("");
    assert_eq!(state, ViewState::default());
    assert_eq!(state.search(), "");
    assert_eq!(state.domain(), "");
    assert_eq!(state.sort_by(), SortField::Id);
    assert_eq!(state.sort_order(), SortOrder::Asc);
    assert_eq!(state.page(), PageNumber::FIRST);
    assert_eq!(state.view(), ViewMode::Card);
}

#[rstest]
#[case::zero("page=0", 1)]
#[case::negative("page=-5", 1)]
#[case::not_a_number("page=abc", 1)]
#[case::blank("page=", 1)]
#[case::padded("page=%203%20", 3)]
#[case::valid("page=7", 7)]
fn page_is_clamped_at_parse_time(#[case] query: &str, #[case] expected: u32) {
    assert_eq!(ViewState::from_query(query).page().get(), expected);
}

#[rstest]
#[case("sortBy=nickname", SortField::Id)]
#[case("sortBy=LAST_NAME", SortField::Id)]
#[case("sortBy=last_name", SortField::LastName)]
#[case("sortBy=first_name", SortField::FirstName)]
#[case("sortBy=email", SortField::Email)]
fn sort_field_falls_back_to_id(#[case] query: &str, #[case] expected: SortField) {
    assert_eq!(ViewState::from_query(query).sort_by(), expected);
}

#[rstest]
#[case("sortOrder=sideways", SortOrder::Asc)]
#[case("sortOrder=desc", SortOrder::Desc)]
fn sort_order_falls_back_to_asc(#[case] query: &str, #[case] expected: SortOrder) {
    assert_eq!(ViewState::from_query(query).sort_order(), expected);
}

#[rstest]
#[case("view=grid", ViewMode::Card)]
#[case("view=table", ViewMode::Table)]
fn view_falls_back_to_card(#[case] query: &str, #[case] expected: ViewMode) {
    assert_eq!(ViewState::from_query(query).view(), expected);
}

#[test]
fn leading_question_mark_and_encoding_are_handled() {
    let state = ViewState::from_query("?search=george+bluth&domain=reqres.in&unknown=1");
    assert_eq!(state.search(), "george bluth");
    assert_eq!(state.domain(), "reqres.in");
}

#[test]
fn first_occurrence_of_a_key_wins() {
    let state = ViewState::from_query("page=2&page=9&view=table&view=card");
    assert_eq!(state.page().get(), 2);
    assert_eq!(state.view(), ViewMode::Table);
}

#[test]
fn serialises_every_field_in_fixed_order() {
    let mut state = ViewState::default();
    state.apply(ViewStateUpdate::Search("جان doe".to_owned()));
    state.apply(ViewStateUpdate::SortBy(SortField::LastName));
    state.apply(ViewStateUpdate::Page(PageNumber::clamped(2)));

    assert_eq!(
        state.to_query(),
        "search=%D8%AC%D8%A7%D9%86+doe&domain=&sortBy=last_name&sortOrder=asc&page=2&view=card"
    );
}

#[test]
fn serialised_query_parses_back_to_the_same_state() {
    let mut state = ViewState::default();
    state.apply(ViewStateUpdate::Domain("y.com".to_owned()));
    state.apply(ViewStateUpdate::SortOrder(SortOrder::Desc));
    state.apply(ViewStateUpdate::View(ViewMode::Table));

    assert_eq!(ViewState::from_query(&state.to_query()), state);
}

#[test]
fn reset_keeps_view_mode_only() {
    let state = ViewState::from_query("search=a&domain=b&sortBy=email&sortOrder=desc&page=4&view=table");
    let reset = state.reset_filters();

    assert_eq!(reset.view(), ViewMode::Table);
    assert_eq!(reset.search(), "");
    assert_eq!(reset.domain(), "");
    assert_eq!(reset.sort_by(), SortField::Id);
    assert_eq!(reset.sort_order(), SortOrder::Asc);
    assert_eq!(reset.page(), PageNumber::FIRST);
}

#[rstest]
#[case("search", "ali", Some(ViewStateUpdate::Search("ali".to_owned())))]
#[case("page", "0", Some(ViewStateUpdate::Page(PageNumber::FIRST)))]
#[case("sortBy", "bogus", Some(ViewStateUpdate::SortBy(SortField::Id)))]
#[case("colour", "red", None)]
fn raw_pairs_use_the_parse_fallbacks(
    #[case] key: &str,
    #[case] value: &str,
    #[case] expected: Option<ViewStateUpdate>,
) {
    assert_eq!(ViewStateUpdate::from_pair(key, value), expected);
}

#[test]
fn every_enum_value_round_trips_through_its_query_value() {
    for field in SortField::ALL {
        assert_eq!(SortField::from_query_value(field.as_query_value()), Some(*field));
    }
    for order in SortOrder::ALL {
        assert_eq!(SortOrder::from_query_value(order.as_query_value()), Some(*order));
    }
    for view in ViewMode::ALL {
        assert_eq!(ViewMode::from_query_value(view.as_query_value()), Some(*view));
    }
}
