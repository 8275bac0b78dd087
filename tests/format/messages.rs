//! Outcome message tests

use muster_foundation::{EntityKind, Entry, ErrorKind, Record};
use muster_format::{ambiguous_message, format_outcome, not_found_message, outcome_to_result};
use muster_query::{Tier, resolve_query};

fn hero() -> EntityKind {
    EntityKind::new("hero").with_plural("heroes")
}

fn heroes() -> Vec<Entry> {
    vec![
        Entry::new("lord_1_1", "Derthert"),
        Entry::new("lord_2_11", "Rhagaea"),
        Entry::new("lord_2_12", "Ira"),
        Entry::new("wanderer_2", "Ira"),
        Entry::new("notable_1", "Garios"),
        Entry::new("notable_2", "Gareth"),
    ]
}

fn message(query: &str) -> String {
    let heroes = heroes();
    let outcome = resolve_query(&heroes, query);
    format_outcome(&hero(), query, &outcome, |r| format!("{} ({})", r.name(), r.id()))
}

#[test]
fn found_uses_caller_text() {
    assert_eq!(message("lord_1_1"), "Derthert (lord_1_1)");
}

#[test]
fn not_found_text() {
    assert_eq!(message("zzz"), "No hero matching query 'zzz' found");
    assert_eq!(not_found_message(&hero(), "zzz"), message("zzz"));
}

#[test]
fn id_tie_lists_ids() {
    assert_eq!(
        message("lord_2_1"),
        "Found 2 heroes matching query 'lord_2_1': lord_2_11, lord_2_12. Please use a more specific ID."
    );
}

#[test]
fn identical_names_list_name_and_id() {
    assert_eq!(
        message("Ira"),
        "Found 2 heroes matching query 'Ira': Ira (lord_2_12), Ira (wanderer_2). Please use a more specific ID."
    );
}

#[test]
fn prefix_and_substring_phrases() {
    assert_eq!(
        message("gar"),
        "Found 2 heroes with names starting with 'gar': Garios (notable_1), Gareth (notable_2). Please use a more specific ID."
    );

    let records = vec![Entry::new("x1", "Pagarios"), Entry::new("x2", "Garios")];
    let outcome = resolve_query(&records, "ari");
    assert_eq!(
        format_outcome(&hero(), "ari", &outcome, |_| String::new()),
        "Found 2 heroes with names containing 'ari': Pagarios (x1), Garios (x2). Please use a more specific ID."
    );
}

#[test]
fn query_is_echoed_verbatim() {
    let text = message("GAR");
    assert!(text.contains("'GAR'"));
}

#[test]
fn blank_query_lists_ids() {
    let records = vec![Entry::new("a", "Alpha"), Entry::new("b", "Beta")];
    let outcome = resolve_query(&records, "");
    assert_eq!(
        format_outcome(&EntityKind::new("clan"), "", &outcome, |_| String::new()),
        "Found 2 clans matching query '': a, b. Please use a more specific ID."
    );
}

#[test]
fn singular_kind_for_a_single_candidate() {
    let one = Entry::new("x", "X");
    let text = ambiguous_message(&hero(), "x", &[&one], Tier::NameSubstring);
    assert_eq!(
        text,
        "Found 1 hero with names containing 'x': X (x). Please use a more specific ID."
    );
}

#[test]
fn result_conversion_carries_the_same_text() {
    let heroes = heroes();

    let outcome = resolve_query(&heroes, "Ira");
    let err = outcome_to_result(&hero(), "Ira", &outcome).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Ambiguous(_)));
    assert_eq!(err.to_string(), message("Ira"));

    let outcome = resolve_query(&heroes, "zzz");
    let err = outcome_to_result(&hero(), "zzz", &outcome).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotFound { .. }));
    assert_eq!(err.to_string(), message("zzz"));

    let outcome = resolve_query(&heroes, "derth");
    let found = outcome_to_result(&hero(), "derth", &outcome).unwrap();
    assert_eq!(found.id(), "lord_1_1");
}
