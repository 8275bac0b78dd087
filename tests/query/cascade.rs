//! Resolution cascade scenarios

use muster_foundation::{Entry, Record};
use muster_query::{Tier, classify, resolve, resolve_query};

fn heroes() -> Vec<Entry> {
    vec![
        Entry::new("lord_1_1", "Derthert"),
        Entry::new("lord_1_11", "Pagarios"),
        Entry::new("a1", "Garios"),
        Entry::new("b1", "Lucon"),
        Entry::new("lord_2_11", "Rhagaea"),
        Entry::new("lord_2_12", "Ira"),
        Entry::new("wanderer_2", "Ira"),
    ]
}

fn found_id(records: &[Entry], query: &str) -> Option<String> {
    resolve_query(records, query).found().map(|r| r.id().to_string())
}

fn candidate_ids(records: &[Entry], query: &str) -> Vec<String> {
    resolve_query(records, query)
        .candidates()
        .iter()
        .map(|r| r.id().to_string())
        .collect()
}

// =============================================================================
// ID tiers
// =============================================================================

#[test]
fn exact_id_beats_longer_partial() {
    let heroes = heroes();
    let outcome = resolve_query(&heroes, "lord_1_1");
    assert_eq!(outcome.found().map(Record::id), Some("lord_1_1"));
    assert_eq!(outcome.tier(), Some(Tier::IdExact));
}

#[test]
fn exact_id_ignores_case_and_whitespace() {
    assert_eq!(found_id(&heroes(), "  LORD_1_11 "), Some("lord_1_11".into()));
}

#[test]
fn shortest_partial_id_wins() {
    let heroes = heroes();
    let outcome = resolve_query(&heroes, "lord_1");
    assert_eq!(outcome.found().map(Record::id), Some("lord_1_1"));
    assert_eq!(outcome.tier(), Some(Tier::IdPartial));
}

#[test]
fn equal_length_partial_ids_are_ambiguous() {
    let heroes = heroes();
    let outcome = resolve_query(&heroes, "lord_2_1");
    assert!(outcome.is_ambiguous());
    assert_eq!(outcome.tier(), Some(Tier::IdPartial));
    assert_eq!(candidate_ids(&heroes, "lord_2_1"), vec!["lord_2_11", "lord_2_12"]);
}

#[test]
fn id_match_shadows_name_match() {
    let records = vec![Entry::new("ira_1", "Someone"), Entry::new("x9", "Ira")];
    assert_eq!(found_id(&records, "ira"), Some("ira_1".into()));
}

// =============================================================================
// Name tiers
// =============================================================================

#[test]
fn exact_name_beats_substring() {
    let heroes = heroes();
    let outcome = resolve_query(&heroes, "Garios");
    assert_eq!(outcome.found().map(Record::id), Some("a1"));
    assert_eq!(outcome.tier(), Some(Tier::NameExact));
}

#[test]
fn identical_names_are_ambiguous() {
    let heroes = heroes();
    let outcome = resolve_query(&heroes, "ira");
    assert_eq!(outcome.tier(), Some(Tier::NameExact));
    assert_eq!(candidate_ids(&heroes, "ira"), vec!["lord_2_12", "wanderer_2"]);
}

#[test]
fn unique_prefix_is_found() {
    let heroes = heroes();
    let outcome = resolve_query(&heroes, "derth");
    assert_eq!(outcome.found().map(Record::id), Some("lord_1_1"));
    assert_eq!(outcome.tier(), Some(Tier::NamePrefix));
}

#[test]
fn unique_substring_is_found() {
    let heroes = heroes();
    let outcome = resolve_query(&heroes, "ucon");
    assert_eq!(outcome.found().map(Record::id), Some("b1"));
    assert_eq!(outcome.tier(), Some(Tier::NameSubstring));
}

#[test]
fn shared_substring_is_ambiguous() {
    let heroes = heroes();
    let outcome = resolve_query(&heroes, "ario");
    assert_eq!(outcome.tier(), Some(Tier::NameSubstring));
    assert_eq!(candidate_ids(&heroes, "ario"), vec!["lord_1_11", "a1"]);
}

#[test]
fn prefix_shadows_substring() {
    let records = vec![Entry::new("x1", "Pagarios"), Entry::new("x2", "Garion")];
    let outcome = resolve_query(&records, "gari");
    assert_eq!(outcome.found().map(Record::id), Some("x2"));
    assert_eq!(outcome.tier(), Some(Tier::NamePrefix));
}

#[test]
fn unicode_names_fold_case() {
    let records = vec![Entry::new("t1", "Ämberhall"), Entry::new("t2", "Émeraude")];
    assert_eq!(found_id(&records, "ämber"), Some("t1".into()));
    assert_eq!(found_id(&records, "ÉMERAUDE"), Some("t2".into()));
}

// =============================================================================
// Blank queries and absence
// =============================================================================

#[test]
fn blank_query_lists_everything() {
    let heroes = heroes();
    let outcome = resolve_query(&heroes, "   ");
    assert_eq!(outcome.tier(), Some(Tier::Everything));
    assert_eq!(outcome.candidates().len(), heroes.len());
}

#[test]
fn blank_query_on_single_record_is_found() {
    let records = vec![Entry::new("only", "One")];
    assert_eq!(found_id(&records, ""), Some("only".into()));
}

#[test]
fn blank_query_on_empty_index_is_not_found() {
    let records: Vec<Entry> = Vec::new();
    assert!(resolve_query(&records, "").is_not_found());
}

#[test]
fn unmatched_query_is_not_found() {
    let heroes = heroes();
    let outcome = resolve_query(&heroes, "zzz");
    assert!(outcome.is_not_found());
    assert_eq!(outcome.tier(), None);
    assert!(outcome.candidates().is_empty());
}

#[test]
fn empty_names_never_match_text() {
    let records = vec![Entry::new("c1", ""), Entry::new("c2", "")];
    assert!(resolve_query(&records, "x").is_not_found());
}

// =============================================================================
// Classifier and resolver as separate steps
// =============================================================================

#[test]
fn classify_then_resolve_matches_resolve_query() {
    let heroes = heroes();
    for query in ["lord_1", "ira", "ucon", "zzz", "lord_2_1"] {
        let set = classify(&heroes, query);
        assert_eq!(resolve(&set), resolve_query(&heroes, query), "query {query:?}");
    }
}

#[test]
fn classifier_groups_overlap_on_ids_only() {
    let heroes = heroes();
    let set = classify(&heroes, "lord_1_1");
    assert_eq!(set.id_exact.len(), 1);
    assert_eq!(set.id_partial.len(), 2);
    assert!(set.name_exact.is_empty());
    assert!(!set.is_empty());
}

#[test]
fn tier_ordering_follows_the_cascade() {
    let tiers = [
        Tier::Everything,
        Tier::IdExact,
        Tier::IdPartial,
        Tier::NameExact,
        Tier::NamePrefix,
        Tier::NameSubstring,
    ];
    assert!(tiers.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(Tier::NamePrefix.to_string(), "name-prefix");
}
