//! Listing query tests

use muster_foundation::{Entry, Record, TagMatch, TagSet};
use muster_query::{RecordQuery, SortKey};

fn heroes() -> Vec<Entry> {
    vec![
        Entry::new("lord_1_1", "Derthert").with_tags("lord,clan_leader,ruler"),
        Entry::new("lord_1_11", "Pagarios").with_tags("lord"),
        Entry::new("notable_1", "Garios").with_tags("notable"),
        Entry::new("wanderer_1", "Lucon").with_tags("wanderer"),
        Entry::new("wanderer_2", "Ira").with_tags("wanderer,companion"),
    ]
}

fn ids(hits: &[&Entry]) -> Vec<String> {
    hits.iter().map(|r| r.id().to_string()).collect()
}

#[test]
fn blank_text_lists_everything_in_order() {
    let heroes = heroes();
    let hits = RecordQuery::new("").run(&heroes);
    assert_eq!(hits.len(), heroes.len());
    assert_eq!(hits[0].id(), "lord_1_1");
}

#[test]
fn text_matches_ids_and_names() {
    let heroes = heroes();
    let hits = RecordQuery::new("ario").run(&heroes);
    assert_eq!(ids(&hits), vec!["lord_1_11", "notable_1"]);

    let hits = RecordQuery::new("WANDERER").run(&heroes);
    assert_eq!(ids(&hits), vec!["wanderer_1", "wanderer_2"]);
}

#[test]
fn tags_all_and_any() {
    let heroes = heroes();
    let wanted = TagSet::parse("lord,wanderer");

    let all = RecordQuery::new("").with_tags(wanted.clone()).run(&heroes);
    assert!(all.is_empty());

    let any = RecordQuery::new("")
        .with_tags(wanted)
        .with_tag_match(TagMatch::Any)
        .run(&heroes);
    assert_eq!(any.len(), 4);
}

#[test]
fn sort_and_limit() {
    let heroes = heroes();
    let hits = RecordQuery::new("")
        .with_sort(SortKey::Name)
        .with_limit(3)
        .run(&heroes);
    let names: Vec<_> = hits.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["Derthert", "Garios", "Ira"]);

    let hits = RecordQuery::new("").with_sort(SortKey::Id).run(&heroes);
    assert_eq!(hits.last().map(|r| r.id()), Some("wanderer_2"));
}

#[test]
fn limit_zero_returns_nothing() {
    let heroes = heroes();
    assert!(RecordQuery::new("").with_limit(0).run(&heroes).is_empty());
}

#[test]
fn sort_keys_parse() {
    assert_eq!("NAME".parse::<SortKey>().unwrap(), SortKey::Name);
    assert_eq!("none".parse::<SortKey>().unwrap(), SortKey::Index);
    assert!("size".parse::<SortKey>().is_err());
}

#[test]
fn query_leaves_snapshot_untouched() {
    let heroes = heroes();
    let before = heroes.clone();
    let _ = RecordQuery::new("i").with_sort(SortKey::Name).run(&heroes);
    assert_eq!(heroes, before);
}
