//! Integration tests for records, entries, and entity indexes

use muster_foundation::{EntityIndex, EntityKind, Entry, Record, TagSet};

// =============================================================================
// Entry
// =============================================================================

#[test]
fn entry_builder() {
    let hero = Entry::new("lord_1_1", "Derthert")
        .with_tags("lord, ruler")
        .with_tag("Clan_Leader")
        .with_field("gold", "15000");

    assert_eq!(hero.id(), "lord_1_1");
    assert_eq!(hero.name(), "Derthert");
    assert_eq!(hero.tag_set().to_string(), "clan_leader,lord,ruler");
    assert_eq!(hero.field("gold"), Some("15000"));
    assert_eq!(hero.field("age"), None);
    assert_eq!(hero.tags(), Some(hero.tag_set()));
}

#[test]
fn entry_mutation() {
    let mut hero = Entry::new("wanderer_1", "Lucon");
    assert_eq!(hero.set_field("skill", "scouting"), None);
    assert_eq!(hero.set_field("skill", "riding").as_deref(), Some("scouting"));
    hero.set_name("Lucon the Bold");
    hero.tag_set_mut().insert("companion");

    assert_eq!(hero.name(), "Lucon the Bold");
    assert!(hero.tag_set().contains("COMPANION"));
    assert_eq!(hero.fields().collect::<Vec<_>>(), vec![("skill", "riding")]);
}

#[test]
fn entry_clone_is_independent() {
    let original = Entry::new("b1", "Lucon").with_field("skill", "scouting");
    let mut copy = original.clone();
    copy.set_field("skill", "medicine");

    assert_eq!(original.field("skill"), Some("scouting"));
    assert_eq!(copy.field("skill"), Some("medicine"));
}

// =============================================================================
// Record
// =============================================================================

struct Settlement {
    id: &'static str,
    name: &'static str,
}

impl Record for Settlement {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[test]
fn plain_records_have_no_tags() {
    let town = Settlement {
        id: "town_V1",
        name: "Pravend",
    };
    assert!(town.tags().is_none());
}

// =============================================================================
// EntityIndex
// =============================================================================

#[test]
fn slice_index() {
    let towns = [
        Settlement {
            id: "town_V1",
            name: "Pravend",
        },
        Settlement {
            id: "town_ES1",
            name: "Lageta",
        },
    ];
    let index: &[Settlement] = &towns;

    assert_eq!(EntityIndex::len(index), 2);
    assert!(!EntityIndex::is_empty(index));
    assert_eq!(index.find_by_id("TOWN_es1").map(Record::name), Some("Lageta"));
    assert!(index.find_by_id("town").is_none());
}

#[test]
fn persistent_vector_index() {
    let mut heroes = im::Vector::new();
    heroes.push_back(Entry::new("lord_1_1", "Derthert"));
    heroes.push_back(Entry::new("lord_1_11", "Pagarios"));

    let names: Vec<_> = heroes.records().map(Record::name).collect();
    assert_eq!(names, vec!["Derthert", "Pagarios"]);
    assert_eq!(heroes.find_by_id("Lord_1_11").map(Record::name), Some("Pagarios"));
}

#[test]
fn empty_vec_index() {
    let heroes: Vec<Entry> = Vec::new();
    assert!(EntityIndex::is_empty(&heroes));
    assert!(heroes.find_by_id("anything").is_none());
}

// =============================================================================
// EntityKind
// =============================================================================

#[test]
fn kind_names() {
    let hero = EntityKind::new("hero").with_plural("heroes");
    assert_eq!(hero.for_count(1), "hero");
    assert_eq!(hero.for_count(2), "heroes");
    assert!(hero.answers_to("HEROES"));
    assert!(hero.answers_to("Hero"));
    assert!(!hero.answers_to("heros"));

    let clan = EntityKind::new("clan");
    assert_eq!(clan.plural(), "clans");
    assert_eq!(clan.to_string(), "clan");
}

#[test]
fn tag_sets_compare_by_content() {
    let a = TagSet::parse("lord ruler");
    let b: TagSet = ["RULER", "Lord"].into_iter().collect();
    assert_eq!(a, b);
}
