//! Property tests for the resolution cascade

use muster_foundation::{Entry, Record};
use muster_query::{Tier, resolve_query};
use proptest::prelude::*;

/// Records with unique IDs drawn from a small alphabet so partial matches
/// and name collisions actually happen.
fn records() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::btree_map("[a-c_1-3]{1,6}", "[A-Ca-c ]{0,5}", 1..12).prop_map(|map| {
        map.into_iter()
            .map(|(id, name)| Entry::new(id, name))
            .collect()
    })
}

proptest! {
    #[test]
    fn exact_id_is_always_found(records in records(), pick in any::<prop::sample::Index>()) {
        let target = &records[pick.index(records.len())];
        let outcome = resolve_query(&records, target.id());
        prop_assert_eq!(outcome.found().map(Record::id), Some(target.id()));
        prop_assert_eq!(outcome.tier(), Some(Tier::IdExact));
    }

    #[test]
    fn resolution_is_idempotent(records in records(), query in "[a-c_1-3 ]{0,4}") {
        prop_assert_eq!(resolve_query(&records, &query), resolve_query(&records, &query));
    }

    #[test]
    fn found_record_contains_query(records in records(), query in "[a-c_1-3]{1,3}") {
        if let Some(record) = resolve_query(&records, &query).found() {
            let needle = query.to_lowercase();
            prop_assert!(
                record.id().to_lowercase().contains(&needle)
                    || record.name().to_lowercase().contains(&needle)
            );
        }
    }

    #[test]
    fn partial_id_ambiguity_is_a_length_tie(records in records(), query in "[a-c_1-3]{1,3}") {
        let outcome = resolve_query(&records, &query);
        if outcome.is_ambiguous() && outcome.tier() == Some(Tier::IdPartial) {
            let lengths: Vec<usize> = outcome
                .candidates()
                .iter()
                .map(|r| r.id().chars().count())
                .collect();
            prop_assert!(lengths.windows(2).all(|w| w[0] == w[1]));

            let shortest = records
                .iter()
                .filter(|r| r.id().contains(&query))
                .map(|r| r.id().chars().count())
                .min();
            prop_assert_eq!(shortest, lengths.first().copied());
        }
    }

    #[test]
    fn single_partial_id_is_found(id in "[a-z]{3,8}", others in prop::collection::vec("[0-9]{2,4}", 0..5)) {
        let mut records = vec![Entry::new(id.clone(), "")];
        for (i, other) in others.iter().enumerate() {
            records.push(Entry::new(format!("{other}_{i}"), ""));
        }
        let query = &id[..2];
        prop_assert_eq!(resolve_query(&records, query).found().map(Record::id), Some(id.as_str()));
    }

    #[test]
    fn ambiguity_has_at_least_two_candidates(records in records(), query in "[a-c_1-3 ]{0,3}") {
        let outcome = resolve_query(&records, &query);
        prop_assert_eq!(outcome.is_ambiguous(), outcome.candidates().len() >= 2);
    }
}
