//! The built-in test suite.
//!
//! Every case is written against [`Catalog::demo`]. Cases that change the
//! catalog put it back before returning so the suite can run in any order
//! and more than once.

use muster_foundation::Record;

use crate::catalog::Catalog;
use crate::command::CommandRegistry;
use crate::harness::{Expectation, TestCase};
use crate::snapshot;

type Check = std::result::Result<(), String>;

fn ok(commands: &CommandRegistry<Catalog>, catalog: &mut Catalog, line: &str) -> Check {
    let reply = commands.execute(catalog, line);
    if reply.is_ok() {
        Ok(())
    } else {
        Err(format!("'{line}' failed: {reply}"))
    }
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Check {
    if condition { Ok(()) } else { Err(message()) }
}

fn expect(id: &str, category: &str, line: &str, expectation: Expectation) -> TestCase<Catalog> {
    TestCase::command(id, category, line, expectation)
}

fn success_containing(text: &str) -> Expectation {
    Expectation::SuccessContaining(text.to_string())
}

fn failure_containing(text: &str) -> Expectation {
    Expectation::FailureContaining(text.to_string())
}

/// The standard cases for the standard commands.
#[must_use]
pub fn standard_suite() -> Vec<TestCase<Catalog>> {
    let mut suite = resolve_cases();
    suite.extend(find_cases());
    suite.extend(error_cases());
    suite.extend(mutation_cases());
    suite.push(
        TestCase::custom("snapshot.roundtrip", "snapshot", |catalog: &mut Catalog, _| {
            let bytes = snapshot::to_bytes(catalog).map_err(|e| e.to_string())?;
            let restored = snapshot::from_bytes(&bytes).map_err(|e| e.to_string())?;
            ensure(restored == *catalog, || {
                "restored catalog differs from the original".to_string()
            })
        })
        .with_description("catalog survives a MessagePack round trip"),
    );
    suite
}

fn resolve_cases() -> Vec<TestCase<Catalog>> {
    vec![
        expect(
            "resolve.id_exact",
            "resolve",
            "show hero lord_1_1",
            success_containing("Derthert (lord_1_1)"),
        ),
        expect(
            "resolve.id_case",
            "resolve",
            "show hero LORD_1_11",
            success_containing("Pagarios (lord_1_11)"),
        ),
        expect(
            "resolve.id_shortest",
            "resolve",
            "show hero lord_1",
            success_containing("Derthert (lord_1_1)"),
        ),
        expect(
            "resolve.id_shortest_exact_kingdom",
            "resolve",
            "show kingdom empire",
            success_containing("Northern Empire (empire)"),
        ),
        expect(
            "resolve.id_tie",
            "resolve",
            "show hero lord_2_1",
            failure_containing(
                "Found 2 heroes matching query 'lord_2_1': lord_2_11, lord_2_12. \
                 Please use a more specific ID.",
            ),
        ),
        expect(
            "resolve.id_tie_kingdom",
            "resolve",
            "show kingdom empire_",
            failure_containing("Found 2 kingdoms matching query 'empire_': empire_s, empire_w"),
        ),
        expect(
            "resolve.name_exact",
            "resolve",
            "show hero Garios",
            success_containing("Garios (notable_1)"),
        ),
        expect(
            "resolve.name_case",
            "resolve",
            "show hero DERTHERT",
            success_containing("Derthert (lord_1_1)"),
        ),
        expect(
            "resolve.identical_names",
            "resolve",
            "show hero Ira",
            failure_containing(
                "Found 2 heroes matching query 'Ira': Ira (lord_2_12), Ira (wanderer_2)",
            ),
        ),
        expect(
            "resolve.name_prefix",
            "resolve",
            "show clan Sea",
            success_containing("Sea Raiders (clan_bandit_1)"),
        ),
        expect(
            "resolve.name_prefix_ambiguous",
            "resolve",
            "show settlement Prav",
            failure_containing(
                "Found 2 settlements with names starting with 'Prav': \
                 Pravend (town_V1), Pravend Keep (castle_V2)",
            ),
        ),
        expect(
            "resolve.name_substring",
            "resolve",
            "show hero ucon",
            success_containing("Lucon (wanderer_1)"),
        ),
        expect(
            "resolve.name_substring_ambiguous",
            "resolve",
            "show kingdom ern",
            failure_containing(
                "Found 3 kingdoms with names containing 'ern': Northern Empire (empire), \
                 Southern Empire (empire_s), Western Empire (empire_w)",
            ),
        ),
        expect(
            "resolve.multi_word",
            "resolve",
            "show settlement Ocs Hall",
            success_containing("Ocs Hall (castle_V1)"),
        ),
        expect(
            "resolve.blank_lists_everything",
            "resolve",
            "show kingdom \"\"",
            failure_containing(
                "Found 4 kingdoms matching query '': vlandia, empire, empire_s, empire_w",
            ),
        ),
        expect(
            "resolve.not_found",
            "resolve",
            "show hero zzz",
            failure_containing("No hero matching query 'zzz' found"),
        ),
    ]
}

fn find_cases() -> Vec<TestCase<Catalog>> {
    vec![
        expect("find.all", "find", "find heroes", success_containing("Found 7 heroes:")),
        expect("find.text", "find", "find hero ira", success_containing("Found 2 heroes:")),
        expect(
            "find.tags_all",
            "find",
            "find hero tags=lord,ruler",
            success_containing("Found 2 heroes:"),
        ),
        expect(
            "find.tags_any",
            "find",
            "find hero tags=notable,wanderer match=any",
            success_containing("Found 3 heroes:"),
        ),
        expect(
            "find.tags_exclude",
            "find",
            "find clan tags=noble",
            Expectation::NotContains("Sea Raiders".to_string()),
        ),
        expect(
            "find.limit",
            "find",
            "find hero lord sort=name limit=1",
            success_containing("Found 1 hero:\nID        Name"),
        ),
        expect(
            "find.none",
            "find",
            "find clan zzz",
            failure_containing("No clan matching query 'zzz' found"),
        ),
        expect(
            "find.bad_limit",
            "find",
            "find hero limit=ten",
            failure_containing("invalid value for 'limit'"),
        ),
        expect(
            "find.bad_match",
            "find",
            "find hero tags=lord match=some",
            Expectation::Failure,
        ),
        expect("find.kinds", "find", "kinds", success_containing("settlement")),
    ]
}

fn error_cases() -> Vec<TestCase<Catalog>> {
    vec![
        expect(
            "errors.unknown_command",
            "errors",
            "frobnicate",
            failure_containing("unknown command 'frobnicate'"),
        ),
        expect(
            "errors.unknown_kind",
            "errors",
            "find dragon",
            failure_containing("unknown record kind 'dragon'"),
        ),
        expect(
            "errors.usage",
            "errors",
            "show hero",
            failure_containing("usage: show <kind> <query>"),
        ),
        expect(
            "errors.help",
            "errors",
            "help tag",
            success_containing("usage: tag <kind> <query> <tag>..."),
        ),
        expect(
            "errors.load_missing",
            "errors",
            "load /nonexistent/muster/catalog.msgpack",
            failure_containing("I/O error"),
        ),
    ]
}

fn mutation_cases() -> Vec<TestCase<Catalog>> {
    vec![
        TestCase::custom("mutate.tag_untag", "mutate", |catalog: &mut Catalog, commands| {
            ok(commands, catalog, "tag hero Lucon companion")?;
            let tagged = catalog
                .resolve("hero", "wanderer_1")
                .map_err(|e| e.to_string())?
                .tag_set()
                .contains("companion");
            ok(commands, catalog, "untag hero wanderer_1 companion")?;
            ensure(tagged, || "tag did not add 'companion'".to_string())?;
            let still = catalog
                .resolve("hero", "wanderer_1")
                .map_err(|e| e.to_string())?
                .tag_set()
                .contains("companion");
            ensure(!still, || "untag did not remove 'companion'".to_string())
        })
        .with_description("tag then untag leaves the hero unchanged"),
        TestCase::custom("mutate.set_field", "mutate", |catalog: &mut Catalog, commands| {
            let old = catalog
                .resolve("hero", "lord_1_1")
                .map_err(|e| e.to_string())?
                .field("gold")
                .unwrap_or_default()
                .to_string();
            ok(commands, catalog, "set hero lord_1_1 gold 99")?;
            let now = catalog
                .resolve("hero", "lord_1_1")
                .map_err(|e| e.to_string())?
                .field("gold")
                .map(str::to_string);
            ok(commands, catalog, &format!("set hero lord_1_1 gold {old}"))?;
            ensure(now.as_deref() == Some("99"), || {
                format!("gold is {now:?} after set, expected \"99\"")
            })
        })
        .with_description("set writes a field and can restore it"),
        TestCase::custom("mutate.rename", "mutate", |catalog: &mut Catalog, commands| {
            ok(commands, catalog, "set hero wanderer_1 name \"Lucon the Bold\"")?;
            let reply = commands.execute(catalog, "show hero bold");
            ok(commands, catalog, "set hero wanderer_1 name Lucon")?;
            ensure(reply.is_ok() && reply.text.starts_with("Lucon the Bold"), || {
                format!("renamed hero not found by new name: {reply}")
            })
        })
        .with_description("renamed records resolve by their new name"),
        TestCase::custom(
            "mutate.ambiguous_refused",
            "mutate",
            |catalog: &mut Catalog, commands| {
                let reply = commands.execute(catalog, "tag hero Ira healer");
                ensure(reply.is_error(), || format!("ambiguous tag succeeded: {reply}"))?;
                let touched = catalog
                    .collection("hero")
                    .map_err(|e| e.to_string())?
                    .entries()
                    .iter()
                    .filter(|e| e.tag_set().contains("healer"))
                    .map(|e| e.id().to_string())
                    .collect::<Vec<_>>();
                ensure(touched.is_empty(), || {
                    format!("ambiguous tag changed {}", touched.join(", "))
                })
            },
        )
        .with_description("an ambiguous query never mutates"),
    ]
}
