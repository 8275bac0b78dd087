//! A standard console over the demo catalog

use muster_console::{Catalog, Console, ConsoleConfig, standard_console};

fn console() -> Console<Catalog> {
    standard_console(Catalog::demo(), ConsoleConfig::batch()).unwrap()
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn show_by_exact_id() {
    let mut console = console();
    let reply = console.execute("show kingdom vlandia");
    assert!(reply.is_ok());
    assert_eq!(reply.text, "Vlandia (vlandia)\nruler  lord_1_1");
}

#[test]
fn show_prefers_shortest_id() {
    let mut console = console();
    let reply = console.execute("show kingdom empire");
    assert!(reply.text.starts_with("Northern Empire (empire)"));

    let reply = console.execute("show hero lord_1");
    assert!(reply.text.starts_with("Derthert (lord_1_1)"));
}

#[test]
fn show_reports_each_ambiguity_phrase() {
    let mut console = console();
    let cases = [
        (
            "show hero lord_2_1",
            "Found 2 heroes matching query 'lord_2_1': lord_2_11, lord_2_12. Please use a more specific ID.",
        ),
        (
            "show hero Ira",
            "Found 2 heroes matching query 'Ira': Ira (lord_2_12), Ira (wanderer_2). Please use a more specific ID.",
        ),
        (
            "show settlement Prav",
            "Found 2 settlements with names starting with 'Prav': Pravend (town_V1), Pravend Keep (castle_V2). Please use a more specific ID.",
        ),
    ];
    for (line, expected) in cases {
        let reply = console.execute(line);
        assert!(reply.is_error(), "{line}");
        assert_eq!(reply.text, expected, "{line}");
        assert_eq!(reply.to_string(), format!("Error: {expected}"));
    }
}

#[test]
fn show_multi_word_query() {
    let mut console = console();
    let reply = console.execute("show settlement Ocs Hall");
    assert!(reply.text.starts_with("Ocs Hall (castle_V1)"));

    let reply = console.execute("show settlement \"Pravend Keep\"");
    assert!(reply.text.starts_with("Pravend Keep (castle_V2)"));
}

#[test]
fn show_unknown_record_and_kind() {
    let mut console = console();
    let reply = console.execute("show hero zzz");
    assert_eq!(reply.text, "No hero matching query 'zzz' found");

    let reply = console.execute("show dragon smaug");
    assert!(reply.is_error());
    assert!(reply.text.starts_with("unknown record kind 'dragon'"));
}

#[test]
fn plural_kind_names_are_accepted() {
    let mut console = console();
    let reply = console.execute("show heroes lucon");
    assert!(reply.text.starts_with("Lucon (wanderer_1)"));
}

// =============================================================================
// Listing
// =============================================================================

#[test]
fn find_with_tags() {
    let mut console = console();
    let reply = console.execute("find hero tags=ruler");
    assert!(reply.is_ok());
    assert!(reply.text.starts_with("Found 2 heroes:\nID"));
    assert!(reply.text.contains("lord_1_1"));
    assert!(reply.text.contains("lord_2_11"));
}

#[test]
fn find_rejects_bad_options() {
    let mut console = console();
    assert!(console.execute("find hero limit=many").is_error());
    assert!(console.execute("find hero match=some").is_error());
    assert!(console.execute("find hero sort=size").is_error());
}

#[test]
fn kinds_lists_demo_sizes() {
    let mut console = console();
    let reply = console.execute("kinds");
    assert!(reply.text.contains("hero"));
    assert!(reply.text.contains("settlements"));
}

// =============================================================================
// Editing
// =============================================================================

#[test]
fn edits_are_visible_to_later_lookups() {
    let mut console = console();
    assert!(console.execute("tag hero lucon companion").is_ok());
    assert!(console.execute("set hero lucon name Lucon the Bold").is_ok());

    let reply = console.execute("show hero bold");
    assert!(reply.text.starts_with("Lucon the Bold (wanderer_1)\nTags: companion,wanderer"));

    let reply = console.execute("find hero tags=companion");
    assert!(reply.text.starts_with("Found 1 hero:"));
}

#[test]
fn ambiguous_edit_changes_nothing() {
    let mut console = console();
    assert!(console.execute("tag hero Ira companion").is_error());
    assert_eq!(console.host(), &Catalog::demo());
}

// =============================================================================
// Help and dispatch
// =============================================================================

#[test]
fn help_lists_commands_and_tests() {
    let mut console = console();
    let reply = console.execute("help");
    assert!(reply.text.starts_with("Commands:\n"));
    assert!(reply.text.contains("show <kind> <query>"));
    assert!(reply.text.ends_with("tests list [category] | run [category] | run-one <id> | last | clear"));

    let reply = console.execute("help show");
    assert_eq!(reply.text, "usage: show <kind> <query>\nShows one record");
}

#[test]
fn command_names_ignore_case() {
    let mut console = console();
    assert!(console.execute("SHOW hero lord_1_1").is_ok());
}

#[test]
fn unknown_and_short_commands() {
    let mut console = console();
    let reply = console.execute("frobnicate");
    assert_eq!(
        reply.text,
        "unknown command 'frobnicate'. Type 'help' for a list of commands"
    );

    let reply = console.execute("show hero");
    assert_eq!(reply.text, "usage: show <kind> <query>");
}

#[test]
fn completions_include_builtins() {
    let console = console();
    let words = console.completions();
    for word in ["find", "show", "help", "tests"] {
        assert!(words.iter().any(|w| w == word), "{word}");
    }
}

// =============================================================================
// Built-in tests
// =============================================================================

#[test]
fn standard_suite_passes_on_demo() {
    let mut console = console();
    let report = console.run_all_tests();
    assert!(report.is_success(), "{}", report.summary());
    assert!(report.total() > 30);
    assert_eq!(console.host(), &Catalog::demo());
}

#[test]
fn tests_subcommands() {
    let mut console = console();

    let reply = console.execute("tests last");
    assert_eq!(reply.text, "no test results yet");

    let reply = console.execute("tests list snapshot");
    assert!(reply.text.starts_with("1 tests:\nID"));

    let reply = console.execute("tests run resolve");
    assert!(reply.is_ok());
    assert!(reply.text.starts_with("Passed: "));

    let reply = console.execute("tests run-one snapshot.roundtrip");
    assert_eq!(reply.text, "Passed: 1, Failed: 0, Total: 1");
    assert_eq!(console.execute("tests last").text, reply.text);

    assert!(console.execute("tests clear").is_ok());
    assert!(console.execute("tests last").is_error());

    assert!(console.execute("tests run-one nope").is_error());
    assert!(console.execute("tests run nope").is_error());
    assert!(console.execute("tests bogus").is_error());
}
