//! Batch input and snapshot files

use std::path::{Path, PathBuf};

use muster_console::{Catalog, Console, ConsoleConfig, run_batch, snapshot, standard_console};
use muster_foundation::{EntityKind, Entry};
use serde::Serialize;

fn console() -> Console<Catalog> {
    standard_console(Catalog::demo(), ConsoleConfig::batch()).unwrap()
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("muster_{}_{name}", std::process::id()))
}

#[test]
fn batch_runs_script() {
    let mut console = console();
    let script = "\
# rename a companion
set hero wanderer_1 name Lucon the Bold
show hero bold

show hero Ira
";
    let mut out = Vec::new();
    let mut err = Vec::new();
    let failures = run_batch(&mut console, script.as_bytes(), &mut out, &mut err).unwrap();

    let out = String::from_utf8(out).unwrap();
    let err = String::from_utf8(err).unwrap();
    assert_eq!(failures, 1);
    assert!(out.starts_with("Set name of wanderer_1 to 'Lucon the Bold' (was 'Lucon')\n"));
    assert!(out.contains("Lucon the Bold (wanderer_1)"));
    assert!(err.starts_with("line 5: Error: Found 2 heroes matching query 'Ira'"));
}

#[test]
fn save_and_load_commands() {
    let path = temp_path("save_and_load.msgpack");
    let path_text = path.display().to_string();
    let mut console = console();

    let reply = console.execute(&format!("save \"{path_text}\""));
    assert_eq!(reply.text, format!("Saved 19 records to {path_text}"));

    let _ = console.execute("tag hero lucon companion");
    assert_ne!(console.host(), &Catalog::demo());

    let reply = console.execute(&format!("load \"{path_text}\""));
    assert_eq!(reply.text, format!("Loaded 19 records from {path_text}"));
    assert_eq!(console.host(), &Catalog::demo());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn loaded_snapshot_resolves_like_the_original() {
    let path = temp_path("resolves.msgpack");
    snapshot::save_to_file(&Catalog::demo(), &path).unwrap();
    let catalog = snapshot::load_from_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let mut console = standard_console(catalog, ConsoleConfig::batch()).unwrap();
    assert!(console.run_all_tests().is_success());
}

#[test]
fn load_failure_keeps_catalog() {
    let mut console = console();
    let _ = console.execute("tag hero lucon companion");
    let before = console.host().clone();

    let reply = console.execute("load /nonexistent/muster/catalog.msgpack");
    assert!(reply.is_error());
    assert!(reply.text.starts_with("I/O error"));
    assert_eq!(console.host(), &before);
}

/// Mirrors the snapshot layout so a file can break the catalog's rules.
#[derive(Serialize)]
struct HandWritten {
    collections: Vec<HandWrittenCollection>,
}

#[derive(Serialize)]
struct HandWrittenCollection {
    kind: EntityKind,
    entries: Vec<Entry>,
}

fn write_snapshot(path: &Path, ids: &[&str]) {
    let catalog = HandWritten {
        collections: vec![HandWrittenCollection {
            kind: EntityKind::new("hero").with_plural("heroes"),
            entries: ids.iter().map(|id| Entry::new(*id, "Derthert")).collect(),
        }],
    };
    std::fs::write(path, rmp_serde::to_vec_named(&catalog).unwrap()).unwrap();
}

#[test]
fn load_rejects_duplicate_ids() {
    let path = temp_path("duplicate_ids.msgpack");
    write_snapshot(&path, &["lord_1_1", "LORD_1_1"]);
    let mut console = console();

    let reply = console.execute(&format!("load \"{}\"", path.display()));
    let _ = std::fs::remove_file(&path);

    assert!(reply.is_error());
    assert_eq!(reply.text, "hero with id 'LORD_1_1' already exists");
    assert_eq!(console.host(), &Catalog::demo());
    assert!(console.execute("show hero lord_1_1").is_ok());
}

#[test]
fn load_accepts_hand_written_snapshot() {
    let path = temp_path("hand_written.msgpack");
    write_snapshot(&path, &["lord_1_1", "lord_1_11"]);
    let mut console = console();

    let reply = console.execute(&format!("load \"{}\"", path.display()));
    let _ = std::fs::remove_file(&path);

    assert_eq!(reply.text, format!("Loaded 2 records from {}", path.display()));
    let reply = console.execute("show hero lord_1_1");
    assert_eq!(reply.text, "Derthert (lord_1_1)");
}
