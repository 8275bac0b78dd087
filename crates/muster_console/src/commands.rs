//! Standard commands over a [`Catalog`].

use std::fmt::Write;

use muster_foundation::{Entry, Error, Record, Result, TagMatch, TagSet};
use muster_format::{Column, Table, not_found_message};
use muster_query::{RecordQuery, SortKey};

use crate::args::Args;
use crate::catalog::{Catalog, Collection};
use crate::command::{Command, CommandRegistry};
use crate::config::ConsoleConfig;
use crate::console::Console;
use crate::harness::TestRegistry;
use crate::snapshot;
use crate::suite::standard_suite;

/// Registers `kinds`, `find`, `show`, `tag`, `untag`, `set`, `save` and
/// `load`. `help` is answered by the registry itself.
pub fn register_standard_commands(registry: &mut CommandRegistry<Catalog>, config: &ConsoleConfig) {
    let gap = config.table_gap.clone();
    registry.register(
        Command::new("kinds", move |catalog: &mut Catalog, _: &Args| Ok(kinds(catalog, &gap)))
            .with_summary("Lists record kinds and their sizes"),
    );

    let gap = config.table_gap.clone();
    registry.register(
        Command::new("find", move |catalog: &mut Catalog, args: &Args| find(catalog, args, &gap))
            .with_usage("<kind> [text] [tags=a,b] [match=all|any] [sort=index|id|name] [limit=N]")
            .with_summary("Lists records whose ID or name contains text")
            .with_min_args(1),
    );

    let gap = config.table_gap.clone();
    registry.register(
        Command::new("show", move |catalog: &mut Catalog, args: &Args| {
            let kind = arg(args, 0)?;
            let entry = catalog.resolve(kind, &args.rest(1))?;
            Ok(describe(entry, &gap))
        })
        .with_usage("<kind> <query>")
        .with_summary("Shows one record")
        .with_min_args(2),
    );

    registry.register(
        Command::new("tag", |catalog: &mut Catalog, args: &Args| {
            edit_tags(catalog, args, true)
        })
        .with_usage("<kind> <query> <tag>...")
        .with_summary("Adds tags to one record")
        .with_min_args(3),
    );

    registry.register(
        Command::new("untag", |catalog: &mut Catalog, args: &Args| {
            edit_tags(catalog, args, false)
        })
        .with_usage("<kind> <query> <tag>...")
        .with_summary("Removes tags from one record")
        .with_min_args(3),
    );

    registry.register(
        Command::new("set", set_field)
            .with_usage("<kind> <query> <field> <value>")
            .with_summary("Sets a field, or the display name when field is 'name'")
            .with_min_args(4),
    );

    registry.register(
        Command::new("save", |catalog: &mut Catalog, args: &Args| {
            let path = args.rest(0);
            snapshot::save_to_file(catalog, &path)?;
            Ok(format!("Saved {} records to {path}", catalog.record_count()))
        })
        .with_usage("<path>")
        .with_summary("Writes a snapshot")
        .with_min_args(1),
    );

    registry.register(
        Command::new("load", |catalog: &mut Catalog, args: &Args| {
            let path = args.rest(0);
            *catalog = snapshot::load_from_file(&path)?;
            Ok(format!("Loaded {} records from {path}", catalog.record_count()))
        })
        .with_usage("<path>")
        .with_summary("Replaces the catalog with a snapshot")
        .with_min_args(1),
    );
}

/// A console over `catalog` with the standard commands and test suite.
///
/// # Errors
///
/// Returns an error if the standard suite contains a duplicate test ID.
pub fn standard_console(catalog: Catalog, config: ConsoleConfig) -> Result<Console<Catalog>> {
    let mut commands = CommandRegistry::new();
    register_standard_commands(&mut commands, &config);

    let mut tests = TestRegistry::new();
    tests.register_all(standard_suite())?;

    Ok(Console::new(catalog)
        .with_config(config)
        .with_commands(commands)
        .with_tests(tests))
}

fn arg<'a>(args: &'a Args, index: usize) -> Result<&'a str> {
    args.get(index)
        .ok_or_else(|| Error::internal(format!("missing argument {index}")))
}

fn kinds(catalog: &Catalog, gap: &str) -> String {
    Table::new()
        .with_gap(gap)
        .with_column(Column::titled("Kind", |c: &Collection| {
            c.kind().singular().to_string()
        }))
        .with_column(Column::titled("Plural", |c: &Collection| {
            c.kind().plural().to_string()
        }))
        .with_column(Column::titled("Records", |c: &Collection| c.len().to_string()))
        .with_titles()
        .render(catalog.collections())
}

fn find(catalog: &Catalog, args: &Args, gap: &str) -> Result<String> {
    let collection = catalog.collection(arg(args, 0)?)?;
    let text = args.rest(1);

    let mut query = RecordQuery::new(text.as_str())
        .with_tags(TagSet::parse(args.option("tags").unwrap_or_default()))
        .with_tag_match(args.option_parsed::<TagMatch>("match")?.unwrap_or_default())
        .with_sort(args.option_parsed::<SortKey>("sort")?.unwrap_or_default());
    if let Some(limit) = args.option_parsed::<usize>("limit")? {
        query = query.with_limit(limit);
    }

    let hits = query.run(collection);
    if hits.is_empty() {
        return Err(Error::invalid_argument(not_found_message(
            collection.kind(),
            &text,
        )));
    }

    let table = Table::new()
        .with_gap(gap)
        .with_column(Column::<Entry>::id())
        .with_column(Column::<Entry>::name())
        .with_column(Column::<Entry>::tags())
        .with_titles();
    Ok(format!(
        "Found {} {}:\n{}",
        hits.len(),
        collection.kind().for_count(hits.len()),
        table.render(hits)
    ))
}

fn describe(entry: &Entry, gap: &str) -> String {
    let mut out = format!("{} ({})", entry.name(), entry.id());
    if !entry.tag_set().is_empty() {
        let _ = write!(out, "\nTags: {}", entry.tag_set());
    }

    let fields: Vec<(String, String)> = entry
        .fields()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    if !fields.is_empty() {
        let table = Table::new()
            .with_gap(gap)
            .with_column(Column::new(|f: &(String, String)| f.0.clone()))
            .with_column(Column::new(|f: &(String, String)| f.1.clone()));
        let _ = write!(out, "\n{}", table.render(&fields));
    }
    out
}

fn edit_tags(catalog: &mut Catalog, args: &Args, add: bool) -> Result<String> {
    let tags = TagSet::parse(&args.tail(2).join(" "));
    if tags.is_empty() {
        return Err(Error::invalid_argument("no tags given"));
    }

    let entry = catalog.entry_mut(arg(args, 0)?, arg(args, 1)?)?;
    let set = entry.tag_set_mut();
    let changed = tags
        .iter()
        .filter(|&tag| {
            if add {
                set.insert(tag.clone())
            } else {
                set.remove(tag.clone())
            }
        })
        .count();

    let verb = if add { "Added" } else { "Removed" };
    Ok(format!(
        "{verb} {changed} tag{} on {} ({}). Tags: {}",
        if changed == 1 { "" } else { "s" },
        entry.name(),
        entry.id(),
        if entry.tag_set().is_empty() {
            "none".to_string()
        } else {
            entry.tag_set().to_string()
        }
    ))
}

fn set_field(catalog: &mut Catalog, args: &Args) -> Result<String> {
    let field = arg(args, 2)?;
    let value = args.rest(3);
    let entry = catalog.entry_mut(arg(args, 0)?, arg(args, 1)?)?;

    let previous = if field.eq_ignore_ascii_case("name") {
        let old = entry.name().to_string();
        entry.set_name(value.as_str());
        Some(old)
    } else {
        entry.set_field(field, value.as_str())
    };

    let mut reply = format!("Set {field} of {} to '{value}'", entry.id());
    if let Some(previous) = previous {
        let _ = write!(reply, " (was '{previous}')");
    }
    Ok(reply)
}
