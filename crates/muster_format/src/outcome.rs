//! User-facing text for resolution outcomes.
//!
//! The not-found and ambiguity phrases are matched by substring in test
//! suites and scripts, so their wording is fixed.

use muster_foundation::{EntityKind, Error, Record, Result};
use muster_query::{Ambiguity, ResolutionOutcome, Tier};

/// `No <kind> matching query '<query>' found`.
#[must_use]
pub fn not_found_message(kind: &EntityKind, query: &str) -> String {
    format!("No {} matching query '{query}' found", kind.singular())
}

/// `Found <N> <kinds> <phrase> '<query>': <list>. Please use a more specific ID.`
///
/// The phrase depends on the deciding tier. ID tiers and blank-query
/// listings name candidates by ID; name tiers as `Name (id)` so identical
/// names stay distinguishable.
#[must_use]
pub fn ambiguous_message<R: Record>(
    kind: &EntityKind,
    query: &str,
    candidates: &[&R],
    tier: Tier,
) -> String {
    let phrase = match tier.ambiguity() {
        Ambiguity::NamesStartingWith => "with names starting with",
        Ambiguity::NamesContaining => "with names containing",
        Ambiguity::Everything
        | Ambiguity::DuplicateId
        | Ambiguity::IdLengthTie
        | Ambiguity::IdenticalNames => "matching query",
    };

    let listed: Vec<String> = candidates
        .iter()
        .map(|r| {
            if tier.is_id_tier() || tier == Tier::Everything {
                r.id().to_string()
            } else {
                format!("{} ({})", r.name(), r.id())
            }
        })
        .collect();

    format!(
        "Found {} {} {phrase} '{query}': {}. Please use a more specific ID.",
        candidates.len(),
        kind.for_count(candidates.len()),
        listed.join(", ")
    )
}

/// Renders any outcome. The caller decides what a successful lookup says.
pub fn format_outcome<R, F>(
    kind: &EntityKind,
    query: &str,
    outcome: &ResolutionOutcome<'_, R>,
    on_found: F,
) -> String
where
    R: Record,
    F: FnOnce(&R) -> String,
{
    match outcome {
        ResolutionOutcome::Found { record, .. } => on_found(*record),
        ResolutionOutcome::NotFound => not_found_message(kind, query),
        ResolutionOutcome::Ambiguous { candidates, tier } => {
            ambiguous_message(kind, query, candidates, *tier)
        }
    }
}

/// Converts an outcome into the single record or an error carrying the
/// same text [`format_outcome`] would produce.
///
/// # Errors
///
/// Returns a not-found error or an ambiguity error when the outcome is not
/// a single match.
pub fn outcome_to_result<'a, R: Record>(
    kind: &EntityKind,
    query: &str,
    outcome: &ResolutionOutcome<'a, R>,
) -> Result<&'a R> {
    match outcome {
        ResolutionOutcome::Found { record, .. } => Ok(*record),
        ResolutionOutcome::NotFound => Err(Error::not_found(kind.singular(), query)),
        ResolutionOutcome::Ambiguous { candidates, tier } => Err(Error::ambiguous(
            ambiguous_message(kind, query, candidates, *tier),
        )),
    }
}
