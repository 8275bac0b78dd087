//! The priority-tier resolution cascade.
//!
//! Resolution order:
//! 1. Exact ID
//! 2. Partial ID (shortest ID wins; a tie on length is ambiguous)
//! 3. Exact name
//! 4. Name prefix
//! 5. Name substring
//!
//! The first tier with any candidate decides the outcome. Resolution never
//! fails: absence is [`ResolutionOutcome::NotFound`], multiplicity is
//! [`ResolutionOutcome::Ambiguous`].

use std::fmt;

use muster_foundation::{EntityIndex, Record};
use tracing::debug;

use crate::classify::{MatchSet, classify};

/// One ranked stage of the cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// A blank query selects the whole snapshot.
    Everything,
    /// ID equals the query.
    IdExact,
    /// ID contains the query.
    IdPartial,
    /// Name equals the query.
    NameExact,
    /// Name starts with the query.
    NamePrefix,
    /// Name contains the query.
    NameSubstring,
}

impl Tier {
    /// Why candidates surviving this tier could not be told apart.
    #[must_use]
    pub const fn ambiguity(self) -> Ambiguity {
        match self {
            Self::Everything => Ambiguity::Everything,
            Self::IdExact => Ambiguity::DuplicateId,
            Self::IdPartial => Ambiguity::IdLengthTie,
            Self::NameExact => Ambiguity::IdenticalNames,
            Self::NamePrefix => Ambiguity::NamesStartingWith,
            Self::NameSubstring => Ambiguity::NamesContaining,
        }
    }

    /// Returns true for the tiers that match on IDs.
    #[must_use]
    pub const fn is_id_tier(self) -> bool {
        matches!(self, Self::IdExact | Self::IdPartial)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Everything => "everything",
            Self::IdExact => "id-exact",
            Self::IdPartial => "id-partial",
            Self::NameExact => "name-exact",
            Self::NamePrefix => "name-prefix",
            Self::NameSubstring => "name-substring",
        };
        f.write_str(s)
    }
}

/// The reason an outcome is ambiguous.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ambiguity {
    /// A blank query over more than one record.
    Everything,
    /// Two records share an ID. The host broke the uniqueness contract.
    DuplicateId,
    /// Several partial ID matches share the shortest length.
    IdLengthTie,
    /// Several records have the queried name.
    IdenticalNames,
    /// Several names start with the query.
    NamesStartingWith,
    /// Several names contain the query.
    NamesContaining,
}

/// Result of resolving a query.
#[derive(Debug, PartialEq)]
pub enum ResolutionOutcome<'a, R> {
    /// Exactly one record survived the first non-empty tier.
    Found {
        /// The record.
        record: &'a R,
        /// The tier that selected it.
        tier: Tier,
    },
    /// No tier had a candidate.
    NotFound,
    /// Several records survived the first non-empty tier.
    Ambiguous {
        /// Surviving candidates in index order.
        candidates: Vec<&'a R>,
        /// The tier that produced them.
        tier: Tier,
    },
}

impl<R> Clone for ResolutionOutcome<'_, R> {
    fn clone(&self) -> Self {
        match self {
            Self::Found { record, tier } => Self::Found {
                record: *record,
                tier: *tier,
            },
            Self::NotFound => Self::NotFound,
            Self::Ambiguous { candidates, tier } => Self::Ambiguous {
                candidates: candidates.clone(),
                tier: *tier,
            },
        }
    }
}

impl<'a, R> ResolutionOutcome<'a, R> {
    /// Returns the record if exactly one was found.
    #[must_use]
    pub fn found(&self) -> Option<&'a R> {
        match self {
            Self::Found { record, .. } => Some(*record),
            _ => None,
        }
    }

    /// Returns true for [`ResolutionOutcome::Found`].
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Returns true for [`ResolutionOutcome::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns true for [`ResolutionOutcome::Ambiguous`].
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }

    /// The ambiguous candidates; empty for other outcomes.
    #[must_use]
    pub fn candidates(&self) -> &[&'a R] {
        match self {
            Self::Ambiguous { candidates, .. } => candidates,
            _ => &[],
        }
    }

    /// The deciding tier, if any tier decided.
    #[must_use]
    pub fn tier(&self) -> Option<Tier> {
        match self {
            Self::Found { tier, .. } | Self::Ambiguous { tier, .. } => Some(*tier),
            Self::NotFound => None,
        }
    }
}

/// Applies the tier cascade to a classified match set.
pub fn resolve<'a, R: Record>(set: &MatchSet<'a, R>) -> ResolutionOutcome<'a, R> {
    let outcome = cascade(set);
    debug!(
        query = %set.query,
        tier = ?outcome.tier(),
        found = ?outcome.found().map(Record::id),
        candidates = outcome.candidates().len(),
        "resolved query"
    );
    outcome
}

fn cascade<'a, R: Record>(set: &MatchSet<'a, R>) -> ResolutionOutcome<'a, R> {
    if !set.id_exact.is_empty() {
        return single_or_ambiguous(&set.id_exact, Tier::IdExact);
    }

    if !set.id_partial.is_empty() {
        return shortest_id(&set.id_partial);
    }

    for (group, tier) in [
        (&set.name_exact, Tier::NameExact),
        (&set.name_prefix, Tier::NamePrefix),
        (&set.name_substring, Tier::NameSubstring),
    ] {
        if !group.is_empty() {
            return single_or_ambiguous(group, tier);
        }
    }

    ResolutionOutcome::NotFound
}

fn single_or_ambiguous<'a, R>(group: &[&'a R], tier: Tier) -> ResolutionOutcome<'a, R> {
    match *group {
        [] => ResolutionOutcome::NotFound,
        [record] => ResolutionOutcome::Found { record, tier },
        _ => ResolutionOutcome::Ambiguous {
            candidates: group.to_vec(),
            tier,
        },
    }
}

/// Shorter IDs are taken to be the less specific, canonical ones
/// (`lord_1_1` over `lord_1_11`). Only the shortest survive; a tie among
/// them is ambiguous rather than settled arbitrarily.
fn shortest_id<'a, R: Record>(group: &[&'a R]) -> ResolutionOutcome<'a, R> {
    let id_len = |r: &&R| r.id().chars().count();
    let Some(shortest) = group.iter().map(id_len).min() else {
        return ResolutionOutcome::NotFound;
    };

    let survivors: Vec<&'a R> = group
        .iter()
        .filter(|r| id_len(*r) == shortest)
        .copied()
        .collect();

    single_or_ambiguous(&survivors, Tier::IdPartial)
}

/// Classifies and resolves `query` against `records`.
///
/// A blank query selects everything: an empty index is `NotFound`, a single
/// record is `Found`, more are `Ambiguous` under [`Tier::Everything`].
pub fn resolve_query<'a, I>(records: &'a I, query: &str) -> ResolutionOutcome<'a, I::Record>
where
    I: EntityIndex + ?Sized,
{
    let set = classify(records, query);
    if set.is_blank_query() {
        let all: Vec<_> = records.records().collect();
        debug!(records = all.len(), "blank query selects everything");
        return single_or_ambiguous(&all, Tier::Everything);
    }
    resolve(&set)
}
