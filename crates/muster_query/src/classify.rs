//! Single-pass match classification.
//!
//! Groups the records of a snapshot by how they match a query. All
//! comparisons ignore case. Groups keep index order.

use muster_foundation::record::fold_case;
use muster_foundation::{EntityIndex, Record};
use tracing::trace;

/// The classifier's output for one query.
///
/// Built fresh per query and consumed by [`resolve`](crate::resolve::resolve).
#[derive(Debug)]
pub struct MatchSet<'a, R> {
    /// The query after trimming, original case preserved.
    pub query: String,
    /// Records whose ID equals the query. At most one for a well-formed index.
    pub id_exact: Vec<&'a R>,
    /// Records whose ID contains the query (prefixes and exact IDs included).
    pub id_partial: Vec<&'a R>,
    /// Records whose name equals the query.
    pub name_exact: Vec<&'a R>,
    /// Records whose name starts with the query, minus exact matches.
    pub name_prefix: Vec<&'a R>,
    /// Records whose name contains the query, minus exact and prefix matches.
    pub name_substring: Vec<&'a R>,
}

impl<'a, R> MatchSet<'a, R> {
    fn empty(query: String) -> Self {
        Self {
            query,
            id_exact: Vec::new(),
            id_partial: Vec::new(),
            name_exact: Vec::new(),
            name_prefix: Vec::new(),
            name_substring: Vec::new(),
        }
    }

    /// Returns true if the query was empty after trimming.
    #[must_use]
    pub fn is_blank_query(&self) -> bool {
        self.query.is_empty()
    }

    /// Returns true if no group has any member.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_exact.is_empty()
            && self.id_partial.is_empty()
            && self.name_exact.is_empty()
            && self.name_prefix.is_empty()
            && self.name_substring.is_empty()
    }
}

/// Classifies every record in `records` against `query`.
///
/// Surrounding whitespace is ignored. A blank query yields empty groups; the
/// "match everything" behaviour for blank queries lives in
/// [`resolve_query`](crate::resolve::resolve_query), not here.
pub fn classify<'a, I>(records: &'a I, query: &str) -> MatchSet<'a, I::Record>
where
    I: EntityIndex + ?Sized,
{
    let query = query.trim();
    let mut set = MatchSet::empty(query.to_string());
    if query.is_empty() {
        return set;
    }

    let needle = fold_case(query);
    for record in records.records() {
        let id = fold_case(record.id());
        if id == needle {
            set.id_exact.push(record);
        }
        if id.contains(&needle) {
            set.id_partial.push(record);
        }

        let name = fold_case(record.name());
        if name == needle {
            set.name_exact.push(record);
        } else if name.starts_with(&needle) {
            set.name_prefix.push(record);
        } else if name.contains(&needle) {
            set.name_substring.push(record);
        }
    }

    trace!(
        query,
        id_exact = set.id_exact.len(),
        id_partial = set.id_partial.len(),
        name_exact = set.name_exact.len(),
        name_prefix = set.name_prefix.len(),
        name_substring = set.name_substring.len(),
        "classified query"
    );

    set
}
