//! Listing queries.
//!
//! Where [`resolve_query`](crate::resolve::resolve_query) picks one record,
//! a [`RecordQuery`] lists every record whose ID or name contains some text
//! and whose tags satisfy a requirement.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use muster_foundation::record::fold_case;
use muster_foundation::{EntityIndex, Error, Record, Result, TagMatch, TagSet};
use tracing::debug;

/// Ordering applied to listing results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Snapshot order.
    #[default]
    Index,
    /// By ID, ignoring case.
    Id,
    /// By name, ignoring case, then by ID.
    Name,
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "index" | "none" => Ok(Self::Index),
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            other => Err(Error::invalid_argument(format!(
                "invalid sort key '{other}' (expected 'index', 'id' or 'name')"
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => f.write_str("index"),
            Self::Id => f.write_str("id"),
            Self::Name => f.write_str("name"),
        }
    }
}

/// A listing query over a snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordQuery {
    /// Text that must appear in the ID or name. Blank matches everything.
    pub text: String,
    /// Required tags.
    pub tags: TagSet,
    /// How `tags` is matched.
    pub tag_match: TagMatch,
    /// Result ordering.
    pub sort: SortKey,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

impl RecordQuery {
    /// Creates a query matching `text` with no tag requirement.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the required tags.
    #[must_use]
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the tag match mode.
    #[must_use]
    pub fn with_tag_match(mut self, mode: TagMatch) -> Self {
        self.tag_match = mode;
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the result limit.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if `record` satisfies the text and tag filters.
    ///
    /// Records without tags only pass an empty tag requirement.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        let needle = fold_case(self.text.trim());
        self.matches_folded(record, &needle)
    }

    fn matches_folded<R: Record + ?Sized>(&self, record: &R, needle: &str) -> bool {
        let text_ok = needle.is_empty()
            || fold_case(record.id()).contains(needle)
            || fold_case(record.name()).contains(needle);
        if !text_ok {
            return false;
        }
        match record.tags() {
            Some(tags) => tags.matches(&self.tags, self.tag_match),
            None => self.tags.is_empty(),
        }
    }

    /// Runs the query. The snapshot is never modified.
    pub fn run<'a, I>(&self, records: &'a I) -> Vec<&'a I::Record>
    where
        I: EntityIndex + ?Sized,
    {
        let needle = fold_case(self.text.trim());
        let mut hits: Vec<_> = records
            .records()
            .filter(|r| self.matches_folded(*r, &needle))
            .collect();

        match self.sort {
            SortKey::Index => {}
            SortKey::Id => hits.sort_by_key(|r| fold_case(r.id())),
            SortKey::Name => hits.sort_by(|a, b| by_name(*a, *b)),
        }

        if let Some(limit) = self.limit {
            hits.truncate(limit);
        }

        debug!(
            text = %self.text,
            tags = %self.tags,
            mode = %self.tag_match,
            hits = hits.len(),
            "ran record query"
        );
        hits
    }
}

fn by_name<R: Record>(a: &R, b: &R) -> Ordering {
    fold_case(a.name())
        .cmp(&fold_case(b.name()))
        .then_with(|| fold_case(a.id()).cmp(&fold_case(b.id())))
}
