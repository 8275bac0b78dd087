//! The record abstraction every lookup operates on.
//!
//! A record is anything with a unique ID and a display name. Records are
//! owned by the host; lookup code only ever reads them through a snapshot.

use crate::tags::TagSet;

/// A named, uniquely identified entity.
///
/// IDs are unique within their collection and compared case-insensitively.
/// Names are not unique and may be empty.
pub trait Record {
    /// The unique identifier.
    fn id(&self) -> &str;

    /// The display name.
    fn name(&self) -> &str;

    /// Categorization tags, if this record type carries any.
    fn tags(&self) -> Option<&TagSet> {
        None
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn tags(&self) -> Option<&TagSet> {
        (**self).tags()
    }
}

/// Folds a string for case-insensitive comparison.
#[must_use]
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// A read-only, point-in-time view over a collection of records.
pub trait EntityIndex {
    /// The record type held by this index.
    type Record: Record;

    /// Iterates the records in index order.
    fn records(&self) -> impl Iterator<Item = &Self::Record>;

    /// Returns the number of records.
    fn len(&self) -> usize {
        self.records().count()
    }

    /// Returns true if the index holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds a record by ID, ignoring case.
    fn find_by_id(&self, id: &str) -> Option<&Self::Record> {
        let folded = fold_case(id);
        self.records().find(|r| fold_case(r.id()) == folded)
    }
}

impl<R: Record> EntityIndex for [R] {
    type Record = R;

    fn records(&self) -> impl Iterator<Item = &R> {
        self.iter()
    }

    fn len(&self) -> usize {
        <[R]>::len(self)
    }
}

impl<R: Record> EntityIndex for Vec<R> {
    type Record = R;

    fn records(&self) -> impl Iterator<Item = &R> {
        self.iter()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<R: Record + Clone> EntityIndex for im::Vector<R> {
    type Record = R;

    fn records(&self) -> impl Iterator<Item = &R> {
        self.iter()
    }

    fn len(&self) -> usize {
        im::Vector::len(self)
    }
}
