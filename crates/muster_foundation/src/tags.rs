//! Open-vocabulary categorization tags.
//!
//! A [`TagSet`] replaces fixed-width flag enums: any string can be a tag, and
//! the all/any predicates are plain subset and intersection tests.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single tag. Stored lowercased so comparison ignores case.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tag(Arc<str>);

impl Tag {
    /// Creates a tag, folding it to lowercase and trimming whitespace.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name.trim().to_lowercase()))
    }

    /// Returns the tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// How a required tag set is matched against a record's tags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TagMatch {
    /// The record must carry every required tag.
    #[default]
    All,
    /// The record must carry at least one required tag.
    Any,
}

impl FromStr for TagMatch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "any" => Ok(Self::Any),
            other => Err(Error::invalid_argument(format!(
                "invalid tag match mode '{other}' (expected 'all' or 'any')"
            ))),
        }
    }
}

impl fmt::Display for TagMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Any => f.write_str("any"),
        }
    }
}

/// A persistent, ordered set of tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TagSet(im::OrdSet<Tag>);

impl TagSet {
    /// Creates an empty tag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a tag list separated by commas and/or whitespace.
    ///
    /// Empty segments are skipped, so `"lord,, wanderer "` yields two tags.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        list.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(Tag::new)
            .collect()
    }

    /// Returns the number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds a tag. Returns true if it was not already present.
    pub fn insert(&mut self, tag: impl Into<Tag>) -> bool {
        self.0.insert(tag.into()).is_none()
    }

    /// Removes a tag. Returns true if it was present.
    pub fn remove(&mut self, tag: impl Into<Tag>) -> bool {
        self.0.remove(&tag.into()).is_some()
    }

    /// Returns a copy of this set with the tag added.
    #[must_use]
    pub fn with(&self, tag: impl Into<Tag>) -> Self {
        Self(self.0.update(tag.into()))
    }

    /// Returns true if the tag is present.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(&Tag::new(tag))
    }

    /// Returns true if every tag in `required` is present.
    ///
    /// Vacuously true for an empty requirement.
    #[must_use]
    pub fn has_all(&self, required: &TagSet) -> bool {
        required.0.is_subset(&self.0)
    }

    /// Returns true if at least one tag in `wanted` is present.
    ///
    /// False for an empty `wanted` set.
    #[must_use]
    pub fn has_any(&self, wanted: &TagSet) -> bool {
        wanted.0.iter().any(|t| self.0.contains(t))
    }

    /// Filter predicate: an empty requirement always matches.
    #[must_use]
    pub fn matches(&self, required: &TagSet, mode: TagMatch) -> bool {
        if required.is_empty() {
            return true;
        }
        match mode {
            TagMatch::All => self.has_all(required),
            TagMatch::Any => self.has_any(required),
        }
    }

    /// Iterates tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<T: IntoIterator<Item = Tag>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        iter.into_iter().map(Tag::new).collect()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}
