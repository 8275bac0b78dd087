//! The concrete record type stored by the console host.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::tags::{Tag, TagSet};

/// A record with free-form fields.
///
/// Fields are kept in a persistent ordered map so cloning a collection of
/// entries for a snapshot is cheap.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entry {
    id: String,
    name: String,
    tags: TagSet,
    fields: im::OrdMap<String, String>,
}

impl Entry {
    /// Creates an entry with no tags or fields.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tags: TagSet::new(),
            fields: im::OrdMap::new(),
        }
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Adds every tag in a comma/space separated list.
    #[must_use]
    pub fn with_tags(mut self, list: &str) -> Self {
        for tag in TagSet::parse(list).iter() {
            self.tags.insert(tag.clone());
        }
        self
    }

    /// Sets a field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Returns the tag set.
    #[must_use]
    pub fn tag_set(&self) -> &TagSet {
        &self.tags
    }

    /// Returns the tag set for mutation.
    pub fn tag_set_mut(&mut self) -> &mut TagSet {
        &mut self.tags
    }

    /// Returns a field value.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Sets a field, returning the previous value.
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    /// Iterates fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renames the entry.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl Record for Entry {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> Option<&TagSet> {
        Some(&self.tags)
    }
}
