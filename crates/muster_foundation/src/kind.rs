//! Display names for record collections.

use std::fmt;

use crate::record::fold_case;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of record held by a collection, e.g. "hero" / "heroes".
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityKind {
    singular: String,
    plural: String,
}

impl EntityKind {
    /// Creates a kind whose plural is the singular with an `s` appended.
    #[must_use]
    pub fn new(singular: impl Into<String>) -> Self {
        let singular = singular.into();
        let plural = format!("{singular}s");
        Self { singular, plural }
    }

    /// Overrides the plural form.
    #[must_use]
    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = plural.into();
        self
    }

    /// The singular display name.
    #[must_use]
    pub fn singular(&self) -> &str {
        &self.singular
    }

    /// The plural display name.
    #[must_use]
    pub fn plural(&self) -> &str {
        &self.plural
    }

    /// Picks the singular or plural form for a count.
    #[must_use]
    pub fn for_count(&self, count: usize) -> &str {
        if count == 1 {
            &self.singular
        } else {
            &self.plural
        }
    }

    /// Returns true if `name` is either form of this kind, ignoring case.
    #[must_use]
    pub fn answers_to(&self, name: &str) -> bool {
        let name = fold_case(name);
        fold_case(&self.singular) == name || fold_case(&self.plural) == name
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.singular)
    }
}
