//! In-memory record collections acting as the console host.
//!
//! A catalog holds one collection per record kind. Lookups go through the
//! resolution cascade; mutations resolve first and then edit the single
//! matching entry in place.

use serde::{Deserialize, Serialize};
use tracing::debug;

use muster_foundation::record::fold_case;
use muster_foundation::{EntityIndex, EntityKind, Entry, Error, Record, Result};
use muster_format::outcome_to_result;
use muster_query::{ResolutionOutcome, resolve_query};

/// All records of one kind.
///
/// Decoding goes through [`Collection::insert`], so a collection read from a
/// snapshot never holds two entries with the same ID.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCollection")]
pub struct Collection {
    kind: EntityKind,
    entries: im::Vector<Entry>,
}

impl Collection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            entries: im::Vector::new(),
        }
    }

    /// The kind of record held.
    #[must_use]
    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// The entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &im::Vector<Entry> {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds an entry.
    ///
    /// # Errors
    ///
    /// Returns a duplicate-ID error if an entry with the same ID (ignoring
    /// case) already exists.
    pub fn insert(&mut self, entry: Entry) -> Result<()> {
        if self.entries.find_by_id(entry.id()).is_some() {
            return Err(Error::duplicate_id(self.kind.singular(), entry.id()));
        }
        self.entries.push_back(entry);
        Ok(())
    }

    /// Runs the resolution cascade over this collection.
    #[must_use]
    pub fn resolve(&self, query: &str) -> ResolutionOutcome<'_, Entry> {
        resolve_query(&self.entries, query)
    }

    /// Resolves `query` to exactly one entry.
    ///
    /// # Errors
    ///
    /// Returns a not-found or ambiguity error whose text is the standard
    /// console message for that outcome.
    pub fn lookup(&self, query: &str) -> Result<&Entry> {
        outcome_to_result(&self.kind, query, &self.resolve(query))
    }

    /// Resolves `query` to exactly one entry and returns it for mutation.
    ///
    /// # Errors
    ///
    /// Same as [`Collection::lookup`].
    pub fn lookup_mut(&mut self, query: &str) -> Result<&mut Entry> {
        let id = fold_case(self.lookup(query)?.id());
        let position = self
            .entries
            .iter()
            .position(|e| fold_case(e.id()) == id)
            .ok_or_else(|| Error::internal(format!("resolved entry '{id}' vanished")))?;
        self.entries
            .get_mut(position)
            .ok_or_else(|| Error::internal(format!("no entry at position {position}")))
    }
}

/// Named record collections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct Catalog {
    collections: Vec<Collection>,
}

/// A collection as encoded, before ID uniqueness is checked.
#[derive(Deserialize)]
pub(crate) struct RawCollection {
    kind: EntityKind,
    entries: Vec<Entry>,
}

impl TryFrom<RawCollection> for Collection {
    type Error = Error;

    fn try_from(raw: RawCollection) -> Result<Self> {
        let mut collection = Self::new(raw.kind);
        for entry in raw.entries {
            collection.insert(entry)?;
        }
        Ok(collection)
    }
}

/// A catalog as encoded, before kind and ID uniqueness are checked.
#[derive(Deserialize)]
pub(crate) struct RawCatalog {
    collections: Vec<RawCollection>,
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = Error;

    fn try_from(raw: RawCatalog) -> Result<Self> {
        let mut catalog = Self::new();
        for raw_collection in raw.collections {
            let collection = Collection::try_from(raw_collection)?;
            let kind = collection.kind();
            if catalog
                .collections
                .iter()
                .any(|c| c.kind.answers_to(kind.singular()) || c.kind.answers_to(kind.plural()))
            {
                return Err(Error::invalid_argument(format!(
                    "record kind '{kind}' appears more than once"
                )));
            }
            catalog.collections.push(collection);
        }
        Ok(catalog)
    }
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collection for `kind` unless one answering to the same
    /// singular name already exists. Returns the collection either way.
    pub fn add_kind(&mut self, kind: EntityKind) -> &mut Collection {
        let existing = self
            .collections
            .iter()
            .position(|c| c.kind.answers_to(kind.singular()));
        let index = existing.unwrap_or_else(|| {
            debug!(kind = %kind, "adding record kind");
            self.collections.push(Collection::new(kind));
            self.collections.len() - 1
        });
        &mut self.collections[index]
    }

    /// Adds an entry to the collection named `kind`.
    ///
    /// # Errors
    ///
    /// Returns an unknown-kind error or a duplicate-ID error.
    pub fn insert(&mut self, kind: &str, entry: Entry) -> Result<()> {
        self.collection_mut(kind)?.insert(entry)
    }

    /// Looks up a collection by singular or plural name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an unknown-kind error listing the known kinds.
    pub fn collection(&self, kind: &str) -> Result<&Collection> {
        self.collections
            .iter()
            .find(|c| c.kind.answers_to(kind))
            .ok_or_else(|| self.unknown_kind(kind))
    }

    /// Mutable form of [`Catalog::collection`].
    ///
    /// # Errors
    ///
    /// Returns an unknown-kind error listing the known kinds.
    pub fn collection_mut(&mut self, kind: &str) -> Result<&mut Collection> {
        match self.collections.iter().position(|c| c.kind.answers_to(kind)) {
            Some(index) => Ok(&mut self.collections[index]),
            None => Err(self.unknown_kind(kind)),
        }
    }

    /// Collections in insertion order.
    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.iter()
    }

    /// Total number of entries across all kinds.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.collections.iter().map(Collection::len).sum()
    }

    /// Resolves `query` within `kind` to exactly one entry.
    ///
    /// # Errors
    ///
    /// Returns an unknown-kind, not-found, or ambiguity error.
    pub fn resolve(&self, kind: &str, query: &str) -> Result<&Entry> {
        self.collection(kind)?.lookup(query)
    }

    /// Resolves `query` within `kind` and returns the entry for mutation.
    ///
    /// # Errors
    ///
    /// Returns an unknown-kind, not-found, or ambiguity error.
    pub fn entry_mut(&mut self, kind: &str, query: &str) -> Result<&mut Entry> {
        self.collection_mut(kind)?.lookup_mut(query)
    }

    fn unknown_kind(&self, kind: &str) -> Error {
        let known: Vec<&str> = self.collections.iter().map(|c| c.kind.singular()).collect();
        if known.is_empty() {
            Error::unknown_kind(kind, "none")
        } else {
            Error::unknown_kind(kind, known.join(", "))
        }
    }

    /// The fixed campaign fixture the standard test suite is written against.
    #[must_use]
    pub fn demo() -> Self {
        let mut catalog = Self::new();

        let heroes = catalog.add_kind(EntityKind::new("hero").with_plural("heroes"));
        for entry in [
            Entry::new("lord_1_1", "Derthert")
                .with_tags("lord,clan_leader,ruler")
                .with_field("clan", "clan_vlandia_1")
                .with_field("kingdom", "vlandia")
                .with_field("gold", "15000")
                .with_field("age", "52"),
            Entry::new("lord_1_11", "Pagarios")
                .with_tags("lord")
                .with_field("clan", "clan_vlandia_1")
                .with_field("kingdom", "vlandia")
                .with_field("gold", "4200"),
            Entry::new("lord_2_11", "Rhagaea")
                .with_tags("lord,clan_leader,ruler")
                .with_field("clan", "clan_empire_south_1")
                .with_field("kingdom", "empire_s")
                .with_field("gold", "21000"),
            Entry::new("lord_2_12", "Ira")
                .with_tags("lord")
                .with_field("clan", "clan_empire_south_1")
                .with_field("kingdom", "empire_s"),
            Entry::new("notable_1", "Garios")
                .with_tags("notable")
                .with_field("settlement", "town_ES1"),
            Entry::new("wanderer_1", "Lucon")
                .with_tags("wanderer")
                .with_field("skill", "scouting"),
            Entry::new("wanderer_2", "Ira")
                .with_tags("wanderer")
                .with_field("skill", "medicine"),
        ] {
            push_fixture(heroes, entry);
        }

        let clans = catalog.add_kind(EntityKind::new("clan"));
        for entry in [
            Entry::new("clan_vlandia_1", "dey Meroc")
                .with_tags("noble")
                .with_field("leader", "lord_1_1")
                .with_field("tier", "6"),
            Entry::new("clan_empire_south_1", "Pethon")
                .with_tags("noble")
                .with_field("leader", "lord_2_11")
                .with_field("tier", "5"),
            Entry::new("clan_bandit_1", "Sea Raiders").with_tags("bandit,minor"),
        ] {
            push_fixture(clans, entry);
        }

        let kingdoms = catalog.add_kind(EntityKind::new("kingdom"));
        for entry in [
            Entry::new("vlandia", "Vlandia").with_field("ruler", "lord_1_1"),
            Entry::new("empire", "Northern Empire").with_field("ruler", "lord_3_1"),
            Entry::new("empire_s", "Southern Empire").with_field("ruler", "lord_2_11"),
            Entry::new("empire_w", "Western Empire").with_field("ruler", "lord_4_1"),
        ] {
            push_fixture(kingdoms, entry);
        }

        let settlements = catalog.add_kind(EntityKind::new("settlement"));
        for entry in [
            Entry::new("town_V1", "Pravend")
                .with_tags("town")
                .with_field("owner", "clan_vlandia_1"),
            Entry::new("town_ES1", "Lageta")
                .with_tags("town")
                .with_field("owner", "clan_empire_south_1"),
            Entry::new("village_ES1_1", "Lagea")
                .with_tags("village")
                .with_field("bound", "town_ES1"),
            Entry::new("castle_V1", "Ocs Hall")
                .with_tags("castle")
                .with_field("owner", "clan_vlandia_1"),
            Entry::new("castle_V2", "Pravend Keep")
                .with_tags("castle")
                .with_field("owner", "clan_vlandia_1"),
        ] {
            push_fixture(settlements, entry);
        }

        catalog
    }
}

fn push_fixture(collection: &mut Collection, entry: Entry) {
    collection.entries.push_back(entry);
}

impl EntityIndex for Collection {
    type Record = Entry;

    fn records(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
