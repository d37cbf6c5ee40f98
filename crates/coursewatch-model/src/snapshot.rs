//! An ordered capture of the catalog at one point in time.

use crate::{Offering, Result};
use serde_json::{Map, Value};

/// The catalog's offering list, kept sorted by [`Offering`] order.
///
/// Duplicate offerings are retained as separate elements: the collection
/// is a sequence, not a set, and the reconciliation engine relies on the
/// duplicate counts. Insertion re-sorts with a stable sort, so elements
/// that compare equal keep their insertion order.
///
/// Equality is positional: same length, equal offering at every index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    items: Vec<Offering>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an offering, keeping the sequence sorted.
    pub fn insert(&mut self, offering: Offering) {
        self.items.push(offering);
        self.items.sort();
    }

    /// Number of offerings in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the snapshot has no offerings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the offerings in sort order.
    pub fn iter(&self) -> impl Iterator<Item = &Offering> {
        self.items.iter()
    }

    /// The offerings in sort order.
    #[must_use]
    pub fn as_slice(&self) -> &[Offering] {
        &self.items
    }

    /// Serializes the snapshot as a JSON array of offering records,
    /// preserving the current sort order.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Parses snapshot text: a JSON array of records, each with the five
    /// string keys `id`, `number`, `section`, `name`, `crn`.
    ///
    /// Array order in the text is insignificant; the snapshot re-sorts as
    /// it inserts each record.
    pub fn from_json(text: &str) -> Result<Self> {
        let records: Vec<Map<String, Value>> = serde_json::from_str(text)?;
        let mut snapshot = Self::new();
        for record in &records {
            snapshot.insert(Offering::from_map(record)?);
        }
        Ok(snapshot)
    }
}

impl FromIterator<Offering> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Offering>>(iter: I) -> Self {
        let mut items: Vec<Offering> = iter.into_iter().collect();
        // One stable sort over the whole batch leaves equal elements in
        // insertion order, the same as inserting one at a time.
        items.sort();
        Self { items }
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Offering;
    type IntoIter = std::slice::Iter<'a, Offering>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
