//! Reported changes and their display order.

use coursewatch_model::Offering;
use std::cmp::Ordering;
use std::fmt;

/// Whether an offering disappeared from or appeared in the catalog.
///
/// `Removed` sorts before `Added` so that a modified offering renders as
/// its removal immediately followed by its addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    Removed,
    Added,
}

impl ChangeKind {
    fn symbol(self) -> char {
        match self {
            ChangeKind::Removed => '-',
            ChangeKind::Added => '+',
        }
    }
}

/// One reported change: an offering tagged with a [`ChangeKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub kind: ChangeKind,
    pub offering: Offering,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.symbol(), self.offering)
    }
}

impl Ord for Change {
    /// Catalog slot first, kind second, title last.
    ///
    /// Grouping by slot before kind keeps a renamed offering's removal and
    /// addition adjacent instead of interleaving them with unrelated
    /// entries; the title tie-break keeps the order total.
    fn cmp(&self, other: &Self) -> Ordering {
        self.offering
            .number
            .cmp(&other.offering.number)
            .then_with(|| self.offering.section.cmp(&other.offering.section))
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.offering.name.cmp(&other.offering.name))
    }
}

impl PartialOrd for Change {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A deterministically ordered collection of changes.
///
/// Like [`Snapshot`], the collection re-sorts on every bulk insertion and
/// never deduplicates. Rendering is line-oriented: one change per line,
/// each followed by a newline; an empty set renders as empty text.
///
/// [`Snapshot`]: coursewatch_model::Snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    items: Vec<Change>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags each offering with `kind` and merges the batch into display
    /// order. Calling this once per kind yields a single fully ordered
    /// sequence spanning both kinds.
    pub fn push_all(&mut self, kind: ChangeKind, offerings: impl IntoIterator<Item = Offering>) {
        self.items
            .extend(offerings.into_iter().map(|offering| Change { kind, offering }));
        self.items.sort();
    }

    /// Whether the set reports no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of reported changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterates the changes in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.items.iter()
    }

    /// The rendered report, one line per change.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for change in &self.items {
            writeln!(f, "{change}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
