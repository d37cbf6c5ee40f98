//! Multiset difference between two snapshots.

use crate::{ChangeKind, ChangeSet};
use coursewatch_model::{Offering, Snapshot};

/// Compares two snapshots and reports what changed.
///
/// The difference is multiset-aware: each offering on one side consumes at
/// most one equal offering from the other side, so a catalog that
/// legitimately lists two equal offerings (same number, section and name,
/// different CRNs) only reports the net change in count. A plain
/// set-difference would collapse such duplicates and misreport them.
///
/// The result contains every unconsumed old offering as a removal and
/// every unconsumed new offering as an addition, in display order.
/// `diff(x, x)` is empty for any snapshot `x`.
pub fn diff(old: &Snapshot, new: &Snapshot) -> ChangeSet {
    let removed = leftover(old, new);
    let added = leftover(new, old);

    let mut changes = ChangeSet::new();
    changes.push_all(ChangeKind::Removed, removed);
    changes.push_all(ChangeKind::Added, added);
    changes
}

/// The offerings of `from` left over after every element of `consume` has
/// removed one equal match (first match in current order, one per element).
fn leftover(from: &Snapshot, consume: &Snapshot) -> Vec<Offering> {
    let mut remaining: Vec<Offering> = from.iter().cloned().collect();
    for offering in consume {
        if let Some(found) = remaining.iter().position(|candidate| candidate == offering) {
            remaining.remove(found);
        }
    }
    remaining
}
