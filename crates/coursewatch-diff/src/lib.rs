//! Snapshot reconciliation engine.
//!
//! Compares two catalog snapshots and produces a deterministically ordered
//! change report:
//! - [`diff`] computes the multiset difference between two [`Snapshot`]s
//! - [`Change`] is one reported addition or removal
//! - [`ChangeSet`] is the ordered collection handed to a notifier
//!
//! The engine is pure: it never fetches, never retries, and never mutates
//! its inputs.
//!
//! [`Snapshot`]: coursewatch_model::Snapshot

mod change;
mod reconcile;

pub use change::{Change, ChangeKind, ChangeSet};
pub use reconcile::diff;
